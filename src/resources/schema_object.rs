use crate::{
    attribute::Attribute,
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE SCHEMA`. Database scoped: `ANALYTICS.STAGING`. Named
/// `schema_object` because `schema` is taken by the scope field itself.
pub fn schema_object() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "SCHEMA",
        NameScope::Database,
        vec![
            Attribute::integer("data_retention_time_in_days")?,
            Attribute::string("comment")?,
        ],
    )?
    .replace_on_change(&["name", "database"]))
}
