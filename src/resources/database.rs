use crate::{
    attribute::Attribute,
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE DATABASE`.
pub fn database() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "DATABASE",
        NameScope::Account,
        vec![
            Attribute::integer("data_retention_time_in_days")?,
            Attribute::string("comment")?,
        ],
    )?
    .replace_on_change(&["name"]))
}
