use crate::{
    attribute::Attribute,
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE WAREHOUSE`. Account scoped, so the full name is just
/// the name. `initially_suspended` only means anything at creation time,
/// which makes it a replacement field.
pub fn warehouse() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "WAREHOUSE",
        NameScope::Account,
        vec![
            Attribute::string("warehouse_size")?,
            Attribute::integer("max_cluster_count")?,
            Attribute::integer("min_cluster_count")?,
            Attribute::identifier("scaling_policy")?,
            Attribute::integer("auto_suspend")?,
            Attribute::boolean("auto_resume")?,
            Attribute::boolean("initially_suspended")?,
            Attribute::string("comment")?,
        ],
    )?
    .replace_on_change(&["name", "initially_suspended"]))
}
