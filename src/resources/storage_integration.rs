use crate::{
    attribute::Attribute,
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE STORAGE INTEGRATION`, the two-word resource type.
/// The integration type and provider are fixed for the life of the object.
pub fn storage_integration() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "STORAGE INTEGRATION",
        NameScope::Account,
        vec![
            Attribute::identifier("type")?.required(),
            Attribute::identifier("storage_provider")?.required(),
            Attribute::string("storage_aws_role_arn")?,
            Attribute::boolean("enabled")?.required(),
            Attribute::string_list("storage_allowed_locations")?.required(),
            Attribute::string_list("storage_blocked_locations")?,
            Attribute::string("comment")?,
        ],
    )?
    .replace_on_change(&["name", "type", "storage_provider"]))
}
