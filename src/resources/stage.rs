use crate::{
    attribute::Attribute,
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE STAGE`, covering internal and external stages.
///
/// The inline `file_format` and `copy_options` groups take plain values;
/// named file formats are their own resource (see
/// [`file_format`](crate::resources::file_format)). Switching a stage
/// between internal and external, like renaming or rescoping it, means
/// replacing it.
pub fn stage() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "STAGE",
        NameScope::Schema,
        vec![
            Attribute::string("url")?,
            Attribute::string("storage_integration")?,
            Attribute::nested(
                "credentials",
                vec![
                    Attribute::string("aws_key_id")?,
                    Attribute::string("aws_secret_key")?,
                    Attribute::string("aws_token")?,
                    Attribute::string("aws_role")?,
                    Attribute::string("azure_sas_token")?,
                ],
            )?,
            Attribute::nested(
                "encryption",
                vec![
                    Attribute::string("type")?,
                    Attribute::string("master_key")?,
                    Attribute::string("kms_key_id")?,
                ],
            )?,
            Attribute::nested("file_format", file_format_options()?)?,
            Attribute::nested(
                "copy_options",
                vec![
                    Attribute::string("on_error")?,
                    Attribute::integer("size_limit")?,
                    Attribute::boolean("purge")?,
                    Attribute::boolean("return_failed_only")?,
                    Attribute::string("match_by_column_name")?,
                    Attribute::boolean("enforce_length")?,
                    Attribute::boolean("truncatecolumns")?,
                    Attribute::boolean("force")?,
                ],
            )?,
            Attribute::string("comment")?,
        ],
    )?
    .with_temporary()
    .replace_on_change(&["name", "database", "schema", "temporary", "url"]))
}

fn file_format_options() -> Result<Vec<Attribute>, DdlError> {
    Ok(vec![
        Attribute::string("format_name")?,
        Attribute::string("type")?,
        Attribute::string("compression")?,
        Attribute::string("record_delimiter")?,
        Attribute::string("field_delimiter")?,
        Attribute::string("file_extension")?,
        Attribute::integer("skip_header")?,
        Attribute::boolean("skip_blank_lines")?,
        Attribute::string("date_format")?,
        Attribute::string("time_format")?,
        Attribute::string("timestamp_format")?,
        Attribute::string("binary_format")?,
        Attribute::string("escape")?,
        Attribute::string("escape_unenclosed_field")?,
        Attribute::boolean("trim_space")?,
        Attribute::string("field_optionally_enclosed_by")?,
        Attribute::string_list("null_if")?,
        Attribute::boolean("error_on_column_count_mismatch")?,
        Attribute::boolean("validate_utf8")?,
        Attribute::boolean("empty_field_as_null")?,
        Attribute::boolean("skip_byte_order_mark")?,
        Attribute::string("encoding")?,
        Attribute::boolean("disable_snowflake_data")?,
        Attribute::boolean("strip_null_values")?,
        Attribute::boolean("strip_outer_element")?,
        Attribute::boolean("strip_outer_array")?,
        Attribute::boolean("enable_octal")?,
        Attribute::boolean("preserve_space")?,
        Attribute::boolean("snappy_compression")?,
        Attribute::boolean("ignore_utf8_errors")?,
        Attribute::boolean("allow_duplicate")?,
        Attribute::boolean("disable_auto_convert")?,
        Attribute::boolean("binary_as_text")?,
    ])
}
