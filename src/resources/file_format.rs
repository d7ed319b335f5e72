use crate::{
    attribute::{Attribute, AttributeKind},
    error::DdlError,
    schema::{NameScope, ResourceSchema},
};

/// Schema for `CREATE FILE FORMAT`, the named standalone resource.
///
/// Several format options accept a keyword in place of a value: the
/// compression and date/time formats default through AUTO, delimiters and
/// escapes can be switched off with NONE. The format type itself cannot be
/// altered once created.
pub fn file_format() -> Result<ResourceSchema, DdlError> {
    Ok(ResourceSchema::new(
        "FILE FORMAT",
        NameScope::Schema,
        vec![
            Attribute::identifier("type")?.required(),
            Attribute::value_or_auto("compression", AttributeKind::String)?,
            Attribute::value_or_none("record_delimiter", AttributeKind::String)?,
            Attribute::value_or_none("field_delimiter", AttributeKind::String)?,
            Attribute::string("file_extension")?,
            Attribute::integer("skip_header")?,
            Attribute::boolean("skip_blank_lines")?,
            Attribute::value_or_auto("date_format", AttributeKind::String)?,
            Attribute::value_or_auto("time_format", AttributeKind::String)?,
            Attribute::value_or_auto("timestamp_format", AttributeKind::String)?,
            Attribute::identifier("binary_format")?,
            Attribute::value_or_none("escape", AttributeKind::String)?,
            Attribute::value_or_none("escape_unenclosed_field", AttributeKind::String)?,
            Attribute::boolean("trim_space")?,
            Attribute::value_or_none("field_optionally_enclosed_by", AttributeKind::String)?,
            Attribute::string_list("null_if")?,
            Attribute::boolean("error_on_column_count_mismatch")?,
            Attribute::boolean("validate_utf8")?,
            Attribute::boolean("empty_field_as_null")?,
            Attribute::boolean("skip_byte_order_mark")?,
            Attribute::value_or_none("encoding", AttributeKind::String)?,
            Attribute::string("comment")?,
        ],
    )?
    .replace_on_change(&["type", "database", "name", "schema"]))
}
