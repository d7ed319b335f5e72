use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DdlError;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z0-9$_%]+$").unwrap();
    static ref OBJECT_NAME: Regex = Regex::new(r"^[A-Za-z0-9$_ ]+$").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Validates a Snowflake identifier. See
/// <https://docs.snowflake.net/manuals/sql-reference/identifiers-syntax.html>
///
/// Identifiers cannot be parameter-bound, so anything interpolated into SQL
/// as an identifier must pass through here first.
pub fn validate_identifier(value: &str) -> Result<&str, DdlError> {
    if IDENTIFIER.is_match(value) {
        Ok(value)
    } else {
        Err(DdlError::InvalidIdentifier(value.to_string()))
    }
}

/// Validates a Snowflake object name. Object names are looser than
/// identifiers: they may contain spaces.
pub fn validate_object_name(value: &str) -> Result<&str, DdlError> {
    if OBJECT_NAME.is_match(value) {
        Ok(value)
    } else {
        Err(DdlError::InvalidObjectName(value.to_string()))
    }
}

/// Validates a string holding a non-negative integer, for inlining into SQL
/// without quoting.
pub fn validate_integer(value: &str) -> Result<&str, DdlError> {
    if INTEGER.is_match(value) {
        Ok(value)
    } else {
        Err(DdlError::InvalidInteger(value.to_string()))
    }
}

/// Validates an identifier and wraps it in double quotes.
pub fn enquote_identifier(value: &str) -> Result<String, DdlError> {
    Ok(format!("\"{}\"", validate_identifier(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_word_chars_dollar_and_percent() {
        assert_eq!(validate_identifier("Sales_DB$1").unwrap(), "Sales_DB$1");
        assert_eq!(validate_identifier("SKIP_FILE_45%").unwrap(), "SKIP_FILE_45%");
    }

    #[test]
    fn identifier_rejects_injection_characters() {
        assert!(validate_identifier("bad'name").is_err());
        assert!(validate_identifier("bad;name").is_err());
        assert!(validate_identifier("bad name").is_err());
        assert!(validate_identifier("").is_err());
    }

    #[test]
    fn object_name_allows_spaces() {
        assert!(validate_object_name("My Stage").is_ok());
        assert!(validate_object_name("My \"Stage\"").is_err());
        assert!(validate_object_name("stage;--").is_err());
    }

    #[test]
    fn integer_is_digits_only() {
        assert!(validate_integer("100").is_ok());
        assert!(validate_integer("1e3").is_err());
        assert!(validate_integer("-1").is_err());
        assert!(validate_integer("").is_err());
    }

    #[test]
    fn enquote_wraps_valid_identifiers() {
        assert_eq!(enquote_identifier("LOADING_WH").unwrap(), "\"LOADING_WH\"");
        assert!(enquote_identifier("bad name").is_err());
    }
}
