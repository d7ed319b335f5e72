use indexmap::IndexMap;

use crate::{
    error::DdlError,
    validate,
    value::{self, Value},
};

/// One rendered `NAME = <value>` segment, plus the parameters bound to its
/// `%s` placeholders in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub sql: String,
    pub bindings: Vec<String>,
}

/// How an attribute turns a [`Value`] into SQL.
///
/// String values are always parameter-bound; everything that cannot be bound
/// (identifiers, numbers, booleans) is validated and inlined instead.
#[derive(Debug, Clone)]
pub enum AttributeKind {
    /// Bound as a `%s` parameter.
    String,
    /// Validated and inlined unquoted.
    Identifier,
    /// Inlined as a bare numeric literal. Accepts integers, integral floats
    /// and digit-only strings.
    Integer,
    /// Inlined as TRUE or FALSE.
    Boolean,
    /// A parenthesized list of bound strings: `(%s,%s)`. An empty list
    /// renders as `()`.
    StringList,
    /// A parenthesized group of child attributes rendered from a map value,
    /// like `FILE_FORMAT = (FORMAT_NAME = %s, SKIP_HEADER = 1)`.
    Struct(Vec<Attribute>),
    /// Accepts the keyword AUTO (any case) in place of a value of the inner
    /// kind, emitting it bare and unbound.
    ValueOrAuto(Box<AttributeKind>),
    /// Accepts the keyword NONE (any case) in place of a value of the inner
    /// kind, emitting it bare and unbound.
    ValueOrNone(Box<AttributeKind>),
}

/// One field of a resource schema: a logical name, the uppercased name it
/// renders under, whether it is required, and its rendering kind.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    sql_name: String,
    required: bool,
    kind: AttributeKind,
}

impl Attribute {
    pub fn string(name: &str) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::String)
    }

    pub fn identifier(name: &str) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::Identifier)
    }

    pub fn integer(name: &str) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::Integer)
    }

    pub fn boolean(name: &str) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::Boolean)
    }

    pub fn string_list(name: &str) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::StringList)
    }

    /// A struct attribute with the given child attributes, rendered in
    /// declaration order.
    pub fn nested(name: &str, children: Vec<Attribute>) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::Struct(children))
    }

    pub fn value_or_auto(name: &str, inner: AttributeKind) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::ValueOrAuto(Box::new(inner)))
    }

    pub fn value_or_none(name: &str, inner: AttributeKind) -> Result<Self, DdlError> {
        Self::new(name, AttributeKind::ValueOrNone(Box::new(inner)))
    }

    fn new(name: &str, kind: AttributeKind) -> Result<Self, DdlError> {
        validate::validate_identifier(name)?;
        Ok(Self {
            name: name.to_string(),
            sql_name: name.to_uppercase(),
            required: false,
            kind,
        })
    }

    /// Marks the attribute as required: rendering without a value becomes an
    /// error instead of an omission.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_name(&self) -> &str {
        &self.sql_name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Renders `SQL_NAME = <value>` for this attribute. Returns `Ok(None)`
    /// when the value is absent and the attribute is optional, so the caller
    /// can filter before joining clauses.
    pub fn render(&self, value: &Value) -> Result<Option<Clause>, DdlError> {
        if value.is_none() {
            if self.required {
                return Err(DdlError::MissingRequiredAttribute(self.name.clone()));
            }
            return Ok(None);
        }
        Ok(Some(render_kind(&self.kind, &self.name, &self.sql_name, value)?))
    }

    /// The value as it surfaces in resource outputs. Scalars pass through;
    /// structs drop unset and undeclared keys so outputs mirror exactly what
    /// was rendered.
    pub fn outputs(&self, value: &Value) -> Value {
        match (&self.kind, value) {
            (AttributeKind::Struct(children), Value::Map(entries)) => {
                let mut normalized = IndexMap::new();
                for child in children {
                    if let Some(child_value) = entries.get(child.name()) {
                        if !child_value.is_none() {
                            normalized.insert(child.name().to_string(), child.outputs(child_value));
                        }
                    }
                }
                Value::Map(normalized)
            }
            _ => value.clone(),
        }
    }
}

fn render_kind(kind: &AttributeKind, name: &str, sql_name: &str, value: &Value) -> Result<Clause, DdlError> {
    match kind {
        AttributeKind::String => {
            let Value::String(s) = value else {
                return Err(unsupported(value, name));
            };
            Ok(Clause {
                sql: format!("{sql_name} = %s"),
                bindings: vec![s.clone()],
            })
        }
        AttributeKind::Identifier => {
            let Value::String(s) = value else {
                return Err(unsupported(value, name));
            };
            Ok(Clause {
                sql: format!("{} = {}", sql_name, validate::validate_identifier(s)?),
                bindings: Vec::new(),
            })
        }
        AttributeKind::Integer => {
            let literal = match value {
                Value::Int(i) => i.to_string(),
                Value::Float(f) => match value::integral_float(*f) {
                    Some(int) => int.to_string(),
                    None => return Err(DdlError::InvalidInteger(f.to_string())),
                },
                Value::String(s) => validate::validate_integer(s)?.to_string(),
                _ => return Err(unsupported(value, name)),
            };
            Ok(Clause {
                sql: format!("{sql_name} = {literal}"),
                bindings: Vec::new(),
            })
        }
        AttributeKind::Boolean => {
            let Value::Bool(b) = value else {
                return Err(unsupported(value, name));
            };
            Ok(Clause {
                sql: format!("{} = {}", sql_name, if *b { "TRUE" } else { "FALSE" }),
                bindings: Vec::new(),
            })
        }
        AttributeKind::StringList => {
            let Value::List(items) = value else {
                return Err(unsupported(value, name));
            };
            let mut bindings = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(s) = item else {
                    return Err(unsupported(item, name));
                };
                bindings.push(s.clone());
            }
            let placeholders = vec!["%s"; bindings.len()].join(",");
            Ok(Clause {
                sql: format!("{sql_name} = ({placeholders})"),
                bindings,
            })
        }
        AttributeKind::Struct(children) => {
            let Value::Map(entries) = value else {
                return Err(unsupported(value, name));
            };
            let mut parts = Vec::new();
            let mut bindings = Vec::new();
            for child in children {
                let child_value = entries.get(child.name()).unwrap_or(&Value::None);
                if let Some(clause) = child.render(child_value)? {
                    parts.push(clause.sql);
                    bindings.extend(clause.bindings);
                }
            }
            Ok(Clause {
                sql: format!("{} = ({})", sql_name, parts.join(", ")),
                bindings,
            })
        }
        AttributeKind::ValueOrAuto(inner) => render_keyword_or(inner, "AUTO", name, sql_name, value),
        AttributeKind::ValueOrNone(inner) => render_keyword_or(inner, "NONE", name, sql_name, value),
    }
}

/// The sentinel keyword (any case) renders bare and unbound; any other value
/// renders through the wrapped kind.
fn render_keyword_or(
    inner: &AttributeKind,
    keyword: &str,
    name: &str,
    sql_name: &str,
    value: &Value,
) -> Result<Clause, DdlError> {
    if let Value::String(s) = value {
        if s.eq_ignore_ascii_case(keyword) {
            return Ok(Clause {
                sql: format!("{sql_name} = {keyword}"),
                bindings: Vec::new(),
            });
        }
    }
    render_kind(inner, name, sql_name, value)
}

fn unsupported(value: &Value, attribute: &str) -> DdlError {
    DdlError::UnsupportedType {
        kind: value.kind(),
        context: format!("attribute {attribute}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(attribute: &Attribute, value: impl Into<Value>) -> Clause {
        attribute.render(&value.into()).unwrap().unwrap()
    }

    #[test]
    fn string_attributes_bind_their_value() {
        let attribute = Attribute::string("comment").unwrap();
        let clause = render(&attribute, "a 'quoted' remark");
        assert_eq!(clause.sql, "COMMENT = %s");
        assert_eq!(clause.bindings, vec!["a 'quoted' remark"]);
    }

    #[test]
    fn identifier_attributes_inline_unquoted() {
        let attribute = Attribute::identifier("type").unwrap();
        let clause = render(&attribute, "CSV");
        assert_eq!(clause.sql, "TYPE = CSV");
        assert!(clause.bindings.is_empty());

        assert!(attribute.render(&Value::from("CSV; DROP TABLE x")).is_err());
    }

    #[test]
    fn integer_attributes_inline_from_any_numeric_shape() {
        let attribute = Attribute::integer("skip_header").unwrap();
        assert_eq!(render(&attribute, 100).sql, "SKIP_HEADER = 100");
        assert_eq!(render(&attribute, 100.0).sql, "SKIP_HEADER = 100");
        assert_eq!(render(&attribute, "100").sql, "SKIP_HEADER = 100");
        assert!(attribute.render(&Value::Float(1.5)).is_err());
        assert!(attribute.render(&Value::from("1x0")).is_err());
    }

    #[test]
    fn integer_attributes_reject_floats_beyond_i64() {
        let attribute = Attribute::integer("skip_header").unwrap();
        assert!(matches!(
            attribute.render(&Value::Float(1e300)).unwrap_err(),
            DdlError::InvalidInteger(_)
        ));
        assert!(matches!(
            attribute.render(&Value::Float(9.3e18)).unwrap_err(),
            DdlError::InvalidInteger(_)
        ));
        assert_eq!(render(&attribute, 9e15).sql, "SKIP_HEADER = 9000000000000000");
    }

    #[test]
    fn boolean_attributes_inline_keywords() {
        let attribute = Attribute::boolean("trim_space").unwrap();
        assert_eq!(render(&attribute, true).sql, "TRIM_SPACE = TRUE");
        assert_eq!(render(&attribute, false).sql, "TRIM_SPACE = FALSE");
        assert!(attribute.render(&Value::from("true")).is_err());
    }

    #[test]
    fn string_lists_emit_one_placeholder_per_element() {
        let attribute = Attribute::string_list("null_if").unwrap();
        let clause = render(&attribute, vec!["N", "NULL"]);
        assert_eq!(clause.sql, "NULL_IF = (%s,%s)");
        assert_eq!(clause.bindings, vec!["N", "NULL"]);

        let empty = render(&attribute, Vec::<String>::new());
        assert_eq!(empty.sql, "NULL_IF = ()");
        assert!(empty.bindings.is_empty());

        assert!(attribute.render(&Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn structs_render_children_in_declaration_order() {
        let attribute = Attribute::nested(
            "file_format",
            vec![
                Attribute::string("format_name").unwrap(),
                Attribute::string("type").unwrap(),
                Attribute::integer("skip_header").unwrap(),
            ],
        )
        .unwrap();

        let value: Value = serde_json::from_value(serde_json::json!({
            "type": "CSV",
            "skip_header": 2,
            "format_name": "f1",
            "unknown_field": "ignored"
        }))
        .unwrap();

        let clause = attribute.render(&value).unwrap().unwrap();
        assert_eq!(clause.sql, "FILE_FORMAT = (FORMAT_NAME = %s, TYPE = %s, SKIP_HEADER = 2)");
        assert_eq!(clause.bindings, vec!["f1", "CSV"]);
    }

    #[test]
    fn structs_omit_unset_children_and_enforce_required_ones() {
        let optional = Attribute::nested("credentials", vec![Attribute::string("aws_role").unwrap()]).unwrap();
        let clause = optional.render(&Value::Map(IndexMap::new())).unwrap().unwrap();
        assert_eq!(clause.sql, "CREDENTIALS = ()");

        let strict = Attribute::nested("credentials", vec![Attribute::string("aws_role").unwrap().required()]).unwrap();
        let err = strict.render(&Value::Map(IndexMap::new())).unwrap_err();
        assert!(matches!(err, DdlError::MissingRequiredAttribute(field) if field == "aws_role"));
    }

    #[test]
    fn sentinel_keywords_render_bare() {
        let compression = Attribute::value_or_auto("compression", AttributeKind::String).unwrap();
        assert_eq!(render(&compression, "AUTO").sql, "COMPRESSION = AUTO");
        assert_eq!(render(&compression, "auto").sql, "COMPRESSION = AUTO");
        let bound = render(&compression, "GZIP");
        assert_eq!(bound.sql, "COMPRESSION = %s");
        assert_eq!(bound.bindings, vec!["GZIP"]);

        let delimiter = Attribute::value_or_none("field_delimiter", AttributeKind::String).unwrap();
        assert_eq!(render(&delimiter, "None").sql, "FIELD_DELIMITER = NONE");
        assert_eq!(render(&delimiter, "|").bindings, vec!["|"]);
    }

    #[test]
    fn optional_attributes_render_nothing_without_a_value() {
        let attribute = Attribute::string("comment").unwrap();
        assert_eq!(attribute.render(&Value::None).unwrap(), None);
    }

    #[test]
    fn required_attributes_error_without_a_value() {
        let attribute = Attribute::identifier("type").unwrap().required();
        let err = attribute.render(&Value::None).unwrap_err();
        assert!(matches!(err, DdlError::MissingRequiredAttribute(field) if field == "type"));
    }

    #[test]
    fn attribute_names_must_be_identifiers() {
        assert!(Attribute::string("bad name").is_err());
        assert!(Attribute::string("comment").is_ok());
    }

    #[test]
    fn outputs_normalize_struct_values() {
        let attribute = Attribute::nested(
            "file_format",
            vec![Attribute::string("format_name").unwrap(), Attribute::string("type").unwrap()],
        )
        .unwrap();

        let value: Value = serde_json::from_value(serde_json::json!({
            "format_name": "f1",
            "type": null,
            "unknown_field": "dropped"
        }))
        .unwrap();

        let normalized = attribute.outputs(&value);
        let expected: Value = serde_json::from_value(serde_json::json!({ "format_name": "f1" })).unwrap();
        assert_eq!(normalized, expected);
    }
}
