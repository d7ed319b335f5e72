use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::DdlError, validate};

/// A desired-state value for one resource field.
///
/// The untagged serde representation lets desired state round-trip through
/// plain JSON documents: `null` becomes [`Value::None`], objects become
/// ordered maps, and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// True for the values the diff engine treats as "not set": none, the
    /// empty string, the empty list, and the empty map. Zero and false are
    /// real values and are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::None => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Renders the value as an inline SQL literal. `None` renders as nothing
    /// at all, so optional clauses can be filtered out before joining.
    pub fn to_sql(&self) -> Result<Option<String>, DdlError> {
        match self {
            Value::None => Ok(None),
            other => Ok(Some(other.to_sql_strict()?)),
        }
    }

    /// As [`Value::to_sql`], but `None` is an error. List elements and map
    /// values render through this form.
    pub fn to_sql_strict(&self) -> Result<String, DdlError> {
        match self {
            Value::None => Err(DdlError::UnsupportedType {
                kind: "none",
                context: "an inline SQL literal".to_string(),
            }),
            Value::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => float_to_sql(*f),
            Value::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::to_sql_strict).collect::<Result<_, _>>()?;
                Ok(format!("({})", rendered.join(",")))
            }
            Value::Map(entries) => {
                let mut pairs = Vec::new();
                for (key, value) in entries {
                    if value.is_none() {
                        continue;
                    }
                    validate::validate_identifier(key)?;
                    pairs.push(format!("{} = {}", key.to_uppercase(), value.to_sql_strict()?));
                }
                Ok(format!("({})", pairs.join(",")))
            }
        }
    }
}

/// The exact `i64` a float represents, if it represents one. The upper
/// bound is strict: `i64::MAX as f64` rounds up to 2^63, one past the
/// largest `i64`.
pub(crate) fn integral_float(value: f64) -> Option<i64> {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}

/// Integral floats collapse to plain integers, so `3.0` renders as `3`.
/// Integral floats outside the `i64` range keep their own digits.
fn float_to_sql(value: f64) -> Result<String, DdlError> {
    if !value.is_finite() {
        return Err(DdlError::UnsupportedType {
            kind: "non-finite float",
            context: "an inline SQL literal".to_string(),
        });
    }
    match integral_float(value) {
        Some(int) => Ok(int.to_string()),
        None => Ok(value.to_string()),
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::None,
        }
    }
}

/// The ordered field map a caller hands to the generator and the diff
/// engine: one entry per resource field, including the identity fields
/// `name`, `database` and `schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs(IndexMap<String, Value>);

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a desired-state JSON document, as handed over by an
    /// orchestrator.
    pub fn from_json(document: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(document)
    }

    /// Builder-style insert, for assembling inputs inline.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, Value>> for Inputs {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self(fields)
    }
}

impl<'a> IntoIterator for &'a Inputs {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
