use crate::{
    error::DdlError,
    schema::{NameScope, ResourceSchema},
    validate,
    value::{Inputs, Value},
};

/// A finished DDL statement plus the parameters bound to its `%s`
/// placeholders, in order. The number of placeholders always equals the
/// number of bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub bindings: Vec<String>,
}

/// Composes the fully qualified object name for a resource, validating every
/// segment first.
///
/// A schema-scoped resource with a database but no schema renders as
/// `db..name`: the empty segment is deliberate and hands schema resolution
/// back to the session defaults.
pub fn full_object_name(
    scope: NameScope,
    database: Option<&str>,
    schema: Option<&str>,
    name: &str,
) -> Result<String, DdlError> {
    let name = validate::validate_object_name(name)?;
    let database = database.map(validate::validate_object_name).transpose()?;
    let schema = schema.map(validate::validate_object_name).transpose()?;

    Ok(match scope {
        NameScope::Account => name.to_string(),
        NameScope::Database => match database {
            Some(database) => format!("{database}.{name}"),
            None => name.to_string(),
        },
        NameScope::Schema => match (database, schema) {
            (Some(database), Some(schema)) => format!("{database}.{schema}.{name}"),
            (Some(database), None) => format!("{database}..{name}"),
            (None, Some(schema)) => format!("{schema}.{name}"),
            (None, None) => name.to_string(),
        },
    })
}

/// Builds the CREATE statement for a resource: a header line, then one
/// clause line per attribute that has a value, joined with newlines.
pub fn build_create(schema: &ResourceSchema, full_name: &str, inputs: &Inputs) -> Result<Statement, DdlError> {
    let mut lines = Vec::with_capacity(schema.attributes().len() + 1);
    let mut bindings = Vec::new();

    let temporary = schema.supports_temporary() && inputs.get("temporary").and_then(Value::as_bool).unwrap_or(false);
    if temporary {
        lines.push(format!("CREATE TEMPORARY {} {}", schema.resource_type(), full_name));
    } else {
        lines.push(format!("CREATE {} {}", schema.resource_type(), full_name));
    }

    for attribute in schema.attributes() {
        let value = inputs.get(attribute.name()).unwrap_or(&Value::None);
        if let Some(clause) = attribute.render(value)? {
            lines.push(clause.sql);
            bindings.extend(clause.bindings);
        }
    }

    Ok(Statement {
        sql: lines.join("\n"),
        bindings,
    })
}

/// Builds a single-line `ALTER ... SET` statement covering the given fields.
///
/// Fields unknown to the schema or with an unset new value are skipped; a
/// SET and an UNSET cannot share one statement, and unsetting is left to a
/// replacement. When nothing remains the returned statement is empty and
/// must not be executed.
pub fn build_alter(schema: &ResourceSchema, full_name: &str, inputs: &Inputs, fields: &[String]) -> Result<Statement, DdlError> {
    let mut clauses = Vec::new();
    let mut bindings = Vec::new();

    for field in fields {
        let Some(attribute) = schema.attribute(field) else {
            continue;
        };
        let value = inputs.get(field).unwrap_or(&Value::None);
        if value.is_none() {
            continue;
        }
        if let Some(clause) = attribute.render(value)? {
            clauses.push(clause.sql);
            bindings.extend(clause.bindings);
        }
    }

    if clauses.is_empty() {
        return Ok(Statement {
            sql: String::new(),
            bindings,
        });
    }

    Ok(Statement {
        sql: format!("ALTER {} {} SET {}", schema.resource_type(), full_name, clauses.join(" ")),
        bindings,
    })
}

/// Builds the DROP statement for a resource.
pub fn build_drop(schema: &ResourceSchema, full_name: &str) -> Statement {
    Statement {
        sql: format!("DROP {} {}", schema.resource_type(), full_name),
        bindings: Vec::new(),
    }
}

/// Substitutes each `%s` placeholder left to right with its binding as an
/// escaped single-quoted literal, for drivers that only take finished text.
/// Replacement values are never rescanned, so bindings containing `%s` are
/// safe.
pub fn bind_inline(sql: &str, bindings: &[String]) -> Result<String, DdlError> {
    let expected = sql.matches("%s").count();
    if expected != bindings.len() {
        return Err(DdlError::BindingMismatch {
            expected,
            supplied: bindings.len(),
        });
    }

    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;
    for binding in bindings {
        let Some(position) = rest.find("%s") else {
            break;
        };
        out.push_str(&rest[..position]);
        out.push('\'');
        out.push_str(&binding.replace('\'', "''"));
        out.push('\'');
        rest = &rest[position + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
