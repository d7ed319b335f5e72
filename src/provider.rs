use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    diff::{self, ChangeReport},
    error::DdlError,
    executor::QueryExecutor,
    schema::{NameScope, ResourceSchema},
    sql, validate,
    value::{Inputs, Value},
};

/// Fallback scope applied when inputs omit `database` or `schema`.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    pub database: Option<String>,
    pub schema: Option<String>,
}

/// What a successful create hands back to the orchestrator.
#[derive(Debug, Clone)]
pub struct CreateResult {
    /// The fully qualified object name, which doubles as the resource id.
    pub id: String,
    pub outputs: Inputs,
}

#[derive(Debug, Clone)]
pub struct UpdateResult {
    pub outputs: Inputs,
}

/// The create/diff/update/delete contract an orchestrator drives. State
/// persistence and sequencing stay with the caller; implementations only
/// turn one call into at most one executed statement.
#[async_trait]
pub trait ResourceLifecycle: Send + Sync {
    async fn create(&self, inputs: &Inputs) -> Result<CreateResult, DdlError>;

    /// Pure comparison; never touches the warehouse.
    fn diff(&self, id: &str, old: &Inputs, new: &Inputs) -> ChangeReport;

    async fn update(&self, id: &str, old: &Inputs, new: &Inputs) -> Result<UpdateResult, DdlError>;

    async fn delete(&self, id: &str, inputs: &Inputs) -> Result<(), DdlError>;
}

/// Generic [`ResourceLifecycle`] over one resource schema and any executor.
pub struct ResourceProvider {
    schema: ResourceSchema,
    defaults: Defaults,
    executor: Arc<dyn QueryExecutor>,
}

impl ResourceProvider {
    pub fn new(schema: ResourceSchema, defaults: Defaults, executor: Arc<dyn QueryExecutor>) -> Self {
        ResourceProvider {
            schema,
            defaults,
            executor,
        }
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// The object name from inputs, or an autogenerated one when the caller
    /// leaves naming to us.
    fn resolve_name(&self, inputs: &Inputs) -> Result<String, DdlError> {
        match inputs.get("name") {
            Some(Value::String(name)) if !name.is_empty() => Ok(validate::validate_object_name(name)?.to_string()),
            None | Some(Value::None) | Some(Value::String(_)) => Ok(autogenerated_name(self.schema.resource_type())),
            Some(value) => Err(DdlError::UnsupportedType {
                kind: value.kind(),
                context: "the name field".to_string(),
            }),
        }
    }

    fn full_name(&self, name: &str, inputs: &Inputs) -> Result<String, DdlError> {
        let database = field_or_default(inputs, "database", &self.defaults.database)?;
        let schema = field_or_default(inputs, "schema", &self.defaults.schema)?;
        sql::full_object_name(self.schema.scope(), database.as_deref(), schema.as_deref(), name)
    }

    /// Output state: the normalized attribute values plus the resolved
    /// identity fields.
    fn outputs(&self, name: &str, full_name: &str, inputs: &Inputs) -> Result<Inputs, DdlError> {
        let mut outputs = Inputs::new();
        for attribute in self.schema.attributes() {
            if let Some(value) = inputs.get(attribute.name()) {
                if !value.is_none() {
                    outputs.insert(attribute.name(), attribute.outputs(value));
                }
            }
        }

        outputs.insert("name", name);
        match self.schema.scope() {
            NameScope::Schema => {
                if let Some(database) = field_or_default(inputs, "database", &self.defaults.database)? {
                    outputs.insert("database", database);
                }
                if let Some(schema) = field_or_default(inputs, "schema", &self.defaults.schema)? {
                    outputs.insert("schema", schema);
                }
            }
            NameScope::Database => {
                if let Some(database) = field_or_default(inputs, "database", &self.defaults.database)? {
                    outputs.insert("database", database);
                }
            }
            NameScope::Account => {}
        }
        if self.schema.supports_temporary() {
            if let Some(temporary) = inputs.get("temporary").and_then(Value::as_bool) {
                outputs.insert("temporary", temporary);
            }
        }
        outputs.insert("full_name", full_name);
        Ok(outputs)
    }
}

#[async_trait]
impl ResourceLifecycle for ResourceProvider {
    async fn create(&self, inputs: &Inputs) -> Result<CreateResult, DdlError> {
        let name = self.resolve_name(inputs)?;
        let full_name = self.full_name(&name, inputs)?;
        let statement = sql::build_create(&self.schema, &full_name, inputs)?;

        tracing::debug!("create: {}", statement.sql);
        self.executor.execute(&statement.sql, &statement.bindings).await?;
        tracing::info!("created {} {}", self.schema.resource_type(), full_name);

        let outputs = self.outputs(&name, &full_name, inputs)?;
        Ok(CreateResult { id: full_name, outputs })
    }

    fn diff(&self, _id: &str, old: &Inputs, new: &Inputs) -> ChangeReport {
        diff::diff(&self.schema, old, new)
    }

    async fn update(&self, id: &str, old: &Inputs, new: &Inputs) -> Result<UpdateResult, DdlError> {
        let report = diff::diff(&self.schema, old, new);
        if !report.replaces.is_empty() {
            return Err(DdlError::ReplacementRequired(report.replaces.iter().cloned().collect()));
        }

        let fields: Vec<String> = report.changed.iter().cloned().collect();
        let statement = sql::build_alter(&self.schema, id, new, &fields)?;

        if statement.sql.is_empty() {
            tracing::debug!("update: no settable changes for {id}");
        } else {
            tracing::debug!("update: {}", statement.sql);
            self.executor.execute(&statement.sql, &statement.bindings).await?;
            tracing::info!("updated {} {}", self.schema.resource_type(), id);
        }

        // The resource keeps the identity it was created with.
        let name = match new.get("name").or_else(|| old.get("name")) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => id.rsplit('.').next().unwrap_or(id).to_string(),
        };
        Ok(UpdateResult {
            outputs: self.outputs(&name, id, new)?,
        })
    }

    async fn delete(&self, id: &str, _inputs: &Inputs) -> Result<(), DdlError> {
        let statement = sql::build_drop(&self.schema, id);
        tracing::debug!("delete: {}", statement.sql);
        self.executor.execute(&statement.sql, &statement.bindings).await?;
        tracing::info!("dropped {} {}", self.schema.resource_type(), id);
        Ok(())
    }
}

/// A scope field from inputs, falling back to the configured default when
/// the field is absent or unset. Non-string values are rejected, same as
/// for `name`.
fn field_or_default(inputs: &Inputs, field: &str, default: &Option<String>) -> Result<Option<String>, DdlError> {
    match inputs.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
        None | Some(Value::None) | Some(Value::String(_)) => Ok(default.clone()),
        Some(value) => Err(DdlError::UnsupportedType {
            kind: value.kind(),
            context: format!("the {field} field"),
        }),
    }
}

/// Names a resource when the caller does not, like `stage_1fc03f4a`.
fn autogenerated_name(resource_type: &str) -> String {
    let fragment = Uuid::new_v4().simple().to_string();
    format!("{}_{}", resource_type.to_lowercase().replace(' ', "_"), &fragment[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autogenerated_names_are_valid_identifiers() {
        let name = autogenerated_name("FILE FORMAT");
        assert!(name.starts_with("file_format_"));
        assert!(validate::validate_identifier(&name).is_ok());
        assert_ne!(autogenerated_name("STAGE"), autogenerated_name("STAGE"));
    }
}
