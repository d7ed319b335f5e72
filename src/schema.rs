use indexmap::IndexSet;

use crate::{attribute::Attribute, error::DdlError, validate};

/// Where a resource's name lives in the object hierarchy, which decides how
/// its fully qualified name is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    /// Named at the account level, like warehouses: `LOADING_WH`.
    Account,
    /// Named inside a database, like schemas: `ANALYTICS.STAGING`.
    Database,
    /// Named inside a schema, like stages: `ANALYTICS.STAGING.MY_STAGE`.
    Schema,
}

/// Declarative description of one resource type: its SQL keyword, its name
/// scope, its ordered attributes, and which fields force replacement when
/// they change.
///
/// The identity fields `name`, `database`, `schema` and `temporary` are
/// handled by the statement builders directly and are not declared as
/// attributes. Schemas are immutable once built and freely shareable.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    resource_type: String,
    scope: NameScope,
    attributes: Vec<Attribute>,
    replace_on_change: IndexSet<String>,
    supports_temporary: bool,
}

impl ResourceSchema {
    /// `resource_type` is the SQL keyword, like `STAGE` or `FILE FORMAT`.
    pub fn new(resource_type: &str, scope: NameScope, attributes: Vec<Attribute>) -> Result<Self, DdlError> {
        validate::validate_object_name(resource_type)?;

        let mut seen = IndexSet::new();
        for attribute in &attributes {
            if !seen.insert(attribute.name().to_string()) {
                return Err(DdlError::DuplicateAttribute(attribute.name().to_string()));
            }
        }

        Ok(Self {
            resource_type: resource_type.to_string(),
            scope,
            attributes,
            replace_on_change: IndexSet::new(),
            supports_temporary: false,
        })
    }

    /// Marks fields whose change forces a destroy-and-recreate instead of an
    /// in-place ALTER.
    pub fn replace_on_change(mut self, fields: &[&str]) -> Self {
        self.replace_on_change = fields.iter().map(|field| field.to_string()).collect();
        self
    }

    /// Allows `CREATE TEMPORARY <resource_type>` when inputs set `temporary`.
    pub fn with_temporary(mut self) -> Self {
        self.supports_temporary = true;
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn scope(&self) -> NameScope {
        self.scope
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name() == name)
    }

    pub fn replaces(&self) -> &IndexSet<String> {
        &self.replace_on_change
    }

    pub fn supports_temporary(&self) -> bool {
        self.supports_temporary
    }
}
