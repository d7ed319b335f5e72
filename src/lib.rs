//! Attribute-driven DDL generation and state diffing for Snowflake
//! resources.
//!
//! Each resource type is described by a [`ResourceSchema`]: an ordered list
//! of typed attributes plus the fields whose change forces replacement. The
//! [`sql`] module turns a schema and a desired-state [`Inputs`] map into
//! parameterized CREATE/ALTER/DROP statements, [`diff`](diff::diff)
//! classifies field-level deltas, and [`ResourceProvider`] wires both into a
//! create/diff/update/delete lifecycle over a [`QueryExecutor`].
//!
//! String values are always parameter-bound with `%s` placeholders;
//! identifiers, numbers and booleans are validated and inlined, because
//! Snowflake cannot bind them.
//!
//! ```
//! use snowform::{resources, sql, Inputs};
//!
//! # fn main() -> Result<(), snowform::DdlError> {
//! let schema = resources::warehouse()?;
//! let inputs = Inputs::new().set("warehouse_size", "X-Small").set("auto_suspend", 300);
//!
//! let statement = sql::build_create(&schema, "LOADING_WH", &inputs)?;
//! assert_eq!(statement.sql, "CREATE WAREHOUSE LOADING_WH\nWAREHOUSE_SIZE = %s\nAUTO_SUSPEND = 300");
//! assert_eq!(statement.bindings, vec!["X-Small"]);
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod diff;
pub mod error;
pub mod executor;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod sql;
pub mod validate;
pub mod value;

pub use attribute::{Attribute, AttributeKind, Clause};
pub use diff::ChangeReport;
pub use error::DdlError;
pub use executor::{QueryExecutor, SnowflakeConfig, SnowflakeExecutor};
pub use provider::{CreateResult, Defaults, ResourceLifecycle, ResourceProvider, UpdateResult};
pub use schema::{NameScope, ResourceSchema};
pub use sql::Statement;
pub use value::{Inputs, Value};
