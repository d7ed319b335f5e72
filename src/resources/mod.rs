//! Built-in resource schemas, one constructor per resource type.
//!
//! Each constructor declares the attribute order the CREATE statement
//! renders in and the fields whose change forces a replacement.

mod database;
mod file_format;
mod schema_object;
mod stage;
mod storage_integration;
mod warehouse;

pub use database::database;
pub use file_format::file_format;
pub use schema_object::schema_object;
pub use stage::stage;
pub use storage_integration::storage_integration;
pub use warehouse::warehouse;
