// Parser module: dump grammar pieces used by the router.
// quote: SQL <-> CSV quoting, types: column type classifier,
// schema: CREATE TABLE lines, insert: INSERT value lists.

pub mod insert;
pub mod quote;
pub mod schema;
pub mod types;

pub use schema::{Column, Schema, SchemaParser};
pub use types::DataType;
