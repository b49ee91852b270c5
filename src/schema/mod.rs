mod column_types;
mod ident;
mod ops;
mod table;

pub use column_types::{column_type_by_label, ColumnTypeSpec, COLUMN_TYPES};
pub use ident::quote_ident;
pub use ops::SchemaOps;
pub use table::{TableRef, DEFAULT_SCHEMA};
