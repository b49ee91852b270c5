pub mod commands;
pub mod error;
pub mod executor;
pub mod prompt;
pub mod repl;
pub mod schema;
pub mod session;
pub mod settings;

pub use error::{PgChiselError, Result};
pub use executor::{ColumnInfo, QueryResult, SqlExecutor};
pub use prompt::{Prompter, SelectItem, TerminalPrompter};
pub use repl::{InteractiveRepl, ReplCommand};
pub use schema::{
    column_type_by_label, quote_ident, ColumnTypeSpec, SchemaOps, TableRef, COLUMN_TYPES,
    DEFAULT_SCHEMA,
};
pub use session::{
    prompt_connection_info, ConnectionInfo, PgSession, PgSessionFactory, SessionFactory,
    SessionHandle, SessionManager,
};
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
