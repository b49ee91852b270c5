mod info;
mod manager;
mod pg_session;

pub use info::ConnectionInfo;
pub use manager::{prompt_connection_info, SessionFactory, SessionHandle, SessionManager};
pub use pg_session::{PgSession, PgSessionFactory};
