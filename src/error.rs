use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgChiselError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("settings error: {0}")]
    Settings(String),
    #[error("prompt error: {0}")]
    Prompt(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PgChiselError>;
