use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid board name: {0:?}")]
    InvalidBoard(String),

    #[error("Unknown document unit: {0:?} (expected \"thread\" or \"post\")")]
    UnknownUnit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
