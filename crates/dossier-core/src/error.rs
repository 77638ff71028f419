use thiserror::Error;

use crate::config::ConfigError;
use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Search record not found: {0}")]
    RecordNotFound(uuid::Uuid),

    #[error("Invalid record kind: {0}")]
    InvalidRecordKind(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Search provider error: {0}")]
    Search(#[from] SearchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
