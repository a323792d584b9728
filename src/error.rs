//! Crate-wide error types.

use thiserror::Error;

pub type TraceprofResult<T> = Result<T, TraceprofError>;

#[derive(Debug, Error)]
pub enum TraceprofError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed trace: {0}")]
    MalformedTrace(String),

    #[error("aggregation error: {0}")]
    Aggregation(String),
}
