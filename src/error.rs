//! Crate error type
//!
//! Only the config and storage surface can fail; the simulation itself is infallible.

use thiserror::Error;

/// Top-level error type for melon-bowl.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
