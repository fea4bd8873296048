use thiserror::Error;

/// lifedash error types
#[derive(Error, Debug)]
pub enum LifedashError {
    /// Failed to decode a row, snapshot or response body
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend query or identity lookup failed
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LifedashError {
    fn from(err: serde_json::Error) -> Self {
        LifedashError::Parse(err.to_string())
    }
}

/// Result type alias for lifedash
pub type Result<T> = std::result::Result<T, LifedashError>;
