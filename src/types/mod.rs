//! Type definitions for lifedash

mod error;
pub mod money;
mod records;
mod summary;

pub use error::*;
pub use records::*;
pub use summary::*;

use serde::Serialize;

/// Degraded-load warning types
///
/// A load never fails as a whole; each problem empties or trims one
/// collection and is reported here instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryWarning {
    /// Backend query failed, the collection is treated as empty
    QueryFailed {
        collection: Collection,
        message: String,
    },
    /// Rows that could not be decoded were skipped
    MalformedRows {
        collection: Collection,
        skipped: usize,
        message: String,
    },
    /// Identity lookup failed, treated as signed out
    IdentityUnavailable { message: String },
}

impl std::fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryWarning::QueryFailed {
                collection,
                message,
            } => write!(f, "{} query failed: {}", collection, message),
            QueryWarning::MalformedRows {
                collection,
                skipped,
                message,
            } => write!(
                f,
                "skipped {} malformed {} row(s): {}",
                skipped, collection, message
            ),
            QueryWarning::IdentityUnavailable { message } => {
                write!(f, "identity unavailable: {}", message)
            }
        }
    }
}
