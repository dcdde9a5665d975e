//! Error types for ics-filter.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, fetching or filtering a calendar.
#[derive(Error, Debug)]
pub enum IcsFilterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No calendar has been fetched yet")]
    FetchRequired,

    #[error("Blacklist storage error at {}: {reason}", .path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("ICS parse error: {0}")]
    Codec(String),
}

impl IcsFilterError {
    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        IcsFilterError::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for ics-filter operations.
pub type IcsFilterResult<T> = Result<T, IcsFilterError>;
