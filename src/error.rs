//! Error types for harvest operations
//!
//! Session failures and storage failures are fatal to the request that hit
//! them. Selection and configuration errors are reported to the caller and
//! leave the seen-log and the page untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for harvest operations
pub type HarvestResult<T> = Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Navigation, script evaluation, or anchor enumeration failed
    #[error("Page session error: {0}")]
    Session(String),

    /// A script returned a value of the wrong shape
    #[error("Unexpected script result: {0}")]
    Script(#[from] serde_json::Error),

    /// Reading or writing the seen-log, activity log, or a batch file failed
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `BatchWriter` was handed nothing to write
    #[error("Refusing to write an empty batch for label '{label}'")]
    EmptyBatch { label: String },

    /// User selection could not be mapped to a request
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Configuration rejected by the builder
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HarvestError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Whether the error leaves persisted state untouched and the session usable
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidSelection(_) | Self::Config(_))
    }
}

impl From<chromiumoxide::error::CdpError> for HarvestError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Session(err.to_string())
    }
}
