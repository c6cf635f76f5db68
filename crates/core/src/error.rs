//! Error types for Wikipad
//! 
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Wikipad
#[derive(Error, Debug)]
pub enum WikipadError {
    /// A selection range does not fit the buffer it is applied to.
    /// This is a caller bug, not a user-facing condition.
    #[error("Invalid selection {start}..{end} for buffer of {len} chars")]
    InvalidSelection {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upload status error: {0}")]
    UploadStatus(String),

}

/// Result type alias for Wikipad operations
pub type Result<T> = std::result::Result<T, WikipadError>;

impl WikipadError {
    /// Build an `InvalidSelection` error
    pub fn invalid_selection(start: usize, end: usize, len: usize) -> Self {
        WikipadError::InvalidSelection { start, end, len }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WikipadError::Io(_) | WikipadError::UploadStatus(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WikipadError::Io(e) => format!("File operation failed: {}", e),
            WikipadError::Config(msg) => format!("Configuration error: {}", msg),
            WikipadError::UploadStatus(msg) => format!("Could not read upload progress: {}", msg),
            _ => self.to_string(),
        }
    }
}
