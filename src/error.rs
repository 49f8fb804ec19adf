//! Error types for lower-third configuration operations.

use thiserror::Error;

/// Primary error type for lower-third operations.
#[derive(Error, Debug)]
pub enum LtError {
    // Profile errors
    #[error("Profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("Profile name must not be empty")]
    EmptyProfileName,

    // Store errors
    #[error("Store path is invalid: {path}")]
    InvalidStorePath { path: String },

    #[error("Store write failed at '{path}': {reason}")]
    StoreWriteFailed { path: String, reason: String },

    #[error("Store read failed at '{path}': {reason}")]
    StoreReadFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid canvas dimensions {width}x{height}: both must be positive")]
    InvalidCanvas { width: u32, height: u32 },

    // History errors
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl LtError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound { .. }
                | Self::EmptyProfileName
                | Self::InvalidCanvas { .. }
                | Self::NothingToUndo
                | Self::NothingToRedo
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ProfileNotFound { .. } => Some("Run: ltc init <NAME>"),
            Self::EmptyProfileName => Some("Provide a non-empty profile name"),
            Self::InvalidCanvas { .. } => Some("Use positive width and height, e.g. 1920 1080"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using LtError.
pub type Result<T> = std::result::Result<T, LtError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| LtError::Other(format!("{}: {e}", f().into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_recoverable() {
        assert!(LtError::ProfileNotFound {
            name: "x".to_string()
        }
        .is_user_recoverable());
        assert!(LtError::NothingToUndo.is_user_recoverable());
        assert!(!LtError::Other("boom".to_string()).is_user_recoverable());
    }

    #[test]
    fn test_suggestions() {
        assert!(LtError::ProfileNotFound {
            name: "x".to_string()
        }
        .suggestion()
        .is_some());
        assert!(LtError::Other("boom".to_string()).suggestion().is_none());
    }

    #[test]
    fn test_with_context() {
        let base: std::result::Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = base.with_context(|| "formatting header").unwrap_err();
        assert!(err.to_string().contains("formatting header"));
    }
}
