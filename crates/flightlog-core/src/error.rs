//! Error types for Flightlog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and hints.
//!
//! Editing a report never produces an error: missing sections, missing
//! items and stale indices are treated as no-ops by the mutation engine.

use thiserror::Error;

/// Result type alias for Flightlog operations.
pub type Result<T> = std::result::Result<T, FlightlogError>;

/// Core error type for Flightlog operations.
#[derive(Debug, Error)]
pub enum FlightlogError {
    /// Report metadata rejected at submit time (missing name, bad date)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Weather could not be fetched and nothing was cached
    #[error("Weather unavailable: {0}")]
    Weather(String),

    /// Export sink failure
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl FlightlogError {
    /// Whether this error was caused by the caller rather than a collaborator.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = FlightlogError::Validation("Report name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Report name is required");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FlightlogError = io.into();
        assert!(matches!(err, FlightlogError::Io { .. }));
        assert!(!err.is_user_error());
    }
}
