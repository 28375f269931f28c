//! Error types for placement-tracker.
//!
//! This module defines all error types used throughout the placement-tracker
//! crate, providing detailed context for debugging and user-friendly error
//! messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for placement-tracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Application Errors ===
    /// One or more required fields were missing when adding an application.
    #[error("Please fill all required fields! (missing: {})", .missing.join(", "))]
    Validation {
        /// Names of the missing fields, in form order.
        missing: Vec<&'static str>,
    },

    /// The user declined to confirm a destructive action.
    #[error("deletion cancelled")]
    DeleteDeclined,

    /// No id greater than every stored id is left to hand out.
    #[error("no application ids left above {max}")]
    IdExhausted {
        /// The largest id currently stored.
        max: i64,
    },

    /// A date format cannot be applied to a calendar date.
    #[error("date format '{pattern}' cannot render a calendar date")]
    DateFormat {
        /// The offending `strftime` pattern.
        pattern: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to bring the database file up to the current schema version.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for placement-tracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given missing fields.
    #[must_use]
    pub fn validation(missing: Vec<&'static str>) -> Self {
        Self::Validation { missing }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a missing-field validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error means the user declined a confirmation.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::DeleteDeclined)
    }
}
