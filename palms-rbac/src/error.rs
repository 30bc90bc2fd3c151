//! Error types for role-table loading and configuration
//!
//! Permission resolution itself is total and never fails; these errors only
//! arise at the edges where tables and settings are read in.

use std::path::PathBuf;
use thiserror::Error;

/// RBAC error types.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Role table file could not be read
    #[error("Failed to read role table {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Role table JSON is malformed or has the wrong shape
    #[error("Invalid role table: {0}")]
    InvalidRoleTable(#[from] serde_json::Error),

    /// Permission string is not of the form `service.action`
    #[error("Invalid permission: {0:?}")]
    InvalidPermission(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    Config {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for API responses and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::Io { .. } => "ROLE_TABLE_IO",
            RbacError::InvalidRoleTable(_) => "INVALID_ROLE_TABLE",
            RbacError::InvalidPermission(_) => "INVALID_PERMISSION",
            RbacError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RbacError::InvalidPermission("applications".to_string());
        assert_eq!(err.to_string(), "Invalid permission: \"applications\"");
        assert_eq!(err.error_code(), "INVALID_PERMISSION");

        let err = RbacError::Config {
            key: "PALMS_SERVICE_MATCH".to_string(),
            message: "unknown policy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for PALMS_SERVICE_MATCH: unknown policy"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RbacError = json_err.into();
        assert_eq!(err.error_code(), "INVALID_ROLE_TABLE");
    }
}
