//! Error types for filter criteria and configuration

use thiserror::Error;

/// Filter error types.
///
/// Building an expression never fails; these cover parsing UI filter state
/// and reading settings.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Filter criteria JSON is malformed or has the wrong shape
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    Config {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
