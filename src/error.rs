//! Error types for sortvis.
//!
//! Every fallible operation returns `Result<T, SortError>`; library code does
//! not panic. Misuse of a stepper and bad configuration are programmer errors
//! and are surfaced to the caller immediately.

use thiserror::Error;

/// Result type alias for sortvis operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortvis operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Stepper Errors =====
    /// A step source was used in a way its lifecycle does not allow.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the misuse.
        message: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SortError {
    /// Create an invalid-state error with a message.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an invalid-configuration error with a message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Check if this error comes from misusing a step source.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if this error comes from configuration loading or validation.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::YamlParse(_) | Self::Validation(_)
        )
    }
}
