//! Error types and handling for the `ppg-report` service

use thiserror::Error;

/// Main error type for the `ppg-report` crate
#[derive(Error, Debug)]
pub enum PpgReportError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider errors (bad payloads, rejected requests)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache store errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// HTTP transport errors, passed through unchanged
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Core result type used throughout the crate
pub type Result<T> = std::result::Result<T, PpgReportError>;

impl PpgReportError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PpgReportError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PpgReportError::Api { message } => {
                format!("A weather data provider returned an unusable response: {message}")
            }
            PpgReportError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PpgReportError::Cache { .. } => {
                "Cache operation failed. You may need to clear the cache directory.".to_string()
            }
            PpgReportError::Http { .. } => {
                "Unable to reach external services. Please check your internet connection."
                    .to_string()
            }
            PpgReportError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
