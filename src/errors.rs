//! Unified error types and result handling for `BarcodeBuddy`.

use thiserror::Error;

/// Crate-wide error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}")]
    Validation {
        /// Inline message describing the rejected input.
        message: String,
    },

    #[error("Persistence error: {message}")]
    Persistence {
        /// User-visible description of the failed backend operation.
        message: String,
    },

    #[error("{0}")]
    Device(DeviceError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Barcode render error: {0}")]
    Render(String),

    #[error("Configuration error: {message}")]
    Config {
        /// What failed while loading or parsing configuration.
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Capture-device failure subtypes, each with its own user-facing message.
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Failed to access camera. Please allow camera access and try again.")]
    PermissionDenied,

    #[error("Failed to access camera. No camera found on this device.")]
    NotFound,

    #[error("Failed to access camera. Camera is not supported on this platform.")]
    NotSupported,

    #[error("Failed to access camera. {0}")]
    Other(String),
}

impl From<DeviceError> for Error {
    fn from(value: DeviceError) -> Self {
        Error::Device(value)
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Persistence`] with the given message.
    pub fn persistence(message: impl Into<String>) -> Self {
        Error::Persistence {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
