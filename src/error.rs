// src/error.rs

//! Unified error handling for the label writer.

use std::fmt;

use thiserror::Error;

/// Result type alias for label writer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Image labeling service failed
    #[error("Vision error for {object}: {message}")]
    Vision { object: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Text generation service answered with a non-success status
    #[error("Generation failed with status {status}: {body}")]
    Generation { status: u16, body: String },

    /// Text generation service answered with an unusable body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a vision error for an `s3://bucket/key` style object.
    pub fn vision(object: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Vision {
            object: object.into(),
            message: message.to_string(),
        }
    }

    /// Create a generation error from a response status and body.
    pub fn generation(status: u16, body: impl Into<String>) -> Self {
        Self::Generation {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_error_display() {
        let err = AppError::vision("s3://b/photo.jpg", "access denied");
        assert_eq!(
            err.to_string(),
            "Vision error for s3://b/photo.jpg: access denied"
        );
    }

    #[test]
    fn test_generation_error_display() {
        let err = AppError::generation(401, "bad key");
        assert_eq!(err.to_string(), "Generation failed with status 401: bad key");
    }
}
