//! Builder-specific error types.

use thiserror::Error;

/// Errors that can occur while generating diagrams or images.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Missing or invalid credentials / settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller supplied an empty or malformed instruction payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An upstream API call failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl BuilderError {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failures talking to the language-model or image-generation service.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The service could not be reached at all.
    #[error("{service} is unreachable: {message}")]
    Unreachable { service: String, message: String },

    /// The request did not complete within the configured timeout.
    #[error("{service} request timed out")]
    Timeout { service: String },

    /// The service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {message}")]
    Status {
        service: String,
        status: u16,
        message: String,
    },

    /// The service answered 2xx but the body was not what we expected.
    #[error("{service} returned a malformed response: {message}")]
    Malformed { service: String, message: String },
}

impl UpstreamError {
    /// Create an unreachable error.
    pub fn unreachable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreachable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(service: impl Into<String>) -> Self {
        Self::Timeout {
            service: service.into(),
        }
    }

    /// Create a status error.
    pub fn status(service: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            service: service.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_reqwest(service: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(service)
        } else if err.is_decode() {
            Self::malformed(service, err.to_string())
        } else {
            Self::unreachable(service, err.to_string())
        }
    }
}
