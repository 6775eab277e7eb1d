//! Top-level error type for the builder server.
//!
//! Startup is the only place errors surface at this level: request-time
//! failures stay inside their domain (`ToolError`, `ResourceError`) and are
//! translated by the transport that carries them.

use thiserror::Error;

use crate::domains::builder::BuilderError;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons the server refuses to start.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credentials or unparseable settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The builder pipeline could not be wired up.
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_errors_convert() {
        let err: Error = BuilderError::configuration("client build failed").into();
        assert!(matches!(err, Error::Builder(_)));
        assert!(err.to_string().contains("client build failed"));
    }
}
