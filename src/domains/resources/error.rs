//! Resource read failures.

use thiserror::Error;

/// Why a resource could not be served.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under this URI.
    #[error("Unknown resource URI: {uri}")]
    UnknownUri { uri: String },

    /// A dynamic resource failed to render its document.
    #[error("Could not render {uri}: {message}")]
    Render { uri: String, message: String },
}

impl ResourceError {
    pub fn unknown_uri(uri: impl Into<String>) -> Self {
        Self::UnknownUri { uri: uri.into() }
    }

    pub fn render(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            uri: uri.into(),
            message: message.into(),
        }
    }
}
