//! Outbound API clients.
//!
//! The generators only ever talk to these two traits, so tests can swap in
//! scripted fakes and production wires in the HTTP clients below.

mod anthropic;
mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiImageClient;

use async_trait::async_trait;
use tracing::{error, warn};

use super::error::UpstreamError;
use super::model::ImageData;

/// A text-completion service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a single user prompt and return the model's text reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, UpstreamError>;
}

/// An image-generation service.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate one image for the prompt.
    async fn generate(&self, prompt: &str) -> Result<ImageData, UpstreamError>;
}

/// Build a reqwest client with the upstream timeout applied.
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("builder-mcp-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Pull a human-readable message out of a provider error body.
///
/// Both providers answer with `{"error": {"message": "..."}}`; anything else
/// is returned raw.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Turn a non-success response into `UpstreamError::Status`.
///
/// The message is the provider's own when the body has one, otherwise the
/// status line's reason phrase.
pub(crate) async fn status_error(service: &str, response: reqwest::Response) -> UpstreamError {
    let status = response.status();
    error!("{} request failed with status {}", service, status);

    let body = match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("Could not read {} error body: {}", service, e);
            None
        }
    };

    UpstreamError::status(service, status.as_u16(), failure_message(status, body.as_deref()))
}

fn failure_message(status: reqwest::StatusCode, body: Option<&str>) -> String {
    match body.map(error_message) {
        Some(message) if !message.is_empty() => message,
        _ => status
            .canonical_reason()
            .unwrap_or("no reason given")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_provider_json() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(error_message(body), "invalid x-api-key");
    }

    #[test]
    fn test_failure_message_falls_back_to_reason_phrase() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(failure_message(status, Some("")), "Internal Server Error");
        assert_eq!(failure_message(status, Some("  \n")), "Internal Server Error");
        assert_eq!(failure_message(status, None), "Internal Server Error");
        assert_eq!(
            failure_message(status, Some(r#"{"error":{"message":"boom"}}"#)),
            "boom"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw() {
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
