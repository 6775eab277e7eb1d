//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{LanguageModel, http_client, status_error};
use crate::core::config::UpstreamConfig;
use crate::domains::builder::error::UpstreamError;

const SERVICE: &str = "Anthropic";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Language model backed by the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Create a client from the upstream settings and API key.
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self, String> {
        Ok(Self {
            http: http_client(config.timeout())?,
            endpoint: format!("{}/v1/messages", config.anthropic_base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.llm_model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, UpstreamError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::malformed(SERVICE, e.to_string()))?;

        let text = first_text(body)?;
        debug!("{} returned {} chars", SERVICE, text.len());
        Ok(text)
    }
}

/// The first text block of a reply; an empty reply counts as malformed.
fn first_text(body: MessagesResponse) -> Result<String, UpstreamError> {
    body.content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| UpstreamError::malformed(SERVICE, "reply contained no text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> MessagesResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_first_text_block() {
        let body = parse(serde_json::json!({
            "id": "msg_01",
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "graph TD\n  A-->B" }
            ]
        }));
        assert_eq!(first_text(body).unwrap(), "graph TD\n  A-->B");
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        let body = parse(serde_json::json!({ "content": [] }));
        assert!(matches!(
            first_text(body),
            Err(UpstreamError::Malformed { .. })
        ));

        let body = parse(serde_json::json!({ "content": [{ "type": "text", "text": "  " }] }));
        assert!(first_text(body).is_err());
    }

    #[cfg(feature = "http")]
    mod live_stub {
        use super::super::*;
        use crate::domains::builder::testing::spawn_stub;
        use axum::{Json, Router, http::StatusCode, routing::post};

        fn config(base_url: String) -> UpstreamConfig {
            UpstreamConfig {
                anthropic_base_url: base_url,
                ..UpstreamConfig::default()
            }
        }

        #[tokio::test]
        async fn test_complete_against_stub() {
            let app = Router::new().route(
                "/v1/messages",
                post(|headers: axum::http::HeaderMap, Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(headers["x-api-key"], "test-key");
                    assert_eq!(headers["anthropic-version"], API_VERSION);
                    assert_eq!(body["messages"][0]["role"], "user");
                    Json(serde_json::json!({
                        "content": [{ "type": "text", "text": format!("echo: {}", body["messages"][0]["content"].as_str().unwrap()) }]
                    }))
                }),
            );
            let base_url = spawn_stub(app).await;

            let client = AnthropicClient::new(&config(base_url), "test-key").unwrap();
            let reply = client.complete("two rooms", 100).await.unwrap();
            assert_eq!(reply, "echo: two rooms");
        }

        #[tokio::test]
        async fn test_error_status_is_surfaced() {
            let app = Router::new().route(
                "/v1/messages",
                post(|| async {
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        Json(serde_json::json!({
                            "type": "error",
                            "error": { "type": "rate_limit_error", "message": "slow down" }
                        })),
                    )
                }),
            );
            let base_url = spawn_stub(app).await;

            let client = AnthropicClient::new(&config(base_url), "test-key").unwrap();
            let err = client.complete("anything", 100).await.unwrap_err();
            match err {
                UpstreamError::Status { status, message, .. } => {
                    assert_eq!(status, 429);
                    assert_eq!(message, "slow down");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_empty_error_body_reports_reason_phrase() {
            let app = Router::new().route(
                "/v1/messages",
                post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
            let base_url = spawn_stub(app).await;

            let client = AnthropicClient::new(&config(base_url), "test-key").unwrap();
            let err = client.complete("anything", 100).await.unwrap_err();
            match err {
                UpstreamError::Status { status, message, .. } => {
                    assert_eq!(status, 500);
                    assert_eq!(message, "Internal Server Error");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_unreachable_host() {
            // Nothing listens on port 9 of localhost in CI sandboxes.
            let client =
                AnthropicClient::new(&config("http://127.0.0.1:9".to_string()), "k").unwrap();
            let err = client.complete("anything", 10).await.unwrap_err();
            assert!(matches!(err, UpstreamError::Unreachable { .. }));
        }
    }
}
