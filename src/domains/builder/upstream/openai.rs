//! OpenAI Images API client.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ImageModel, http_client, status_error};
use crate::core::config::{ImageResponseFormat, UpstreamConfig};
use crate::domains::builder::error::UpstreamError;
use crate::domains::builder::model::ImageData;

const SERVICE: &str = "OpenAI";

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    response_format: ImageResponseFormat,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}

/// Image model backed by the OpenAI Images API (`/v1/images/generations`).
pub struct OpenAiImageClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    size: String,
    quality: String,
    response_format: ImageResponseFormat,
}

impl OpenAiImageClient {
    /// Create a client from the upstream settings and API key.
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self, String> {
        Ok(Self {
            http: http_client(config.timeout())?,
            endpoint: format!(
                "{}/v1/images/generations",
                config.openai_base_url.trim_end_matches('/')
            ),
            api_key: api_key.into(),
            model: config.image_model.clone(),
            size: config.image_size.clone(),
            quality: config.image_quality.clone(),
            response_format: config.response_format,
        })
    }
}

#[async_trait]
impl ImageModel for OpenAiImageClient {
    #[instrument(skip_all, fields(model = %self.model, size = %self.size))]
    async fn generate(&self, prompt: &str) -> Result<ImageData, UpstreamError> {
        let request = GenerationRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            quality: &self.quality,
            response_format: self.response_format,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::malformed(SERVICE, e.to_string()))?;

        extract_image(body, self.response_format)
    }
}

/// Take the first image in the requested format.
///
/// Base64 payloads are decoded once to make sure we never hand a caller
/// something that will not render.
fn extract_image(
    body: GenerationResponse,
    format: ImageResponseFormat,
) -> Result<ImageData, UpstreamError> {
    let image = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::malformed(SERVICE, "response contained no images"))?;

    match format {
        ImageResponseFormat::Url => image
            .url
            .filter(|u| !u.is_empty())
            .map(ImageData::Url)
            .ok_or_else(|| UpstreamError::malformed(SERVICE, "image has no url")),
        ImageResponseFormat::B64Json => {
            let encoded = image
                .b64_json
                .filter(|b| !b.is_empty())
                .ok_or_else(|| UpstreamError::malformed(SERVICE, "image has no b64_json"))?;
            STANDARD
                .decode(&encoded)
                .map_err(|e| UpstreamError::malformed(SERVICE, format!("invalid base64: {}", e)))?;
            Ok(ImageData::B64Json(encoded))
        }
    }
}
