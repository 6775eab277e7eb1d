//! Configuration management for the builder server.
//!
//! This module provides a centralized configuration structure populated once
//! at startup from environment variables (and an optional `.env` file), then
//! shared read-only with every component.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Upstream endpoints, models and limits.
    pub upstream: UpstreamConfig,

    /// Environment values that could not be parsed, reported by `validate`.
    #[serde(skip)]
    pub invalid: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Anthropic API key (language model).
    pub anthropic_api_key: Option<String>,

    /// OpenAI API key (image generation).
    pub openai_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// How the image API should hand back images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    /// Hosted URL.
    #[default]
    Url,
    /// Inline base64.
    B64Json,
}

impl std::str::FromStr for ImageResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "b64_json" | "base64" => Ok(Self::B64Json),
            other => Err(format!("unknown image response format: {}", other)),
        }
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub anthropic_base_url: String,
    pub openai_base_url: String,

    /// Model used for diagrams and image prompts.
    pub llm_model: String,

    /// Model used for renderings.
    pub image_model: String,
    pub image_size: String,
    pub image_quality: String,
    pub response_format: ImageResponseFormat,

    /// Token budget for the diagram reply.
    pub diagram_max_tokens: u32,

    /// Token budget for each condensed image prompt.
    pub prompt_max_tokens: u32,

    /// Per-request timeout for every outbound call.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            llm_model: "claude-sonnet-4-5-20250929".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
            image_quality: "standard".to_string(),
            response_format: ImageResponseFormat::Url,
            diagram_max_tokens: 2000,
            prompt_max_tokens: 500,
            timeout_secs: 120,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "builder-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstream: UpstreamConfig::default(),
            invalid: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Credentials use the providers' conventional names (`ANTHROPIC_API_KEY`,
    /// `OPENAI_API_KEY`); everything else is prefixed with `MCP_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        match TransportConfig::from_env() {
            Ok(transport) => config.transport = transport,
            Err(e) => config.invalid.push(e),
        }

        config.credentials.anthropic_api_key = non_empty_var("ANTHROPIC_API_KEY");
        config.credentials.openai_api_key = non_empty_var("OPENAI_API_KEY");

        let upstream = &mut config.upstream;
        if let Some(url) = non_empty_var("MCP_ANTHROPIC_BASE_URL") {
            upstream.anthropic_base_url = url;
        }
        if let Some(url) = non_empty_var("MCP_OPENAI_BASE_URL") {
            upstream.openai_base_url = url;
        }
        if let Some(model) = non_empty_var("MCP_LLM_MODEL") {
            upstream.llm_model = model;
        }
        if let Some(model) = non_empty_var("MCP_IMAGE_MODEL") {
            upstream.image_model = model;
        }
        if let Some(size) = non_empty_var("MCP_IMAGE_SIZE") {
            upstream.image_size = size;
        }
        if let Some(quality) = non_empty_var("MCP_IMAGE_QUALITY") {
            upstream.image_quality = quality;
        }
        if let Some(format) = non_empty_var("MCP_IMAGE_RESPONSE_FORMAT") {
            match format.parse() {
                Ok(format) => upstream.response_format = format,
                Err(e) => config.invalid.push(format!("MCP_IMAGE_RESPONSE_FORMAT: {}", e)),
            }
        }
        if let Some(secs) = non_empty_var("MCP_UPSTREAM_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => upstream.timeout_secs = secs,
                Err(_) => config.invalid.push(format!(
                    "MCP_UPSTREAM_TIMEOUT_SECS: '{}' is not a whole number of seconds",
                    secs
                )),
            }
        }

        config
    }

    /// Check everything required to serve requests.
    ///
    /// Called once at startup so a misconfigured process never starts
    /// accepting requests.
    pub fn validate(&self) -> Result<()> {
        if !self.invalid.is_empty() {
            return Err(Error::config(format!(
                "invalid environment: {}",
                self.invalid.join("; ")
            )));
        }

        let mut missing = Vec::new();
        if self.credentials.anthropic_api_key.is_none() {
            missing.push("ANTHROPIC_API_KEY");
        }
        if self.credentials.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required credentials: {}",
                missing.join(", ")
            )));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(Error::config("MCP_UPSTREAM_TIMEOUT_SECS must be positive"));
        }

        info!("Configuration validated");
        Ok(())
    }
}

/// Read an env var, treating empty values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
