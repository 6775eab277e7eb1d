//! Builder service - the entry point used by tools and the HTTP bridge.
//!
//! Validation always happens before any upstream call, so a bad request never
//! costs an API round-trip.

use std::sync::Arc;
use tracing::info;

use super::composite::CompositeBuilder;
use super::diagram::DiagramGenerator;
use super::error::BuilderError;
use super::image::ImageGenerator;
use super::model::{BuildResult, DiagramResult, ImageBatch, Instruction, Style, plan_views};
use super::upstream::{AnthropicClient, ImageModel, LanguageModel, OpenAiImageClient};
use crate::core::config::{Config, UpstreamConfig};

/// Owns the generators for the lifetime of the process.
pub struct BuilderService {
    diagrams: DiagramGenerator,
    images: ImageGenerator,
}

impl BuilderService {
    /// Wire the production upstream clients from configuration.
    ///
    /// Fails when either API key is missing.
    pub fn from_config(config: &Config) -> Result<Self, BuilderError> {
        let credentials = &config.credentials;

        let anthropic_key = credentials
            .anthropic_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BuilderError::configuration("ANTHROPIC_API_KEY is not set"))?;
        let openai_key = credentials
            .openai_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BuilderError::configuration("OPENAI_API_KEY is not set"))?;

        let llm = AnthropicClient::new(&config.upstream, anthropic_key)
            .map_err(BuilderError::configuration)?;
        let images = OpenAiImageClient::new(&config.upstream, openai_key)
            .map_err(BuilderError::configuration)?;

        info!(
            "Upstreams ready: llm={}, image={}",
            config.upstream.llm_model, config.upstream.image_model
        );

        Ok(Self::with_models(
            Arc::new(llm),
            Arc::new(images),
            &config.upstream,
        ))
    }

    /// Build the service around arbitrary model implementations.
    pub fn with_models(
        llm: Arc<dyn LanguageModel>,
        images: Arc<dyn ImageModel>,
        upstream: &UpstreamConfig,
    ) -> Self {
        Self {
            diagrams: DiagramGenerator::new(llm.clone(), upstream.diagram_max_tokens),
            images: ImageGenerator::new(llm, images, upstream.prompt_max_tokens),
        }
    }

    /// Diagram only.
    pub async fn generate_architecture(
        &self,
        instructions: &str,
    ) -> Result<DiagramResult, BuilderError> {
        let instruction = Instruction::parse(instructions)?;
        self.diagrams.generate(&instruction).await
    }

    /// Images only; `views` defaults to one.
    pub async fn generate_images(
        &self,
        instructions: &str,
        style: Option<Style>,
        views: Option<usize>,
    ) -> Result<ImageBatch, BuilderError> {
        let instruction = Instruction::parse(instructions)?;
        let views = plan_views(views.unwrap_or(1), style)?;

        let images = self.images.generate(&instruction, None, &views).await?;
        Ok(ImageBatch {
            images,
            instructions: instruction.original().to_string(),
        })
    }

    /// Diagram plus the standard views.
    pub async fn full_build(&self, instructions: &str) -> Result<BuildResult, BuilderError> {
        let instruction = Instruction::parse(instructions)?;
        CompositeBuilder::new(&self.diagrams, &self.images)
            .build(&instruction)
            .await
    }
}
