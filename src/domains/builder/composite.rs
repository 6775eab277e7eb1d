//! Full build: diagram first, then renderings informed by it.

use tracing::{info, instrument};

use super::diagram::DiagramGenerator;
use super::error::BuilderError;
use super::image::ImageGenerator;
use super::model::{BuildResult, Instruction, STANDARD_VIEWS};

/// Sequences the diagram and image generators for one instruction.
pub struct CompositeBuilder<'a> {
    diagrams: &'a DiagramGenerator,
    images: &'a ImageGenerator,
}

impl<'a> CompositeBuilder<'a> {
    pub fn new(diagrams: &'a DiagramGenerator, images: &'a ImageGenerator) -> Self {
        Self { diagrams, images }
    }

    /// Diagram, then the standard views. Stops at the first failure.
    #[instrument(skip_all)]
    pub async fn build(&self, instruction: &Instruction) -> Result<BuildResult, BuilderError> {
        let diagram = self.diagrams.generate(instruction).await?;
        let images = self
            .images
            .generate(instruction, Some(&diagram), &STANDARD_VIEWS)
            .await?;

        info!("Full build complete with {} image(s)", images.len());

        Ok(BuildResult {
            diagram,
            images,
            status: "complete".to_string(),
            instructions: instruction.original().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::builder::error::UpstreamError;
    use crate::domains::builder::testing::{
        FakeImageModel, FakeLanguageModel, call_log, count_calls,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_diagram_runs_before_images() {
        let log = call_log();
        let llm = Arc::new(
            FakeLanguageModel::replying(log.clone(), "image prompt")
                .then(Ok("graph TD\n  A --> B".into())),
        );
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let diagrams = DiagramGenerator::new(llm.clone(), 2000);
        let renderer = ImageGenerator::new(llm, images, 500);

        let instruction = Instruction::parse("a two-story house").unwrap();
        let result = CompositeBuilder::new(&diagrams, &renderer)
            .build(&instruction)
            .await
            .unwrap();

        let entries = log.lock().unwrap().clone();
        assert!(entries[0].starts_with("llm:Convert these instructions into a Mermaid"));
        assert!(entries[1..].iter().all(|e| !e.contains("Mermaid flowchart")));
        assert!(entries[1].contains("A --> B"));

        assert_eq!(result.diagram.diagram, "graph TD\n  A --> B");
        assert_eq!(result.images.len(), 3);
        assert_eq!(result.status, "complete");
        assert_eq!(result.instructions, "a two-story house");
    }

    #[tokio::test]
    async fn test_diagram_failure_skips_images() {
        let log = call_log();
        let llm = Arc::new(
            FakeLanguageModel::replying(log.clone(), "unused")
                .then(Err(UpstreamError::timeout("Anthropic"))),
        );
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let diagrams = DiagramGenerator::new(llm.clone(), 2000);
        let renderer = ImageGenerator::new(llm, images, 500);

        let instruction = Instruction::parse("a two-story house").unwrap();
        let err = CompositeBuilder::new(&diagrams, &renderer)
            .build(&instruction)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BuilderError::Upstream(UpstreamError::Timeout { .. })
        ));
        assert_eq!(count_calls(&log, "llm"), 1);
        assert_eq!(count_calls(&log, "image"), 0);
    }
}
