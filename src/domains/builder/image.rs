//! Image generation.
//!
//! Each view costs two upstream calls: the language model first condenses the
//! instruction into a short image prompt, then the image API renders it.
//! Views run one after another and the first failure aborts the batch.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::error::BuilderError;
use super::model::{DiagramResult, ImageResult, Instruction, View};
use super::upstream::{ImageModel, LanguageModel};

/// Renders instructions through the language and image models.
pub struct ImageGenerator {
    llm: Arc<dyn LanguageModel>,
    images: Arc<dyn ImageModel>,
    prompt_max_tokens: u32,
}

impl ImageGenerator {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        images: Arc<dyn ImageModel>,
        prompt_max_tokens: u32,
    ) -> Self {
        Self {
            llm,
            images,
            prompt_max_tokens,
        }
    }

    /// Render every view in order, optionally using a diagram as layout context.
    #[instrument(skip_all, fields(views = views.len()))]
    pub async fn generate(
        &self,
        instruction: &Instruction,
        diagram: Option<&DiagramResult>,
        views: &[View],
    ) -> Result<Vec<ImageResult>, BuilderError> {
        let mut results = Vec::with_capacity(views.len());

        for view in views {
            match self.render_view(instruction, diagram, view).await {
                Ok(image) => results.push(image),
                Err(e) => {
                    warn!(
                        "View '{}' failed after {} completed, aborting batch: {}",
                        view.name,
                        results.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(results)
    }

    async fn render_view(
        &self,
        instruction: &Instruction,
        diagram: Option<&DiagramResult>,
        view: &View,
    ) -> Result<ImageResult, BuilderError> {
        info!("Rendering view '{}' ({})", view.name, view.style);

        let subject = match view.suffix {
            Some(suffix) => format!("{} - {}", instruction.sanitized(), suffix),
            None => instruction.sanitized().to_string(),
        };

        let enhanced = self
            .llm
            .complete(
                &image_prompt(&subject, view, diagram),
                self.prompt_max_tokens,
            )
            .await?;
        let prompt_used = enhanced.trim().to_string();

        let image = self.images.generate(&prompt_used).await?;

        Ok(ImageResult {
            view: view.name.to_string(),
            style: view.style,
            prompt_used,
            instructions: instruction.original().to_string(),
            image,
        })
    }
}

fn image_prompt(subject: &str, view: &View, diagram: Option<&DiagramResult>) -> String {
    let layout = diagram
        .map(|d| format!("Layout ({}):\n{}\n\n", d.format, d.diagram))
        .unwrap_or_default();

    format!(
        "Transform this into a detailed image generation prompt:\n\n\
         Instructions: {}\n\
         Style: {}\n\n\
         {}\
         Create a concise, vivid prompt (max 200 chars) for an image model. \
         Be specific about colors, perspective, lighting.",
        subject, view.style, layout
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::builder::model::{ImageData, Style, plan_views};
    use crate::domains::builder::testing::{
        FakeImageModel, FakeLanguageModel, call_log, count_calls,
    };

    #[tokio::test]
    async fn test_single_view_result() {
        let log = call_log();
        let llm = Arc::new(FakeLanguageModel::replying(log.clone(), "  red barn, golden hour  "));
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let generator = ImageGenerator::new(llm, images, 500);

        let instruction = Instruction::parse("a red barn").unwrap();
        let views = plan_views(1, Some(Style::Sketch)).unwrap();
        let results = generator.generate(&instruction, None, &views).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].view, "primary");
        assert_eq!(results[0].style, Style::Sketch);
        assert_eq!(results[0].prompt_used, "red barn, golden hour");
        assert_eq!(results[0].image, ImageData::Url("https://img.test/1.png".into()));

        let entries = log.lock().unwrap().clone();
        assert_eq!(entries.last().unwrap(), "image:red barn, golden hour");
    }

    #[tokio::test]
    async fn test_views_steer_prompts() {
        let log = call_log();
        let llm = Arc::new(FakeLanguageModel::replying(log.clone(), "prompt"));
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let generator = ImageGenerator::new(llm.clone(), images, 500);

        let instruction = Instruction::parse("a cabin").unwrap();
        let views = plan_views(3, None).unwrap();
        let results = generator.generate(&instruction, None, &views).await.unwrap();

        let names: Vec<_> = results.iter().map(|r| r.view.as_str()).collect();
        assert_eq!(names, vec!["exterior", "blueprint", "interior"]);

        let prompts = llm.prompts();
        assert!(prompts[0].contains("a cabin - exterior view"));
        assert!(prompts[1].contains("a cabin - technical blueprint"));
        assert!(prompts[1].contains("Style: blueprint"));
        assert!(prompts[2].contains("a cabin - interior view"));
    }

    #[tokio::test]
    async fn test_diagram_used_as_context() {
        let log = call_log();
        let llm = Arc::new(FakeLanguageModel::replying(log.clone(), "prompt"));
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let generator = ImageGenerator::new(llm.clone(), images, 500);

        let instruction = Instruction::parse("a cabin").unwrap();
        let diagram = DiagramResult {
            diagram: "graph TD\n  Cabin --> Loft".into(),
            format: "mermaid".into(),
            instructions: "a cabin".into(),
        };
        let views = plan_views(1, None).unwrap();
        generator
            .generate(&instruction, Some(&diagram), &views)
            .await
            .unwrap();

        assert!(llm.prompts()[0].contains("Cabin --> Loft"));
    }

    #[tokio::test]
    async fn test_batch_aborts_on_first_failure() {
        let log = call_log();
        let llm = Arc::new(FakeLanguageModel::replying(log.clone(), "prompt"));
        let images = Arc::new(FakeImageModel::failing_on(log.clone(), 2));
        let generator = ImageGenerator::new(llm, images, 500);

        let instruction = Instruction::parse("a cabin").unwrap();
        let views = plan_views(3, None).unwrap();
        let err = generator.generate(&instruction, None, &views).await.unwrap_err();

        assert!(matches!(err, BuilderError::Upstream(_)));
        // The third view is never requested.
        assert_eq!(count_calls(&log, "image"), 2);
        assert_eq!(count_calls(&log, "llm"), 2);
    }

    #[tokio::test]
    async fn test_prompt_failure_skips_image_call() {
        let log = call_log();
        let llm = Arc::new(FakeLanguageModel::failing(log.clone()));
        let images = Arc::new(FakeImageModel::new(log.clone()));
        let generator = ImageGenerator::new(llm, images, 500);

        let instruction = Instruction::parse("a cabin").unwrap();
        let views = plan_views(1, None).unwrap();
        assert!(generator.generate(&instruction, None, &views).await.is_err());
        assert_eq!(count_calls(&log, "image"), 0);
    }
}
