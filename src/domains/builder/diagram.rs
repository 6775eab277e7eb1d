//! Diagram generation: instruction in, Mermaid flowchart out.

use std::sync::Arc;
use tracing::{info, instrument};

use super::error::BuilderError;
use super::model::{DiagramResult, Instruction};
use super::upstream::LanguageModel;

/// Notation the model is asked to produce.
pub const DIAGRAM_FORMAT: &str = "mermaid";

/// Asks the language model for a structural diagram of an instruction.
pub struct DiagramGenerator {
    llm: Arc<dyn LanguageModel>,
    max_tokens: u32,
}

impl DiagramGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }

    /// One upstream call; the reply is returned exactly as received.
    #[instrument(skip_all)]
    pub async fn generate(&self, instruction: &Instruction) -> Result<DiagramResult, BuilderError> {
        info!("Generating architecture diagram");

        let diagram = self
            .llm
            .complete(&diagram_prompt(instruction.sanitized()), self.max_tokens)
            .await?;

        Ok(DiagramResult {
            diagram,
            format: DIAGRAM_FORMAT.to_string(),
            instructions: instruction.original().to_string(),
        })
    }
}

fn diagram_prompt(instructions: &str) -> String {
    format!(
        "Convert these instructions into a Mermaid flowchart diagram:\n\n\
         Instructions: {}\n\n\
         Create a clear, hierarchical Mermaid diagram showing the structure and flow.\n\
         Return ONLY the mermaid code, no explanation.",
        instructions
    )
}
