//! Architecture diagram tool.
//!
//! Converts building or design instructions into a Mermaid flowchart.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
use crate::domains::builder::BuilderService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the architecture tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateArchitectureParams {
    /// What to build.
    #[schemars(description = "Text describing what to build (e.g. 'a house with 3 rooms')")]
    pub instructions: String,
}

/// Architecture diagram tool implementation.
pub struct GenerateArchitectureTool;

impl GenerateArchitectureTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_architecture";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Turn instructions into a Mermaid diagram showing the architecture or structure of what should be built (rooms of a house, screens of an app, tables of a schema).";

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all)]
    pub async fn execute(
        params: &GenerateArchitectureParams,
        builder: &BuilderService,
    ) -> CallToolResult {
        info!("Architecture tool called");

        match builder.generate_architecture(&params.instructions).await {
            Ok(result) => {
                let summary = format!("```mermaid\n{}\n```", result.diagram);
                structured_result(summary, &result)
            }
            Err(e) => error_result(&format!("Architecture generation failed: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        builder: Arc<BuilderService>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GenerateArchitectureParams = super::common::parse_params(arguments)?;
        let result = builder.generate_architecture(&params.instructions).await?;
        serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateArchitectureParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(builder: Arc<BuilderService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let builder = builder.clone();
            async move {
                let params: GenerateArchitectureParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params, &builder).await)
            }
            .boxed()
        })
    }
}
