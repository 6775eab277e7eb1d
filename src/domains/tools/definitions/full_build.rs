//! Full build tool: architecture diagram plus exterior, blueprint and
//! interior renderings, in one call.

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

use super::common::{describe_images, error_result, structured_result};
use crate::domains::builder::BuilderService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the full build tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FullBuildParams {
    /// Full description of what to build.
    #[schemars(description = "Full text describing what to build")]
    pub instructions: String,
}

/// Full build tool implementation.
pub struct FullBuildTool;

impl FullBuildTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "full_build";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Complete pipeline: generate the Mermaid architecture diagram first, then exterior, blueprint and interior images informed by it. Slow (several upstream calls).";

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all)]
    pub async fn execute(params: &FullBuildParams, builder: &BuilderService) -> CallToolResult {
        info!("Full build tool called");

        match builder.full_build(&params.instructions).await {
            Ok(result) => {
                let summary = format!(
                    "```mermaid\n{}\n```\n\nImages:\n{}",
                    result.diagram.diagram,
                    describe_images(&result.images)
                );
                structured_result(summary, &result)
            }
            Err(e) => error_result(&format!("Full build failed: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        builder: Arc<BuilderService>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: FullBuildParams = super::common::parse_params(arguments)?;
        let result = builder.full_build(&params.instructions).await?;
        serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FullBuildParams>(),
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
                let params: FullBuildParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params, &builder).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UpstreamConfig;
    use crate::domains::builder::testing::{FakeImageModel, FakeLanguageModel, call_log};

    #[tokio::test]
    async fn test_execute_summary_lists_all_views() {
        let log = call_log();
        let builder = BuilderService::with_models(
            Arc::new(FakeLanguageModel::replying(log.clone(), "graph TD")),
            Arc::new(FakeImageModel::new(log)),
            &UpstreamConfig::default(),
        );
        let params = FullBuildParams {
            instructions: "a lighthouse".into(),
        };

        let result = FullBuildTool::execute(&params, &builder).await;
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["status"], "complete");
        assert_eq!(structured["images"].as_array().unwrap().len(), 3);
        assert_eq!(structured["images"][1]["view"], "blueprint");
    }
}
