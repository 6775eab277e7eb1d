//! Image generation tool.
//!
//! Renders one image of the instructions, or several standard views.

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
use crate::domains::builder::{BuilderService, Style};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the image tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateImageParams {
    /// What to render.
    #[schemars(description = "What to create (e.g. 'modern house with garden')")]
    pub instructions: String,

    /// Rendering style.
    #[serde(default)]
    #[schemars(description = "Art style: realistic, blueprint, 3d-render or sketch (default: realistic; with several views, overrides each view's style)")]
    pub style: Option<Style>,

    /// Number of views to render.
    #[serde(default)]
    #[schemars(description = "Number of views, 1-3 (default: 1). More than one renders exterior, blueprint and interior views in that order")]
    pub views: Option<usize>,
}

/// Image generation tool implementation.
pub struct GenerateImageTool;

impl GenerateImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_image";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create AI-generated images from instructions. The instructions are first condensed into a vivid image prompt, then rendered. Returns image URLs (or base64 data) with the prompt used for each.";

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all, fields(views = ?params.views))]
    pub async fn execute(params: &GenerateImageParams, builder: &BuilderService) -> CallToolResult {
        info!("Image tool called");

        match builder
            .generate_images(&params.instructions, params.style, params.views)
            .await
        {
            Ok(batch) => {
                let summary = format!(
                    "Generated {} image(s):\n{}",
                    batch.images.len(),
                    describe_images(&batch.images)
                );
                structured_result(summary, &batch)
            }
            Err(e) => error_result(&format!("Image generation failed: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        builder: Arc<BuilderService>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GenerateImageParams = super::common::parse_params(arguments)?;
        let batch = builder
            .generate_images(&params.instructions, params.style, params.views)
            .await?;
        serde_json::to_value(batch).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateImageParams>(),
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
                let params: GenerateImageParams =
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

    #[test]
    fn test_params_defaults() {
        let params: GenerateImageParams =
            serde_json::from_str(r#"{"instructions": "a barn"}"#).unwrap();
        assert_eq!(params.style, None);
        assert_eq!(params.views, None);
    }

    #[test]
    fn test_params_style_and_views() {
        let params: GenerateImageParams = serde_json::from_str(
            r#"{"instructions": "a barn", "style": "3d-render", "views": 2}"#,
        )
        .unwrap();
        assert_eq!(params.style, Some(Style::ThreeDRender));
        assert_eq!(params.views, Some(2));
    }

    #[test]
    fn test_params_reject_unknown_style() {
        let parsed = serde_json::from_str::<GenerateImageParams>(
            r#"{"instructions": "a barn", "style": "oil-painting"}"#,
        );
        assert!(parsed.is_err());
    }
}
