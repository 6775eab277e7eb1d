//! Helpers shared by the builder tools.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::builder::{ImageData, ImageResult};
use crate::domains::tools::ToolError;

/// Deserialize tool arguments into a params struct.
pub fn parse_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a result carrying both a text summary and structured data.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            // Fallback to text-only
            CallToolResult::success(vec![Content::text(summary)])
        }
    }
}

/// One line per image, for text-only clients.
pub fn describe_images(images: &[ImageResult]) -> String {
    images
        .iter()
        .map(|img| {
            let location = match &img.image {
                ImageData::Url(url) => url.clone(),
                ImageData::B64Json(data) => format!("<base64, {} chars>", data.len()),
            };
            format!("- {} ({}): {}", img.view, img.style, location)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
