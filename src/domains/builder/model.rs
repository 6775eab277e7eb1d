//! Request and result types for the builder pipeline.
//!
//! Everything here lives for a single request only.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::BuilderError;
use super::sanitize::sanitize_instructions;

/// Maximum number of views a single image request may ask for.
pub const MAX_VIEWS: usize = 3;

// ============================================================================
// Instruction
// ============================================================================

/// A validated caller instruction.
///
/// Keeps the caller's original text (echoed back in results) alongside the
/// sanitized text that is actually sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    original: String,
    sanitized: String,
}

impl Instruction {
    /// Validate and sanitize raw caller text.
    pub fn parse(raw: &str) -> Result<Self, BuilderError> {
        if raw.trim().is_empty() {
            return Err(BuilderError::validation("instructions must not be empty"));
        }

        let sanitized = sanitize_instructions(raw);
        if sanitized.is_empty() {
            return Err(BuilderError::validation(
                "instructions are empty after removing disallowed content",
            ));
        }

        Ok(Self {
            original: raw.to_string(),
            sanitized,
        })
    }

    /// The text exactly as the caller sent it.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text safe to embed in an upstream prompt.
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }
}

// ============================================================================
// Style and views
// ============================================================================

/// Rendering style requested for an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[default]
    Realistic,
    Blueprint,
    #[serde(rename = "3d-render")]
    ThreeDRender,
    Sketch,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Blueprint => "blueprint",
            Self::ThreeDRender => "3d-render",
            Self::Sketch => "sketch",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rendering to produce for an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Label reported back to the caller.
    pub name: &'static str,
    /// Appended to the instruction to steer the rendering, if any.
    pub suffix: Option<&'static str>,
    pub style: Style,
}

/// Views rendered by a full build, in order.
pub const STANDARD_VIEWS: [View; MAX_VIEWS] = [
    View {
        name: "exterior",
        suffix: Some("exterior view"),
        style: Style::Realistic,
    },
    View {
        name: "blueprint",
        suffix: Some("technical blueprint"),
        style: Style::Blueprint,
    },
    View {
        name: "interior",
        suffix: Some("interior view"),
        style: Style::Realistic,
    },
];

/// Resolve the views to render for a view count and optional style.
///
/// One view renders the instruction as-is; more than one takes the first
/// `count` standard views. An explicit style overrides every view's default.
pub fn plan_views(count: usize, style: Option<Style>) -> Result<Vec<View>, BuilderError> {
    if count == 0 || count > MAX_VIEWS {
        return Err(BuilderError::validation(format!(
            "views must be between 1 and {}, got {}",
            MAX_VIEWS, count
        )));
    }

    if count == 1 {
        return Ok(vec![View {
            name: "primary",
            suffix: None,
            style: style.unwrap_or_default(),
        }]);
    }

    Ok(STANDARD_VIEWS
        .iter()
        .take(count)
        .map(|view| View {
            style: style.unwrap_or(view.style),
            ..view.clone()
        })
        .collect())
}

// ============================================================================
// Results
// ============================================================================

/// Textual diagram produced by the language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramResult {
    /// Diagram source, passed through from the model unmodified.
    pub diagram: String,
    /// Diagram notation.
    pub format: String,
    /// The instruction that produced it.
    pub instructions: String,
}

/// Image payload as returned by the image API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageData {
    /// Hosted URL (short-lived on most providers).
    Url(String),
    /// Base64-encoded image bytes.
    B64Json(String),
}

/// One generated rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageResult {
    pub view: String,
    pub style: Style,
    /// Prompt actually sent to the image API.
    pub prompt_used: String,
    pub instructions: String,
    pub image: ImageData,
}

/// Output of an image-only request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageBatch {
    pub images: Vec<ImageResult>,
    pub instructions: String,
}

/// Output of a full build: diagram plus renderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuildResult {
    pub diagram: DiagramResult,
    pub images: Vec<ImageResult>,
    pub status: String,
    pub instructions: String,
}
