//! Usage examples resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Example instructions and tool overview (static text).
pub struct UsageExamplesResource;

impl ResourceDefinition for UsageExamplesResource {
    const URI: &'static str = "mcp://examples/usage";
    const NAME: &'static str = "Usage Examples";
    const DESCRIPTION: &'static str = "Example instructions and how to call each tool";
    const MIME_TYPE: &'static str = "text/plain";

    fn content() -> ResourceContent {
        ResourceContent::Text(USAGE.to_string())
    }
}

const USAGE: &str = r#"Example Instructions:

1. "Build a modern 2-story house with a garage, 3 bedrooms, kitchen, and living room"
2. "Create a mobile app with login, dashboard, and settings screens"
3. "Design a database schema for an e-commerce store with users, products, and orders"

Use tools:
- generate_architecture(instructions) - for diagrams only
- generate_image(instructions, style, views) - for images only
    style: realistic | blueprint | 3d-render | sketch
    views: 1-3 (exterior, blueprint, interior)
- full_build(instructions) - diagram plus all three views

HTTP bridge:
- POST /architecture  {"instructions": "..."}
- POST /image         {"instructions": "...", "style": "sketch", "views": 2}
- POST /build         {"instructions": "..."}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_mentions_every_tool() {
        for name in ["generate_architecture", "generate_image", "full_build"] {
            assert!(USAGE.contains(name), "missing {}", name);
        }
    }
}
