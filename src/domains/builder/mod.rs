//! Builder domain module.
//!
//! Turns free-text building or design instructions into a Mermaid diagram
//! (language model) and renderings (image model).
//!
//! ## Architecture
//!
//! - `model.rs` - Instruction, views and result types
//! - `sanitize.rs` - Prompt-injection scrubbing of caller text
//! - `upstream/` - `LanguageModel` / `ImageModel` traits and HTTP clients
//! - `diagram.rs`, `image.rs`, `composite.rs` - the three generators
//! - `service.rs` - `BuilderService`, what tools and transports call

mod composite;
mod diagram;
mod error;
mod image;
pub mod model;
mod sanitize;
mod service;
pub mod upstream;

#[cfg(test)]
pub(crate) mod testing;

pub use composite::CompositeBuilder;
pub use diagram::DiagramGenerator;
pub use error::{BuilderError, UpstreamError};
pub use image::ImageGenerator;
pub use model::{
    BuildResult, DiagramResult, ImageBatch, ImageData, ImageResult, Instruction, Style, View,
};
pub use sanitize::sanitize_instructions;
pub use service::BuilderService;
