//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod architecture;
pub mod common;
pub mod full_build;
pub mod image;

pub use architecture::{GenerateArchitectureParams, GenerateArchitectureTool};
pub use full_build::{FullBuildParams, FullBuildTool};
pub use image::{GenerateImageParams, GenerateImageTool};
