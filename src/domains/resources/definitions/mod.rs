//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content provider, then registered in `registry.rs`.

mod server_info;
mod usage_examples;

pub use server_info::ServerInfoResource;
pub use usage_examples::UsageExamplesResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}
