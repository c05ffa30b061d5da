//! Built-in resource definitions.
//!
//! Each resource is defined in its own file with:
//! - Name, URI and descriptive metadata
//! - A [`ResourceHandler`] implementation producing its content
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement `ResourceHandler` and `ResourceDefinition`
//! 3. Export it here and add it to `register_defaults`

mod hello;

pub use hello::HelloResource;

use serde_json::Value;

use super::handlers::{ResourceEntry, ResourceHandler};
use crate::core::envelope::Metadata;
use crate::domains::Registry;

/// Trait for resource definitions with static descriptors.
pub trait ResourceDefinition: ResourceHandler + Sized + 'static {
    /// The unique registry name of the resource.
    const NAME: &'static str;

    /// The URI clients use to read the resource.
    const URI: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Build the registry entry for this resource.
    fn into_entry(self) -> ResourceEntry {
        let mut metadata = Metadata::new();
        metadata.insert("description".to_string(), Value::from(Self::DESCRIPTION));
        metadata.insert("mimeType".to_string(), Value::from(Self::MIME_TYPE));
        ResourceEntry::new(Self::NAME, Self::URI, metadata, self)
    }
}

/// Register every built-in resource.
pub fn register_defaults(registry: &mut Registry) {
    registry.insert_resource(HelloResource.into_entry());
}
