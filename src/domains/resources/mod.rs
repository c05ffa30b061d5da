//! Resources domain module.
//!
//! Resources are named, URI-addressable, read-only data sources. Each one is
//! described by a [`ResourceEntry`] and produces its content through a
//! [`ResourceHandler`].
//!
//! ## Architecture
//!
//! - `definitions/` - Built-in resources (one file per resource)
//! - `handlers.rs` - Handler contract, content payload and descriptor
//! - `error.rs` - Resource-specific error types

pub mod definitions;
mod error;
mod handlers;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use handlers::*;
