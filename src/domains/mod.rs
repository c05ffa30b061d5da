//! Domains module containing business logic organized by bounded contexts.
//!
//! - **resources** / **tools**: descriptors, handler contracts, built-ins
//! - **registry**: the catalog owning both mappings
//! - **dispatcher**: lookup and invocation of registered handlers
//! - **query**: free-text routing to canned or generated replies
//! - **llm**: pluggable external text-generation backends

pub mod dispatcher;
pub mod llm;
pub mod query;
pub mod registry;
pub mod resources;
pub mod tools;

pub use dispatcher::Dispatcher;
pub use registry::Registry;
