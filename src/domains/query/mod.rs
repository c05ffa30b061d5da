//! Free-text query handling.
//!
//! - `intent.rs` - Keyword rules in priority order
//! - `calculator.rs` - Arithmetic expression evaluator
//! - `replies.rs` - Reply payloads and canned texts
//! - `router.rs` - Keyword cascade with generator fallback

pub mod calculator;
mod error;
mod intent;
mod replies;
mod router;

pub use error::ExpressionError;
pub use intent::Intent;
pub use replies::{ContentItem, ContentKind, QueryContent, QueryResponse, text_response};
pub use router::QueryRouter;
