//! External service integrations
//!
//! Currently a single collaborator: the text-extraction service reached
//! over a chat-completions endpoint.

pub mod extraction;

pub use extraction::{CatalogCommand, ExtractionConfig, ExtractionService, TermExtractor};
