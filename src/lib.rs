//! Lexigraph - Term Resolution & Relation Graph Engine
//!
//! Resolves free-form natural-language text against an authoritative,
//! curated term catalog and expands matches into their one-hop graph
//! neighborhood over typed semantic links.
//!
//! # Architecture
//!
//! - **Types**: core data structures (Term, SemanticLink, OrderedTermSet)
//! - **Catalog**: read-only catalog handle (SQLite, in-memory fixture)
//! - **Services**: extraction collaborator client (chat-completions API)
//! - **Resolve**: the pipeline — normalizer, tiered matcher, anchor
//!   selector, relation expander
//!
//! # Example
//!
//! ```no_run
//! use lexigraph::{ExtractionService, ResolutionEngine, SqliteCatalog};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = Arc::new(SqliteCatalog::new("sqlite://catalog.db").await?);
//!     let extractor = Arc::new(ExtractionService::with_default()?);
//!
//!     let engine = ResolutionEngine::new(catalog, extractor);
//!     let resolution = engine.resolve_and_expand("что такое алгорит").await?;
//!
//!     if let Some(anchor) = resolution.anchor {
//!         println!("{}: {} related terms", anchor.name, resolution.related.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod resolve;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use catalog::{memory::InMemoryCatalog, sqlite::SqliteCatalog, ExtractionLog, TermCatalog};
pub use error::{LexigraphError, Result};
pub use resolve::{normalize::CandidateList, ResolutionEngine};
pub use services::{ExtractionConfig, ExtractionService, TermExtractor};
pub use types::{
    Connection, LinkDirection, LinkType, MatchTier, OrderedTermSet, Resolution, SemanticLink,
    Term, TermId,
};
