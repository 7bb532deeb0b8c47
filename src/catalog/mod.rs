//! Catalog access layer for the Lexigraph resolution engine
//!
//! The term catalog is owned by the surrounding CRUD system; the engine
//! only ever reads it. Every resolution call goes through the read-only
//! [`TermCatalog`] handle so tests can substitute an in-memory fixture
//! for the real store.

pub mod memory;
pub mod sqlite;

use crate::error::Result;
use crate::types::{SemanticLink, Term, TermId};
use async_trait::async_trait;

/// Read-only catalog handle consumed by the matching and expansion pipeline
///
/// Each call is an independent snapshot read; the engine promises no
/// isolation across calls and never writes through this trait.
#[async_trait]
pub trait TermCatalog: Send + Sync {
    /// Terms whose name contains `fragment` (case-sensitive)
    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<Term>>;

    /// Terms whose name equals `name` (case-sensitive). May return more
    /// than one term: name uniqueness is not enforced upstream.
    async fn find_by_name_exact(&self, name: &str) -> Result<Vec<Term>>;

    /// Terms whose name equals `name` ignoring case
    async fn find_by_name_iexact(&self, name: &str) -> Result<Vec<Term>>;

    /// Terms whose name equals any of `names` (case-sensitive)
    async fn find_by_name_in(&self, names: &[String]) -> Result<Vec<Term>>;

    /// Every link where the given term is source or target, with both
    /// endpoints materialized
    async fn find_links_by_endpoint(&self, term: TermId) -> Result<Vec<SemanticLink>>;

    /// Fetch a term by identity; `TermNotFound` when absent
    async fn get_term(&self, id: TermId) -> Result<Term>;
}

/// Sink for auditing extraction collaborator round trips
///
/// Mirrors the upstream system's neural-network request log: one row per
/// collaborator call with the input sentence and the raw response blob.
#[async_trait]
pub trait ExtractionLog: Send + Sync {
    /// Record one collaborator round trip
    async fn record(&self, input: &str, output: &str) -> Result<()>;
}
