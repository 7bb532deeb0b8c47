//! Term resolution pipeline
//!
//! Wires the candidate normalizer, term matcher, anchor selector and
//! relation expander into the three entry points callers use:
//!
//! - [`ResolutionEngine::resolve_terms_in_text`] — sentence to matched terms
//! - [`ResolutionEngine::resolve_and_expand`] — sentence to anchor plus
//!   one-hop related terms
//! - [`ResolutionEngine::connections`] — graph neighborhood of a known term
//!
//! The engine is stateless and reentrant: every call reads the catalog
//! through its handle and returns a fresh result. The one fallible
//! collaborator is the extraction service; its failures degrade to zero
//! candidates here instead of failing the pipeline.

pub mod anchor;
pub mod expand;
pub mod matcher;
pub mod normalize;

use crate::catalog::{ExtractionLog, TermCatalog};
use crate::error::Result;
use crate::services::TermExtractor;
use crate::types::{Connection, Resolution, Term, TermId};
use normalize::CandidateList;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolution engine facade
pub struct ResolutionEngine {
    catalog: Arc<dyn TermCatalog>,
    extractor: Arc<dyn TermExtractor>,
    extraction_log: Option<Arc<dyn ExtractionLog>>,
}

impl ResolutionEngine {
    /// Create an engine over a catalog handle and an extractor
    pub fn new(catalog: Arc<dyn TermCatalog>, extractor: Arc<dyn TermExtractor>) -> Self {
        Self {
            catalog,
            extractor,
            extraction_log: None,
        }
    }

    /// Attach a sink that records every extraction round trip
    pub fn with_extraction_log(mut self, log: Arc<dyn ExtractionLog>) -> Self {
        self.extraction_log = Some(log);
        self
    }

    /// Resolve every catalog term a sentence refers to
    ///
    /// Runs extraction, normalization and the tiered matcher. Returns the
    /// matched terms in discovery order, deduplicated by identity. A blank
    /// sentence yields an empty set without a collaborator round trip.
    pub async fn resolve_terms_in_text(&self, sentence: &str) -> Result<Vec<Term>> {
        if sentence.trim().is_empty() {
            return Ok(vec![]);
        }

        let candidates = self.extract_candidates(sentence).await;
        let matched = matcher::resolve_all(self.catalog.as_ref(), Some(sentence), &candidates)
            .await?;
        Ok(matched.into_vec())
    }

    /// Resolve a sentence to its anchor term and the anchor's one-hop
    /// neighborhood
    ///
    /// When no anchor is found the related set is empty; neither case is
    /// an error.
    pub async fn resolve_and_expand(&self, sentence: &str) -> Result<Resolution> {
        if sentence.trim().is_empty() {
            return Ok(Resolution {
                anchor: None,
                related: vec![],
            });
        }

        let candidates = self.extract_candidates(sentence).await;
        let matched = matcher::resolve_all(self.catalog.as_ref(), Some(sentence), &candidates)
            .await?;

        let anchor = anchor::select_anchor(sentence, &matched).cloned();

        let related = match &anchor {
            Some(anchor) => {
                debug!("Anchor for sentence: {}", anchor.name);
                expand::expand_unique(self.catalog.as_ref(), anchor.id)
                    .await?
                    .into_vec()
            }
            None => {
                debug!("No anchor found for sentence");
                vec![]
            }
        };

        Ok(Resolution { anchor, related })
    }

    /// Resolve already-clean catalog name strings, exact match only
    ///
    /// The single-tier counterpart to [`resolve_terms_in_text`]: no
    /// substring or case-folded fallback, for callers that hold full term
    /// names rather than fragments.
    pub async fn resolve_by_names(&self, names: &[String]) -> Result<Vec<Term>> {
        let matched = matcher::resolve_by_name_in(self.catalog.as_ref(), names).await?;
        Ok(matched.into_vec())
    }

    /// Graph neighborhood of an already-identified term, with edge metadata
    ///
    /// An unknown term identity is a `TermNotFound` error; a known term
    /// with zero links is an empty list.
    pub async fn connections(&self, term: TermId) -> Result<Vec<Connection>> {
        // Fail on unknown identity before touching the link table
        self.catalog.get_term(term).await?;
        expand::expand(self.catalog.as_ref(), term).await
    }

    /// Run extraction and normalization, degrading every collaborator
    /// failure to zero candidates
    async fn extract_candidates(&self, sentence: &str) -> Vec<String> {
        let raw = match self.extractor.extract_terms(sentence).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Extraction failed, degrading to zero candidates: {}", err);
                String::new()
            }
        };

        if let Some(log) = &self.extraction_log {
            if let Err(err) = log.record(sentence, &raw).await {
                warn!("Failed to record extraction round trip: {}", err);
            }
        }

        let candidates = CandidateList::parse(&raw);
        debug!(
            "Normalized {} candidates from collaborator response",
            candidates.candidates().len()
        );
        candidates.into_candidates()
    }
}
