//! In-memory catalog backend
//!
//! A fixture implementation of [`TermCatalog`] backed by plain vectors.
//! Used by the engine's test suites and anywhere a throwaway catalog is
//! needed without a database file.

use crate::catalog::{ExtractionLog, TermCatalog};
use crate::error::{LexigraphError, Result};
use crate::types::{LinkType, SemanticLink, Term, TermId};
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

struct StoredLink {
    id: Uuid,
    source: TermId,
    target: TermId,
    link_type: LinkType,
}

/// In-memory term catalog
///
/// Populated with the builder-style [`add_term`](Self::add_term) and
/// [`link`](Self::link) methods before being handed to the engine as a
/// read-only snapshot.
#[derive(Default)]
pub struct InMemoryCatalog {
    terms: Vec<Term>,
    links: Vec<StoredLink>,
    extraction_log: Mutex<Vec<(String, String)>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term and return its identity
    pub fn add_term(&mut self, name: impl Into<String>, definition: impl Into<String>) -> TermId {
        let term = Term::new(name, definition);
        let id = term.id;
        self.terms.push(term);
        id
    }

    /// Add a pre-built term (for tests that need duplicate names or
    /// classification axes)
    pub fn add(&mut self, term: Term) -> TermId {
        let id = term.id;
        self.terms.push(term);
        id
    }

    /// Add a directed typed link between two existing terms.
    /// Self-loops are rejected, matching the upstream creation contract.
    pub fn link(&mut self, source: TermId, target: TermId, link_type: LinkType) {
        assert_ne!(source, target, "self-loops are disallowed upstream");
        self.links.push(StoredLink {
            id: Uuid::new_v4(),
            source,
            target,
            link_type,
        });
    }

    /// Recorded extraction round trips, oldest first
    pub fn extraction_entries(&self) -> Vec<(String, String)> {
        self.extraction_log.lock().unwrap().clone()
    }

    fn term_by_id(&self, id: TermId) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == id)
    }
}

#[async_trait]
impl TermCatalog for InMemoryCatalog {
    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<Term>> {
        if fragment.is_empty() {
            return Ok(vec![]);
        }
        Ok(self
            .terms
            .iter()
            .filter(|t| t.name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn find_by_name_exact(&self, name: &str) -> Result<Vec<Term>> {
        Ok(self
            .terms
            .iter()
            .filter(|t| t.name == name)
            .cloned()
            .collect())
    }

    async fn find_by_name_iexact(&self, name: &str) -> Result<Vec<Term>> {
        let needle = name.to_lowercase();
        Ok(self
            .terms
            .iter()
            .filter(|t| t.name.to_lowercase() == needle)
            .cloned()
            .collect())
    }

    async fn find_by_name_in(&self, names: &[String]) -> Result<Vec<Term>> {
        Ok(self
            .terms
            .iter()
            .filter(|t| names.iter().any(|n| *n == t.name))
            .cloned()
            .collect())
    }

    async fn find_links_by_endpoint(&self, term: TermId) -> Result<Vec<SemanticLink>> {
        let mut out = Vec::new();
        for link in self
            .links
            .iter()
            .filter(|l| l.source == term || l.target == term)
        {
            let source = self
                .term_by_id(link.source)
                .ok_or_else(|| LexigraphError::TermNotFound(link.source.to_string()))?;
            let target = self
                .term_by_id(link.target)
                .ok_or_else(|| LexigraphError::TermNotFound(link.target.to_string()))?;
            out.push(SemanticLink {
                id: link.id,
                source: source.clone(),
                target: target.clone(),
                link_type: link.link_type,
            });
        }
        Ok(out)
    }

    async fn get_term(&self, id: TermId) -> Result<Term> {
        self.term_by_id(id)
            .cloned()
            .ok_or_else(|| LexigraphError::TermNotFound(id.to_string()))
    }
}

#[async_trait]
impl ExtractionLog for InMemoryCatalog {
    async fn record(&self, input: &str, output: &str) -> Result<()> {
        self.extraction_log
            .lock()
            .unwrap()
            .push((input.to_string(), output.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_lookups() {
        let mut catalog = InMemoryCatalog::new();
        let algo = catalog.add_term("Алгоритм", "..");
        let cycle = catalog.add_term("Цикл", "..");
        catalog.link(algo, cycle, LinkType::Uses);

        let contains = catalog.find_by_name_contains("лгори").await.unwrap();
        assert_eq!(contains.len(), 1);

        let iexact = catalog.find_by_name_iexact("АЛГОРИТМ").await.unwrap();
        assert_eq!(iexact.len(), 1);

        let links = catalog.find_links_by_endpoint(cycle).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source.id, algo);
    }

    #[tokio::test]
    async fn test_duplicate_names_both_returned() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_term("Цикл", "определение 1");
        catalog.add_term("Цикл", "определение 2");

        let hits = catalog.find_by_name_exact("Цикл").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_self_loop_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let id = catalog.add_term("Цикл", "..");
        catalog.link(id, id, LinkType::Related);
    }
}
