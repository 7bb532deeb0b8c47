//! Relation expander
//!
//! One-hop graph neighborhood of an anchor term: every term connected by
//! exactly one directed link in either direction.

use crate::catalog::TermCatalog;
use crate::error::Result;
use crate::types::{Connection, LinkDirection, OrderedTermSet, TermId};
use tracing::debug;

/// Expand an anchor into its connected terms with edge metadata
///
/// A term linked to the anchor by several edges appears once per edge.
/// Self-referencing edges are skipped (the upstream creation contract
/// forbids them; a stale row must not surface the anchor as its own
/// neighbor). Zero edges is a valid empty result.
pub async fn expand(catalog: &dyn TermCatalog, anchor: TermId) -> Result<Vec<Connection>> {
    let links = catalog.find_links_by_endpoint(anchor).await?;
    debug!("Term {} touches {} links", anchor, links.len());

    let mut connections = Vec::with_capacity(links.len());
    for link in links {
        let (term, direction) = if link.source.id == anchor {
            (link.target, LinkDirection::Outgoing)
        } else {
            (link.source, LinkDirection::Incoming)
        };

        if term.id == anchor {
            continue;
        }

        connections.push(Connection {
            term,
            direction,
            link_type: link.link_type,
        });
    }

    Ok(connections)
}

/// Expand an anchor into the deduplicated set of connected terms
///
/// Edge metadata is dropped; a term connected by several relation types
/// appears once, at its first-seen position.
pub async fn expand_unique(catalog: &dyn TermCatalog, anchor: TermId) -> Result<OrderedTermSet> {
    let mut related = OrderedTermSet::new();
    for connection in expand(catalog, anchor).await? {
        related.insert(connection.term);
    }
    Ok(related)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::types::LinkType;

    #[tokio::test]
    async fn test_expand_reports_both_directions() {
        let mut catalog = InMemoryCatalog::new();
        let algo = catalog.add_term("Алгоритм", "..");
        let cycle = catalog.add_term("Цикл", "..");
        let cond = catalog.add_term("Условие", "..");
        catalog.link(algo, cycle, LinkType::Uses);
        catalog.link(cond, algo, LinkType::PartOf);

        let connections = expand(&catalog, algo).await.unwrap();
        assert_eq!(connections.len(), 2);

        let outgoing = connections
            .iter()
            .find(|c| c.direction == LinkDirection::Outgoing)
            .unwrap();
        assert_eq!(outgoing.term.id, cycle);
        assert_eq!(outgoing.link_type, LinkType::Uses);

        let incoming = connections
            .iter()
            .find(|c| c.direction == LinkDirection::Incoming)
            .unwrap();
        assert_eq!(incoming.term.id, cond);
        assert_eq!(incoming.link_type, LinkType::PartOf);
    }

    #[tokio::test]
    async fn test_expand_never_returns_the_anchor() {
        let mut catalog = InMemoryCatalog::new();
        let algo = catalog.add_term("Алгоритм", "..");
        let cycle = catalog.add_term("Цикл", "..");
        catalog.link(algo, cycle, LinkType::Uses);
        catalog.link(cycle, algo, LinkType::Related);

        for connection in expand(&catalog, algo).await.unwrap() {
            assert_ne!(connection.term.id, algo);
        }
    }

    #[tokio::test]
    async fn test_multi_edge_pair_kept_in_expand_deduped_in_unique() {
        let mut catalog = InMemoryCatalog::new();
        let algo = catalog.add_term("Алгоритм", "..");
        let cycle = catalog.add_term("Цикл", "..");
        catalog.link(algo, cycle, LinkType::Uses);
        catalog.link(algo, cycle, LinkType::Related);

        let with_metadata = expand(&catalog, algo).await.unwrap();
        assert_eq!(with_metadata.len(), 2);

        let unique = expand_unique(&catalog, algo).await.unwrap();
        assert_eq!(unique.len(), 1);
    }

    #[tokio::test]
    async fn test_isolated_term_expands_to_empty() {
        let mut catalog = InMemoryCatalog::new();
        let lonely = catalog.add_term("Рекурсия", "..");

        assert!(expand(&catalog, lonely).await.unwrap().is_empty());
        assert!(expand_unique(&catalog, lonely).await.unwrap().is_empty());
    }
}
