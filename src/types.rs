//! Core data types for the Lexigraph resolution engine
//!
//! This module defines the fundamental data structures used throughout
//! lexigraph: catalog terms, typed semantic links between them, and the
//! ordered-set abstraction the matching pipeline uses for deduplication.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for catalog terms
///
/// Wraps a UUID to provide type safety and prevent mixing term IDs
/// with other UUID-based identifiers in the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub Uuid);

impl TermId {
    /// Create a new random term ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a term ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for TermId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog term: the authoritative entry the engine resolves against
///
/// `name` is the sole matching key; `definition` is display payload and is
/// never consulted by the matcher. The classification axes are opaque to the
/// engine and only carried through for callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Unique identifier
    pub id: TermId,

    /// Display name, the matching key. Non-empty by upstream contract,
    /// but NOT guaranteed unique across the catalog.
    pub name: String,

    /// Definition text
    pub definition: String,

    /// Optional discipline classification
    pub discipline_id: Option<Uuid>,

    /// Optional course classification
    pub course_id: Option<Uuid>,

    /// Optional specialty classification
    pub specialty_id: Option<Uuid>,
}

impl Term {
    /// Convenience constructor for a bare term with no classifications
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: TermId::new(),
            name: name.into(),
            definition: definition.into(),
            discipline_id: None,
            course_id: None,
            specialty_id: None,
        }
    }
}

/// Relationship types between terms in the semantic graph
///
/// The catalog schema declares a closed choice set; strings read from the
/// store outside this set are a data error, not a silently coerced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// General association
    Related,

    /// Target is an example of the source
    Example,

    /// Terms name the same concept
    Synonym,

    /// Terms name opposing concepts
    Antonym,

    /// Target is a constituent part of the source
    PartOf,

    /// Source makes use of the target
    Uses,
}

impl LinkType {
    /// Stable string form used in the store and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Related => "related",
            LinkType::Example => "example",
            LinkType::Synonym => "synonym",
            LinkType::Antonym => "antonym",
            LinkType::PartOf => "part_of",
            LinkType::Uses => "uses",
        }
    }
}

impl std::str::FromStr for LinkType {
    type Err = crate::error::LexigraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "related" => Ok(LinkType::Related),
            "example" => Ok(LinkType::Example),
            "synonym" => Ok(LinkType::Synonym),
            "antonym" => Ok(LinkType::Antonym),
            "part_of" => Ok(LinkType::PartOf),
            "uses" => Ok(LinkType::Uses),
            other => Err(crate::error::LexigraphError::InvalidLinkType(
                other.to_string(),
            )),
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed typed edge between two catalog terms
///
/// Endpoints are materialized `Term`s rather than bare IDs: the catalog
/// fetches links together with both endpoints, which keeps the expander a
/// pure function over the returned rows. Self-loops are disallowed by the
/// upstream creation contract; multiple edges between the same ordered pair
/// are legal when `link_type` differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticLink {
    /// Unique edge identifier
    pub id: Uuid,

    /// Edge source term
    pub source: Term,

    /// Edge target term
    pub target: Term,

    /// Relationship type
    pub link_type: LinkType,
}

/// Direction of a link relative to an anchor term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    /// The anchor is the edge source
    Outgoing,

    /// The anchor is the edge target
    Incoming,
}

/// One graph-neighborhood entry: a term one hop away from an anchor,
/// together with how it is connected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// The connected term
    pub term: Term,

    /// Whether the anchor is source or target of the edge
    pub direction: LinkDirection,

    /// Relationship type of the edge
    pub link_type: LinkType,
}

/// Matching tier that produced a hit
///
/// Tiers escalate substring -> exact -> case-insensitive exact; the first
/// non-empty tier wins for a given variant. The tier is internal ordering
/// machinery, not a stable API guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Catalog name contains the probe string (case-sensitive)
    Substring,

    /// Catalog name equals the probe string (case-sensitive)
    Exact,

    /// Catalog name equals the probe string ignoring case
    CaseInsensitive,
}

/// Result of resolving a sentence and expanding its anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// The anchor term, when one was matched
    pub anchor: Option<Term>,

    /// Terms one hop away from the anchor, deduplicated, discovery order
    pub related: Vec<Term>,
}

/// Insertion-ordered set of terms keyed by identity
///
/// All deduplication in the pipeline goes through this type so that
/// order-of-discovery is an explicit contract rather than an artifact of
/// iteration. Two terms sharing a name but not an ID are distinct members.
#[derive(Debug, Clone, Default)]
pub struct OrderedTermSet {
    terms: Vec<Term>,
    seen: HashSet<TermId>,
}

impl OrderedTermSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term, keeping the first-seen position on duplicates.
    /// Returns true if the term was not already present.
    pub fn insert(&mut self, term: Term) -> bool {
        if self.seen.insert(term.id) {
            self.terms.push(term);
            true
        } else {
            false
        }
    }

    /// Insert every term from an iterator, preserving its order
    pub fn extend(&mut self, terms: impl IntoIterator<Item = Term>) {
        for term in terms {
            self.insert(term);
        }
    }

    /// Whether a term with this identity is present
    pub fn contains(&self, id: TermId) -> bool {
        self.seen.contains(&id)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no terms have been inserted
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Consume the set, yielding terms in insertion order
    pub fn into_vec(self) -> Vec<Term> {
        self.terms
    }
}

impl IntoIterator for OrderedTermSet {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_term_id_creation() {
        let id1 = TermId::new();
        let id2 = TermId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_link_type_round_trip() {
        for lt in [
            LinkType::Related,
            LinkType::Example,
            LinkType::Synonym,
            LinkType::Antonym,
            LinkType::PartOf,
            LinkType::Uses,
        ] {
            assert_eq!(LinkType::from_str(lt.as_str()).unwrap(), lt);
        }
    }

    #[test]
    fn test_link_type_rejects_unknown() {
        assert!(LinkType::from_str("derives_from").is_err());
        assert!(LinkType::from_str("").is_err());
    }

    #[test]
    fn test_ordered_set_preserves_first_seen_order() {
        let a = Term::new("Алгоритм", "..");
        let b = Term::new("Цикл", "..");

        let mut set = OrderedTermSet::new();
        assert!(set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert!(!set.insert(a));

        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Алгоритм", "Цикл"]);
    }

    #[test]
    fn test_ordered_set_keys_on_identity_not_name() {
        // The catalog does not enforce name uniqueness; two terms sharing
        // a name must both survive deduplication.
        let first = Term::new("Цикл", "определение 1");
        let second = Term::new("Цикл", "определение 2");

        let mut set = OrderedTermSet::new();
        set.insert(first);
        set.insert(second);
        assert_eq!(set.len(), 2);
    }
}
