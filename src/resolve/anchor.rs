//! Anchor selector
//!
//! Picks at most one "anchor" term representing the primary subject of a
//! sentence out of the matcher's result set.

use crate::types::{OrderedTermSet, Term};

/// Select the anchor term for a sentence
///
/// The sentence is trimmed and lowercased; the first matched term whose
/// name normalizes to the same string wins. With no exact hit, the first
/// term in discovery order is the deterministic fallback. An empty match
/// set yields no anchor, which is a common and valid outcome.
pub fn select_anchor<'a>(sentence: &str, matched: &'a OrderedTermSet) -> Option<&'a Term> {
    let normalized = sentence.trim().to_lowercase();

    matched
        .iter()
        .find(|term| term.name.trim().to_lowercase() == normalized)
        .or_else(|| matched.iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Term;

    fn set_of(names: &[&str]) -> OrderedTermSet {
        let mut set = OrderedTermSet::new();
        for name in names {
            set.insert(Term::new(*name, ".."));
        }
        set
    }

    #[test]
    fn test_exact_normalized_match_beats_discovery_order() {
        let matched = set_of(&["Алгоритм", "Цикл"]);

        // "Цикл" appears later but equals the sentence modulo case
        let anchor = select_anchor("цикл", &matched).unwrap();
        assert_eq!(anchor.name, "Цикл");
    }

    #[test]
    fn test_whitespace_is_ignored_in_comparison() {
        let matched = set_of(&["Условие"]);
        let anchor = select_anchor("  условие  ", &matched).unwrap();
        assert_eq!(anchor.name, "Условие");
    }

    #[test]
    fn test_fallback_is_first_matched_term() {
        let matched = set_of(&["Алгоритм", "Цикл"]);
        let anchor = select_anchor("как работают программы", &matched).unwrap();
        assert_eq!(anchor.name, "Алгоритм");
    }

    #[test]
    fn test_empty_match_set_yields_no_anchor() {
        let matched = OrderedTermSet::new();
        assert!(select_anchor("цикл", &matched).is_none());
    }
}
