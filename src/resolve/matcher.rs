//! Term matcher
//!
//! Maps candidate strings (and optionally the raw sentence) to catalog
//! terms through a tiered fallback policy: whole-sentence substring
//! seeding first, then per-candidate morphological variants, each run
//! through substring -> exact -> case-insensitive exact tiers. The first
//! non-empty tier wins for a variant and contributes every hit it found.

use crate::catalog::TermCatalog;
use crate::error::Result;
use crate::types::{MatchTier, OrderedTermSet, Term};
use tracing::debug;

/// Morphological variants tried for a candidate
///
/// The catalog's language alternates the "ия"/"ие" suffix pair between
/// grammatical forms of the same term name. Exactly this swap, in both
/// directions, and nothing else: this is not stemming.
pub fn morphological_variants(candidate: &str) -> Vec<String> {
    let mut variants = vec![candidate.to_string()];

    if let Some(stem) = candidate.strip_suffix("ия") {
        variants.push(format!("{}ие", stem));
    } else if let Some(stem) = candidate.strip_suffix("ие") {
        variants.push(format!("{}ия", stem));
    }

    variants
}

/// Resolve candidate strings against the catalog
///
/// When `sentence` is given, terms whose name contains the whole sentence
/// are collected first so whole-sentence matches outrank fragment matches.
/// The result is deduplicated by term identity, preserving discovery order.
/// A candidate that matches nothing contributes nothing; the batch never
/// fails for data-shape reasons.
pub async fn resolve_all(
    catalog: &dyn TermCatalog,
    sentence: Option<&str>,
    candidates: &[String],
) -> Result<OrderedTermSet> {
    let mut matched = OrderedTermSet::new();

    if let Some(sentence) = sentence {
        let sentence = sentence.trim();
        if !sentence.is_empty() {
            let seeds = catalog.find_by_name_contains(sentence).await?;
            debug!("Sentence seeding found {} terms", seeds.len());
            matched.extend(seeds);
        }
    }

    for candidate in candidates {
        for variant in morphological_variants(candidate) {
            matched.extend(resolve_variant(catalog, &variant).await?);
        }
    }

    debug!("Matcher resolved {} distinct terms", matched.len());
    Ok(matched)
}

/// Run the three tiers for one variant, stopping at the first tier with
/// at least one hit
async fn resolve_variant(catalog: &dyn TermCatalog, variant: &str) -> Result<Vec<Term>> {
    for tier in [
        MatchTier::Substring,
        MatchTier::Exact,
        MatchTier::CaseInsensitive,
    ] {
        let hits = match tier {
            MatchTier::Substring => catalog.find_by_name_contains(variant).await?,
            MatchTier::Exact => catalog.find_by_name_exact(variant).await?,
            MatchTier::CaseInsensitive => catalog.find_by_name_iexact(variant).await?,
        };

        if !hits.is_empty() {
            debug!("Variant {:?} matched {} terms at {:?}", variant, hits.len(), tier);
            return Ok(hits);
        }
    }

    Ok(vec![])
}

/// Resolve already-clean, catalog-exact name strings
///
/// Single tier, case-sensitive exact match only. This is a deliberately
/// distinct contract from [`resolve_all`]: callers holding full term names
/// must not pick up substring or case-folded hits.
pub async fn resolve_by_name_in(
    catalog: &dyn TermCatalog,
    names: &[String],
) -> Result<OrderedTermSet> {
    let mut matched = OrderedTermSet::new();
    matched.extend(catalog.find_by_name_in(names).await?);
    Ok(matched)
}
