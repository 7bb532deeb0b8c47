//! Candidate normalizer
//!
//! Turns the extraction collaborator's raw response blob into a clean,
//! ordered list of candidate strings. The collaborator sometimes answers
//! with a JSON array and sometimes with loose comma- or newline-separated
//! text; both shapes are accepted and the outcome records which one fired.

use serde::Serialize;

/// Normalized candidate list, tagged with how the raw blob parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "parsed_as", content = "candidates")]
pub enum CandidateList {
    /// The blob was a well-formed JSON array of strings
    Structured(Vec<String>),

    /// The blob was split on commas (newlines folded to commas first)
    Delimited(Vec<String>),
}

impl CandidateList {
    /// Parse a raw collaborator response
    ///
    /// A blob that yields no usable fragments (empty input, bare
    /// punctuation, malformed JSON with nothing splittable) produces an
    /// empty `Delimited` list, never an error.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            let cleaned = items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            return CandidateList::Structured(cleaned);
        }

        let cleaned = trimmed
            .replace('\n', ",")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        CandidateList::Delimited(cleaned)
    }

    /// The candidate strings, in response order. Duplicates are permitted
    /// here; deduplication happens in the matcher.
    pub fn candidates(&self) -> &[String] {
        match self {
            CandidateList::Structured(c) | CandidateList::Delimited(c) => c,
        }
    }

    /// Consume the list, yielding the candidate strings
    pub fn into_candidates(self) -> Vec<String> {
        match self {
            CandidateList::Structured(c) | CandidateList::Delimited(c) => c,
        }
    }

    /// True when normalization produced no candidates
    pub fn is_empty(&self) -> bool {
        self.candidates().is_empty()
    }
}
