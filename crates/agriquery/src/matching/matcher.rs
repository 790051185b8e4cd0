//! Exact-first, then fuzzy-with-cutoff name resolution.

use serde::Serialize;
use tracing::debug;

use super::canonical::canonicalize;
use super::similarity::weighted_ratio;
use crate::schema::normalize_identifier;

/// Default minimum similarity (0-100) for accepting a fuzzy match.
pub const DEFAULT_CUTOFF: f64 = 70.0;

/// How a name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Canonical forms were identical.
    Exact,
    /// Best fuzzy candidate scored at or above the cutoff.
    Fuzzy,
    /// Nothing matched; the query is used literally, with no confidence.
    Literal,
}

/// A user-supplied name resolved against table values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedName {
    /// Value to filter on: the matched candidate as stored in the table, or
    /// the trimmed, lower-cased query when nothing matched.
    pub value: String,
    /// Similarity score in [0, 100].
    pub score: f64,
    pub kind: MatchKind,
}

impl ResolvedName {
    /// True only for an accepted fuzzy match.
    pub fn is_fuzzy(&self) -> bool {
        self.kind == MatchKind::Fuzzy
    }

    /// True when the value came from the candidate set.
    pub fn is_match(&self) -> bool {
        self.kind != MatchKind::Literal
    }
}

/// Resolves free-text names against the distinct values of a table column.
#[derive(Debug, Clone, Copy)]
pub struct NameMatcher {
    cutoff: f64,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl NameMatcher {
    /// Create a matcher with the default cutoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom cutoff (0-100).
    pub fn with_cutoff(cutoff: f64) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 100.0),
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Resolve `query` against `candidates`.
    ///
    /// An exact canonical match always wins with score 100. Otherwise the
    /// highest-scoring candidate is taken, ties going to the earliest in
    /// iteration order; below the cutoff the query is returned literally.
    pub fn resolve<'a, I>(&self, query: &str, candidates: I) -> ResolvedName
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted = canonicalize(query);
        let candidates: Vec<(&str, String)> = candidates
            .into_iter()
            .map(|c| (c, canonicalize(c)))
            .collect();

        if let Some((value, _)) = candidates.iter().find(|(_, canon)| *canon == wanted) {
            return ResolvedName {
                value: value.to_string(),
                score: 100.0,
                kind: MatchKind::Exact,
            };
        }

        let mut best: Option<(&str, f64)> = None;
        for (value, canon) in &candidates {
            let score = weighted_ratio(&wanted, canon);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((*value, score));
            }
        }

        match best {
            Some((value, score)) if score >= self.cutoff => {
                debug!(query, matched = value, score, "fuzzy name match");
                ResolvedName {
                    value: value.to_string(),
                    score,
                    kind: MatchKind::Fuzzy,
                }
            }
            other => {
                let score = other.map(|(_, s)| s).unwrap_or(0.0);
                debug!(query, score, "no name match above cutoff, using literal");
                ResolvedName {
                    value: normalize_identifier(query),
                    score,
                    kind: MatchKind::Literal,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROPS: &[&str] = &["rice", "wheat", "moong(green gram)", "sugarcane"];

    #[test]
    fn test_exact_match() {
        let resolved = NameMatcher::new().resolve("  Wheat ", CROPS.iter().copied());
        assert_eq!(resolved.value, "wheat");
        assert_eq!(resolved.score, 100.0);
        assert_eq!(resolved.kind, MatchKind::Exact);
        assert!(!resolved.is_fuzzy());
    }

    #[test]
    fn test_exact_match_on_canonical_form() {
        let resolved = NameMatcher::new().resolve("Moong", CROPS.iter().copied());
        assert_eq!(resolved.value, "moong(green gram)");
        assert_eq!(resolved.kind, MatchKind::Exact);
    }

    #[test]
    fn test_fuzzy_match() {
        let resolved = NameMatcher::new().resolve("wheet", CROPS.iter().copied());
        assert_eq!(resolved.value, "wheat");
        assert!(resolved.is_fuzzy());
        assert!(resolved.score >= DEFAULT_CUTOFF && resolved.score < 100.0);
    }

    #[test]
    fn test_below_cutoff_is_literal() {
        let resolved = NameMatcher::new().resolve(" Quinoa ", CROPS.iter().copied());
        assert_eq!(resolved.value, "quinoa");
        assert_eq!(resolved.kind, MatchKind::Literal);
        assert!(!resolved.is_fuzzy());
        assert!(resolved.score < DEFAULT_CUTOFF);
    }

    #[test]
    fn test_empty_candidates() {
        let resolved = NameMatcher::new().resolve("Kerala", std::iter::empty());
        assert_eq!(resolved.value, "kerala");
        assert_eq!(resolved.score, 0.0);
        assert!(!resolved.is_match());
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        // "bat" is one edit from both.
        let resolved = NameMatcher::with_cutoff(0.0).resolve("bat", ["cat", "hat"]);
        assert_eq!(resolved.value, "cat");
        let resolved = NameMatcher::with_cutoff(0.0).resolve("bat", ["hat", "cat"]);
        assert_eq!(resolved.value, "hat");
    }

    #[test]
    fn test_exact_beats_earlier_fuzzy() {
        let resolved = NameMatcher::new().resolve("rice", ["rices", "rice"]);
        assert_eq!(resolved.value, "rice");
        assert_eq!(resolved.score, 100.0);
    }
}
