//! Canonical form of names used for every comparison.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Lowercase, drop parenthetical substrings, remove characters that are
/// neither alphanumeric nor whitespace, and collapse whitespace.
///
/// `"Moong(Green Gram)"` → `"moong"`, `"Arhar/Tur"` → `"arhartur"`.
pub fn canonicalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let without_parens = PARENTHETICAL.replace_all(&lowered, " ");
    let kept: String = without_parens
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
