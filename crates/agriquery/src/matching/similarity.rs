//! Weighted-ratio string similarity on a 0-100 scale.
//!
//! `ratio` is normalized Levenshtein similarity. The token and partial
//! variants compensate for word order and for one string embedded in a
//! longer one; `weighted_ratio` picks the best of them, discounting the
//! variants that are more permissive.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Plain edit-distance similarity. Empty input scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` of the shorter string against every equally long window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.is_empty() {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    if width == long_chars.len() {
        return ratio(short, long);
    }

    let mut best: f64 = 0.0;
    for window in long_chars.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `ratio` after sorting whitespace-separated tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let join = |set: Vec<&str>| set.join(" ");
    let section = join(tokens_a.intersection(&tokens_b).copied().collect());
    let only_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let only_b = join(tokens_b.difference(&tokens_a).copied().collect());

    let combined_a = format!("{} {}", section, only_a).trim().to_string();
    let combined_b = format!("{} {}", section, only_b).trim().to_string();

    scorer(&section, &combined_a)
        .max(scorer(&section, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}

/// Similarity of the shared tokens against each side's full token set.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, ratio)
}

/// Weighted combination of `ratio`, token and partial variants.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    const UNBASE_SCALE: f64 = 0.95;
    let base = ratio(a, b);
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    if len_ratio < 1.5 {
        return base
            .max(token_sort_ratio(a, b) * UNBASE_SCALE)
            .max(token_set_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let partial = partial_ratio(a, b) * partial_scale;
    let partial_sort =
        partial_ratio(&sorted_tokens(a), &sorted_tokens(b)) * UNBASE_SCALE * partial_scale;
    let partial_set = token_set_with(a, b, partial_ratio) * UNBASE_SCALE * partial_scale;

    base.max(partial).max(partial_sort).max(partial_set)
}
