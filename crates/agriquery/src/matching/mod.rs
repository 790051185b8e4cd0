//! Fuzzy resolution of user-supplied state and crop names.

mod canonical;
mod matcher;
mod similarity;

pub use canonical::canonicalize;
pub use matcher::{MatchKind, NameMatcher, ResolvedName, DEFAULT_CUTOFF};
pub use similarity::{partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio};
