//! Record of which data tiers supplied an answer.

use serde::{Deserialize, Serialize};

/// Provenance entry for data obtained from the remote endpoint.
pub const API_SOURCE: &str = "api";

/// Ordered, duplicate-free list of origins consulted for an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance(Vec<String>);

impl Provenance {
    /// Create an empty provenance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provenance with a single origin.
    pub fn single(origin: impl Into<String>) -> Self {
        Self(vec![origin.into()])
    }

    /// Append an origin unless already recorded.
    pub fn push(&mut self, origin: impl Into<String>) {
        let origin = origin.into();
        if !self.0.contains(&origin) {
            self.0.push(origin);
        }
    }

    /// Append every origin of `other`, keeping order.
    pub fn merge(&mut self, other: &Provenance) {
        for origin in &other.0 {
            self.push(origin.clone());
        }
    }

    /// Origins in the order they were recorded.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order_and_dedups() {
        let mut p = Provenance::single("cache/crop.csv");
        p.merge(&Provenance::single(API_SOURCE));
        p.merge(&Provenance::single("cache/crop.csv"));

        assert_eq!(p.as_slice(), &["cache/crop.csv".to_string(), "api".to_string()]);
    }

    #[test]
    fn test_serializes_as_list() {
        let p = Provenance::single("api");
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["api"]"#);
    }
}
