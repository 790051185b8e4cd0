//! Query intents and structured requests.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of items returned by top-N style queries when none is requested.
pub const DEFAULT_TOP_N: usize = 3;

/// The analytic queries a question can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RainfallComparison,
    DistrictExtremes,
    CropTrend,
    PolicyAdvice,
    TopCrops,
}

/// Minimum entities an intent needs before it can be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    pub min_states: usize,
    pub min_crops: usize,
}

impl Requirements {
    /// Describe what is missing, or `None` when satisfied.
    pub fn missing(&self, states: usize, crops: usize) -> Option<String> {
        let mut missing = Vec::new();
        if states < self.min_states {
            missing.push(format!("{} state(s)", self.min_states));
        }
        if crops < self.min_crops {
            missing.push(format!("{} crop(s)", self.min_crops));
        }
        if missing.is_empty() {
            None
        } else {
            Some(format!("requires at least {}", missing.join(" and ")))
        }
    }
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::RainfallComparison => "rainfall_comparison",
            Intent::DistrictExtremes => "district_extremes",
            Intent::CropTrend => "crop_trend",
            Intent::PolicyAdvice => "policy_advice",
            Intent::TopCrops => "top_crops",
        }
    }

    /// Entities this intent cannot run without.
    pub fn requirements(&self) -> Requirements {
        let (min_states, min_crops) = match self {
            Intent::RainfallComparison => (2, 0),
            Intent::DistrictExtremes => (1, 1),
            Intent::CropTrend => (0, 1),
            Intent::PolicyAdvice => (1, 2),
            Intent::TopCrops => (1, 0),
        };
        Requirements {
            min_states,
            min_crops,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which years a query should cover.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearFilter {
    /// Every year in the data.
    #[default]
    All,
    /// Exactly these years.
    Years(Vec<i32>),
    /// The most recent N years available.
    LastN(usize),
}

impl YearFilter {
    /// Resolve against the years present in the rows a query considers.
    pub fn resolve(&self, available: impl IntoIterator<Item = i32>) -> YearSet {
        match self {
            YearFilter::All => YearSet(None),
            YearFilter::Years(years) if years.is_empty() => YearSet(None),
            YearFilter::Years(years) => YearSet(Some(years.iter().copied().collect())),
            YearFilter::LastN(n) => {
                let available: BTreeSet<i32> = available.into_iter().collect();
                YearSet(Some(available.into_iter().rev().take(*n).collect()))
            }
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Years(years) => years.is_empty(),
            YearFilter::LastN(_) => false,
        }
    }
}

/// A resolved year filter; `None` admits every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSet(Option<BTreeSet<i32>>);

impl YearSet {
    /// Whether a row with this year passes. Rows without a year only pass
    /// an unrestricted filter.
    pub fn contains(&self, year: Option<i32>) -> bool {
        match &self.0 {
            None => true,
            Some(years) => year.is_some_and(|y| years.contains(&y)),
        }
    }

    /// The admitted years, if restricted.
    pub fn years(&self) -> Option<&BTreeSet<i32>> {
        self.0.as_ref()
    }
}

/// A structured query, produced by the router or supplied directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub intent: Intent,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    /// Explicit years; `None` means all years.
    #[serde(default)]
    pub years: Option<Vec<i32>>,
    /// Restrict to the most recent N years when no explicit years are given.
    #[serde(default)]
    pub last_n_years: Option<usize>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl QueryRequest {
    /// Create a request with no entities.
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            states: Vec::new(),
            crops: Vec::new(),
            years: None,
            last_n_years: None,
            top_n: None,
        }
    }

    pub fn with_states<S: Into<String>>(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_crops<S: Into<String>>(mut self, crops: impl IntoIterator<Item = S>) -> Self {
        self.crops = crops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_years(mut self, years: Vec<i32>) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_last_n_years(mut self, n: usize) -> Self {
        self.last_n_years = Some(n);
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Year filter implied by `years` and `last_n_years`.
    pub fn year_filter(&self) -> YearFilter {
        match (&self.years, self.last_n_years) {
            (Some(years), _) if !years.is_empty() => YearFilter::Years(years.clone()),
            (_, Some(n)) => YearFilter::LastN(n),
            _ => YearFilter::All,
        }
    }

    /// Requested item count, or [`DEFAULT_TOP_N`].
    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements() {
        let req = Intent::RainfallComparison.requirements();
        assert!(req.missing(2, 0).is_none());
        assert_eq!(req.missing(1, 0).unwrap(), "requires at least 2 state(s)");

        let req = Intent::PolicyAdvice.requirements();
        assert_eq!(req.missing(0, 1).unwrap(), "requires at least 1 state(s) and 2 crop(s)");
    }

    #[test]
    fn test_last_n_resolves_most_recent() {
        let set = YearFilter::LastN(2).resolve([2001, 2003, 2002, 2003]);
        assert_eq!(set.years().unwrap().iter().copied().collect::<Vec<_>>(), vec![2002, 2003]);
        assert!(set.contains(Some(2003)));
        assert!(!set.contains(Some(2001)));
        assert!(!set.contains(None));
    }

    #[test]
    fn test_all_admits_missing_years() {
        let set = YearFilter::All.resolve(Vec::<i32>::new());
        assert!(set.contains(None));
        assert!(YearFilter::Years(vec![]).is_all());
    }

    #[test]
    fn test_request_from_json() {
        let request: QueryRequest = serde_json::from_str(
            r#"{"intent": "top_crops", "states": ["Punjab"], "last_n_years": 5}"#,
        )
        .unwrap();
        assert_eq!(request.intent, Intent::TopCrops);
        assert_eq!(request.year_filter(), YearFilter::LastN(5));
        assert_eq!(request.top_n(), DEFAULT_TOP_N);
    }

    #[test]
    fn test_explicit_years_win() {
        let request = QueryRequest::new(Intent::CropTrend)
            .with_years(vec![2010])
            .with_last_n_years(3);
        assert_eq!(request.year_filter(), YearFilter::Years(vec![2010]));
    }
}
