//! Property-based tests for normalization, matching and the analytic queries.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p agriquery --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p agriquery --test property_tests
//! ```

use std::collections::BTreeMap;

use proptest::prelude::*;

use agriquery::input::RawTable;
use agriquery::matching::{weighted_ratio, MatchKind, NameMatcher};
use agriquery::query::stats::pearson;
use agriquery::query::{compare_rainfall, district_extremes, top_crops, YearFilter};
use agriquery::schema::{
    CropRecord, CropTable, NormalizedTable, RainfallRecord, RainfallTable,
};

// =============================================================================
// Test Strategies
// =============================================================================

const STATES: &[&str] = &["punjab", "kerala", "goa"];
const DISTRICTS: &[&str] = &["north", "south", "east", "west"];
const CROPS: &[&str] = &["rice", "wheat", "maize", "cotton"];

fn pick(values: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(values).prop_map(str::to_string)
}

/// Cell text as found in messy source files.
fn numeric_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (0.0f64..1e6).prop_map(|v| v.to_string()),
        (0i64..100_000).prop_map(|v| v.to_string()),
        Just("NA".to_string()),
        Just(String::new()),
        "[a-z]{1,5}",
    ]
}

fn year_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (1950i32..2030).prop_map(|y| y.to_string()),
        (1950i32..2030).prop_map(|y| format!("{}.0", y)),
        Just("n/a".to_string()),
    ]
}

fn raw_crop_row() -> impl Strategy<Value = Vec<String>> {
    (
        "[ A-Za-z]{0,12}",
        "[ A-Za-z]{0,12}",
        year_cell(),
        "[ A-Za-z()]{0,12}",
        numeric_cell(),
        numeric_cell(),
    )
        .prop_map(|(state, district, year, crop, area, production)| {
            vec![state, district, year, crop, area, production]
        })
}

fn crop_record() -> impl Strategy<Value = CropRecord> {
    (
        pick(STATES),
        pick(DISTRICTS),
        pick(CROPS),
        prop::option::of(2000i32..2010),
        prop::option::of(0.0f64..1000.0),
    )
        .prop_map(|(state, district, crop, year, production)| {
            CropRecord::new(state, district, crop, year, production)
        })
}

fn rainfall_record() -> impl Strategy<Value = RainfallRecord> {
    (
        pick(STATES),
        prop::option::of(2000i32..2010),
        prop::option::of(0.0f64..4000.0),
    )
        .prop_map(|(state, year, rainfall)| RainfallRecord::new(state, year, rainfall))
}

fn year_filter() -> impl Strategy<Value = YearFilter> {
    prop_oneof![
        Just(YearFilter::All),
        (0usize..6).prop_map(YearFilter::LastN),
        prop::collection::vec(2000i32..2010, 1..4).prop_map(YearFilter::Years),
    ]
}

// =============================================================================
// Normalization
// =============================================================================

mod normalization {
    use super::*;

    proptest! {
        /// Normalizing an already-normalized table changes nothing.
        #[test]
        fn idempotent(rows in prop::collection::vec(raw_crop_row(), 0..20)) {
            let headers = ["State_Name", "District_Name", "Crop_Year", "Crop", "Area_", "Production_"]
                .iter()
                .map(|h| h.to_string())
                .collect();
            let raw = RawTable::new(headers, rows);

            let once = CropTable::from_raw(&raw).unwrap();
            let twice = CropTable::from_raw(&once.to_raw()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Identifying strings come out trimmed and lower-cased.
        #[test]
        fn identifiers_are_canonical(rows in prop::collection::vec(raw_crop_row(), 1..20)) {
            let headers = ["state", "district", "year", "crop", "area", "production"]
                .iter()
                .map(|h| h.to_string())
                .collect();
            let table = CropTable::from_raw(&RawTable::new(headers, rows)).unwrap();

            for record in &table.records {
                prop_assert_eq!(record.state.trim(), record.state.as_str());
                prop_assert_eq!(record.state.to_lowercase(), record.state.clone());
                prop_assert_eq!(record.crop.to_lowercase(), record.crop.clone());
            }
        }
    }
}

// =============================================================================
// Name matching
// =============================================================================

mod matching {
    use super::*;

    proptest! {
        /// A candidate queried with different case and padding matches exactly.
        #[test]
        fn exact_match_scores_100(
            candidates in prop::collection::vec("[a-z]{1,10}( [a-z]{1,8})?", 1..10),
            index in any::<prop::sample::Index>(),
            pad in " {0,3}",
        ) {
            let wanted = &candidates[index.index(candidates.len())];
            let query = format!("{}{}{}", pad, wanted.to_uppercase(), pad);

            let resolved = NameMatcher::new().resolve(&query, candidates.iter().map(String::as_str));
            prop_assert_eq!(resolved.kind, MatchKind::Exact);
            prop_assert_eq!(resolved.score, 100.0);
            prop_assert_eq!(&resolved.value, wanted);
        }

        /// Scores stay within [0, 100].
        #[test]
        fn scores_bounded(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
            let score = weighted_ratio(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        /// Whatever the input, the result is either a candidate or the
        /// normalized query.
        #[test]
        fn resolves_to_candidate_or_literal(
            query in "[A-Za-z ]{0,15}",
            candidates in prop::collection::vec("[a-z]{1,10}", 0..8),
        ) {
            let resolved = NameMatcher::new().resolve(&query, candidates.iter().map(String::as_str));
            if resolved.is_match() {
                prop_assert!(candidates.contains(&resolved.value));
            } else {
                prop_assert_eq!(resolved.value, query.trim().to_lowercase());
            }
        }
    }
}

// =============================================================================
// Analytic queries
// =============================================================================

mod queries {
    use super::*;

    proptest! {
        /// Swapping the states swaps the averages.
        #[test]
        fn rainfall_comparison_symmetric(
            records in prop::collection::vec(rainfall_record(), 0..30),
            a in pick(STATES),
            b in pick(STATES),
            years in year_filter(),
        ) {
            let table = RainfallTable::new(records);
            let matcher = NameMatcher::new();

            let ab = compare_rainfall(&table, &matcher, &a, &b, &years).unwrap();
            let ba = compare_rainfall(&table, &matcher, &b, &a, &years).unwrap();
            prop_assert_eq!(ab.state_x_avg, ba.state_y_avg);
            prop_assert_eq!(ab.state_y_avg, ba.state_x_avg);
        }

        /// The top district is at least every district total, the bottom at most.
        #[test]
        fn district_extremes_bound_all_totals(
            records in prop::collection::vec(crop_record(), 0..40),
            crop in pick(CROPS),
            s1 in pick(STATES),
            s2 in pick(STATES),
        ) {
            let table = CropTable::new(records);
            let result = district_extremes(
                &table, &NameMatcher::new(), &crop, &s1, &s2, &YearFilter::All,
            ).unwrap();

            let totals = |state: &str| {
                let mut map: BTreeMap<String, f64> = BTreeMap::new();
                for r in table.records.iter().filter(|r| r.crop == crop && r.state == state) {
                    *map.entry(r.district.clone()).or_default() += r.production.unwrap_or(0.0);
                }
                map
            };
            let t1 = totals(&s1);
            let t2 = totals(&s2);

            if t1.is_empty() || t2.is_empty() {
                prop_assert!(result.state1_top.is_none());
                prop_assert!(result.state2_low.is_none());
            } else {
                let top = result.state1_top.unwrap();
                let low = result.state2_low.unwrap();
                prop_assert!(t1.values().all(|v| *v <= top.1));
                prop_assert!(t2.values().all(|v| *v >= low.1));
                prop_assert_eq!(t1.get(&top.0).copied(), Some(top.1));
                prop_assert_eq!(t2.get(&low.0).copied(), Some(low.1));
            }
        }

        /// Top-N is bounded by N, sorted descending, and drawn from the state.
        #[test]
        fn top_crops_sorted_and_bounded(
            records in prop::collection::vec(crop_record(), 0..40),
            state in pick(STATES),
            n in 0usize..6,
        ) {
            let table = CropTable::new(records);
            let top = top_crops(&table, &NameMatcher::new(), &state, &YearFilter::All, n).unwrap();

            prop_assert!(top.len() <= n);
            prop_assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
            for entry in &top {
                prop_assert!(table.records.iter().any(|r| r.state == state && r.crop == entry.0));
            }
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

mod statistics {
    use super::*;

    proptest! {
        /// A perfectly linear relation has correlation of magnitude 1, with
        /// the sign of the slope.
        #[test]
        fn linear_series_correlates_fully(
            xs in prop::collection::vec(-1000.0f64..1000.0, 2..20),
            slope in prop_oneof![0.5f64..10.0, -10.0f64..-0.5],
            intercept in -100.0f64..100.0,
        ) {
            let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(max - min > 1.0);

            let ys: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
            let r = pearson(&xs, &ys).unwrap();
            prop_assert!((r.abs() - 1.0).abs() < 1e-9);
            prop_assert_eq!(r > 0.0, slope > 0.0);
        }

        /// Correlation is always within [-1, 1] when defined.
        #[test]
        fn correlation_bounded(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..20),
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            if let Some(r) = pearson(&xs, &ys) {
                prop_assert!((-1.0..=1.0).contains(&r));
            }
        }
    }
}
