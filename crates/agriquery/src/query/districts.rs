//! Highest- and lowest-producing districts for a crop.

use std::collections::BTreeMap;

use super::request::YearFilter;
use super::resolve_in;
use super::result::{DistrictExtremes, DistrictValue};
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::schema::{Column, CropTable};

/// Find the top district of `state1` and the bottom district of `state2`
/// by summed production of `crop`.
///
/// Districts are visited in name order and the first extreme wins, so ties
/// resolve alphabetically. If either state has no rows, both sides are `None`.
pub fn district_extremes(
    table: &CropTable,
    matcher: &NameMatcher,
    crop: &str,
    state1: &str,
    state2: &str,
    years: &YearFilter,
) -> Result<DistrictExtremes> {
    for column in [Column::Crop, Column::District, Column::Production] {
        table.require(column)?;
    }
    if !years.is_all() {
        table.require(Column::Year)?;
    }

    let crop = resolve_in(matcher, crop, &table.distinct_crops());
    let states = table.distinct_states();
    let state1 = resolve_in(matcher, state1, &states);
    let state2 = resolve_in(matcher, state2, &states);

    let candidates: Vec<_> = table
        .records
        .iter()
        .filter(|r| r.crop == crop && (r.state == state1 || r.state == state2))
        .collect();
    let selected = years.resolve(candidates.iter().filter_map(|r| r.year));

    let totals = |state: &str| {
        let mut by_district: BTreeMap<&str, f64> = BTreeMap::new();
        for r in candidates
            .iter()
            .filter(|r| r.state == state && selected.contains(r.year))
        {
            *by_district.entry(r.district.as_str()).or_default() += r.production.unwrap_or(0.0);
        }
        by_district
    };
    let totals1 = totals(&state1);
    let totals2 = totals(&state2);

    let (state1_top, state2_low) = if totals1.is_empty() || totals2.is_empty() {
        (None, None)
    } else {
        (
            extreme(&totals1, |candidate, best| candidate > best),
            extreme(&totals2, |candidate, best| candidate < best),
        )
    };

    Ok(DistrictExtremes {
        crop,
        state1,
        state2,
        state1_top,
        state2_low,
    })
}

fn extreme(totals: &BTreeMap<&str, f64>, beats: fn(f64, f64) -> bool) -> Option<DistrictValue> {
    let mut best: Option<(&str, f64)> = None;
    for (&district, &value) in totals {
        if best.is_none_or(|(_, top)| beats(value, top)) {
            best = Some((district, value));
        }
    }
    best.map(|(district, value)| DistrictValue(district.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CropRecord;

    fn table() -> CropTable {
        CropTable::new(vec![
            CropRecord::new("maharashtra", "pune", "rice", Some(2010), Some(100.0)),
            CropRecord::new("maharashtra", "pune", "rice", Some(2011), Some(50.0)),
            CropRecord::new("maharashtra", "nashik", "rice", Some(2010), Some(120.0)),
            CropRecord::new("karnataka", "mysore", "rice", Some(2010), Some(30.0)),
            CropRecord::new("karnataka", "belgaum", "rice", Some(2010), Some(10.0)),
            CropRecord::new("karnataka", "belgaum", "wheat", Some(2010), Some(1.0)),
        ])
    }

    #[test]
    fn test_extremes() {
        let result = district_extremes(
            &table(),
            &NameMatcher::new(),
            "Rice",
            "Maharashtra",
            "Karnataka",
            &YearFilter::All,
        )
        .unwrap();
        assert_eq!(result.state1_top, Some(DistrictValue("pune".into(), 150.0)));
        assert_eq!(result.state2_low, Some(DistrictValue("belgaum".into(), 10.0)));
    }

    #[test]
    fn test_year_filter_changes_top() {
        let result = district_extremes(
            &table(),
            &NameMatcher::new(),
            "rice",
            "maharashtra",
            "karnataka",
            &YearFilter::Years(vec![2010]),
        )
        .unwrap();
        assert_eq!(result.state1_top, Some(DistrictValue("nashik".into(), 120.0)));
    }

    #[test]
    fn test_empty_state_nulls_both() {
        let result = district_extremes(
            &table(),
            &NameMatcher::new(),
            "rice",
            "maharashtra",
            "goa",
            &YearFilter::All,
        )
        .unwrap();
        assert_eq!(result.state1_top, None);
        assert_eq!(result.state2_low, None);
    }

    #[test]
    fn test_ties_resolve_alphabetically() {
        let table = CropTable::new(vec![
            CropRecord::new("goa", "south goa", "rice", Some(2010), Some(5.0)),
            CropRecord::new("goa", "north goa", "rice", Some(2010), Some(5.0)),
        ]);
        let result = district_extremes(
            &table,
            &NameMatcher::new(),
            "rice",
            "goa",
            "goa",
            &YearFilter::All,
        )
        .unwrap();
        assert_eq!(result.state1_top.unwrap().0, "north goa");
        assert_eq!(result.state2_low.unwrap().0, "north goa");
    }

    #[test]
    fn test_fuzzy_crop() {
        let result = district_extremes(
            &table(),
            &NameMatcher::new(),
            "rices",
            "maharashtra",
            "karnataka",
            &YearFilter::All,
        )
        .unwrap();
        assert_eq!(result.crop, "rice");
        assert!(result.state1_top.is_some());
    }
}
