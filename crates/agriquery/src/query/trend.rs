//! Yearly production trend of a crop and its correlation with rainfall.

use std::collections::BTreeMap;

use super::request::YearFilter;
use super::resolve_in;
use super::result::{TrendAnswer, TrendDirection, TrendReport};
use super::stats::pearson;
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::schema::{Column, CropTable, RainfallTable};

/// Build the yearly production series of `crop` (optionally within one
/// state) and correlate it with rainfall over the years both tables cover.
///
/// Production is summed and rainfall averaged per (state, year); the two
/// are inner-joined on that key, then aggregated per year. Fewer than two
/// joined years produce [`TrendAnswer::InsufficientData`].
pub fn crop_trend(
    crops: &CropTable,
    rainfall: &RainfallTable,
    matcher: &NameMatcher,
    crop: &str,
    state: Option<&str>,
    years: &YearFilter,
) -> Result<TrendAnswer> {
    for column in [Column::Crop, Column::Year, Column::Production] {
        crops.require(column)?;
    }
    for column in [Column::Year, Column::Rainfall] {
        rainfall.require(column)?;
    }

    let crop = resolve_in(matcher, crop, &crops.distinct_crops());
    // The two tables may spell a state differently; resolve against each.
    let crop_state = state.map(|s| resolve_in(matcher, s, &crops.distinct_states()));
    let rain_state = state.map(|s| resolve_in(matcher, s, &rainfall.distinct_states()));

    let candidates: Vec<_> = crops
        .records
        .iter()
        .filter(|r| r.crop == crop && crop_state.as_ref().is_none_or(|s| &r.state == s))
        .collect();
    let selected = years.resolve(candidates.iter().filter_map(|r| r.year));

    // With a state given, both sides share the rainfall spelling as join key.
    let join_key = |table_state: &str| -> String {
        match &rain_state {
            Some(s) => s.clone(),
            None => table_state.to_string(),
        }
    };

    let mut production: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in &candidates {
        let Some(year) = r.year.filter(|y| selected.contains(Some(*y))) else {
            continue;
        };
        *production.entry((join_key(&r.state), year)).or_default() +=
            r.production.unwrap_or(0.0);
    }

    let mut rain: BTreeMap<(String, i32), (f64, usize)> = BTreeMap::new();
    for r in &rainfall.records {
        if rain_state.as_ref().is_some_and(|s| &r.state != s) {
            continue;
        }
        let (Some(year), Some(value)) = (r.year, r.rainfall) else {
            continue;
        };
        if !selected.contains(Some(year)) {
            continue;
        }
        let entry = rain.entry((r.state.clone(), year)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    // year -> (production sum, rainfall means)
    let mut joined: BTreeMap<i32, (f64, Vec<f64>)> = BTreeMap::new();
    for (key, prod) in &production {
        if let Some((total, count)) = rain.get(key) {
            let entry = joined.entry(key.1).or_default();
            entry.0 += prod;
            entry.1.push(total / *count as f64);
        }
    }

    let state = crop_state;
    let years: Vec<i32> = joined.keys().copied().collect();
    if years.len() < 2 {
        return Ok(TrendAnswer::InsufficientData {
            message: format!(
                "insufficient data: {} year(s) with both production and rainfall for {}",
                years.len(),
                crop
            ),
            crop,
            state,
            joined_years: years,
        });
    }

    let production_trend: Vec<f64> = joined.values().map(|(p, _)| *p).collect();
    let rainfall_series: Vec<f64> = joined
        .values()
        .map(|(_, means)| means.iter().sum::<f64>() / means.len() as f64)
        .collect();

    let direction = match (production_trend.first(), production_trend.last()) {
        (Some(first), Some(last)) if last < first => TrendDirection::Decreasing,
        _ => TrendDirection::Increasing,
    };
    let rain_correlation = pearson(&production_trend, &rainfall_series);

    Ok(TrendAnswer::Ok(TrendReport {
        crop,
        state,
        years,
        production_trend,
        rainfall: rainfall_series,
        direction,
        rain_correlation,
    }))
}
