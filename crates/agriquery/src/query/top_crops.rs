//! Most-produced crops of a state.

use std::collections::HashMap;

use super::request::YearFilter;
use super::resolve_in;
use super::result::CropTotal;
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::schema::{Column, CropTable};

/// The `n` crops with the highest summed production in `state`, descending.
///
/// Equal totals are ordered by crop name. No matching rows yield an empty list.
pub fn top_crops(
    table: &CropTable,
    matcher: &NameMatcher,
    state: &str,
    years: &YearFilter,
    n: usize,
) -> Result<Vec<CropTotal>> {
    table.require(Column::Crop)?;
    table.require(Column::Production)?;
    if !years.is_all() {
        table.require(Column::Year)?;
    }

    let state = resolve_in(matcher, state, &table.distinct_states());
    let candidates: Vec<_> = table
        .records
        .iter()
        .filter(|r| r.state == state && !r.crop.is_empty())
        .collect();
    let selected = years.resolve(candidates.iter().filter_map(|r| r.year));

    let mut totals: HashMap<&str, f64> = HashMap::new();
    for r in candidates.iter().filter(|r| selected.contains(r.year)) {
        *totals.entry(r.crop.as_str()).or_default() += r.production.unwrap_or(0.0);
    }

    let mut ranked: Vec<CropTotal> = totals
        .into_iter()
        .map(|(crop, total)| CropTotal(crop.to_string(), total))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    Ok(ranked)
}
