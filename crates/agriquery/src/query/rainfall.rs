//! Average rainfall of two states.

use super::request::YearFilter;
use super::result::RainfallComparison;
use super::resolve_in;
use super::stats::mean;
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::schema::{Column, RainfallRecord, RainfallTable};

/// Compare mean rainfall of `state_x` and `state_y` over the selected years.
///
/// A state with no matching rows gets a `None` average.
pub fn compare_rainfall(
    table: &RainfallTable,
    matcher: &NameMatcher,
    state_x: &str,
    state_y: &str,
    years: &YearFilter,
) -> Result<RainfallComparison> {
    table.require(Column::Rainfall)?;
    if !years.is_all() {
        table.require(Column::Year)?;
    }

    let states = table.distinct_states();
    let state_x = resolve_in(matcher, state_x, &states);
    let state_y = resolve_in(matcher, state_y, &states);

    let in_scope = |r: &&RainfallRecord| r.state == state_x || r.state == state_y;
    let selected = years.resolve(table.records.iter().filter(in_scope).filter_map(|r| r.year));

    let average = |state: &str| {
        mean(
            table
                .records
                .iter()
                .filter(|r| r.state == state && selected.contains(r.year))
                .map(|r| r.rainfall),
        )
    };

    Ok(RainfallComparison {
        state_x_avg: average(&state_x),
        state_y_avg: average(&state_y),
        state_x,
        state_y,
    })
}
