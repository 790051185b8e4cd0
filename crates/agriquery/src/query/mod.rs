//! Analytic query library.
//!
//! Each query is a pure function over normalized tables. [`execute`] loads
//! the tables a request needs from a [`DataContext`], attaches their
//! provenance and converts every failure into an error answer, so callers
//! always receive a [`QueryResult`].

mod districts;
mod policy;
mod rainfall;
mod request;
mod result;
pub mod stats;
mod top_crops;
mod trend;

pub use districts::district_extremes;
pub use policy::policy_advice;
pub use rainfall::compare_rainfall;
pub use request::{DEFAULT_TOP_N, Intent, QueryRequest, Requirements, YearFilter, YearSet};
pub use result::{
    Answer, CropTotal, DistrictExtremes, DistrictValue, QueryResult, RainfallComparison,
    TrendAnswer, TrendDirection, TrendReport, Unmapped,
};
pub use top_crops::top_crops;
pub use trend::crop_trend;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::context::DataContext;
use crate::error::Result;
use crate::matching::NameMatcher;

/// Resolve a user-supplied name against a column's distinct values.
pub(crate) fn resolve_in(matcher: &NameMatcher, query: &str, values: &IndexSet<String>) -> String {
    matcher.resolve(query, values.iter().map(String::as_str)).value
}

/// Run a structured request.
///
/// Requests lacking the entities their intent needs produce an
/// [`Answer::Unmapped`] diagnostic; load or schema failures produce an
/// [`Answer::Error`] with no sources.
pub fn execute(ctx: &DataContext, matcher: &NameMatcher, request: &QueryRequest) -> QueryResult {
    let requirements = request.intent.requirements();
    if let Some(reason) = requirements.missing(request.states.len(), request.crops.len()) {
        return QueryResult::unmapped(Unmapped::new(
            Some(request.intent),
            request.states.clone(),
            request.crops.clone(),
            request.year_filter(),
            Some(&reason),
        ));
    }

    match dispatch(ctx, matcher, request) {
        Ok(result) => {
            debug!(intent = %request.intent, sources = ?result.sources.as_slice(), "query answered");
            result
        }
        Err(e) => {
            warn!(intent = %request.intent, error = %e, "query failed");
            QueryResult::error(e.to_string())
        }
    }
}

fn dispatch(ctx: &DataContext, matcher: &NameMatcher, request: &QueryRequest) -> Result<QueryResult> {
    let years = request.year_filter();
    let states = &request.states;
    let crops = &request.crops;

    let result = match request.intent {
        Intent::RainfallComparison => {
            let rain = ctx.rainfall()?;
            let answer = compare_rainfall(&rain.table, matcher, &states[0], &states[1], &years)?;
            QueryResult::new(Answer::RainfallComparison(answer), rain.provenance.clone())
        }
        Intent::DistrictExtremes => {
            let crop = ctx.crop()?;
            let state2 = states.get(1).unwrap_or(&states[0]);
            let answer =
                district_extremes(&crop.table, matcher, &crops[0], &states[0], state2, &years)?;
            QueryResult::new(Answer::DistrictExtremes(answer), crop.provenance.clone())
        }
        Intent::CropTrend => {
            let crop = ctx.crop()?;
            let rain = ctx.rainfall()?;
            let answer = crop_trend(
                &crop.table,
                &rain.table,
                matcher,
                &crops[0],
                states.first().map(String::as_str),
                &years,
            )?;
            let mut sources = crop.provenance.clone();
            sources.merge(&rain.provenance);
            QueryResult::new(Answer::CropTrend(answer), sources)
        }
        Intent::TopCrops => {
            let crop = ctx.crop()?;
            let answer = top_crops(&crop.table, matcher, &states[0], &years, request.top_n())?;
            QueryResult::new(Answer::TopCrops(answer), crop.provenance.clone())
        }
        Intent::PolicyAdvice => {
            let crop = ctx.crop()?;
            let answer = policy_advice(
                &crop.table,
                matcher,
                &crops[0],
                &crops[1],
                &states[0],
                &years,
                request.top_n(),
            )?;
            QueryResult::new(Answer::PolicyAdvice(answer), crop.provenance.clone())
        }
    };
    Ok(result)
}
