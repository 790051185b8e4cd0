//! Natural-language routing.
//!
//! A question is lower-cased once, entities are extracted independently of
//! intent, the intent is classified by the first matching rule, and the
//! intent's entity requirements are checked before anything is dispatched.

mod extract;
mod intent;

pub use extract::{
    extract, extract_top_n, extract_years, gazetteer_matches, positional_crops, Entities, CROPS,
    STATES,
};
pub use intent::{classify, IntentRule, RULES};

use tracing::debug;

use crate::query::{QueryRequest, Unmapped, YearFilter};

/// Outcome of routing a question.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Ready to run.
    Dispatch(QueryRequest),
    /// No intent, or not enough entities for the intent found.
    Unmapped(Unmapped),
}

/// Route a free-text question to a structured request.
pub fn route(question: &str) -> Route {
    let text = question.to_lowercase();
    let entities = extract(&text);
    let intent = classify(&text);
    debug!(
        intent = ?intent,
        states = ?entities.states,
        crops = ?entities.crops,
        years = ?entities.years,
        "question routed"
    );

    let Some(intent) = intent else {
        return Route::Unmapped(Unmapped::new(
            None,
            entities.states,
            entities.crops,
            entities.years,
            None,
        ));
    };

    if let Some(reason) = intent
        .requirements()
        .missing(entities.states.len(), entities.crops.len())
    {
        return Route::Unmapped(Unmapped::new(
            Some(intent),
            entities.states,
            entities.crops,
            entities.years,
            Some(&reason),
        ));
    }

    let mut request = QueryRequest::new(intent)
        .with_states(entities.states)
        .with_crops(entities.crops);
    match entities.years {
        YearFilter::All => {}
        YearFilter::Years(years) => request = request.with_years(years),
        YearFilter::LastN(n) => request = request.with_last_n_years(n),
    }
    if let Some(n) = entities.top_n {
        request = request.with_top_n(n);
    }
    Route::Dispatch(request)
}
