//! Answer shapes returned by the analytic queries.

use serde::Serialize;

use super::request::{Intent, YearFilter};
use crate::source::Provenance;

/// Average rainfall for two states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallComparison {
    pub state_x: String,
    pub state_y: String,
    /// `None` when no rows matched.
    pub state_x_avg: Option<f64>,
    pub state_y_avg: Option<f64>,
}

/// A district and its summed production.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictValue(pub String, pub f64);

/// Top district in one state and bottom district in another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictExtremes {
    pub crop: String,
    pub state1: String,
    pub state2: String,
    pub state1_top: Option<DistrictValue>,
    pub state2_low: Option<DistrictValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// Yearly production series joined with rainfall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub crop: String,
    pub state: Option<String>,
    pub years: Vec<i32>,
    pub production_trend: Vec<f64>,
    pub rainfall: Vec<f64>,
    pub direction: TrendDirection,
    /// `None` when undefined (constant series).
    pub rain_correlation: Option<f64>,
}

/// Outcome of a trend query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendAnswer {
    Ok(TrendReport),
    InsufficientData {
        crop: String,
        state: Option<String>,
        joined_years: Vec<i32>,
        message: String,
    },
}

/// A crop and its summed production.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropTotal(pub String, pub f64);

/// Diagnostic for a question the router could not dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unmapped {
    pub message: String,
    pub intent: Option<Intent>,
    pub states: Vec<String>,
    pub crops: Vec<String>,
    pub years: YearFilter,
}

impl Unmapped {
    pub fn new(
        intent: Option<Intent>,
        states: Vec<String>,
        crops: Vec<String>,
        years: YearFilter,
        reason: Option<&str>,
    ) -> Self {
        let intent_name = intent.map(|i| i.as_str()).unwrap_or("none");
        let mut message = format!(
            "Could not map your question to a supported pattern. Detected intent={}, states={:?}, crops={:?}",
            intent_name, states, crops
        );
        if let Some(reason) = reason {
            message.push_str(&format!(" ({})", reason));
        }
        Self {
            message,
            intent,
            states,
            crops,
            years,
        }
    }
}

/// Intent-specific answer payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    RainfallComparison(RainfallComparison),
    DistrictExtremes(DistrictExtremes),
    CropTrend(TrendAnswer),
    TopCrops(Vec<CropTotal>),
    PolicyAdvice(Vec<String>),
    Unmapped(Unmapped),
    /// A fatal condition, rendered as a message.
    Error(String),
}

impl Answer {
    pub fn is_error(&self) -> bool {
        matches!(self, Answer::Error(_))
    }
}

/// The `{answer, sources}` pair every query resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub answer: Answer,
    pub sources: Provenance,
}

impl QueryResult {
    pub fn new(answer: Answer, sources: Provenance) -> Self {
        Self { answer, sources }
    }

    /// An error answer with no sources.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Answer::Error(message.into()), Provenance::new())
    }

    pub fn unmapped(unmapped: Unmapped) -> Self {
        Self::new(Answer::Unmapped(unmapped), Provenance::new())
    }
}
