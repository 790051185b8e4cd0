//! Ordered keyword rules mapping a question to an intent.

use crate::query::Intent;

/// One classification rule. Rules are tried in order; the first whose
/// predicate holds decides the intent.
pub struct IntentRule {
    pub intent: Intent,
    pub matches: fn(&str) -> bool,
}

const COMPARISON_CUES: &[&str] = &[
    "compare",
    "comparison",
    "versus",
    " vs",
    "vs.",
    "between",
    "difference",
    "higher",
    "lower",
    "more",
    "less",
];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn is_rainfall_comparison(q: &str) -> bool {
    q.contains("rainfall") && contains_any(q, COMPARISON_CUES)
}

fn is_district_extremes(q: &str) -> bool {
    q.contains("district") && contains_any(q, &["highest", "lowest"])
}

fn is_crop_trend(q: &str) -> bool {
    contains_any(q, &["trend", "growth", "correlat"])
}

fn is_policy_advice(q: &str) -> bool {
    contains_any(q, &["policy", "better to cultivate", "promote"])
}

fn is_top_crops(q: &str) -> bool {
    q.contains("top") && q.contains("crop")
}

pub static RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::RainfallComparison,
        matches: is_rainfall_comparison,
    },
    IntentRule {
        intent: Intent::DistrictExtremes,
        matches: is_district_extremes,
    },
    IntentRule {
        intent: Intent::CropTrend,
        matches: is_crop_trend,
    },
    IntentRule {
        intent: Intent::PolicyAdvice,
        matches: is_policy_advice,
    },
    IntentRule {
        intent: Intent::TopCrops,
        matches: is_top_crops,
    },
];

/// Classify a lower-cased question; `None` when no rule applies.
pub fn classify(question: &str) -> Option<Intent> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(question))
        .map(|rule| rule.intent)
}
