//! Entity extraction from free-text questions.
//!
//! States and crops come from fixed gazetteers matched on word boundaries
//! and ordered by where they appear in the question. Positional phrases
//! such as "promote X over Y" take over for crops when they name every
//! gazetteer crop and at least one more.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::query::YearFilter;

/// States and union territories recognised in questions.
pub const STATES: &[&str] = &[
    "andaman and nicobar islands",
    "andhra pradesh",
    "arunachal pradesh",
    "assam",
    "bihar",
    "chandigarh",
    "chhattisgarh",
    "dadra and nagar haveli",
    "delhi",
    "goa",
    "gujarat",
    "haryana",
    "himachal pradesh",
    "jammu and kashmir",
    "jharkhand",
    "karnataka",
    "kerala",
    "ladakh",
    "lakshadweep",
    "madhya pradesh",
    "maharashtra",
    "manipur",
    "meghalaya",
    "mizoram",
    "nagaland",
    "odisha",
    "puducherry",
    "punjab",
    "rajasthan",
    "sikkim",
    "tamil nadu",
    "telangana",
    "tripura",
    "uttar pradesh",
    "uttarakhand",
    "west bengal",
];

/// Crops recognised in questions.
pub const CROPS: &[&str] = &[
    "rice",
    "paddy",
    "wheat",
    "maize",
    "jowar",
    "bajra",
    "ragi",
    "barley",
    "gram",
    "arhar",
    "tur",
    "moong",
    "urad",
    "masoor",
    "groundnut",
    "soyabean",
    "sunflower",
    "rapeseed",
    "mustard",
    "sesamum",
    "linseed",
    "castor seed",
    "sugarcane",
    "cotton",
    "jute",
    "mesta",
    "coconut",
    "arecanut",
    "banana",
    "potato",
    "onion",
    "tea",
    "coffee",
    "rubber",
    "turmeric",
    "ginger",
    "garlic",
    "black pepper",
    "cardamom",
    "tobacco",
];

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})\s*(?:-|to)\s*((?:19|20)\d{2})\b").unwrap()
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

static LAST_N_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:last|past|recent)\s+(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\s+years?\b")
        .unwrap()
});

static LAST_DECADE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:last|past)\s+decade\b").unwrap());

static LAST_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:last|most recent)\s+year\b").unwrap());

static TOP_N: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\btop\s+(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\b|\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\s+most\b",
    )
    .unwrap()
});

static PROMOTE_OVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bpromote\s+([a-z][a-z ]*?)\s+over\s+([a-z][a-z ]*?)(?:\s+in\b|\s*[?.!,]|\s*$)")
        .unwrap()
});

static OF_FOR_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:of|for)\s+([a-z][a-z ]*?)(?:\s+and\s+([a-z][a-z ]*?))?\s+in\b").unwrap()
});

const NOISE_WORDS: &[&str] = &["the", "production", "cultivation", "crop", "crops", "yield"];

/// Words that mark a positional capture as something other than a crop.
const NON_CROP_WORDS: &[&str] = &["rainfall", "correlation", "weather", "climate", "district"];

/// Entities found in a question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entities {
    pub states: Vec<String>,
    pub crops: Vec<String>,
    pub years: YearFilter,
    pub top_n: Option<usize>,
}

/// Extract every entity from a lower-cased question.
pub fn extract(question: &str) -> Entities {
    let listed = gazetteer_matches(question, CROPS);
    let positional = positional_crops(question);
    let crops = if positional.len() > listed.len() && listed.iter().all(|c| positional.contains(c)) {
        positional
    } else {
        listed
    };
    Entities {
        states: gazetteer_matches(question, STATES),
        crops,
        years: extract_years(question),
        top_n: extract_top_n(question),
    }
}

/// Gazetteer entries present in `text`, ordered by first occurrence.
pub fn gazetteer_matches(text: &str, gazetteer: &[&str]) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = gazetteer
        .iter()
        .filter_map(|name| find_word(text, name).map(|pos| (pos, *name)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    let is_boundary = |c: Option<char>| c.is_none_or(|c| !c.is_alphanumeric());
    text.match_indices(word).map(|(pos, _)| pos).find(|&pos| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + word.len()..].chars().next();
        is_boundary(before) && is_boundary(after)
    })
}

/// Year phrases: explicit ranges and years first, then relative phrases.
pub fn extract_years(text: &str) -> YearFilter {
    let mut years = Vec::new();
    for caps in YEAR_RANGE.captures_iter(text) {
        let (Ok(a), Ok(b)) = (caps[1].parse::<i32>(), caps[2].parse::<i32>()) else {
            continue;
        };
        years.extend(a.min(b)..=a.max(b));
    }
    let without_ranges = YEAR_RANGE.replace_all(text, " ");
    years.extend(
        YEAR.captures_iter(&without_ranges)
            .filter_map(|caps| caps[1].parse::<i32>().ok()),
    );

    if !years.is_empty() {
        years.sort_unstable();
        years.dedup();
        return YearFilter::Years(years);
    }

    if let Some(n) = LAST_N_YEARS
        .captures(text)
        .and_then(|caps| parse_count(&caps[1]))
    {
        return YearFilter::LastN(n);
    }
    if LAST_DECADE.is_match(text) {
        return YearFilter::LastN(10);
    }
    if LAST_YEAR.is_match(text) {
        return YearFilter::LastN(1);
    }
    YearFilter::All
}

/// "top N" / "N most" counts.
pub fn extract_top_n(text: &str) -> Option<usize> {
    let caps = TOP_N.captures(text)?;
    let count = caps.get(1).or_else(|| caps.get(2))?;
    parse_count(count.as_str())
}

fn parse_count(token: &str) -> Option<usize> {
    const WORDS: [&str; 10] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    token.parse().ok().or_else(|| {
        WORDS
            .iter()
            .position(|w| *w == token)
            .map(|i| i + 1)
    })
}

/// Crops named by position: "promote X over Y", "of X [and Y] in Z".
pub fn positional_crops(text: &str) -> Vec<String> {
    let caps = PROMOTE_OVER
        .captures(text)
        .or_else(|| OF_FOR_IN.captures(text));
    let Some(caps) = caps else {
        return Vec::new();
    };
    [caps.get(1), caps.get(2)]
        .into_iter()
        .flatten()
        .map(|m| strip_noise(m.as_str()))
        .filter(|c| !c.is_empty() && !names_non_crop(c))
        .collect()
}

fn names_non_crop(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .any(|w| NON_CROP_WORDS.contains(&w))
        || !gazetteer_matches(phrase, STATES).is_empty()
}

fn strip_noise(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .filter(|w| !NOISE_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
