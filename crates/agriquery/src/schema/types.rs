//! Dataset kinds and canonical column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two datasets the engine knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// District-level crop area and production.
    Crop,
    /// State-level rainfall.
    Rainfall,
}

impl DatasetKind {
    /// All dataset kinds, in load order.
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Crop, DatasetKind::Rainfall];

    /// Lowercase identifier used for cache file names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Crop => "crop",
            DatasetKind::Rainfall => "rainfall",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crop" | "crops" => Ok(DatasetKind::Crop),
            "rain" | "rainfall" => Ok(DatasetKind::Rainfall),
            other => Err(format!("unknown dataset '{}' (expected crop or rainfall)", other)),
        }
    }
}

/// Canonical column names shared by both datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    State,
    District,
    Crop,
    Year,
    Season,
    Area,
    Production,
    Rainfall,
}

impl Column {
    /// Canonical header text.
    pub fn name(&self) -> &'static str {
        match self {
            Column::State => "State",
            Column::District => "District",
            Column::Crop => "Crop",
            Column::Year => "Year",
            Column::Season => "Season",
            Column::Area => "Area",
            Column::Production => "Production",
            Column::Rainfall => "Rainfall",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
