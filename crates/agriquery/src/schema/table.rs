//! Typed, normalized tables.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::Serialize;

use super::types::{Column, DatasetKind};
use crate::error::{AgriError, Result};
use crate::input::RawTable;

/// One row of crop statistics.
///
/// Identifying strings are trimmed and lower-cased; they are empty when the
/// source table lacked the column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecord {
    pub state: String,
    pub district: String,
    pub crop: String,
    pub year: Option<i32>,
    pub season: String,
    pub area: Option<f64>,
    pub production: Option<f64>,
}

impl CropRecord {
    /// Create a record with the fields every crop query touches.
    pub fn new(
        state: impl Into<String>,
        district: impl Into<String>,
        crop: impl Into<String>,
        year: Option<i32>,
        production: Option<f64>,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            crop: crop.into(),
            year,
            season: String::new(),
            area: None,
            production,
        }
    }

    /// Set the cultivated area.
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    /// Set the season.
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = season.into();
        self
    }
}

/// Crop production table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropTable {
    /// Canonical columns present in the source.
    pub columns: Vec<Column>,
    pub records: Vec<CropRecord>,
}

/// One row of rainfall statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallRecord {
    pub state: String,
    pub year: Option<i32>,
    pub rainfall: Option<f64>,
}

impl RainfallRecord {
    /// Create a new rainfall record.
    pub fn new(state: impl Into<String>, year: Option<i32>, rainfall: Option<f64>) -> Self {
        Self {
            state: state.into(),
            year,
            rainfall,
        }
    }
}

/// Rainfall table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallTable {
    /// Canonical columns present in the source.
    pub columns: Vec<Column>,
    pub records: Vec<RainfallRecord>,
}

/// A normalized table of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Crop(CropTable),
    Rainfall(RainfallTable),
}

impl Table {
    /// Which dataset this table holds.
    pub fn kind(&self) -> DatasetKind {
        match self {
            Table::Crop(_) => DatasetKind::Crop,
            Table::Rainfall(_) => DatasetKind::Rainfall,
        }
    }
}

// =============================================================================
// Shared column helpers
// =============================================================================

fn require_column(columns: &[Column], kind: DatasetKind, column: Column) -> Result<()> {
    if columns.contains(&column) {
        Ok(())
    } else {
        Err(AgriError::Schema {
            dataset: kind,
            column,
        })
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> IndexSet<String> {
    values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn format_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl CropTable {
    /// Build a table from records, declaring every crop column present.
    pub fn new(records: Vec<CropRecord>) -> Self {
        Self {
            columns: vec![
                Column::State,
                Column::District,
                Column::Crop,
                Column::Year,
                Column::Season,
                Column::Area,
                Column::Production,
            ],
            records,
        }
    }

    /// Check whether a canonical column was present in the source.
    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with a schema error if `column` is absent.
    pub fn require(&self, column: Column) -> Result<()> {
        require_column(&self.columns, DatasetKind::Crop, column)
    }

    /// Distinct non-empty state names, in first-seen order.
    pub fn distinct_states(&self) -> IndexSet<String> {
        distinct(self.records.iter().map(|r| r.state.as_str()))
    }

    /// Distinct non-empty crop names, in first-seen order.
    pub fn distinct_crops(&self) -> IndexSet<String> {
        distinct(self.records.iter().map(|r| r.crop.as_str()))
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(|r| r.year).collect()
    }

    /// Render back to a raw table with canonical headers.
    pub fn to_raw(&self) -> RawTable {
        let headers = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows = self
            .records
            .iter()
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| match c {
                        Column::State => r.state.clone(),
                        Column::District => r.district.clone(),
                        Column::Crop => r.crop.clone(),
                        Column::Year => format_opt(r.year),
                        Column::Season => r.season.clone(),
                        Column::Area => format_opt(r.area),
                        Column::Production => format_opt(r.production),
                        Column::Rainfall => String::new(),
                    })
                    .collect()
            })
            .collect();
        RawTable::new(headers, rows)
    }
}

impl RainfallTable {
    /// Build a table from records, declaring every rainfall column present.
    pub fn new(records: Vec<RainfallRecord>) -> Self {
        Self {
            columns: vec![Column::State, Column::Year, Column::Rainfall],
            records,
        }
    }

    /// Check whether a canonical column was present in the source.
    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with a schema error if `column` is absent.
    pub fn require(&self, column: Column) -> Result<()> {
        require_column(&self.columns, DatasetKind::Rainfall, column)
    }

    /// Distinct non-empty state names, in first-seen order.
    pub fn distinct_states(&self) -> IndexSet<String> {
        distinct(self.records.iter().map(|r| r.state.as_str()))
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(|r| r.year).collect()
    }

    /// Render back to a raw table with canonical headers.
    pub fn to_raw(&self) -> RawTable {
        let headers = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows = self
            .records
            .iter()
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| match c {
                        Column::State => r.state.clone(),
                        Column::Year => format_opt(r.year),
                        Column::Rainfall => format_opt(r.rainfall),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect();
        RawTable::new(headers, rows)
    }
}
