//! Raw → typed table normalization.

use super::aliases::resolve_columns;
use super::table::{CropRecord, CropTable, RainfallRecord, RainfallTable, Table};
use super::types::{Column, DatasetKind};
use crate::error::{AgriError, Result};
use crate::input::RawTable;

/// A typed table that can be produced from a [`RawTable`].
pub trait NormalizedTable: Sized {
    /// Dataset kind this table represents.
    const KIND: DatasetKind;

    /// Normalize a raw table into this typed table.
    fn from_raw(raw: &RawTable) -> Result<Self>;

    /// Number of rows.
    fn row_count(&self) -> usize;
}

/// Trim and lower-case an identifying string.
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Parse a numeric cell. Null tokens and unparsable or non-finite values
/// become `None`.
pub fn coerce_float(value: &str) -> Option<f64> {
    if RawTable::is_null_value(value) {
        return None;
    }
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a year cell. Accepts integral floats such as `2019.0`.
pub fn coerce_year(value: &str) -> Option<i32> {
    let v = coerce_float(value)?;
    if v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 {
        return None;
    }
    Some(v as i32)
}

/// Resolved column positions for one raw table.
struct ColumnIndex {
    resolved: Vec<(Column, usize)>,
}

impl ColumnIndex {
    fn new(raw: &RawTable, kind: DatasetKind) -> Result<Self> {
        let resolved = resolve_columns(&raw.headers, kind);
        if !resolved.iter().any(|(c, _)| *c == Column::State) {
            return Err(AgriError::Schema {
                dataset: kind,
                column: Column::State,
            });
        }
        Ok(Self { resolved })
    }

    fn columns(&self) -> Vec<Column> {
        let mut columns: Vec<Column> = self.resolved.iter().map(|(c, _)| *c).collect();
        columns.sort();
        columns
    }

    fn cell<'a>(&self, row: &'a [String], column: Column) -> Option<&'a str> {
        self.resolved
            .iter()
            .find(|(c, _)| *c == column)
            .and_then(|(_, index)| row.get(*index))
            .map(|s| s.as_str())
    }

    fn text(&self, row: &[String], column: Column) -> String {
        self.cell(row, column)
            .map(normalize_identifier)
            .unwrap_or_default()
    }

    fn number(&self, row: &[String], column: Column) -> Option<f64> {
        self.cell(row, column).and_then(coerce_float)
    }

    fn year(&self, row: &[String]) -> Option<i32> {
        self.cell(row, Column::Year).and_then(coerce_year)
    }
}

impl NormalizedTable for CropTable {
    const KIND: DatasetKind = DatasetKind::Crop;

    fn from_raw(raw: &RawTable) -> Result<Self> {
        let index = ColumnIndex::new(raw, Self::KIND)?;
        let records = raw
            .rows
            .iter()
            .map(|row| CropRecord {
                state: index.text(row, Column::State),
                district: index.text(row, Column::District),
                crop: index.text(row, Column::Crop),
                year: index.year(row),
                season: index.text(row, Column::Season),
                area: index.number(row, Column::Area),
                production: index.number(row, Column::Production),
            })
            .collect();

        Ok(CropTable {
            columns: index.columns(),
            records,
        })
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }
}

impl NormalizedTable for RainfallTable {
    const KIND: DatasetKind = DatasetKind::Rainfall;

    fn from_raw(raw: &RawTable) -> Result<Self> {
        let index = ColumnIndex::new(raw, Self::KIND)?;
        let records = raw
            .rows
            .iter()
            .map(|row| RainfallRecord {
                state: index.text(row, Column::State),
                year: index.year(row),
                rainfall: index.number(row, Column::Rainfall),
            })
            .collect();

        // District-level sources resolve District but the table keeps only
        // the state-level columns.
        let mut columns = index.columns();
        columns.retain(|c| matches!(c, Column::State | Column::Year | Column::Rainfall));

        Ok(RainfallTable { columns, records })
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }
}

/// Normalize a raw table according to its dataset kind.
pub fn normalize(raw: &RawTable, kind: DatasetKind) -> Result<Table> {
    match kind {
        DatasetKind::Crop => CropTable::from_raw(raw).map(Table::Crop),
        DatasetKind::Rainfall => RainfallTable::from_raw(raw).map(Table::Rainfall),
    }
}
