//! Canonical schema for the crop and rainfall datasets.
//!
//! Raw tables arrive with column names that vary by source and version
//! (`State_Name`, `state`, `crop_year`, `production_`, ...). Normalization
//! remaps them once through a fixed alias table, lower-cases identifying
//! strings and coerces numeric cells, producing one of the typed tables below.

mod aliases;
mod normalize;
mod table;
mod types;

pub use aliases::{aliases_for, resolve_columns};
pub use normalize::{coerce_float, coerce_year, normalize, normalize_identifier, NormalizedTable};
pub use table::{CropRecord, CropTable, RainfallRecord, RainfallTable, Table};
pub use types::{Column, DatasetKind};
