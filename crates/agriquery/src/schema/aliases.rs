//! Fixed alias tables mapping raw header names onto canonical columns.

use super::types::{Column, DatasetKind};

type AliasTable = &'static [(Column, &'static [&'static str])];

// Aliases are matched against trimmed, lower-cased headers, in priority order.
const CROP_ALIASES: AliasTable = &[
    (Column::State, &["state_name", "state", "state name", "statename"]),
    (Column::District, &["district_name", "district", "district name"]),
    (Column::Crop, &["crop", "crop_name", "crop name"]),
    (Column::Year, &["crop_year", "year", "crop year"]),
    (Column::Season, &["season"]),
    (Column::Area, &["area_", "area", "area (hectare)"]),
    (Column::Production, &["production_", "production", "production (tonnes)"]),
];

const RAINFALL_ALIASES: AliasTable = &[
    (Column::State, &["state", "state_name", "state name", "subdivision"]),
    (Column::District, &["district", "district_name"]),
    (Column::Year, &["year", "crop_year"]),
    (
        Column::Rainfall,
        &["rainfall", "avg_rainfall", "annual_rainfall", "annual", "rainfall_mm"],
    ),
];

/// Alias table for a dataset kind.
pub fn aliases_for(kind: DatasetKind) -> AliasTable {
    match kind {
        DatasetKind::Crop => CROP_ALIASES,
        DatasetKind::Rainfall => RAINFALL_ALIASES,
    }
}

/// Map each canonical column to the index of the first header matching one
/// of its aliases. Columns without a matching header are omitted.
pub fn resolve_columns(headers: &[String], kind: DatasetKind) -> Vec<(Column, usize)> {
    let folded: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    aliases_for(kind)
        .iter()
        .filter_map(|(column, aliases)| {
            aliases
                .iter()
                .find_map(|alias| folded.iter().position(|h| h == alias))
                .map(|index| (*column, index))
        })
        .collect()
}
