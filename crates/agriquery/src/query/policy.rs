//! Data-backed arguments for promoting one crop over another.

use std::collections::BTreeMap;

use super::request::YearFilter;
use super::resolve_in;
use super::stats::{mean_growth, sum, sum_present};
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::schema::{Column, CropRecord, CropTable};

struct CropFigures {
    name: String,
    production: f64,
    area: Option<f64>,
    growth: Option<f64>,
}

impl CropFigures {
    fn collect(name: String, rows: &[&CropRecord], with_area: bool) -> Self {
        let production = sum(rows.iter().map(|r| r.production));
        let area = if with_area {
            sum_present(rows.iter().map(|r| r.area))
        } else {
            None
        };

        let mut yearly: BTreeMap<i32, f64> = BTreeMap::new();
        for r in rows {
            if let Some(year) = r.year {
                *yearly.entry(year).or_default() += r.production.unwrap_or(0.0);
            }
        }
        let series: Vec<f64> = yearly.into_values().collect();

        Self {
            name,
            production,
            area,
            growth: mean_growth(&series),
        }
    }
}

/// Up to `n` arguments comparing `crop_a` and `crop_b` within `state`.
///
/// Arguments are considered in order: total production, cultivated area,
/// average year-on-year growth. A dimension is skipped when its figures are
/// missing or equal.
pub fn policy_advice(
    table: &CropTable,
    matcher: &NameMatcher,
    crop_a: &str,
    crop_b: &str,
    state: &str,
    years: &YearFilter,
    n: usize,
) -> Result<Vec<String>> {
    table.require(Column::Crop)?;
    table.require(Column::Production)?;
    if !years.is_all() {
        table.require(Column::Year)?;
    }

    let crops = table.distinct_crops();
    let crop_a = resolve_in(matcher, crop_a, &crops);
    let crop_b = resolve_in(matcher, crop_b, &crops);
    let state = resolve_in(matcher, state, &table.distinct_states());

    let candidates: Vec<&CropRecord> = table
        .records
        .iter()
        .filter(|r| r.state == state && (r.crop == crop_a || r.crop == crop_b))
        .collect();
    let selected = years.resolve(candidates.iter().filter_map(|r| r.year));

    let rows_for = |crop: &str| {
        candidates
            .iter()
            .copied()
            .filter(|r| r.crop == crop && selected.contains(r.year))
            .collect::<Vec<&CropRecord>>()
    };
    let with_area = table.has(Column::Area);
    let a = CropFigures::collect(crop_a.clone(), &rows_for(&crop_a), with_area);
    let b = CropFigures::collect(crop_b.clone(), &rows_for(&crop_b), with_area);

    let mut arguments = Vec::new();

    if a.production != b.production {
        let (hi, lo) = ordered(&a, &b, a.production > b.production);
        arguments.push(format!(
            "{} has higher total production ({:.0}) than {} ({:.0}) in {}.",
            hi.name, hi.production, lo.name, lo.production, state
        ));
    }

    if let (Some(area_a), Some(area_b)) = (a.area, b.area) {
        if area_a != area_b {
            let (hi, lo) = ordered(&a, &b, area_a > area_b);
            arguments.push(format!(
                "{} occupies more cultivated area ({:.0}) than {} ({:.0}).",
                hi.name,
                hi.area.unwrap_or_default(),
                lo.name,
                lo.area.unwrap_or_default()
            ));
        }
    }

    if let (Some(growth_a), Some(growth_b)) = (a.growth, b.growth) {
        if growth_a != growth_b {
            let (hi, lo) = ordered(&a, &b, growth_a > growth_b);
            arguments.push(format!(
                "{} shows stronger average year-on-year growth ({:.2}%) than {} ({:.2}%).",
                hi.name,
                hi.growth.unwrap_or_default() * 100.0,
                lo.name,
                lo.growth.unwrap_or_default() * 100.0
            ));
        }
    }

    arguments.truncate(n);
    Ok(arguments)
}

fn ordered<'a>(
    a: &'a CropFigures,
    b: &'a CropFigures,
    a_wins: bool,
) -> (&'a CropFigures, &'a CropFigures) {
    if a_wins { (a, b) } else { (b, a) }
}
