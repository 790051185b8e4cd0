//! Inspect command - load one dataset and summarize it.

use std::collections::BTreeSet;

use agriquery::{Column, DatasetKind, Provenance};
use colored::Colorize;
use serde::Serialize;

use crate::cli::SourceOptions;

/// How many distinct states to list in human-readable output.
const STATE_PREVIEW: usize = 10;

#[derive(Serialize)]
struct DatasetSummary {
    dataset: DatasetKind,
    sources: Provenance,
    columns: Vec<Column>,
    rows: usize,
    states: Vec<String>,
    first_year: Option<i32>,
    last_year: Option<i32>,
}

impl DatasetSummary {
    fn new(
        dataset: DatasetKind,
        sources: Provenance,
        columns: Vec<Column>,
        rows: usize,
        states: Vec<String>,
        years: BTreeSet<i32>,
    ) -> Self {
        Self {
            dataset,
            sources,
            columns,
            rows,
            states,
            first_year: years.first().copied(),
            last_year: years.last().copied(),
        }
    }
}

pub fn run(
    dataset: DatasetKind,
    json_output: bool,
    options: &SourceOptions,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::build_engine(options)?;
    let context = engine.context();

    let summary = match dataset {
        DatasetKind::Crop => {
            let loaded = context.crop()?;
            DatasetSummary::new(
                dataset,
                loaded.provenance.clone(),
                loaded.table.columns.clone(),
                loaded.table.records.len(),
                loaded.table.distinct_states().into_iter().collect(),
                loaded.table.years(),
            )
        }
        DatasetKind::Rainfall => {
            let loaded = context.rainfall()?;
            DatasetSummary::new(
                dataset,
                loaded.provenance.clone(),
                loaded.table.columns.clone(),
                loaded.table.records.len(),
                loaded.table.distinct_states().into_iter().collect(),
                loaded.table.years(),
            )
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        super::dataset_label(dataset).cyan().bold(),
        "dataset".cyan().bold()
    );
    println!();
    println!("  Source:  {}", summary.sources.as_slice().join(", ").white());
    println!("  Rows:    {}", summary.rows.to_string().white().bold());
    let columns: Vec<&str> = summary.columns.iter().map(|c| c.name()).collect();
    println!("  Columns: {}", columns.join(", "));
    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => println!("  Years:   {}-{}", first, last),
        _ => println!("  Years:   {}", "none".yellow()),
    }

    let shown: Vec<&str> = summary
        .states
        .iter()
        .take(STATE_PREVIEW)
        .map(String::as_str)
        .collect();
    let more = summary.states.len().saturating_sub(STATE_PREVIEW);
    if more > 0 {
        println!("  States:  {} (+{} more)", shown.join(", "), more);
    } else {
        println!("  States:  {}", shown.join(", "));
    }

    Ok(())
}
