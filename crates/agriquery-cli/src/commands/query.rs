//! Query command - run a structured request given as JSON.

use agriquery::QueryRequest;
use colored::Colorize;

use crate::cli::SourceOptions;

pub fn run(
    request: String,
    pretty: bool,
    options: &SourceOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request: QueryRequest = serde_json::from_str(&request)
        .map_err(|e| format!("Invalid query request: {}", e))?;

    if verbose {
        eprintln!("{} {}", "Intent:".cyan().bold(), request.intent);
    }

    let engine = super::build_engine(options)?;
    let result = engine.execute(&request);

    super::print_result(&result, pretty)
}
