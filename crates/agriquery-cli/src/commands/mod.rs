//! CLI command implementations.

pub mod ask;
pub mod inspect;
pub mod query;
pub mod serve;

use agriquery::{DatasetKind, Engine, QueryResult, SourceConfig};
use colored::Colorize;

use crate::cli::SourceOptions;

/// Build an engine from the environment plus command-line overrides.
pub fn build_engine(options: &SourceOptions) -> Result<Engine, Box<dyn std::error::Error>> {
    let mut config = SourceConfig::from_env()?.with_prefer_cache(options.prefer_cache);
    if let Some(dir) = &options.cache_dir {
        config = config.with_cache_dir(dir.clone());
    }

    if options.offline {
        // Without resource ids the remote tier is skipped.
        config.crop.resource_id = None;
        config.rainfall.resource_id = None;
    }
    Ok(Engine::new(config)?)
}

/// Print a result as JSON, warning on stderr when it carries an error.
pub fn print_result(result: &QueryResult, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    if result.answer.is_error() {
        eprintln!("{} query could not be answered", "Warning:".yellow());
    }
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{}", json);
    Ok(())
}

/// Human-readable dataset name.
pub fn dataset_label(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Crop => "Crop production",
        DatasetKind::Rainfall => "Rainfall",
    }
}
