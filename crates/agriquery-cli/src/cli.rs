//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use agriquery::DatasetKind;

/// AgriQuery: answer questions about crop production and rainfall
#[derive(Parser)]
#[command(name = "agriquery")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub source: SourceOptions,
}

/// Overrides for where datasets are loaded from.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceOptions {
    /// Try the on-disk cache before the remote endpoint
    #[arg(long, global = true)]
    pub prefer_cache: bool,

    /// Cache directory (overrides AGRIQUERY_CACHE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Never contact the remote endpoint
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question in plain English
    Ask {
        /// The question, e.g. "Top 3 crops in Punjab"
        #[arg(value_name = "QUESTION")]
        question: String,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },

    /// Run a structured query given as JSON
    Query {
        /// Request, e.g. '{"intent": "top_crops", "states": ["punjab"]}'
        #[arg(value_name = "JSON")]
        request: String,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },

    /// Load a dataset and show where it came from and what it contains
    Inspect {
        /// Dataset to load (crop or rainfall)
        #[arg(value_name = "DATASET")]
        dataset: DatasetKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the question API over HTTP
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },
}
