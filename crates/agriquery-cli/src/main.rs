//! AgriQuery CLI - questions over crop production and rainfall data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Ask { question, pretty } => {
            commands::ask::run(question, pretty, &cli.source, cli.verbose)
        }

        Commands::Query { request, pretty } => {
            commands::query::run(request, pretty, &cli.source, cli.verbose)
        }

        Commands::Inspect { dataset, json } => {
            commands::inspect::run(dataset, json, &cli.source, cli.verbose)
        }

        Commands::Serve { port } => commands::serve::run(port, &cli.source, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
