//! Serve command - expose the question API over HTTP.

use colored::Colorize;

use crate::cli::SourceOptions;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    options: &SourceOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::build_engine(options)?;
    let state = AppState::new(engine);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting AgriQuery server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  POST {}/api/ask    {{\"question\": \"...\"}}", url);
    println!("  POST {}/api/query  {{\"intent\": \"...\", ...}}", url);
    if verbose {
        println!("  Prefer cache: {}", options.prefer_cache);
        println!("  Offline: {}", options.offline);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
