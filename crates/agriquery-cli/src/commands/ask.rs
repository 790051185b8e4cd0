//! Ask command - route a plain-English question and print the result.

use colored::Colorize;

use crate::cli::SourceOptions;

pub fn run(
    question: String,
    pretty: bool,
    options: &SourceOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let question = question.trim();
    if question.is_empty() {
        return Err("No question provided".into());
    }

    if verbose {
        eprintln!("{} {}", "Question:".cyan().bold(), question);
    }

    let engine = super::build_engine(options)?;
    let result = engine.ask(question);

    super::print_result(&result, pretty)
}
