//! The `ecoquiz show` command.

use std::path::PathBuf;

use anyhow::Result;

use ecoquiz_core::report::QuizOutcome;
use ecoquiz_report::html::generate_html;

use super::output::print_summary;

pub fn execute(outcome_path: PathBuf, format: String) -> Result<()> {
    let outcome = QuizOutcome::load_json(&outcome_path)?;

    match format.as_str() {
        "text" => {
            println!(
                "{} (taken {})",
                outcome.quiz.name,
                outcome.created_at.format("%Y-%m-%d %H:%M")
            );
            print_summary(&outcome);
        }
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "md" | "markdown" => print!("{}", outcome.to_markdown()),
        "html" => print!("{}", generate_html(&outcome)),
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
    }

    Ok(())
}
