//! Shared result printing and export.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use ecoquiz_core::report::QuizOutcome;
use ecoquiz_report::html::write_html_report;

/// Print the score line, headline and category table.
pub fn print_summary(outcome: &QuizOutcome) {
    println!();
    match &outcome.headline {
        Some(h) if h.icon.is_empty() => println!("{}", h.title),
        Some(h) => println!("{} {}", h.icon, h.title),
        None => println!("Result: {}", outcome.tier),
    }
    println!(
        "Your final score: {} / {}",
        outcome.report.total, outcome.report.max_total
    );
    if let Some(h) = outcome.headline.as_ref().filter(|h| !h.text.is_empty()) {
        println!("{}", h.text);
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Score", "Max", "Level"]);
    for (score, feedback) in outcome.report.categories.iter().zip(&outcome.feedback) {
        table.add_row(vec![
            Cell::new(&score.label),
            Cell::new(score.score),
            Cell::new(score.max_score),
            Cell::new(feedback.level),
        ]);
    }
    println!("\n{table}");

    for feedback in &outcome.feedback {
        if let Some(text) = &feedback.text {
            println!("  {}: {}", feedback.label, text);
        }
    }
}

/// Export the outcome in each requested format.
pub fn save_outputs(outcome: &QuizOutcome, output: &Path, format: &str) -> Result<()> {
    if format == "none" {
        return Ok(());
    }

    std::fs::create_dir_all(output)?;
    let timestamp = outcome.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "md"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("outcome-{timestamp}.json"));
                outcome.save_json(&path)?;
                eprintln!("Outcome saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("outcome-{timestamp}.html"));
                write_html_report(outcome, &path)?;
                eprintln!("HTML result: {}", path.display());
            }
            "md" | "markdown" => {
                let path = output.join(format!("outcome-{timestamp}.md"));
                std::fs::write(&path, outcome.to_markdown())?;
                eprintln!("Markdown result: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}
