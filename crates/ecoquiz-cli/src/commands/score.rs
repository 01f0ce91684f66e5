//! The `ecoquiz score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use ecoquiz_core::config::load_config_from;
use ecoquiz_core::engine::QuizSession;
use ecoquiz_core::parser;
use ecoquiz_core::report::QuizOutcome;

use super::output::{print_summary, save_outputs};

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.format.clone());

    let quiz = parser::parse_quiz(&quiz_path)?;
    let answers = parser::parse_answers(&answers_path)?;

    // Choice numbers refer to authored order, so question order is irrelevant.
    let mut session = QuizSession::in_order(&quiz)?;
    for (question_id, choice) in &answers {
        session
            .answer(question_id, *choice)
            .with_context(|| format!("invalid answer in {}", answers_path.display()))?;
    }

    while !session.navigation().can_finalize {
        session.advance()?;
    }
    let report = session.finalize()?;

    let outcome = QuizOutcome::new(&quiz, &session, report);
    print_summary(&outcome);
    save_outputs(&outcome, &output, &format)?;

    Ok(())
}
