//! The `ecoquiz take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use ecoquiz_core::config::load_config_from;
use ecoquiz_core::engine::{QuestionView, QuizSession};
use ecoquiz_core::error::QuizError;
use ecoquiz_core::interaction::{self, Action, Flow};
use ecoquiz_core::order::ChoiceOrder;
use ecoquiz_core::parser;
use ecoquiz_core::presenter::Presenter;
use ecoquiz_core::report::QuizOutcome;
use ecoquiz_core::scoring::{ResultTier, ScoreReport};

use super::output::{print_summary, save_outputs};

const PROGRESS_WIDTH: usize = 20;

pub struct TakeArgs {
    pub quiz: PathBuf,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
    pub choice_order: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub config: Option<PathBuf>,
}

/// Console presenter.
struct ConsolePresenter;

impl ConsolePresenter {
    fn commands_hint(view: &QuestionView) -> String {
        let mut hints = vec![format!("1-{} select", view.choices.len())];
        if view.nav.can_retreat {
            hints.push("p previous".into());
        }
        if view.nav.can_advance {
            hints.push("n next".into());
        }
        if view.nav.can_finalize {
            hints.push("c calculate".into());
        }
        hints.push("q quit".into());
        hints.join(" | ")
    }
}

impl Presenter for ConsolePresenter {
    fn show_question(&mut self, view: &QuestionView) {
        let filled = (view.progress * PROGRESS_WIDTH as f64).round() as usize;
        println!();
        println!(
            "[{}/{}] {}{} {:>3.0}%  {}",
            view.index + 1,
            view.total,
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled.min(PROGRESS_WIDTH)),
            view.progress * 100.0,
            view.category_label
        );
        println!("{}", view.prompt);
        for (i, label) in view.choices.iter().enumerate() {
            let marker = if view.selected == Some(i) { '*' } else { ' ' };
            println!(" {marker} {}) {label}", i + 1);
        }
        println!("({})", Self::commands_hint(view));
    }

    fn answer_missing(&mut self, view: &QuestionView) {
        if view.nav.can_finalize {
            println!("Please answer the last question.");
        } else {
            println!("Please select an answer to continue.");
        }
    }

    fn invalid_choice(&mut self, view: &QuestionView, error: &QuizError) {
        println!("Invalid choice: {error}. Pick 1-{}.", view.choices.len());
    }

    fn show_result(&mut self, report: &ScoreReport, tier: ResultTier) {
        println!(
            "\nQuiz complete: {} of {} questions answered, tier {tier}.",
            report.answered, report.question_count
        );
    }
}

pub fn execute(args: TakeArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.no_shuffle {
        config.shuffle_questions = false;
    }
    if let Some(order) = &args.choice_order {
        config.choice_order = order
            .parse::<ChoiceOrder>()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());
    let format = args.format.unwrap_or_else(|| config.format.clone());

    let quiz = parser::parse_quiz(&args.quiz)?;
    for w in parser::validate_quiz(&quiz) {
        tracing::warn!("{}: {}", quiz.id, w.message);
    }

    let mut rng = config.rng();
    let mut session = QuizSession::initialize(&quiz, &config, &mut rng)?;
    let mut presenter = ConsolePresenter;

    println!("{}", quiz.name);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    interaction::start(&session, &mut presenter);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let report = loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input ended before the quiz was finished");
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match interaction::dispatch(&mut session, action, &mut presenter) {
            Flow::Continue => {}
            Flow::Finished(report) => break report,
            Flow::Quit => {
                println!("Quiz abandoned.");
                return Ok(());
            }
        }
    };

    let outcome = QuizOutcome::new(&quiz, &session, report);
    print_summary(&outcome);
    save_outputs(&outcome, &output, &format)?;

    Ok(())
}
