//! ecoquiz CLI: take, score and inspect sustainability quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ecoquiz", version, about = "Terminal sustainability quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Path to a .toml quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Seed for reproducible question and choice order
        #[arg(long)]
        seed: Option<u64>,

        /// Keep questions in authored order
        #[arg(long)]
        no_shuffle: bool,

        /// Choice order: as_written, shuffled, ascending, descending
        #[arg(long)]
        choice_order: Option<String>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, md, all, none
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a quiz from an answers file
    Score {
        /// Path to a .toml quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Answers TOML mapping question ids to choice numbers
        #[arg(long)]
        answers: PathBuf,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, md, all, none
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Render a saved outcome
    Show {
        /// Outcome JSON written by `take` or `score`
        #[arg(long)]
        outcome: PathBuf,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ecoquiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            seed,
            no_shuffle,
            choice_order,
            output,
            format,
            config,
        } => commands::take::execute(commands::take::TakeArgs {
            quiz,
            seed,
            no_shuffle,
            choice_order,
            output,
            format,
            config,
        }),
        Commands::Score {
            quiz,
            answers,
            output,
            format,
            config,
        } => commands::score::execute(quiz, answers, output, format, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Show { outcome, format } => commands::show::execute(outcome, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
