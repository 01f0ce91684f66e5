//! The `ecoquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("ecoquiz.toml").exists() {
        println!("ecoquiz.toml already exists, skipping.");
    } else {
        std::fs::write("ecoquiz.toml", SAMPLE_CONFIG)?;
        println!("Created ecoquiz.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.toml or add your own quiz files");
    println!("  2. Run: ecoquiz validate --quiz quizzes/example.toml");
    println!("  3. Run: ecoquiz take --quiz quizzes/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ecoquiz configuration

shuffle_questions = true
# as_written, shuffled, ascending or descending
choice_order = "as_written"
# seed = 42
output_dir = "./ecoquiz-results"
# json, html, md, all or none
format = "json"
"#;

const EXAMPLE_QUIZ: &str = include_str!("../../../../quizzes/sustainability.toml");
