//! TOML quiz definition parser.
//!
//! Loads quizzes and answer sheets from TOML files and directories, and
//! validates quizzes for authoring mistakes.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Category, MaxScorePolicy, Question, QuizDefinition, ResultTexts, ScoringRules};
use crate::scoring::Thresholds;

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    scoring: TomlScoring,
    #[serde(default)]
    results: ResultTexts,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlScoring {
    #[serde(default = "default_points")]
    points_per_question: u32,
    #[serde(default = "default_great")]
    great: u32,
    #[serde(default = "default_good")]
    good: u32,
    #[serde(default = "default_policy_str")]
    max_score_policy: String,
}

impl Default for TomlScoring {
    fn default() -> Self {
        Self {
            points_per_question: default_points(),
            great: default_great(),
            good: default_good(),
            max_score_policy: default_policy_str(),
        }
    }
}

fn default_points() -> u32 {
    5
}

fn default_great() -> u32 {
    44
}

fn default_good() -> u32 {
    32
}

fn default_policy_str() -> String {
    "all_questions".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: BTreeMap<String, usize>,
}

/// Parse a single TOML file into a `QuizDefinition`.
pub fn parse_quiz(path: &Path) -> Result<QuizDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `QuizDefinition` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizDefinition> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let max_score_policy: MaxScorePolicy = parsed
        .scoring
        .max_score_policy
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;

    let thresholds = Thresholds::new(parsed.scoring.great, parsed.scoring.good)
        .map_err(|e| anyhow::anyhow!("{}: {}", source_path.display(), e))?;

    let known: HashSet<&str> = parsed.categories.iter().map(|c| c.id.as_str()).collect();
    let mut question_ids = HashSet::new();
    for question in &parsed.questions {
        if !question_ids.insert(question.id.as_str()) {
            anyhow::bail!(
                "{}: duplicate question ID '{}'",
                source_path.display(),
                question.id
            );
        }
        if !known.contains(question.category.as_str()) {
            anyhow::bail!(
                "{}: question '{}' references unknown category '{}'",
                source_path.display(),
                question.id,
                question.category
            );
        }
    }

    Ok(QuizDefinition {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        scoring: ScoringRules {
            points_per_question: parsed.scoring.points_per_question,
            thresholds,
            max_score_policy,
        },
        results: parsed.results,
        categories: parsed.categories,
        questions: parsed.questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizDefinition>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// Load one quiz file, or every quiz under a directory.
pub fn load_quizzes(path: &Path) -> Result<Vec<QuizDefinition>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(vec![parse_quiz(path)?])
    }
}

/// Parse an answer sheet file.
///
/// The `[answers]` table maps question ids to 1-based choice numbers in
/// authored order. The returned map holds 0-based choice indices.
pub fn parse_answers(path: &Path) -> Result<BTreeMap<String, usize>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answers_str(&content, path)
}

/// Parse an answer sheet from a TOML string.
pub fn parse_answers_str(content: &str, source_path: &Path) -> Result<BTreeMap<String, usize>> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .answers
        .into_iter()
        .map(|(id, number)| {
            anyhow::ensure!(
                number >= 1,
                "answer for '{id}' must be a choice number starting at 1"
            );
            Ok((id, number - 1))
        })
        .collect()
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn quiz(message: impl Into<String>) -> Self {
        Self {
            question_id: None,
            message: message.into(),
        }
    }

    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let points = quiz.scoring.points_per_question;

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning::quiz("quiz has no questions"));
    }

    let mut seen_categories = HashSet::new();
    for category in &quiz.categories {
        if !seen_categories.insert(&category.id) {
            warnings.push(ValidationWarning::quiz(format!(
                "duplicate category ID: {}",
                category.id
            )));
        }
        if quiz.question_count_in(&category.id) == 0 {
            warnings.push(ValidationWarning::quiz(format!(
                "category '{}' has no questions",
                category.id
            )));
        }
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(&question.id, "prompt is empty"));
        }
        if question.choices.len() < 2 {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!("only {} choice(s), expected at least 2", question.choices.len()),
            ));
        }
        if question.best_value() > points {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!(
                    "choice value {} exceeds points_per_question ({points})",
                    question.best_value()
                ),
            ));
        }
    }

    let reachable = u64::from(points) * quiz.questions.len() as u64;
    if !quiz.questions.is_empty() && reachable < u64::from(quiz.scoring.thresholds.great) {
        warnings.push(ValidationWarning::quiz(format!(
            "great threshold ({}) is above the maximum total ({reachable})",
            quiz.scoring.thresholds.great
        )));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "mini"
name = "Mini Quiz"
description = "Two questions"

[scoring]
points_per_question = 4
great = 7
good = 4

[results.great]
icon = "*"
title = "Earth guardian"
text = "Excellent."

[[categories]]
id = "food"
label = "Food"

[categories.feedback]
high = "Great choices."
mid = "Good path."
low = "Small swaps help."

[[categories]]
id = "lifestyle"
label = "Lifestyle"

[[questions]]
id = "food-1"
category = "food"
prompt = "Where does your produce come from?"

[[questions.choices]]
label = "Supermarket"
value = 1

[[questions.choices]]
label = "Local market"
value = 4

[[questions]]
id = "life-1"
category = "lifestyle"
prompt = "Do you compost?"

[[questions.choices]]
label = "No"
value = 0

[[questions.choices]]
label = "Yes"
value = 4
"#;

    #[test]
    fn parse_valid_toml() {
        let quiz = parse_quiz_str(VALID_TOML, &PathBuf::from("mini.toml")).unwrap();
        assert_eq!(quiz.id, "mini");
        assert_eq!(quiz.categories.len(), 2);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].choices[1].value, 4);
        assert_eq!(quiz.scoring.points_per_question, 4);
        assert_eq!(quiz.scoring.thresholds, Thresholds { great: 7, good: 4 });
        assert_eq!(
            quiz.category("food").unwrap().feedback.as_ref().unwrap().low,
            "Small swaps help."
        );
        assert_eq!(quiz.results.great.as_ref().unwrap().title, "Earth guardian");
        assert!(quiz.results.good.is_none());
        assert!(validate_quiz(&quiz).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
id = "minimal"
name = "Minimal"

[[categories]]
id = "c"
label = "C"

[[questions]]
id = "q1"
category = "c"
prompt = "Anything?"
choices = [{ label = "a", value = 1 }, { label = "b", value = 5 }]
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("minimal.toml")).unwrap();
        assert_eq!(quiz.scoring, ScoringRules::default());
        assert!(quiz.description.is_empty());
        assert!(quiz.categories[0].feedback.is_none());
    }

    #[test]
    fn parse_answered_only_policy() {
        let toml = r#"
[quiz]
id = "p"
name = "P"

[scoring]
max_score_policy = "answered_only"
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("p.toml")).unwrap();
        assert_eq!(quiz.scoring.max_score_policy, MaxScorePolicy::AnsweredOnly);
    }

    #[test]
    fn reject_unknown_category() {
        let toml = r#"
[quiz]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
category = "travel"
prompt = "How do you commute?"
choices = [{ label = "Car", value = 1 }]
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown category 'travel'"));
    }

    #[test]
    fn reject_descending_thresholds() {
        let toml = r#"
[quiz]
id = "bad"
name = "Bad"

[scoring]
great = 20
good = 30
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn reject_duplicate_question_ids() {
        let toml = r#"
[quiz]
id = "dup"
name = "Dup"

[[categories]]
id = "food"
label = "Food"

[[questions]]
id = "same"
category = "food"
prompt = "First"
choices = [{ label = "a", value = 1 }, { label = "b", value = 5 }]

[[questions]]
id = "same"
category = "food"
prompt = "Second"
choices = [{ label = "a", value = 1 }, { label = "b", value = 5 }]
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("dup.toml")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("dup.toml"));
        assert!(msg.contains("duplicate question ID 'same'"));
    }

    #[test]
    fn reject_unknown_policy_names_file() {
        let toml = r#"
[quiz]
id = "p"
name = "P"

[scoring]
max_score_policy = "best_effort"
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("policy.toml")).unwrap_err();
        assert!(err.to_string().starts_with("policy.toml: "));
    }

    #[test]
    fn validate_huge_points_does_not_overflow() {
        let toml = r#"
[quiz]
id = "huge"
name = "Huge"

[scoring]
points_per_question = 3000000000
great = 4000000000
good = 1

[[categories]]
id = "c"
label = "C"

[[questions]]
id = "q1"
category = "c"
prompt = "One?"
choices = [{ label = "a", value = 1 }, { label = "b", value = 3000000000 }]

[[questions]]
id = "q2"
category = "c"
prompt = "Two?"
choices = [{ label = "a", value = 1 }, { label = "b", value = 3000000000 }]
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("huge.toml")).unwrap();
        let warnings = validate_quiz(&quiz);
        // 2 x 3e9 reaches the great threshold.
        assert!(!warnings.iter().any(|w| w.message.contains("great threshold")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_quiz_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_authoring_issues() {
        let toml = r#"
[quiz]
id = "warn"
name = "Warn"

[scoring]
points_per_question = 4

[[categories]]
id = "food"
label = "Food"

[[categories]]
id = "empty"
label = "Empty"

[[questions]]
id = "blank"
category = "food"
prompt = " "
choices = [{ label = "a", value = 5 }]

[[questions]]
id = "other"
category = "food"
prompt = "Second"
choices = [{ label = "a", value = 1 }, { label = "b", value = 2 }]
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("warn.toml")).unwrap();
        let warnings = validate_quiz(&quiz);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("prompt is empty"));
        assert!(has("only 1 choice"));
        assert!(has("exceeds points_per_question"));
        assert!(has("category 'empty' has no questions"));
        assert!(has("great threshold (44) is above the maximum total (8)"));
    }

    #[test]
    fn parse_answer_sheet() {
        let toml = r#"
[answers]
food-1 = 2
life-1 = 1
"#;
        let answers = parse_answers_str(toml, &PathBuf::from("answers.toml")).unwrap();
        assert_eq!(answers.get("food-1"), Some(&1));
        assert_eq!(answers.get("life-1"), Some(&0));
    }

    #[test]
    fn reject_zero_choice_number() {
        let toml = "[answers]\nfood-1 = 0\n";
        let err = parse_answers_str(toml, &PathBuf::from("answers.toml")).unwrap_err();
        assert!(err.to_string().contains("starting at 1"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let quizzes = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, "mini");

        let single = load_quizzes(&dir.path().join("mini.toml")).unwrap();
        assert_eq!(single.len(), 1);
    }
}
