//! Finished-session outcome with JSON persistence and a markdown summary.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{AnswerRecord, QuizSession};
use crate::model::{QuizDefinition, ResultText};
use crate::scoring::{FeedbackLevel, RadarChart, ResultTier, ScoreReport};

/// A complete quiz outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Unique outcome identifier.
    pub id: Uuid,
    /// When the session was finalized.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz.
    pub quiz: QuizSummary,
    pub report: ScoreReport,
    pub tier: ResultTier,
    /// Headline for the tier, when the quiz defines one.
    #[serde(default)]
    pub headline: Option<ResultText>,
    /// Per-category feedback in report order.
    pub feedback: Vec<CategoryFeedback>,
    /// Selections in session order.
    pub answers: Vec<AnswerRecord>,
}

/// Summary of a quiz (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// Feedback for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub category: String,
    pub label: String,
    pub level: FeedbackLevel,
    #[serde(default)]
    pub text: Option<String>,
}

impl QuizOutcome {
    /// Assemble the outcome of a finalized session.
    pub fn new(quiz: &QuizDefinition, session: &QuizSession, report: ScoreReport) -> Self {
        let tier = session.classify(report.total);

        let feedback = report
            .categories
            .iter()
            .map(|c| {
                let level = c.level();
                let text = quiz
                    .category(&c.category)
                    .and_then(|cat| cat.feedback.as_ref())
                    .map(|f| match level {
                        FeedbackLevel::High => f.high.clone(),
                        FeedbackLevel::Mid => f.mid.clone(),
                        FeedbackLevel::Low => f.low.clone(),
                    })
                    .filter(|t| !t.is_empty());
                CategoryFeedback {
                    category: c.category.clone(),
                    label: c.label.clone(),
                    level,
                    text,
                }
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id.clone(),
                name: quiz.name.clone(),
                question_count: quiz.questions.len(),
            },
            headline: quiz.results.get(tier).cloned(),
            tier,
            feedback,
            answers: session.answers(),
            report,
        }
    }

    /// Chart series for this outcome.
    pub fn radar_chart(&self) -> RadarChart {
        self.report.radar_chart(None)
    }

    /// Save the outcome as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize outcome")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write outcome to {}", path.display()))?;
        Ok(())
    }

    /// Load an outcome from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read outcome from {}", path.display()))?;
        let outcome: QuizOutcome =
            serde_json::from_str(&content).context("failed to parse outcome JSON")?;
        Ok(outcome)
    }

    /// Format the outcome as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz.name));
        match &self.headline {
            Some(h) if h.icon.is_empty() => md.push_str(&format!("### {}\n\n", h.title)),
            Some(h) => md.push_str(&format!("### {} {}\n\n", h.icon, h.title)),
            None => md.push_str(&format!("### Result: {}\n\n", self.tier)),
        }
        md.push_str(&format!(
            "**Score:** {} / {}\n\n",
            self.report.total, self.report.max_total
        ));
        if let Some(text) = self.headline.as_ref().map(|h| &h.text).filter(|t| !t.is_empty()) {
            md.push_str(text);
            md.push_str("\n\n");
        }

        md.push_str("| Category | Score | Max | Level |\n");
        md.push_str("|----------|-------|-----|-------|\n");
        for (c, f) in self.report.categories.iter().zip(&self.feedback) {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                c.label, c.score, c.max_score, f.level
            ));
        }

        let notes: Vec<_> = self
            .feedback
            .iter()
            .filter_map(|f| f.text.as_ref().map(|t| (f, t)))
            .collect();
        if !notes.is_empty() {
            md.push('\n');
            for (f, text) in notes {
                md.push_str(&format!("- **{}:** {}\n", f.label, text));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::grid_quiz;
    use crate::model::Feedback;

    fn finished_outcome() -> QuizOutcome {
        let mut quiz = grid_quiz(&["food", "home"], 2, 4);
        quiz.categories[0].feedback = Some(Feedback {
            high: "Excellent food choices.".into(),
            mid: "Good path.".into(),
            low: "Try seasonal food.".into(),
        });
        quiz.results.good = Some(ResultText {
            icon: "~".into(),
            title: "Seed of good".into(),
            text: "Keep going.".into(),
        });

        let mut session = QuizSession::in_order(&quiz).unwrap();
        session.answer("food-0", 3).unwrap();
        session.answer("food-1", 3).unwrap();
        session.answer("home-0", 0).unwrap();
        session.answer("home-1", 0).unwrap();
        // 8 + 2 against thresholds 35/25
        let report = session.finalize().unwrap();
        QuizOutcome::new(&quiz, &session, report)
    }

    #[test]
    fn outcome_collects_feedback_and_headline() {
        let outcome = finished_outcome();
        assert_eq!(outcome.report.total, 10);
        assert_eq!(outcome.tier, ResultTier::Improve);
        assert!(outcome.headline.is_none());
        assert_eq!(outcome.feedback[0].level, FeedbackLevel::High);
        assert_eq!(outcome.feedback[0].text.as_deref(), Some("Excellent food choices."));
        assert_eq!(outcome.feedback[1].level, FeedbackLevel::Low);
        assert!(outcome.feedback[1].text.is_none());
        assert_eq!(outcome.answers.len(), 4);
        assert_eq!(outcome.radar_chart().values, vec![8, 2]);
    }

    #[test]
    fn json_roundtrip() {
        let outcome = finished_outcome();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("outcome.json");

        outcome.save_json(&path).unwrap();
        let loaded = QuizOutcome::load_json(&path).unwrap();

        assert_eq!(loaded.id, outcome.id);
        assert_eq!(loaded.report, outcome.report);
        assert_eq!(loaded.tier, outcome.tier);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = QuizOutcome::load_json(Path::new("/no/such/outcome.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read outcome"));
    }

    #[test]
    fn markdown_output() {
        let md = finished_outcome().to_markdown();
        assert!(md.contains("## Grid"));
        assert!(md.contains("### Result: improve"));
        assert!(md.contains("**Score:** 10 / 16"));
        assert!(md.contains("| FOOD | 8 | 8 | high |"));
        assert!(md.contains("- **FOOD:** Excellent food choices."));
    }
}
