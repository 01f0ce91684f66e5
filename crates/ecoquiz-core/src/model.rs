//! Core data model types for ecoquiz.
//!
//! A quiz is an ordered list of categories and questions plus the scoring
//! rules of its variant. Everything here is immutable once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scoring::{ResultTier, Thresholds};

/// A complete quiz as loaded from a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDefinition {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description shown before the first question.
    #[serde(default)]
    pub description: String,
    /// Scoring constants for this variant.
    #[serde(default)]
    pub scoring: ScoringRules,
    /// Optional headline texts per result tier.
    #[serde(default)]
    pub results: ResultTexts,
    /// Categories in display order. Report and chart data follow this order.
    pub categories: Vec<Category>,
    /// Questions in authored order.
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Number of questions tagged with the given category.
    pub fn question_count_in(&self, category: &str) -> usize {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .count()
    }
}

/// A sustainability dimension questions are grouped under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    /// Texts shown next to the category score, by feedback level.
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

/// Per-category feedback texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub high: String,
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub low: String,
}

/// A single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Id of the category this question scores into.
    pub category: String,
    pub prompt: String,
    /// Answer choices in authored order.
    pub choices: Vec<Choice>,
}

impl Question {
    /// Highest point value among the choices.
    pub fn best_value(&self) -> u32 {
        self.choices.iter().map(|c| c.value).max().unwrap_or(0)
    }
}

/// An answer choice and the points it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: u32,
}

/// Scoring constants that differ between quiz variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Fixed amount every question adds to its category maximum.
    pub points_per_question: u32,
    /// Tier thresholds on the total score.
    pub thresholds: Thresholds,
    /// Whether unanswered questions count toward category maxima.
    pub max_score_policy: MaxScorePolicy,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            points_per_question: 5,
            thresholds: Thresholds::default(),
            max_score_policy: MaxScorePolicy::AllQuestions,
        }
    }
}

/// Which questions contribute to a category's maximum score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxScorePolicy {
    /// Every question adds its constant, answered or not.
    #[default]
    AllQuestions,
    /// Only answered questions add their constant.
    AnsweredOnly,
}

impl fmt::Display for MaxScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxScorePolicy::AllQuestions => write!(f, "all_questions"),
            MaxScorePolicy::AnsweredOnly => write!(f, "answered_only"),
        }
    }
}

impl FromStr for MaxScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all_questions" | "all" => Ok(MaxScorePolicy::AllQuestions),
            "answered_only" | "answered" => Ok(MaxScorePolicy::AnsweredOnly),
            other => Err(format!("unknown max score policy: {other}")),
        }
    }
}

/// Headline texts for each result tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultTexts {
    #[serde(default)]
    pub great: Option<ResultText>,
    #[serde(default)]
    pub good: Option<ResultText>,
    #[serde(default)]
    pub improve: Option<ResultText>,
}

impl ResultTexts {
    pub fn get(&self, tier: ResultTier) -> Option<&ResultText> {
        match tier {
            ResultTier::Great => self.great.as_ref(),
            ResultTier::Good => self.good.as_ref(),
            ResultTier::Improve => self.improve.as_ref(),
        }
    }
}

/// Icon, title and body for one result tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultText {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}
