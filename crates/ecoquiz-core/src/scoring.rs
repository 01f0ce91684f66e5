//! Score aggregation, tier classification and chart data.
//!
//! Totals are plain integer sums. A category's maximum grows by the quiz's
//! fixed `points_per_question`, not by the best choice of each question.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Category, MaxScorePolicy, ScoringRules};

/// Qualitative result bucket, ordered from lowest to highest rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTier {
    Improve,
    Good,
    Great,
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultTier::Improve => write!(f, "improve"),
            ResultTier::Good => write!(f, "good"),
            ResultTier::Great => write!(f, "great"),
        }
    }
}

impl FromStr for ResultTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "great" => Ok(ResultTier::Great),
            "good" => Ok(ResultTier::Good),
            "improve" => Ok(ResultTier::Improve),
            other => Err(format!("unknown result tier: {other}")),
        }
    }
}

/// Two ascending thresholds on the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum total for [`ResultTier::Great`].
    pub great: u32,
    /// Minimum total for [`ResultTier::Good`].
    pub good: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { great: 44, good: 32 }
    }
}

impl Thresholds {
    /// Build thresholds, rejecting a `good` bound above `great`.
    pub fn new(great: u32, good: u32) -> Result<Self, String> {
        let thresholds = Self { great, good };
        if thresholds.is_ascending() {
            Ok(thresholds)
        } else {
            Err(format!(
                "good threshold ({good}) must not exceed great threshold ({great})"
            ))
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.good <= self.great
    }

    /// Map a total score to its tier, highest threshold first.
    pub fn classify(&self, total: u32) -> ResultTier {
        classify(total, self)
    }
}

/// Map a total score to its tier, highest threshold first.
pub fn classify(total: u32, thresholds: &Thresholds) -> ResultTier {
    if total >= thresholds.great {
        ResultTier::Great
    } else if total >= thresholds.good {
        ResultTier::Good
    } else {
        ResultTier::Improve
    }
}

/// How well a single category went, used to pick its feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLevel {
    Low,
    Mid,
    High,
}

impl FeedbackLevel {
    /// High from 80 %, mid from 40 %, low below. A zero maximum is low.
    pub fn from_ratio(score: u32, max_score: u32) -> Self {
        if max_score == 0 {
            return FeedbackLevel::Low;
        }
        // Integer comparison keeps the band edges exact.
        let scaled = u64::from(score) * 100;
        let max = u64::from(max_score);
        if scaled >= 80 * max {
            FeedbackLevel::High
        } else if scaled >= 40 * max {
            FeedbackLevel::Mid
        } else {
            FeedbackLevel::Low
        }
    }
}

impl fmt::Display for FeedbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackLevel::Low => write!(f, "low"),
            FeedbackLevel::Mid => write!(f, "mid"),
            FeedbackLevel::High => write!(f, "high"),
        }
    }
}

/// Score of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub label: String,
    pub score: u32,
    pub max_score: u32,
}

impl CategoryScore {
    /// Score as a fraction of the maximum (0.0 when the maximum is zero).
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.max_score)
        }
    }

    pub fn level(&self) -> FeedbackLevel {
        FeedbackLevel::from_ratio(self.score, self.max_score)
    }
}

/// Aggregate output of finalizing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum of all selected values.
    pub total: u32,
    /// Sum of all category maxima.
    pub max_total: u32,
    /// Per-category scores in category declaration order.
    pub categories: Vec<CategoryScore>,
    /// Questions with a selection.
    pub answered: usize,
    pub question_count: usize,
}

impl ScoreReport {
    pub fn category(&self, id: &str) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == id)
    }

    /// Tier of the total under the given thresholds.
    pub fn tier(&self, thresholds: &Thresholds) -> ResultTier {
        thresholds.classify(self.total)
    }

    /// Radar chart series, one axis per category.
    ///
    /// `scale_max` defaults to the largest category maximum.
    pub fn radar_chart(&self, scale_max: Option<u32>) -> RadarChart {
        let scale_max = scale_max.unwrap_or_else(|| {
            self.categories
                .iter()
                .map(|c| c.max_score)
                .max()
                .unwrap_or(0)
        });
        RadarChart {
            labels: self.categories.iter().map(|c| c.label.clone()).collect(),
            values: self.categories.iter().map(|c| c.score).collect(),
            scale_max,
        }
    }
}

/// Data handed to a charting surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarChart {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub scale_max: u32,
}

/// One question's contribution to the aggregate.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    pub category: &'a str,
    /// Selected value, `None` when unanswered.
    pub value: Option<u32>,
}

/// Sum picks into per-category buckets and a total.
///
/// Buckets follow `categories` order; a pick naming an undeclared category
/// gets a bucket appended, labelled with its id. Sums saturate at `u32::MAX`.
pub fn aggregate<'a, I>(categories: &[Category], rules: &ScoringRules, picks: I) -> ScoreReport
where
    I: IntoIterator<Item = Pick<'a>>,
{
    let mut buckets: Vec<CategoryScore> = categories
        .iter()
        .map(|c| CategoryScore {
            category: c.id.clone(),
            label: c.label.clone(),
            score: 0,
            max_score: 0,
        })
        .collect();

    let mut answered = 0usize;
    let mut question_count = 0usize;

    for pick in picks {
        question_count += 1;
        let idx = match buckets.iter().position(|b| b.category == pick.category) {
            Some(idx) => idx,
            None => {
                buckets.push(CategoryScore {
                    category: pick.category.to_string(),
                    label: pick.category.to_string(),
                    score: 0,
                    max_score: 0,
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[idx];

        if let Some(value) = pick.value {
            answered += 1;
            bucket.score = bucket.score.saturating_add(value);
        }
        let counts_toward_max = match rules.max_score_policy {
            MaxScorePolicy::AllQuestions => true,
            MaxScorePolicy::AnsweredOnly => pick.value.is_some(),
        };
        if counts_toward_max {
            bucket.max_score = bucket.max_score.saturating_add(rules.points_per_question);
        }
    }

    let total = buckets.iter().fold(0u32, |acc, b| acc.saturating_add(b.score));
    let max_total = buckets
        .iter()
        .fold(0u32, |acc, b| acc.saturating_add(b.max_score));

    ScoreReport {
        total,
        max_total,
        categories: buckets,
        answered,
        question_count,
    }
}
