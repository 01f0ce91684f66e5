//! Quiz session state machine.
//!
//! A [`QuizSession`] owns the display order of the questions, the current
//! position and the selections made so far. Forward navigation and
//! finalizing are gated on the current question having a selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::QuizError;
use crate::model::{Category, Question, QuizDefinition, ScoringRules};
use crate::order::{choice_order, question_order};
use crate::scoring::{aggregate, Pick, ResultTier, ScoreReport};

/// One question as placed in a session.
#[derive(Debug, Clone)]
struct Slot {
    question: Question,
    /// Display position -> authored choice index.
    display: Vec<usize>,
    /// Selected authored choice index.
    selected: Option<usize>,
}

impl Slot {
    fn selected_value(&self) -> Option<u32> {
        self.selected.map(|i| self.question.choices[i].value)
    }
}

/// Which navigation triggers are available at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub can_retreat: bool,
    pub can_advance: bool,
    pub can_finalize: bool,
}

/// Everything a presenter needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    /// 0-based position in the session.
    pub index: usize,
    pub total: usize,
    pub question_id: String,
    pub category: String,
    pub category_label: String,
    pub prompt: String,
    /// Choice labels in display order.
    pub choices: Vec<String>,
    /// Selected display position.
    pub selected: Option<usize>,
    pub progress: f64,
    pub nav: NavState,
}

/// A recorded selection, in authored choice order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub category: String,
    /// 0-based authored choice index.
    pub choice: usize,
    pub value: u32,
}

/// A single run through a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_id: String,
    categories: Vec<Category>,
    rules: ScoringRules,
    slots: Vec<Slot>,
    current: usize,
}

impl QuizSession {
    /// Start a session, ordering questions and choices as configured.
    pub fn initialize<R: Rng + ?Sized>(
        quiz: &QuizDefinition,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if quiz.questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        let order = question_order(quiz.questions.len(), config.shuffle_questions, rng);
        let slots = order
            .into_iter()
            .map(|i| {
                let question = quiz.questions[i].clone();
                let display = choice_order(&question.choices, config.choice_order, rng);
                Slot {
                    question,
                    display,
                    selected: None,
                }
            })
            .collect();

        tracing::info!(
            quiz = %quiz.id,
            questions = quiz.questions.len(),
            shuffled = config.shuffle_questions,
            choice_order = %config.choice_order,
            "session initialized"
        );

        Ok(Self {
            quiz_id: quiz.id.clone(),
            categories: quiz.categories.clone(),
            rules: quiz.scoring,
            slots,
            current: 0,
        })
    }

    /// Start a session in authored order, without randomness.
    pub fn in_order(quiz: &QuizDefinition) -> Result<Self, QuizError> {
        let config = EngineConfig {
            shuffle_questions: false,
            ..Default::default()
        };
        // Fixed orders never draw from the rng.
        Self::initialize(quiz, &config, &mut StdRng::seed_from_u64(0))
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: sessions are never built without questions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.slots[self.current].question
    }

    /// Questions in session order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.slots.iter().map(|s| &s.question)
    }

    pub fn is_current_answered(&self) -> bool {
        self.slots[self.current].selected.is_some()
    }

    fn is_last(&self) -> bool {
        self.current + 1 == self.slots.len()
    }

    /// Select the choice at a display position of the current question.
    pub fn select(&mut self, position: usize) -> Result<(), QuizError> {
        let slot = &mut self.slots[self.current];
        let Some(&choice) = slot.display.get(position) else {
            return Err(QuizError::ChoiceOutOfRange {
                question_id: slot.question.id.clone(),
                index: position,
                available: slot.display.len(),
            });
        };
        slot.selected = Some(choice);
        tracing::debug!(question = %slot.question.id, choice, "choice selected");
        Ok(())
    }

    /// Record an authored choice index for any question by id.
    ///
    /// Only the first question with that id is updated; parsed quizzes
    /// never contain duplicate ids.
    pub fn answer(&mut self, question_id: &str, choice: usize) -> Result<(), QuizError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.question.id == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if choice >= slot.question.choices.len() {
            return Err(QuizError::ChoiceOutOfRange {
                question_id: question_id.to_string(),
                index: choice,
                available: slot.question.choices.len(),
            });
        }
        slot.selected = Some(choice);
        tracing::debug!(question = %question_id, choice, "answer recorded");
        Ok(())
    }

    fn require_current_answered(&self) -> Result<(), QuizError> {
        if self.is_current_answered() {
            Ok(())
        } else {
            Err(QuizError::AnswerMissing {
                question_id: self.current_question().id.clone(),
            })
        }
    }

    /// Move forward one question. A no-op at the last question.
    pub fn advance(&mut self) -> Result<usize, QuizError> {
        self.require_current_answered()?;
        if !self.is_last() {
            self.current += 1;
            tracing::debug!(index = self.current, "advanced");
        }
        Ok(self.current)
    }

    /// Move back one question. A no-op at the first question.
    pub fn retreat(&mut self) -> usize {
        if self.current > 0 {
            self.current -= 1;
            tracing::debug!(index = self.current, "retreated");
        }
        self.current
    }

    /// Fraction of the way through: `index / (len - 1)`, or 1 for a
    /// single-question quiz.
    pub fn progress(&self) -> f64 {
        if self.slots.len() > 1 {
            self.current as f64 / (self.slots.len() - 1) as f64
        } else {
            1.0
        }
    }

    pub fn navigation(&self) -> NavState {
        NavState {
            can_retreat: self.current > 0,
            can_advance: !self.is_last(),
            can_finalize: self.is_last(),
        }
    }

    pub fn current_view(&self) -> QuestionView {
        let slot = &self.slots[self.current];
        let question = &slot.question;
        let category_label = self
            .categories
            .iter()
            .find(|c| c.id == question.category)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| question.category.clone());

        QuestionView {
            index: self.current,
            total: self.slots.len(),
            question_id: question.id.clone(),
            category: question.category.clone(),
            category_label,
            prompt: question.prompt.clone(),
            choices: slot
                .display
                .iter()
                .map(|&i| question.choices[i].label.clone())
                .collect(),
            selected: slot
                .selected
                .and_then(|choice| slot.display.iter().position(|&i| i == choice)),
            progress: self.progress(),
            nav: self.navigation(),
        }
    }

    /// Aggregate all selections into a score report.
    ///
    /// Fails without touching the session if the current question is
    /// unanswered.
    pub fn finalize(&self) -> Result<ScoreReport, QuizError> {
        self.require_current_answered()?;

        let picks = self.slots.iter().map(|s| Pick {
            category: s.question.category.as_str(),
            value: s.selected_value(),
        });
        let report = aggregate(&self.categories, &self.rules, picks);

        tracing::info!(
            quiz = %self.quiz_id,
            total = report.total,
            max_total = report.max_total,
            "session finalized"
        );
        Ok(report)
    }

    /// Tier of a report under this session's thresholds.
    pub fn classify(&self, total: u32) -> ResultTier {
        self.rules.thresholds.classify(total)
    }

    /// Selections made so far, in session order.
    pub fn answers(&self) -> Vec<AnswerRecord> {
        self.slots
            .iter()
            .filter_map(|s| {
                s.selected.map(|choice| AnswerRecord {
                    question_id: s.question.id.clone(),
                    category: s.question.category.clone(),
                    choice,
                    value: s.question.choices[choice].value,
                })
            })
            .collect()
    }
}
