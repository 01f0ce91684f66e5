//! Rendering seam.
//!
//! The engine never draws anything itself. Whatever shows questions and
//! results to a user implements [`Presenter`].

use crate::engine::QuestionView;
use crate::error::QuizError;
use crate::scoring::{ResultTier, ScoreReport};

/// Receives engine output to update whatever the user sees.
pub trait Presenter {
    /// The current question changed or needs redrawing.
    fn show_question(&mut self, view: &QuestionView);

    /// Forward navigation or finalizing was refused.
    fn answer_missing(&mut self, view: &QuestionView);

    /// A selection was rejected.
    fn invalid_choice(&mut self, view: &QuestionView, error: &QuizError);

    /// The session was finalized.
    fn show_result(&mut self, report: &ScoreReport, tier: ResultTier);
}

/// No-op presenter.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn show_question(&mut self, _: &QuestionView) {}
    fn answer_missing(&mut self, _: &QuestionView) {}
    fn invalid_choice(&mut self, _: &QuestionView, _: &QuizError) {}
    fn show_result(&mut self, _: &ScoreReport, _: ResultTier) {}
}
