//! User actions and their dispatch onto a session.

use std::fmt;
use std::str::FromStr;

use crate::engine::QuizSession;
use crate::presenter::Presenter;
use crate::scoring::ScoreReport;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Select a 0-based display position on the current question.
    Select(usize),
    Next,
    Previous,
    Calculate,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Select(pos) => write!(f, "{}", pos + 1),
            Action::Next => write!(f, "next"),
            Action::Previous => write!(f, "prev"),
            Action::Calculate => write!(f, "calc"),
            Action::Quit => write!(f, "quit"),
        }
    }
}

/// Parses terminal input. Choice numbers are 1-based as displayed.
impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        match input.as_str() {
            "n" | "next" => Ok(Action::Next),
            "p" | "prev" | "previous" | "back" => Ok(Action::Previous),
            "c" | "calc" | "calculate" | "done" => Ok(Action::Calculate),
            "q" | "quit" | "exit" => Ok(Action::Quit),
            other => match other.parse::<usize>() {
                Ok(0) => Err("choices are numbered from 1".to_string()),
                Ok(n) => Ok(Action::Select(n - 1)),
                Err(_) => Err(format!("unknown command: {other}")),
            },
        }
    }
}

/// What the caller should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished(ScoreReport),
    Quit,
}

/// Show the first question.
pub fn start(session: &QuizSession, presenter: &mut dyn Presenter) {
    presenter.show_question(&session.current_view());
}

/// Apply one action and tell the presenter what changed.
///
/// A refused action leaves the session where it was. `Calculate` is only
/// available on the last question; elsewhere the question is redrawn.
pub fn dispatch(session: &mut QuizSession, action: Action, presenter: &mut dyn Presenter) -> Flow {
    match action {
        Action::Select(position) => {
            match session.select(position) {
                Ok(()) => presenter.show_question(&session.current_view()),
                Err(e) => presenter.invalid_choice(&session.current_view(), &e),
            }
            Flow::Continue
        }
        Action::Next => {
            match session.advance() {
                Ok(_) => presenter.show_question(&session.current_view()),
                Err(_) => presenter.answer_missing(&session.current_view()),
            }
            Flow::Continue
        }
        Action::Previous => {
            session.retreat();
            presenter.show_question(&session.current_view());
            Flow::Continue
        }
        Action::Calculate => {
            if !session.navigation().can_finalize {
                presenter.show_question(&session.current_view());
                return Flow::Continue;
            }
            match session.finalize() {
                Ok(report) => {
                    let tier = session.classify(report.total);
                    presenter.show_result(&report, tier);
                    Flow::Finished(report)
                }
                Err(_) => {
                    presenter.answer_missing(&session.current_view());
                    Flow::Continue
                }
            }
        }
        Action::Quit => Flow::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::grid_quiz;
    use crate::engine::QuestionView;
    use crate::error::QuizError;
    use crate::presenter::NoopPresenter;
    use crate::scoring::ResultTier;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Presenter for Recorder {
        fn show_question(&mut self, view: &QuestionView) {
            self.events.push(format!("show {}", view.question_id));
        }
        fn answer_missing(&mut self, view: &QuestionView) {
            self.events.push(format!("missing {}", view.question_id));
        }
        fn invalid_choice(&mut self, view: &QuestionView, _: &QuizError) {
            self.events.push(format!("invalid {}", view.question_id));
        }
        fn show_result(&mut self, report: &ScoreReport, tier: ResultTier) {
            self.events.push(format!("result {} {tier}", report.total));
        }
    }

    #[test]
    fn parse_actions() {
        assert_eq!("n".parse::<Action>().unwrap(), Action::Next);
        assert_eq!(" Prev ".parse::<Action>().unwrap(), Action::Previous);
        assert_eq!("calc".parse::<Action>().unwrap(), Action::Calculate);
        assert_eq!("q".parse::<Action>().unwrap(), Action::Quit);
        assert_eq!("3".parse::<Action>().unwrap(), Action::Select(2));
        assert!("0".parse::<Action>().is_err());
        assert!("jump".parse::<Action>().is_err());
        assert_eq!(Action::Select(2).to_string(), "3");
    }

    #[test]
    fn next_without_answer_prompts() {
        let mut session = QuizSession::in_order(&grid_quiz(&["food"], 2, 4)).unwrap();
        let mut recorder = Recorder::default();
        start(&session, &mut recorder);
        assert_eq!(dispatch(&mut session, Action::Next, &mut recorder), Flow::Continue);
        assert_eq!(recorder.events, vec!["show food-0", "missing food-0"]);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn full_run_finishes_with_report() {
        let mut session = QuizSession::in_order(&grid_quiz(&["food"], 2, 4)).unwrap();
        let mut recorder = Recorder::default();
        let actions = [
            Action::Select(3),
            Action::Calculate,
            Action::Next,
            Action::Select(9),
            Action::Calculate,
            Action::Select(1),
        ];
        for action in actions {
            assert_eq!(dispatch(&mut session, action, &mut recorder), Flow::Continue);
        }
        let flow = dispatch(&mut session, Action::Calculate, &mut recorder);
        let Flow::Finished(report) = flow else {
            panic!("expected a finished flow, got {flow:?}");
        };
        assert_eq!(report.total, 6);
        assert_eq!(
            recorder.events,
            vec![
                "show food-0",
                "show food-0",
                "show food-1",
                "invalid food-1",
                "missing food-1",
                "show food-1",
                "result 6 improve",
            ]
        );
    }

    #[test]
    fn previous_and_quit() {
        let mut session = QuizSession::in_order(&grid_quiz(&["food"], 2, 4)).unwrap();
        let mut presenter = NoopPresenter;
        dispatch(&mut session, Action::Select(0), &mut presenter);
        dispatch(&mut session, Action::Next, &mut presenter);
        assert_eq!(session.current_index(), 1);
        dispatch(&mut session, Action::Previous, &mut presenter);
        assert_eq!(session.current_index(), 0);
        assert_eq!(dispatch(&mut session, Action::Quit, &mut presenter), Flow::Quit);
    }
}
