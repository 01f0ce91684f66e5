//! Question and choice ordering.
//!
//! These functions only compute index permutations. Applying them to a
//! session or to whatever draws the questions is left to the caller.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Choice;

/// How the choices of each question are ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceOrder {
    #[default]
    AsWritten,
    Shuffled,
    /// Lowest value first.
    Ascending,
    /// Highest value first.
    Descending,
}

impl fmt::Display for ChoiceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceOrder::AsWritten => write!(f, "as_written"),
            ChoiceOrder::Shuffled => write!(f, "shuffled"),
            ChoiceOrder::Ascending => write!(f, "ascending"),
            ChoiceOrder::Descending => write!(f, "descending"),
        }
    }
}

impl FromStr for ChoiceOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "as_written" | "fixed" => Ok(ChoiceOrder::AsWritten),
            "shuffled" | "shuffle" | "random" => Ok(ChoiceOrder::Shuffled),
            "ascending" | "asc" => Ok(ChoiceOrder::Ascending),
            "descending" | "desc" => Ok(ChoiceOrder::Descending),
            other => Err(format!("unknown choice order: {other}")),
        }
    }
}

/// Display order of `len` questions.
pub fn question_order<R: Rng + ?Sized>(len: usize, shuffle: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

/// Display order of a question's choices. Sorting is stable, so equal
/// values keep their authored order.
pub fn choice_order<R: Rng + ?Sized>(choices: &[Choice], order: ChoiceOrder, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..choices.len()).collect();
    match order {
        ChoiceOrder::AsWritten => {}
        ChoiceOrder::Shuffled => indices.shuffle(rng),
        ChoiceOrder::Ascending => indices.sort_by_key(|&i| choices[i].value),
        ChoiceOrder::Descending => {
            indices.sort_by_key(|&i| std::cmp::Reverse(choices[i].value))
        }
    }
    indices
}
