//! AI move selection for the three difficulty tiers

pub mod heuristic;
pub mod minimax;

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Player},
    error::{Error, Result},
};

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Select a move for `player` on `board`
    ///
    /// Easy and medium draw from `rng`; hard is deterministic and ignores it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMovesAvailable`] if the board has no empty cells.
    pub fn select_move<R: Rng>(
        self,
        board: &Board,
        player: Player,
        rng: &mut R,
    ) -> Result<usize> {
        match self {
            Difficulty::Easy => heuristic::easy_move(board, player, rng),
            Difficulty::Medium => heuristic::medium_move(board, player, rng),
            Difficulty::Hard => minimax::best_move(board, player),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidConfiguration {
                message: format!("unknown difficulty '{s}' (expected easy, medium, or hard)"),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}
