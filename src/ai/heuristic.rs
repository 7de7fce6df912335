//! Randomized degraded-strength selectors for the easy and medium tiers
//!
//! These selectors play sub-optimally on purpose so the AI stays beatable.
//! Every probability gate draws fresh randomness, so the chance of reaching
//! a later gate is the product of all earlier draws failing, not the stated
//! percentage alone. The difficulty tuning depends on that compounding; do
//! not collapse the gates into a single draw.

use rand::{Rng, prelude::IndexedRandom};

use crate::{
    board::{Board, Player},
    error::{Error, Result},
    rules,
};

/// Corner positions, in scan order
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Center position
const CENTER: usize = 4;

/// Easy selector: almost always a uniform random move
///
/// With probability 0.95 picks uniformly among empty cells; otherwise defers
/// to the degraded lookahead.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] if the board has no empty cells.
pub fn easy_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Result<usize> {
    if rng.random::<f64>() < 0.95 {
        uniform_move(board, rng)
    } else {
        degraded_move(board, player, rng)
    }
}

/// Medium selector: occasionally smart, otherwise plays like easy
///
/// With probability 0.25 uses the smarter heuristic; the remaining 0.75
/// delegates to the whole easy selector, including its rare degraded branch.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] if the board has no empty cells.
pub fn medium_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Result<usize> {
    if rng.random::<f64>() < 0.25 {
        smart_move(board, player, rng)
    } else {
        easy_move(board, player, rng)
    }
}

/// Degraded lookahead behind the easy selector's 5% branch
///
/// Takes a winning move with probability 0.10, blocks the opponent's
/// immediate win with probability 0.15, else plays uniformly at random.
/// The block gate sits after the win gate despite its higher probability;
/// the ordering is kept exactly as tuned.
fn degraded_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Result<usize> {
    if rng.random::<f64>() < 0.10
        && let Some(pos) = rules::winning_move(board, player)
    {
        return Ok(pos);
    }

    if rng.random::<f64>() < 0.15
        && let Some(pos) = rules::winning_move(board, player.opponent())
    {
        return Ok(pos);
    }

    uniform_move(board, rng)
}

/// Smarter heuristic behind the medium selector's 25% branch
///
/// Gates in order: take a win (0.40), block (0.35), take the center (0.30),
/// take a random empty corner (0.25), else uniform random. A gate only
/// fires when its draw succeeds and a qualifying move exists.
fn smart_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Result<usize> {
    if rng.random::<f64>() < 0.40
        && let Some(pos) = rules::winning_move(board, player)
    {
        return Ok(pos);
    }

    if rng.random::<f64>() < 0.35
        && let Some(pos) = rules::winning_move(board, player.opponent())
    {
        return Ok(pos);
    }

    // No draw is spent when the center is already taken
    if board.is_empty(CENTER) && rng.random::<f64>() < 0.30 {
        return Ok(CENTER);
    }

    if rng.random::<f64>() < 0.25 {
        let open: Vec<usize> = CORNERS.into_iter().filter(|&c| board.is_empty(c)).collect();
        if let Some(&pos) = open.choose(rng) {
            return Ok(pos);
        }
    }

    uniform_move(board, rng)
}

/// Uniform choice among empty cells
fn uniform_move<R: Rng>(board: &Board, rng: &mut R) -> Result<usize> {
    let open: Vec<usize> = board.empty_cells().collect();
    open.choose(rng).copied().ok_or(Error::NoMovesAvailable)
}
