//! Exhaustive minimax search for the hard difficulty

use crate::{
    board::{Board, Player},
    error::{Error, Result},
    rules::{self, GameOutcome},
};

/// Select the optimal move for `player` by exhaustive adversarial search
///
/// Terminal positions are scored relative to `player`: a win is `10 - depth`,
/// a loss is `depth - 10`, a draw is `0`. The depth term makes the search
/// prefer faster wins and slower losses. The top level scans empty cells low
/// to high and keeps the first maximum (strict `>`), so ties resolve to the
/// lowest index; on an empty board that is position 0.
///
/// The full tree is at most 9! leaf evaluations, cheap enough on a 3x3 board
/// that no pruning or memoization is needed.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] if the board has no empty cells.
pub fn best_move(board: &Board, player: Player) -> Result<usize> {
    let mut best_score = i32::MIN;
    let mut best_pos = None;

    for pos in board.empty_cells() {
        let child = board
            .place(pos, player)
            .expect("placing on an empty cell should not fail");
        let score = score_position(&child, player, 0, false);

        if score > best_score {
            best_score = score;
            best_pos = Some(pos);
        }
    }

    best_pos.ok_or(Error::NoMovesAvailable)
}

/// Recursively score a position from the perspective of `ai`
///
/// `maximizing` is true when it is the AI's turn at this node.
fn score_position(board: &Board, ai: Player, depth: i32, maximizing: bool) -> i32 {
    match rules::evaluate(board) {
        GameOutcome::Win(winner) if winner == ai => return 10 - depth,
        GameOutcome::Win(_) => return depth - 10,
        GameOutcome::Draw => return 0,
        GameOutcome::InProgress => {}
    }

    let mover = if maximizing { ai } else { ai.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in board.empty_cells() {
        let child = board
            .place(pos, mover)
            .expect("placing on an empty cell should not fail");
        let score = score_position(&child, ai, depth + 1, !maximizing);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
