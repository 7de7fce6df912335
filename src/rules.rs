//! Winning line analysis and outcome evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Whether the game has ended
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Find the completed winning line, if any (for frontend highlighting)
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    WINNING_LINES.into_iter().find(|&[a, b, c]| {
        let first = board.get(a);
        first != Cell::Empty && first == board.get(b) && first == board.get(c)
    })
}

/// Get the winner if there is one
///
/// Under correct turn alternation at most one player can hold a completed
/// line, so the line scan order does not matter. The evaluator does not
/// enforce alternation itself.
pub fn winner(board: &Board) -> Option<Player> {
    winning_line(board).and_then(|line| board.get(line[0]).player())
}

/// Evaluate the board: win, draw, or still in progress
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some(player) = winner(board) {
        GameOutcome::Win(player)
    } else if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

/// First empty position (scanning low to high) that completes a line for `player`
///
/// Each candidate is checked by placing the mark on a board copy, so the
/// caller's board is never touched. Shared by the heuristic selectors for
/// both win lookahead and block lookahead (with the opponent's mark).
pub fn winning_move(board: &Board, player: Player) -> Option<usize> {
    board.empty_cells().find(|&pos| {
        board
            .place(pos, player)
            .is_ok_and(|next| winner(&next) == Some(player))
    })
}
