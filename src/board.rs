//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Convert an occupied cell to its player
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the cell mark it places
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// The 3x3 board in row-major order (positions 0-8).
///
/// Implements `Copy` since it's only 9 bytes. Move application returns a
/// new board, so lookahead works on cheap copies instead of a
/// mutate-then-revert dance on shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Get cell at position
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not in `0..9`. Use [`Board::place`] when the
    /// position comes from untrusted input; it returns an error instead.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not in `0..9`.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Check if no empty cells remain
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Iterate over the empty positions in scan order (low to high)
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(pos, _)| pos)
    }

    /// Count the number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// All cells as a slice
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Place `player`'s mark at `pos` and return the new board
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if the position is out of range or
    /// already occupied.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: usize, player: Player) -> Result<Board> {
        if pos >= 9 || !self.is_empty(pos) {
            return Err(Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = player.mark();
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse a board from 9 cell characters, e.g. `"XX.OO...."`.
    ///
    /// Whitespace other than the space cell marker is not filtered; use `.`
    /// for empty cells in fixtures.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (pos, &c) in chars.iter().enumerate() {
            cells[pos] = Cell::from_char(c).ok_or(Error::InvalidCellCharacter {
                character: c,
                position: pos,
            })?;
        }

        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
