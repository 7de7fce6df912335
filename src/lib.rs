//! Tic-tac-toe engine with tiered AI opponents
//!
//! This crate provides:
//! - Complete 3x3 board model with win and draw detection
//! - Exhaustive minimax search powering the hard difficulty
//! - Randomized degraded-strength selectors for the easy and medium difficulties
//! - A turn controller that sequences human and AI moves and keeps score
//!
//! Presentation is out of scope: a frontend drives the engine through
//! [`Engine`] and renders the [`GameSnapshot`] it returns.

pub mod ai;
pub mod board;
pub mod engine;
pub mod error;
pub mod rules;

pub use ai::Difficulty;
pub use board::{Board, Cell, Player};
pub use engine::{Engine, GameSnapshot, Mode, ScoreBoard};
pub use error::{Error, Result};
pub use rules::{GameOutcome, WINNING_LINES};
