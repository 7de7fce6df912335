//! Turn controller: sequences human and AI moves and keeps score

use std::{fmt, str::FromStr};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    ai::Difficulty,
    board::{Board, Player},
    error::{Error, Result},
    rules::{self, GameOutcome},
};

/// The side the AI controls in [`Mode::PlayerVsAi`]; X is always human-driven
const AI_PLAYER: Player = Player::O;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    PlayerVsPlayer,
    PlayerVsAi,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pvp" => Ok(Mode::PlayerVsPlayer),
            "ai" => Ok(Mode::PlayerVsAi),
            _ => Err(Error::InvalidConfiguration {
                message: format!("unknown mode '{s}' (expected pvp or ai)"),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PlayerVsPlayer => write!(f, "pvp"),
            Mode::PlayerVsAi => write!(f, "ai"),
        }
    }
}

/// Session score counters
///
/// Counters only increase as games end; they survive board resets and are
/// cleared only by an explicit [`ScoreBoard::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub wins_x: u32,
    pub wins_o: u32,
    pub draws: u32,
}

impl ScoreBoard {
    /// Record a terminal outcome; in-progress outcomes are ignored
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.wins_x += 1,
            GameOutcome::Win(Player::O) => self.wins_o += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => {}
        }
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        *self = ScoreBoard::default();
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {} | O: {} | Draws: {}",
            self.wins_x, self.wins_o, self.draws
        )
    }
}

/// Snapshot of everything a frontend needs to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub to_move: Player,
    pub outcome: GameOutcome,
    /// Completed line to highlight, present only on a win
    pub winning_line: Option<[usize; 3]>,
    pub scores: ScoreBoard,
    pub mode: Mode,
    pub difficulty: Difficulty,
}

/// The game engine: board, turn state, configuration, and scores
///
/// The engine is an explicit value owned by the caller; there is no global
/// state. X always moves first. In [`Mode::PlayerVsAi`] only X moves arrive
/// from outside; after a successful human move the AI reply is left pending,
/// and the caller completes the turn with [`Engine::play_ai_move`] once any
/// rendering delay has passed. Until then further human moves are rejected,
/// which preserves the commit-before-AI-evaluates ordering.
#[derive(Debug)]
pub struct Engine {
    board: Board,
    to_move: Player,
    outcome: GameOutcome,
    mode: Mode,
    difficulty: Difficulty,
    scores: ScoreBoard,
    rng: StdRng,
}

impl Engine {
    /// Start a new game session with a fresh scoreboard
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self::from_rng(mode, difficulty, StdRng::from_os_rng())
    }

    /// Start a new session with a seeded RNG for reproducible AI play
    pub fn with_seed(mode: Mode, difficulty: Difficulty, seed: u64) -> Self {
        Self::from_rng(mode, difficulty, StdRng::seed_from_u64(seed))
    }

    fn from_rng(mode: Mode, difficulty: Difficulty, rng: StdRng) -> Self {
        Engine {
            board: Board::new(),
            to_move: Player::X,
            outcome: GameOutcome::InProgress,
            mode,
            difficulty,
            scores: ScoreBoard::default(),
            rng,
        }
    }

    /// Apply an externally supplied move for the player to move
    ///
    /// In AI mode this drives X only; in player-vs-player mode it drives
    /// both sides.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] once the game has ended
    /// - [`Error::NotYourTurn`] in AI mode while the AI reply is pending
    /// - [`Error::InvalidMove`] for occupied or out-of-range positions;
    ///   callers recover by ignoring the input
    pub fn apply_human_move(&mut self, pos: usize) -> Result<GameOutcome> {
        if self.outcome.is_terminal() {
            return Err(Error::GameOver);
        }
        if self.ai_move_pending() {
            return Err(Error::NotYourTurn);
        }
        self.commit(pos)
    }

    /// Whether the engine is waiting for [`Engine::play_ai_move`]
    pub fn ai_move_pending(&self) -> bool {
        self.mode == Mode::PlayerVsAi
            && self.to_move == AI_PLAYER
            && !self.outcome.is_terminal()
    }

    /// Select and commit the pending AI move, returning the chosen position
    ///
    /// This is the second phase of the two-phase turn: the human move is
    /// already committed and evaluated before the AI ever sees the board.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] once the game has ended
    /// - [`Error::NotYourTurn`] when no AI move is pending
    pub fn play_ai_move(&mut self) -> Result<usize> {
        if self.outcome.is_terminal() {
            return Err(Error::GameOver);
        }
        if !self.ai_move_pending() {
            return Err(Error::NotYourTurn);
        }

        let board = self.board;
        let pos = self
            .difficulty
            .select_move(&board, AI_PLAYER, &mut self.rng)?;
        self.commit(pos)?;
        Ok(pos)
    }

    /// Commit a move for the player to move, evaluate, and advance the turn
    fn commit(&mut self, pos: usize) -> Result<GameOutcome> {
        self.board = self.board.place(pos, self.to_move)?;
        self.outcome = rules::evaluate(&self.board);

        if self.outcome.is_terminal() {
            self.scores.record(self.outcome);
        } else {
            self.to_move = self.to_move.opponent();
        }

        Ok(self.outcome)
    }

    /// Switch mode; resets the board, discarding any in-progress game
    /// without scoring it
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset_board();
    }

    /// Switch difficulty; resets the board, discarding any in-progress game
    /// without scoring it
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset_board();
    }

    /// Clear the board for a fresh game, keeping the scores
    pub fn reset_board(&mut self) {
        self.board = Board::new();
        self.to_move = Player::X;
        self.outcome = GameOutcome::InProgress;
    }

    /// Zero the scoreboard without touching the board
    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Capture the current state for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            to_move: self.to_move,
            outcome: self.outcome,
            winning_line: rules::winning_line(&self.board),
            scores: self.scores,
            mode: self.mode,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvp_engine() -> Engine {
        Engine::with_seed(Mode::PlayerVsPlayer, Difficulty::Hard, 0)
    }

    #[test]
    fn test_x_moves_first_and_turns_alternate() {
        let mut engine = pvp_engine();
        assert_eq!(engine.to_move(), Player::X);

        engine.apply_human_move(0).unwrap();
        assert_eq!(engine.to_move(), Player::O);

        engine.apply_human_move(4).unwrap();
        assert_eq!(engine.to_move(), Player::X);
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let mut engine = pvp_engine();
        engine.apply_human_move(0).unwrap();

        assert!(matches!(
            engine.apply_human_move(0),
            Err(Error::InvalidMove { position: 0 })
        ));
        assert!(matches!(
            engine.apply_human_move(9),
            Err(Error::InvalidMove { position: 9 })
        ));
        // Rejected input leaves the turn with the same player
        assert_eq!(engine.to_move(), Player::O);
    }

    #[test]
    fn test_win_ends_game_and_scores() {
        let mut engine = pvp_engine();
        for pos in [0, 3, 1, 4] {
            engine.apply_human_move(pos).unwrap();
        }
        let outcome = engine.apply_human_move(2).unwrap();

        assert_eq!(outcome, GameOutcome::Win(Player::X));
        assert_eq!(engine.scores().wins_x, 1);
        assert!(matches!(engine.apply_human_move(5), Err(Error::GameOver)));
        assert_eq!(engine.snapshot().winning_line, Some([0, 1, 2]));
    }

    #[test]
    fn test_scoreboard_sequence_and_reset() {
        let mut engine = pvp_engine();

        // X wins
        for pos in [0, 3, 1, 4, 2] {
            engine.apply_human_move(pos).unwrap();
        }
        engine.reset_board();

        // O wins
        for pos in [0, 3, 1, 4, 8, 5] {
            engine.apply_human_move(pos).unwrap();
        }
        engine.reset_board();

        // Draw
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            engine.apply_human_move(pos).unwrap();
        }

        assert_eq!(
            engine.scores(),
            ScoreBoard {
                wins_x: 1,
                wins_o: 1,
                draws: 1
            }
        );

        let board_before = engine.board();
        engine.reset_scores();
        assert_eq!(engine.scores(), ScoreBoard::default());
        assert_eq!(engine.board(), board_before);
    }

    #[test]
    fn test_reset_board_keeps_scores() {
        let mut engine = pvp_engine();
        for pos in [0, 3, 1, 4, 2] {
            engine.apply_human_move(pos).unwrap();
        }
        engine.reset_board();

        assert_eq!(engine.scores().wins_x, 1);
        assert!(!engine.board().is_full());
        assert_eq!(engine.board().empty_cells().count(), 9);
        assert_eq!(engine.to_move(), Player::X);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_ai_move_pending_phase_ordering() {
        let mut engine = Engine::with_seed(Mode::PlayerVsAi, Difficulty::Hard, 42);
        assert!(!engine.ai_move_pending());

        engine.apply_human_move(4).unwrap();
        assert!(engine.ai_move_pending());

        // Human input is rejected until the AI reply completes
        assert!(matches!(
            engine.apply_human_move(0),
            Err(Error::NotYourTurn)
        ));

        let pos = engine.play_ai_move().unwrap();
        assert_eq!(engine.board().get(pos), crate::Cell::O);
        assert!(!engine.ai_move_pending());
        assert_eq!(engine.to_move(), Player::X);
    }

    #[test]
    fn test_play_ai_move_without_pending_is_rejected() {
        let mut engine = Engine::with_seed(Mode::PlayerVsAi, Difficulty::Easy, 1);
        assert!(matches!(engine.play_ai_move(), Err(Error::NotYourTurn)));

        let mut pvp = pvp_engine();
        pvp.apply_human_move(0).unwrap();
        assert!(matches!(pvp.play_ai_move(), Err(Error::NotYourTurn)));
    }

    #[test]
    fn test_hard_ai_never_loses_a_session() {
        // Human plays a fixed mediocre script; hard AI must not lose
        let mut engine = Engine::with_seed(Mode::PlayerVsAi, Difficulty::Hard, 7);
        let script = [4, 1, 3, 5, 6, 7, 8, 0, 2];

        for pos in script {
            if engine.outcome().is_terminal() {
                break;
            }
            if engine.apply_human_move(pos).is_err() {
                continue;
            }
            if engine.ai_move_pending() {
                engine.play_ai_move().unwrap();
            }
        }

        assert!(engine.outcome().is_terminal());
        assert_ne!(engine.outcome(), GameOutcome::Win(Player::X));
        assert_eq!(engine.scores().wins_x, 0);
    }

    #[test]
    fn test_config_change_discards_game_without_scoring() {
        let mut engine = Engine::with_seed(Mode::PlayerVsAi, Difficulty::Easy, 9);
        engine.apply_human_move(0).unwrap();
        engine.play_ai_move().unwrap();

        engine.set_difficulty(Difficulty::Hard);
        assert_eq!(engine.board().empty_cells().count(), 9);
        assert_eq!(engine.to_move(), Player::X);
        assert_eq!(engine.scores(), ScoreBoard::default());
        assert_eq!(engine.difficulty(), Difficulty::Hard);

        engine.apply_human_move(0).unwrap();
        engine.set_mode(Mode::PlayerVsPlayer);
        assert_eq!(engine.mode(), Mode::PlayerVsPlayer);
        assert_eq!(engine.board().empty_cells().count(), 9);
        assert!(!engine.ai_move_pending());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = Engine::with_seed(Mode::PlayerVsAi, Difficulty::Medium, 2);
        engine.apply_human_move(4).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.to_move, Player::O);
        assert_eq!(snapshot.outcome, GameOutcome::InProgress);
        assert_eq!(snapshot.winning_line, None);
        assert_eq!(snapshot.mode, Mode::PlayerVsAi);
        assert_eq!(snapshot.difficulty, Difficulty::Medium);
        assert_eq!(snapshot.board.get(4), crate::Cell::X);
    }
}
