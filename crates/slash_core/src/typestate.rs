//! Phase-specific typestate structs for Slash.
//!
//! Each lifecycle stage is its own type. A `GameFinished` always has an
//! outcome and a `GameInProgress` always has a player to move, so neither
//! needs an `Option` for them.
//!
//! The board phase (expansion or contest) is not stored anywhere; it is
//! derived from the board on demand.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::outcome::Outcome;
use super::rules::{apply_move, derive_phase, valid_moves};
use super::{Board, Phase, Player};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
///
/// The board is always empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game. Player 1 always moves first.
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: Player::P1,
        }
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
///
/// The player to move always has at least one legal move; a position
/// where they would not is turned into a draw by [`make_move`].
///
/// [`make_move`]: GameInProgress::make_move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (`LegalMove`)
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// Returns the first rule the move breaks: wrong player, off-board,
    /// locked target, immediate repeat, or no transition in the phase table.
    #[instrument(skip(self), fields(to_move = %self.to_move, board = %self.board))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        MoveContract::pre(&self, &action)?;

        let phase = self.phase();
        let applied = apply_move(&self.board, action.index, action.player, phase)?;

        let mut game = self;
        game.board = applied.board;
        game.history.push(action);

        if applied.caused_win {
            info!(winner = %action.player, "Line locked, game won");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                outcome: Outcome::Winner(action.player),
            }));
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        if game.valid_moves().is_empty() {
            info!(stuck = %game.to_move, "No legal moves for player to move, game drawn");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                outcome: Outcome::Draw,
            }));
        }

        debug!(phase = %game.phase(), next = %game.to_move, "Move applied");
        Ok(GameResult::InProgress(game))
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the phase, derived from the board.
    pub fn phase(&self) -> Phase {
        derive_phase(&self.board)
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Index played on the previous move, which may not be replayed now.
    pub fn last_move(&self) -> Option<usize> {
        self.history.last().map(Move::index)
    }

    /// Returns the legal indices for the player to move.
    pub fn valid_moves(&self) -> Vec<usize> {
        valid_moves(&self.board, self.to_move, self.phase(), self.last_move())
    }

    /// Replays moves from the initial state.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::new().start();

        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Index of the final move.
    pub fn last_move(&self) -> Option<usize> {
        self.history.last().map(Move::index)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

// ─────────────────────────────────────────────────────────────
//  Type-erased wrapper
// ─────────────────────────────────────────────────────────────

/// Either stage of a started game, for callers that store games in a
/// collection (such as a history timeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyGame {
    /// Game accepting moves.
    InProgress(GameInProgress),
    /// Game over.
    Finished(GameFinished),
}

impl AnyGame {
    /// A freshly started game.
    pub fn new() -> Self {
        GameSetup::new().start().into()
    }

    /// Places the current player's move at `index`, leaving `self` intact.
    ///
    /// # Errors
    ///
    /// `MoveError::GameOver` on a finished game, otherwise whatever
    /// [`GameInProgress::make_move`] reports.
    pub fn place(&self, index: usize) -> Result<AnyGame, MoveError> {
        match self {
            AnyGame::InProgress(game) => {
                let action = Move::new(game.to_move(), index);
                game.clone().make_move(action).map(Into::into)
            }
            AnyGame::Finished(_) => Err(MoveError::GameOver),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        match self {
            AnyGame::InProgress(game) => game.board(),
            AnyGame::Finished(game) => game.board(),
        }
    }

    /// Returns the phase, derived from the board.
    pub fn phase(&self) -> Phase {
        derive_phase(self.board())
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        match self {
            AnyGame::InProgress(game) => game.history(),
            AnyGame::Finished(game) => game.history(),
        }
    }

    /// Index of the most recent move.
    pub fn last_move(&self) -> Option<usize> {
        self.history().last().map(Move::index)
    }

    /// Player to move, if the game is still running.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            AnyGame::InProgress(game) => Some(game.to_move()),
            AnyGame::Finished(_) => None,
        }
    }

    /// Legal indices for the player to move (empty once finished).
    pub fn valid_moves(&self) -> Vec<usize> {
        match self {
            AnyGame::InProgress(game) => game.valid_moves(),
            AnyGame::Finished(_) => Vec::new(),
        }
    }

    /// Outcome, if finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            AnyGame::InProgress(_) => None,
            AnyGame::Finished(game) => Some(*game.outcome()),
        }
    }

    /// Winner, if there is one.
    pub fn winner(&self) -> Option<Player> {
        self.outcome().and_then(|outcome| outcome.winner())
    }

    /// Whether the game has finished.
    pub fn is_over(&self) -> bool {
        matches!(self, AnyGame::Finished(_))
    }
}

impl Default for AnyGame {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameInProgress> for AnyGame {
    fn from(game: GameInProgress) -> Self {
        AnyGame::InProgress(game)
    }
}

impl From<GameResult> for AnyGame {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(game) => AnyGame::InProgress(game),
            GameResult::Finished(game) => AnyGame::Finished(game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Position};

    #[test]
    fn test_start_gives_p1_the_move() {
        let game = GameSetup::new().start();
        assert_eq!(game.to_move(), Player::P1);
        assert_eq!(game.phase(), Phase::Expansion);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.valid_moves().len(), 9);
    }

    #[test]
    fn test_center_opening() {
        let game = GameSetup::new().start();
        let GameResult::InProgress(game) = game
            .make_move(Move::at(Player::P1, Position::Center))
            .unwrap()
        else {
            panic!("Game shouldn't finish after one move");
        };

        assert_eq!(game.board().get(4), Some(Cell::MarkA));
        assert_eq!(game.phase(), Phase::Expansion);
        assert_eq!(game.board().count(Cell::Empty), 8);
        assert_eq!(game.last_move(), Some(4));
        assert_eq!(game.to_move(), Player::P2);

        // Charging the center would be legal if it weren't the last move.
        assert_eq!(
            game.make_move(Move::new(Player::P2, 4)),
            Err(MoveError::RepeatedCell(4))
        );
    }

    #[test]
    fn test_any_game_place_keeps_original_on_error() {
        let game = AnyGame::new();
        let next = game.place(0).unwrap();
        assert_eq!(next.place(0), Err(MoveError::RepeatedCell(0)));
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.to_move(), Some(Player::P2));
        assert!(!next.is_over());
    }
}
