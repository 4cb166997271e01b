//! First-class action types for Slash.
//!
//! Moves are domain events, not side effects. They carry the player's
//! intent and can be validated independently of execution.

use super::{Cell, Phase, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player acting on a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The board index (0-8) acted on.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }

    /// Creates a move from a named position.
    pub fn at(player: Player, position: Position) -> Self {
        Self::new(player, position.to_index())
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the index of this move.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Position::from_index(self.index) {
            Some(pos) => write!(f, "{} -> {}", self.player, pos.label()),
            None => write!(f, "{} -> #{}", self.player, self.index),
        }
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is not on the board.
    #[display("Index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The target cell is locked and can never change again.
    #[display("Cell {} is locked", _0)]
    LockedCell(usize),

    /// The target cell was played on the previous move.
    #[display("Cell {} was just played and cannot be replayed immediately", _0)]
    RepeatedCell(usize),

    /// The phase table has no transition for this cell and player.
    #[display("Cannot play {:?} cell {} during {} phase", cell, index, phase)]
    IllegalTransition {
        /// Target index.
        index: usize,
        /// Current content of the target cell.
        cell: Cell,
        /// Phase the move was attempted in.
        phase: Phase,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
