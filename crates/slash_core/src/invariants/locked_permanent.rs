//! Locked-cell invariant: once a cell is locked it never changes.

use super::super::rules::{apply_move, derive_phase};
use super::super::{Board, Cell, GameInProgress};
use super::Invariant;
use tracing::warn;

/// Invariant: Locked cells are permanent.
///
/// Replays the move history from an empty board. Every step must be a
/// legal transition, no step may change a locked cell, and the replay
/// must end on the game's board.
pub struct LockedCellsPermanentInvariant;

impl Invariant<GameInProgress> for LockedCellsPermanentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut board = Board::new();

        for action in game.history() {
            let Ok(applied) = apply_move(&board, action.index, action.player, derive_phase(&board))
            else {
                warn!(%action, "History contains an illegal move");
                return false;
            };

            let unlocked = board
                .cells()
                .iter()
                .zip(applied.board.cells())
                .any(|(before, after)| *before == Cell::Locked && *after != Cell::Locked);
            if unlocked {
                warn!(%action, "Locked cell changed");
                return false;
            }

            board = applied.board;
        }

        board == *game.board()
    }

    fn description() -> &'static str {
        "Locked cells never change and history replays to the board"
    }
}
