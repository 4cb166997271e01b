//! Move legality and application for Slash.
//!
//! All legal cell changes come from one table, [`transition`]:
//!
//! | Phase     | Target cell     | Becomes      |
//! |-----------|-----------------|--------------|
//! | Expansion | Empty           | own mark     |
//! | Expansion | opponent's mark | Charged      |
//! | Contest   | Charged         | Locked       |
//! | Contest   | opponent's mark | Charged      |
//!
//! Everything else (own mark, locked cells, charged cells during
//! expansion) has no transition.

use super::super::action::MoveError;
use super::super::{Board, CELL_COUNT, Cell, Phase, Player};
use super::win::check_win;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What a cell becomes when `player` acts on it in `phase`, if anything.
pub fn transition(cell: Cell, player: Player, phase: Phase) -> Option<Cell> {
    match (phase, cell) {
        (_, Cell::Locked) => None,
        (Phase::Expansion, Cell::Empty) => Some(player.mark()),
        (Phase::Expansion, Cell::Charged) => None,
        (Phase::Contest, Cell::Charged) => Some(Cell::Locked),
        // A contest board has no empty cells; treat a stray one as inert.
        (Phase::Contest, Cell::Empty) => None,
        (_, Cell::MarkA | Cell::MarkB) => {
            (cell == player.opponent_mark()).then_some(Cell::Charged)
        }
    }
}

/// Resolves the target cell, rejecting off-board and locked targets.
fn target(board: &Board, index: usize) -> Result<Cell, MoveError> {
    match board.get(index) {
        None => Err(MoveError::OutOfBounds(index)),
        Some(Cell::Locked) => Err(MoveError::LockedCell(index)),
        Some(cell) => Ok(cell),
    }
}

fn next_cell(cell: Cell, index: usize, player: Player, phase: Phase) -> Result<Cell, MoveError> {
    transition(cell, player, phase).ok_or(MoveError::IllegalTransition { index, cell, phase })
}

/// Checks a move and returns the cell it would produce.
///
/// Rules are checked in precedence order: bounds, locked target,
/// immediate repeat of the last move, then the phase table.
pub fn check_move(
    board: &Board,
    index: usize,
    player: Player,
    phase: Phase,
    last_move: Option<usize>,
) -> Result<Cell, MoveError> {
    let cell = target(board, index)?;
    if last_move == Some(index) {
        return Err(MoveError::RepeatedCell(index));
    }
    next_cell(cell, index, player, phase)
}

/// Whether `player` may act on `index` in `phase` right after `last_move`.
pub fn is_valid_move(
    board: &Board,
    index: usize,
    player: Player,
    phase: Phase,
    last_move: Option<usize>,
) -> bool {
    check_move(board, index, player, phase, last_move).is_ok()
}

/// Result of applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applied {
    /// The board after the move.
    pub board: Board,
    /// Whether the move completed a locked line.
    pub caused_win: bool,
}

impl Applied {
    fn new(board: Board) -> Self {
        Self {
            caused_win: check_win(&board),
            board,
        }
    }
}

/// Applies a move, returning the new board and whether it won.
///
/// The input board is left untouched. The anti-repeat rule needs the
/// previous move and stays the caller's responsibility; everything else
/// is re-checked here so an illegal transition fails loudly instead of
/// producing an arbitrary cell.
///
/// # Errors
///
/// Returns `OutOfBounds`, `LockedCell` or `IllegalTransition` when the
/// move is not in the phase table.
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(
    board: &Board,
    index: usize,
    player: Player,
    phase: Phase,
) -> Result<Applied, MoveError> {
    let cell = target(board, index)?;
    let next = next_cell(cell, index, player, phase)?;
    Ok(Applied::new(board.with_cell(index, next)))
}

/// All legal indices for `player`, in ascending order.
pub fn valid_moves(
    board: &Board,
    player: Player,
    phase: Phase,
    last_move: Option<usize>,
) -> Vec<usize> {
    (0..CELL_COUNT)
        .filter(|&index| is_valid_move(board, index, player, phase, last_move))
        .collect()
}

/// Every legal move paired with its result, in ascending index order.
///
/// Used by the search so that enumeration and application share one
/// legality check.
pub fn successors(
    board: &Board,
    player: Player,
    phase: Phase,
    last_move: Option<usize>,
) -> impl Iterator<Item = (usize, Applied)> {
    let board = *board;
    (0..CELL_COUNT).filter_map(move |index| {
        check_move(&board, index, player, phase, last_move)
            .ok()
            .map(|next| (index, Applied::new(board.with_cell(index, next))))
    })
}
