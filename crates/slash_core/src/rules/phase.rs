//! Phase derivation for Slash.

use super::super::{Board, Phase};

/// Derives the phase from the board: `Contest` once no cell is empty.
///
/// Nothing ever turns a cell back into `Empty`, so the phase only moves
/// forward.
pub fn derive_phase(board: &Board) -> Phase {
    if board.has_empty() {
        Phase::Expansion
    } else {
        Phase::Contest
    }
}

/// Checks whether the expansion phase is over (no empty cells remain).
pub fn check_phase_change(board: &Board) -> bool {
    !board.has_empty()
}
