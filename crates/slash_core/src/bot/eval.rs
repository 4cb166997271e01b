//! Static position evaluation.

use crate::rules::check_win;
use crate::{Board, Cell, Player};

/// Score of a won position.
pub const WIN_SCORE: i32 = 1000;

const CHARGED_WEIGHT: i32 = 5;
const OWN_MARK_WEIGHT: i32 = 2;

/// Evaluates the board from `player`'s point of view.
///
/// Charged cells are potential locks for either side; own marks are
/// territory the opponent still has to charge before it can lock them.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    if check_win(board) {
        return WIN_SCORE;
    }

    let charged = board.count(Cell::Charged) as i32;
    let own = board.count(player.mark()) as i32;
    CHARGED_WEIGHT * charged + OWN_MARK_WEIGHT * own
}
