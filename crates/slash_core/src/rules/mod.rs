//! Game rules for Slash.
//!
//! Pure functions over boards. Rules are kept apart from game state so
//! the typestate game, the contracts and the bot can all share them.

pub mod legality;
pub mod phase;
pub mod win;

pub use legality::{
    Applied, apply_move, check_move, is_valid_move, successors, transition, valid_moves,
};
pub use phase::{check_phase_change, derive_phase};
pub use win::{LINES, check_win, winning_line};
