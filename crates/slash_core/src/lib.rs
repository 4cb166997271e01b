//! Slash game logic.
//!
//! Slash is a two-player game on a 3×3 board played in two phases. During
//! **expansion** players claim empty cells and charge the opponent's marks.
//! Once the board is full the **contest** phase begins: charged cells can
//! be locked, and the first move that completes a line of three locked
//! cells wins for the player who made it. No cell may be played twice in a
//! row.
//!
//! # Architecture
//!
//! - **Types**: `Board`, `Cell`, `Player`, `Phase` and `Position`
//! - **Rules**: one transition table, phase derivation and win detection
//! - **Typestate**: `GameSetup` → `GameInProgress` → `GameFinished`
//! - **Bot**: tactical shortcuts and minimax with alpha-beta pruning
//!
//! # Example
//!
//! ```
//! use slash_core::{AnyGame, Player, get_bot_move};
//!
//! let game = AnyGame::new().place(4).unwrap();
//! assert_eq!(game.to_move(), Some(Player::P2));
//!
//! let reply = get_bot_move(game.board(), game.phase(), game.last_move(), Player::P2);
//! assert!(reply.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod outcome;
mod position;
mod types;
mod typestate;

pub mod bot;
pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use outcome::Outcome;
pub use position::Position;
pub use types::{Board, CELL_COUNT, Cell, ParseBoardError, Phase, Player, initial_board, other_player};
pub use typestate::{AnyGame, GameFinished, GameInProgress, GameResult, GameSetup};

pub use bot::{BotDecision, DecisionReason, choose_move, evaluate, get_bot_move};
pub use rules::{
    Applied, LINES, apply_move, check_move, check_phase_change, check_win, derive_phase,
    is_valid_move, successors, transition, valid_moves, winning_line,
};
