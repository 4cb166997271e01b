//! Slash - terminal front end for the two-phase 3x3 board game
//!
//! The game rules and the bot live in [`slash_core`]. This crate runs
//! sessions on top of them.
//!
//! # Architecture
//!
//! - **Session**: timeline of game frames, history navigation, forfeits
//! - **Clock**: per-player turn countdown
//! - **Players**: humans reading text input, and the minimax bot
//! - **Orchestrator**: async turn loop emitting [`GameEvent`]s
//!
//! # Example
//!
//! ```
//! use slash::{GameMode, Session};
//! use slash_core::Player;
//! use std::time::Duration;
//!
//! let mut session = Session::new(GameMode::Pvp, Player::P2, Duration::from_secs(30));
//! session.make_move(4).unwrap();
//! assert_eq!(session.to_move(), Some(Player::P2));
//! assert!(session.back());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod clock;
mod config;
mod orchestrator;
mod players;
mod session;

pub use cli::{Cli, Command, Seat};
pub use clock::TurnClock;
pub use config::{ConfigError, SessionConfig};
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{BotPlayer, Command as PlayerCommand, HumanPlayer, Player, parse_command};
pub use session::{GameMode, Session, SessionError};
