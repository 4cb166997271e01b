//! Player trait and implementations.

mod bot;
mod human;

pub use bot::BotPlayer;
pub use human::{HumanPlayer, parse_command};

use anyhow::Result;
use slash_core::AnyGame;

/// What a player asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a board index (0-8).
    Place(usize),
    /// Step back through the move history.
    Back,
    /// Step forward through the move history.
    Forward,
    /// Start a fresh game in the same mode.
    Restart,
    /// Leave the session.
    Quit,
}

/// Trait for players that can take turns.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Waits for this player's next command on `game`.
    async fn next_command(&mut self, game: &AnyGame) -> Result<Command>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether a person is behind this player. Only people browse history.
    fn is_interactive(&self) -> bool {
        false
    }
}
