//! Human player reading commands from text input.

use super::{Command, Player};
use anyhow::Result;
use slash_core::{AnyGame, Position};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::warn;

/// Parses one line of input.
///
/// Accepts `back`, `forward`, `restart` and `quit` (or their first
/// letters), a cell number from 1 to 9, or a cell label such as `top-left`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "back" | "b" => Some(Command::Back),
        "forward" | "f" => Some(Command::Forward),
        "restart" | "reset" | "new" | "r" => Some(Command::Restart),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => Position::from_label_or_number(line).map(|pos| Command::Place(pos.to_index())),
    }
}

/// Human player fed by lines of text.
///
/// Players at the same keyboard share one input stream; only the player
/// being asked reads from it.
pub struct HumanPlayer {
    name: String,
    input_rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx: Arc::new(Mutex::new(input_rx)),
        }
    }

    /// A second player reading from the same input.
    pub fn sharing_input(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_rx: Arc::clone(&self.input_rx),
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn next_command(&mut self, _game: &AnyGame) -> Result<Command> {
        let mut input = self.input_rx.lock().await;
        while let Some(line) = input.recv().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(command) => return Ok(command),
                None => warn!(
                    input = %line.trim(),
                    "Enter 1-9, a cell name, back, forward, restart or quit"
                ),
            }
        }

        // End of input counts as leaving.
        Ok(Command::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
