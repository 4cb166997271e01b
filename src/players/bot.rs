//! Bot player backed by the minimax search.

use super::{Command, Player};
use anyhow::{Result, bail};
use derive_new::new;
use slash_core::{AnyGame, Player as Seat, choose_move};
use std::time::Duration;
use tracing::{debug, instrument};

/// Computer player.
///
/// Waits `delay` before answering so its moves can be followed on screen.
#[derive(Debug, Clone, new)]
pub struct BotPlayer {
    name: String,
    seat: Seat,
    delay: Duration,
}

#[async_trait::async_trait]
impl Player for BotPlayer {
    #[instrument(skip(self, game), fields(bot = %self.name, seat = %self.seat))]
    async fn next_command(&mut self, game: &AnyGame) -> Result<Command> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let Some(decision) = choose_move(game.board(), game.phase(), game.last_move(), self.seat)
        else {
            bail!("{} has no legal move on {}", self.seat, game.board());
        };

        debug!(index = decision.index, reason = ?decision.reason, nodes = decision.nodes, "Bot decided");
        Ok(Command::Place(decision.index))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bot_places_legal_move() {
        let game = AnyGame::new().place(4).unwrap();
        let mut bot = BotPlayer::new("Bot".to_string(), Seat::P2, Duration::ZERO);

        let Command::Place(index) = bot.next_command(&game).await.unwrap() else {
            panic!("Bot should place a mark");
        };
        assert!(game.valid_moves().contains(&index));
        assert!(!bot.is_interactive());
    }
}
