//! Per-player turn clock.

use slash_core::Player;
use std::time::Duration;
use tracing::debug;

/// Countdown for each player's turn.
///
/// Each player starts every turn with the full limit. Time spent thinking
/// is charged with [`consume`](TurnClock::consume) and the clock refills
/// with [`reset`](TurnClock::reset) once the player has moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnClock {
    limit: Duration,
    remaining: [Duration; 2],
}

fn slot(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}

impl TurnClock {
    /// Creates a clock with `limit` per turn for both players.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            remaining: [limit; 2],
        }
    }

    /// Time allowed per turn.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time `player` has left this turn.
    pub fn remaining(&self, player: Player) -> Duration {
        self.remaining[slot(player)]
    }

    /// Charges `elapsed` to `player`. Returns true once their time is up.
    pub fn consume(&mut self, player: Player, elapsed: Duration) -> bool {
        let left = &mut self.remaining[slot(player)];
        *left = left.saturating_sub(elapsed);
        let expired = left.is_zero();
        if expired {
            debug!(%player, "Clock expired");
        }
        expired
    }

    /// Refills `player`'s clock.
    pub fn reset(&mut self, player: Player) {
        self.remaining[slot(player)] = self.limit;
    }

    /// Refills both clocks.
    pub fn reset_all(&mut self) {
        self.remaining = [self.limit; 2];
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_until_expired() {
        let mut clock = TurnClock::new(Duration::from_secs(3));
        assert!(!clock.consume(Player::P1, Duration::from_secs(2)));
        assert_eq!(clock.remaining(Player::P1), Duration::from_secs(1));
        assert_eq!(clock.remaining(Player::P2), Duration::from_secs(3));
        assert!(clock.consume(Player::P1, Duration::from_secs(5)));
        assert_eq!(clock.remaining(Player::P1), Duration::ZERO);
    }

    #[test]
    fn test_reset_refills_one_player() {
        let mut clock = TurnClock::default();
        clock.consume(Player::P1, Duration::from_secs(10));
        clock.consume(Player::P2, Duration::from_secs(10));
        clock.reset(Player::P2);
        assert_eq!(clock.remaining(Player::P1), Duration::from_secs(20));
        assert_eq!(clock.remaining(Player::P2), Duration::from_secs(30));
        clock.reset_all();
        assert_eq!(clock.remaining(Player::P1), clock.limit());
    }
}
