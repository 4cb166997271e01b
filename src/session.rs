//! Session state: game timeline, history navigation, clocks and forfeits.

use crate::clock::TurnClock;
use crate::config::SessionConfig;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use slash_core::{AnyGame, MoveError, Outcome, Player};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Who sits at the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans sharing the terminal.
    #[display("pvp")]
    Pvp,
    /// A human against the bot.
    #[display("pve")]
    Pve,
}

/// Why a session rejected a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The viewed frame is finished, or a player has forfeited.
    #[display("Game is over")]
    GameOver,
    /// The rules rejected the move.
    #[display("Illegal move: {_0}")]
    IllegalMove(MoveError),
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::IllegalMove(err)
    }
}

/// A game with its full timeline.
///
/// Frame 0 is the fresh game. The cursor picks the frame being viewed;
/// moving from an earlier frame discards every frame after it.
#[derive(Debug, Clone)]
pub struct Session {
    mode: GameMode,
    bot_player: Player,
    frames: Vec<AnyGame>,
    cursor: usize,
    forfeit: Option<Player>,
    clock: TurnClock,
}

impl Session {
    /// Starts a session.
    #[instrument]
    pub fn new(mode: GameMode, bot_player: Player, turn_limit: Duration) -> Self {
        info!("New session");
        Self {
            mode,
            bot_player,
            frames: vec![AnyGame::new()],
            cursor: 0,
            forfeit: None,
            clock: TurnClock::new(turn_limit),
        }
    }

    /// Starts a session from configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(*config.mode(), *config.bot_player(), config.turn_limit())
    }

    /// The frame being viewed.
    pub fn current(&self) -> &AnyGame {
        &self.frames[self.cursor]
    }

    /// Session mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Seat the bot plays in bot mode.
    pub fn bot_player(&self) -> Player {
        self.bot_player
    }

    /// Index of the viewed frame.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of frames in the timeline.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether the newest frame is being viewed.
    pub fn at_latest(&self) -> bool {
        self.cursor + 1 == self.frames.len()
    }

    /// Turn clocks.
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Turn clocks, for charging elapsed time.
    pub fn clock_mut(&mut self) -> &mut TurnClock {
        &mut self.clock
    }

    /// Player who forfeited on time, if any.
    pub fn forfeited(&self) -> Option<Player> {
        self.forfeit
    }

    /// Outcome of the viewed position: a forfeit, or the frame's own result.
    pub fn outcome(&self) -> Option<Outcome> {
        self.forfeit
            .map(|loser| Outcome::Winner(loser.opponent()))
            .or_else(|| self.current().outcome())
    }

    /// Whether play has stopped at the viewed position.
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Player to move at the viewed frame, unless the game is over.
    pub fn to_move(&self) -> Option<Player> {
        if self.forfeit.is_some() {
            return None;
        }
        self.current().to_move()
    }

    /// Whether the bot should move now.
    pub fn is_bot_turn(&self) -> bool {
        self.mode == GameMode::Pve && self.to_move() == Some(self.bot_player)
    }

    /// Plays `index` for the player to move at the viewed frame.
    ///
    /// Frames after the cursor are discarded before the new one is added.
    #[instrument(skip(self), fields(cursor = self.cursor))]
    pub fn make_move(&mut self, index: usize) -> Result<&AnyGame, SessionError> {
        let Some(mover) = self.to_move() else {
            return Err(SessionError::GameOver);
        };

        let next = self.current().place(index)?;
        self.frames.truncate(self.cursor + 1);
        self.frames.push(next);
        self.cursor += 1;
        self.clock.reset(mover);

        if let Some(outcome) = self.current().outcome() {
            info!(%outcome, "Game over");
        }
        Ok(self.current())
    }

    /// Steps back one frame. Returns false at the first frame.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.navigated();
        true
    }

    /// Steps forward one frame. Returns false at the newest frame.
    pub fn forward(&mut self) -> bool {
        if self.at_latest() {
            return false;
        }
        self.cursor += 1;
        self.navigated();
        true
    }

    /// Browsing keeps both clocks as they are. Only a forfeited clock is
    /// refilled, since clearing the forfeit hands that player the turn back.
    fn navigated(&mut self) {
        if let Some(loser) = self.forfeit.take() {
            self.clock.reset(loser);
        }
        debug!(cursor = self.cursor, frames = self.frames.len(), "Navigated history");
    }

    /// Records that `player` ran out of time; the opponent wins.
    #[instrument(skip(self))]
    pub fn time_out(&mut self, player: Player) {
        if self.current().is_over() {
            return;
        }
        info!(winner = %player.opponent(), "Player ran out of time");
        self.forfeit = Some(player);
    }

    /// Throws the timeline away and starts over with full clocks.
    #[instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn restart(&mut self) {
        info!("Restarting session");
        self.frames = vec![AnyGame::new()];
        self.cursor = 0;
        self.forfeit = None;
        self.clock.reset_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slash_core::{Cell, Phase};

    fn session() -> Session {
        Session::new(GameMode::Pvp, Player::P2, Duration::from_secs(30))
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.frame_count(), 1);
        assert!(s.at_latest());
        assert_eq!(s.to_move(), Some(Player::P1));
        assert_eq!(s.current().phase(), Phase::Expansion);
        assert!(!s.is_bot_turn());
    }

    #[test]
    fn test_illegal_move_keeps_timeline() {
        let mut s = session();
        s.make_move(4).unwrap();
        let err = s.make_move(4).unwrap_err();
        assert_eq!(err, SessionError::IllegalMove(MoveError::RepeatedCell(4)));
        assert_eq!(s.frame_count(), 2);
        assert_eq!(s.to_move(), Some(Player::P2));
    }

    #[test]
    fn test_move_from_past_truncates() {
        let mut s = session();
        s.make_move(0).unwrap();
        s.make_move(1).unwrap();
        s.make_move(2).unwrap();
        assert!(s.back());
        assert!(s.back());
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.to_move(), Some(Player::P2));

        s.make_move(8).unwrap();
        assert_eq!(s.frame_count(), 3);
        assert!(s.at_latest());
        assert_eq!(s.current().board().get(8), Some(Cell::MarkB));
        assert_eq!(s.current().board().get(1), Some(Cell::Empty));
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut s = session();
        assert!(!s.back());
        s.make_move(0).unwrap();
        assert!(!s.forward());
        assert!(s.back());
        assert!(s.forward());
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_time_out_awards_opponent() {
        let mut s = session();
        s.make_move(0).unwrap();
        s.time_out(Player::P2);
        assert_eq!(s.outcome(), Some(Outcome::Winner(Player::P1)));
        assert_eq!(s.to_move(), None);
        assert_eq!(s.make_move(1), Err(SessionError::GameOver));

        // Browsing history clears the forfeit.
        assert!(s.back());
        assert_eq!(s.outcome(), None);
        assert_eq!(s.to_move(), Some(Player::P1));
    }

    #[test]
    fn test_bot_turn_in_pve() {
        let mut s = Session::new(GameMode::Pve, Player::P2, Duration::from_secs(5));
        assert!(!s.is_bot_turn());
        s.make_move(4).unwrap();
        assert!(s.is_bot_turn());
    }

    #[test]
    fn test_browsing_keeps_clocks() {
        let mut s = session();
        s.make_move(0).unwrap();
        s.clock_mut().consume(Player::P2, Duration::from_secs(29));

        assert!(s.back());
        assert!(s.forward());
        assert_eq!(s.to_move(), Some(Player::P2));
        assert_eq!(s.clock().remaining(Player::P2), Duration::from_secs(1));
        assert_eq!(s.clock().remaining(Player::P1), Duration::from_secs(30));
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut s = session();
        s.make_move(0).unwrap();
        s.make_move(1).unwrap();
        s.clock_mut().consume(Player::P1, Duration::from_secs(30));
        s.time_out(Player::P1);
        assert!(s.is_over());

        s.restart();
        assert_eq!(s.frame_count(), 1);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.forfeited(), None);
        assert_eq!(s.to_move(), Some(Player::P1));
        assert_eq!(s.clock().remaining(Player::P1), Duration::from_secs(30));
        assert!(s.current().history().is_empty());
    }

    #[test]
    fn test_move_resets_mover_clock() {
        let mut s = session();
        s.clock_mut().consume(Player::P1, Duration::from_secs(12));
        s.make_move(3).unwrap();
        assert_eq!(s.clock().remaining(Player::P1), Duration::from_secs(30));
    }
}
