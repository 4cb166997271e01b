//! Game orchestration between players.

use crate::players::{Command, Player};
use crate::session::Session;
use anyhow::Result;
use slash_core::{Board, Outcome, Phase, Player as Seat};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Messages sent from the orchestrator to whatever renders the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The viewed position changed.
    Position {
        /// Board at the viewed frame.
        board: Board,
        /// Derived phase.
        phase: Phase,
        /// Player to move, if play continues.
        to_move: Option<Seat>,
        /// Cell played last, which may not be played again right away.
        last_move: Option<usize>,
        /// Viewed frame.
        frame: usize,
        /// Frames in the timeline.
        frames: usize,
        /// Time the player to move has left.
        remaining: Option<Duration>,
    },
    /// A player is being asked for a command.
    Waiting {
        /// Player name.
        name: String,
        /// Seat being played.
        seat: Seat,
    },
    /// A move was played.
    MoveMade {
        /// Seat that moved.
        seat: Seat,
        /// Index played.
        index: usize,
    },
    /// A command was refused.
    Rejected(String),
    /// A player's clock ran out.
    TimedOut(Seat),
    /// The viewed position is finished.
    GameOver(Outcome),
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Position {
                board,
                phase,
                to_move,
                last_move,
                frame,
                frames,
                remaining,
            } => {
                writeln!(f, "{}", board.display())?;
                write!(f, "{} phase, move {}/{}", phase, frame, frames - 1)?;
                if let Some(index) = last_move {
                    write!(f, ", last played {} (barred)", index + 1)?;
                }
                if let Some(seat) = to_move {
                    write!(f, ", {} to move", seat)?;
                }
                if let Some(left) = remaining {
                    write!(f, " ({}s)", left.as_secs())?;
                }
                Ok(())
            }
            GameEvent::Waiting { name, seat } => write!(f, "{} ({}) is thinking...", name, seat),
            GameEvent::MoveMade { seat, index } => write!(f, "{} played {}", seat, index + 1),
            GameEvent::Rejected(reason) => write!(f, "Rejected: {}", reason),
            GameEvent::TimedOut(seat) => write!(f, "{} ran out of time", seat),
            GameEvent::GameOver(outcome) => write!(f, "Game over: {}", outcome),
        }
    }
}

/// Runs turns between two players over one session.
pub struct Orchestrator {
    session: Session,
    player_one: Box<dyn Player>,
    player_two: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: Session,
        player_one: Box<dyn Player>,
        player_two: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            player_one,
            player_two,
            event_tx,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the game loop until a player quits, or the game ends with no
    /// interactive player left to browse it.
    ///
    /// Returns the outcome of the viewed position when the loop stops.
    #[instrument(skip(self), fields(p1 = self.player_one.name(), p2 = self.player_two.name()))]
    pub async fn run(&mut self) -> Result<Option<Outcome>> {
        info!("Starting game orchestration");

        loop {
            self.emit_position()?;

            let outcome = self.session.outcome();
            if let Some(outcome) = outcome {
                if self.session.at_latest() {
                    self.event_tx.send(GameEvent::GameOver(outcome))?;
                }
            }

            // Finished games and past frames only take commands from a person.
            let browsing = outcome.is_some() || !self.session.at_latest();
            let mover = self.session.to_move();
            let seat = match mover {
                Some(seat) if !browsing || self.seat_player(seat).is_interactive() => seat,
                _ => match self.reviewer() {
                    Some(seat) => seat,
                    None => {
                        info!(?outcome, "No one left to review the game");
                        return Ok(outcome);
                    }
                },
            };

            let command = if browsing || mover != Some(seat) {
                self.request(seat).await?
            } else {
                match self.timed_request(seat).await? {
                    Some(command) => command,
                    None => continue,
                }
            };

            if !self.handle(seat, command)? {
                info!("Player quit");
                return Ok(self.session.outcome());
            }
        }
    }

    fn seat_player(&self, seat: Seat) -> &dyn Player {
        match seat {
            Seat::P1 => self.player_one.as_ref(),
            Seat::P2 => self.player_two.as_ref(),
        }
    }

    /// First interactive seat, if any.
    fn reviewer(&self) -> Option<Seat> {
        [Seat::P1, Seat::P2]
            .into_iter()
            .find(|&seat| self.seat_player(seat).is_interactive())
    }

    async fn request(&mut self, seat: Seat) -> Result<Command> {
        let player = match seat {
            Seat::P1 => &mut self.player_one,
            Seat::P2 => &mut self.player_two,
        };
        self.event_tx.send(GameEvent::Waiting {
            name: player.name().to_string(),
            seat,
        })?;
        player.next_command(self.session.current()).await
    }

    /// Asks `seat` for a command against its clock. `None` means time ran out.
    async fn timed_request(&mut self, seat: Seat) -> Result<Option<Command>> {
        let remaining = self.session.clock().remaining(seat);
        let started = Instant::now();

        let player = match seat {
            Seat::P1 => &mut self.player_one,
            Seat::P2 => &mut self.player_two,
        };
        self.event_tx.send(GameEvent::Waiting {
            name: player.name().to_string(),
            seat,
        })?;

        let request = player.next_command(self.session.current());
        match tokio::time::timeout(remaining, request).await {
            Ok(command) => {
                let command = command?;
                self.session.clock_mut().consume(seat, started.elapsed());
                Ok(Some(command))
            }
            Err(_) => {
                self.session.clock_mut().consume(seat, remaining);
                self.session.time_out(seat);
                self.event_tx.send(GameEvent::TimedOut(seat))?;
                Ok(None)
            }
        }
    }

    /// Applies a command. Returns false when the player quits.
    fn handle(&mut self, seat: Seat, command: Command) -> Result<bool> {
        debug!(%seat, ?command, "Handling command");
        match command {
            Command::Place(_) if self.session.to_move().is_some_and(|next| next != seat) => {
                self.event_tx
                    .send(GameEvent::Rejected(format!("It's not {}'s turn", seat)))?;
            }
            Command::Place(index) => match self.session.make_move(index) {
                Ok(_) => self.event_tx.send(GameEvent::MoveMade { seat, index })?,
                Err(e) => self.event_tx.send(GameEvent::Rejected(e.to_string()))?,
            },
            Command::Back => {
                if !self.session.back() {
                    self.event_tx
                        .send(GameEvent::Rejected("Already at the first move".to_string()))?;
                }
            }
            Command::Forward => {
                if !self.session.forward() {
                    self.event_tx
                        .send(GameEvent::Rejected("Already at the latest move".to_string()))?;
                }
            }
            Command::Restart => {
                info!(%seat, "Restarting game");
                self.session.restart();
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn emit_position(&self) -> Result<()> {
        let game = self.session.current();
        let to_move = self.session.to_move();
        self.event_tx.send(GameEvent::Position {
            board: *game.board(),
            phase: game.phase(),
            to_move,
            last_move: game.last_move(),
            frame: self.session.cursor(),
            frames: self.session.frame_count(),
            remaining: to_move.map(|seat| self.session.clock().remaining(seat)),
        })?;
        Ok(())
    }
}
