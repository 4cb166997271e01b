//! Slash - command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use slash::{
    BotPlayer, Cli, Command, GameEvent, GameMode, HumanPlayer, Orchestrator, Player, Seat,
    Session, SessionConfig,
};
use slash_core::{
    Board, BotDecision, Outcome, Phase, Player as Side, choose_move, derive_phase,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { mode, config } => run_play(mode, config).await,
        Command::Bot {
            board,
            last,
            player,
        } => run_bot(&board, last, player),
        Command::Selfplay { games } => run_selfplay(games).await,
    }
}

/// Interactive game on stdin/stdout.
#[instrument]
async fn run_play(mode: Option<GameMode>, config: Option<PathBuf>) -> Result<()> {
    let mut settings = match config {
        Some(path) => SessionConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(mode) = mode {
        settings = settings.with_mode(mode);
    }
    info!(mode = %settings.mode(), "Starting game");

    let line_rx = spawn_stdin_reader();

    let bot_seat = *settings.bot_player();
    let (player_one, player_two): (Box<dyn Player>, Box<dyn Player>) = match settings.mode() {
        GameMode::Pvp => {
            let first = HumanPlayer::new("Player 1", line_rx);
            let second: Box<dyn Player> = Box::new(first.sharing_input("Player 2"));
            (Box::new(first) as Box<dyn Player>, second)
        }
        GameMode::Pve => {
            let you: Box<dyn Player> = Box::new(HumanPlayer::new("You", line_rx));
            let bot: Box<dyn Player> =
                Box::new(BotPlayer::new("Bot".to_string(), bot_seat, settings.bot_delay()));
            match bot_seat {
                Side::P1 => (bot, you),
                Side::P2 => (you, bot),
            }
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    println!(
        "Enter 1-9 or a cell name to play, back/forward to browse, restart for a new game, quit to leave."
    );
    let mut orchestrator =
        Orchestrator::new(Session::from_config(&settings), player_one, player_two, event_tx);
    let outcome = orchestrator.run().await?;
    drop(orchestrator);
    printer.await.context("event printer failed")?;

    match outcome {
        Some(outcome) => println!("{}", outcome),
        None => println!("Game abandoned"),
    }
    Ok(())
}

/// Reads stdin lines on a plain thread.
///
/// A blocking read would hold up runtime shutdown, so the thread is left
/// detached and dies with the process.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::Waiting { .. } => debug!(%event, "Waiting"),
        _ => println!("{}\n", event),
    }
}

/// Bot decision as printed by `slash bot`.
#[derive(Debug, Serialize)]
struct BotReport {
    board: String,
    phase: Phase,
    player: Side,
    last_move: Option<usize>,
    decision: Option<BotDecision>,
}

#[instrument]
fn run_bot(notation: &str, last: Option<usize>, seat: Seat) -> Result<()> {
    let board: Board = notation
        .parse()
        .with_context(|| format!("invalid board notation {:?}", notation))?;
    let phase = derive_phase(&board);
    let player = Side::from(seat);

    let report = BotReport {
        board: board.to_string(),
        phase,
        player,
        last_move: last,
        decision: choose_move(&board, phase, last, player),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[instrument]
async fn run_selfplay(games: u32) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let logger = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(%event, "Self-play event");
        }
    });

    let mut tally = [0u32; 3];
    for game in 1..=games {
        let session = Session::new(GameMode::Pve, Side::P2, Duration::from_secs(30));
        let mut orchestrator = Orchestrator::new(
            session,
            Box::new(BotPlayer::new("Bot 1".to_string(), Side::P1, Duration::ZERO)),
            Box::new(BotPlayer::new("Bot 2".to_string(), Side::P2, Duration::ZERO)),
            event_tx.clone(),
        );
        let outcome = orchestrator.run().await?;
        let moves = orchestrator.session().current().history().len();

        match outcome {
            Some(Outcome::Winner(Side::P1)) => tally[0] += 1,
            Some(Outcome::Winner(Side::P2)) => tally[1] += 1,
            Some(Outcome::Draw) | None => tally[2] += 1,
        }
        let result = outcome.map_or_else(|| "unfinished".to_string(), |o| o.to_string());
        println!(
            "Game {}: {} after {} moves\n{}\n",
            game,
            result,
            moves,
            orchestrator.session().current().board().display()
        );
    }
    drop(event_tx);
    logger.await.context("event logger failed")?;

    println!(
        "P1 wins: {}, P2 wins: {}, draws: {}",
        tally[0], tally[1], tally[2]
    );
    Ok(())
}
