//! Session controller: timeline, clock and orchestrated play.

use slash::{BotPlayer, GameEvent, GameMode, HumanPlayer, Orchestrator, Session};
use slash_core::{Outcome, Player};
use std::time::Duration;
use tokio::sync::mpsc;

#[test]
fn test_timeline_truncates_on_new_move() {
    let mut session = Session::new(GameMode::Pvp, Player::P2, Duration::from_secs(30));
    for index in [0, 1, 2, 3] {
        session.make_move(index).unwrap();
    }
    assert_eq!(session.frame_count(), 5);

    assert!(session.back());
    assert!(session.back());
    assert!(!session.at_latest());
    session.make_move(7).unwrap();

    assert_eq!(session.frame_count(), 4);
    assert!(session.at_latest());
    assert_eq!(session.current().history().len(), 3);
    assert!(!session.forward());
}

#[test]
fn test_timeout_then_back_resumes() {
    let mut session = Session::new(GameMode::Pve, Player::P2, Duration::from_secs(1));
    session.make_move(4).unwrap();
    assert!(session.clock_mut().consume(Player::P2, Duration::from_secs(2)));
    session.time_out(Player::P2);
    assert_eq!(session.outcome(), Some(Outcome::Winner(Player::P1)));

    assert!(session.back());
    assert_eq!(session.outcome(), None);
    // The forfeited clock is refilled once; further browsing leaves it alone.
    assert_eq!(session.clock().remaining(Player::P2), Duration::from_secs(1));
    session.clock_mut().consume(Player::P1, Duration::from_millis(600));
    assert!(session.forward());
    assert_eq!(session.outcome(), None);
    assert_eq!(session.to_move(), Some(Player::P2));
    assert_eq!(
        session.clock().remaining(Player::P1),
        Duration::from_millis(400)
    );
}

#[tokio::test]
async fn test_human_against_bot() {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Pve, Player::P2, Duration::from_secs(30));
    let mut orchestrator = Orchestrator::new(
        session,
        Box::new(HumanPlayer::new("You", line_rx)),
        Box::new(BotPlayer::new("Bot".to_string(), Player::P2, Duration::ZERO)),
        event_tx,
    );

    line_tx.send("center".to_string()).unwrap();
    line_tx.send("quit".to_string()).unwrap();
    let outcome = orchestrator.run().await.unwrap();

    assert_eq!(outcome, None);
    let history = orchestrator.session().current().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].index, 4);
    assert_eq!(history[1].player, Player::P2);

    let mut moves = 0;
    while let Ok(event) = event_rx.try_recv() {
        if matches!(event, GameEvent::MoveMade { .. }) {
            moves += 1;
        }
    }
    assert_eq!(moves, 2);
}

#[tokio::test]
async fn test_restart_starts_a_fresh_game() {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Pve, Player::P2, Duration::from_secs(30));
    let mut orchestrator = Orchestrator::new(
        session,
        Box::new(HumanPlayer::new("You", line_rx)),
        Box::new(BotPlayer::new("Bot".to_string(), Player::P2, Duration::ZERO)),
        event_tx,
    );

    for line in ["1", "restart", "quit"] {
        line_tx.send(line.to_string()).unwrap();
    }
    let outcome = orchestrator.run().await.unwrap();

    assert_eq!(outcome, None);
    let session = orchestrator.session();
    assert_eq!(session.frame_count(), 1);
    assert!(session.current().history().is_empty());
    assert_eq!(session.to_move(), Some(Player::P1));
}

#[tokio::test]
async fn test_clock_expiry_forfeits() {
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Pve, Player::P2, Duration::from_millis(100));
    let mut orchestrator = Orchestrator::new(
        session,
        Box::new(HumanPlayer::new("You", line_rx)),
        Box::new(BotPlayer::new("Bot".to_string(), Player::P2, Duration::ZERO)),
        event_tx,
    );

    // Say nothing until well after the clock runs out, then leave.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(400)).await;
        let _ = line_tx.send("quit".to_string());
    });

    let outcome = orchestrator.run().await.unwrap();
    assert_eq!(outcome, Some(Outcome::Winner(Player::P2)));
    assert_eq!(orchestrator.session().forfeited(), Some(Player::P1));

    let mut timed_out = false;
    while let Ok(event) = event_rx.try_recv() {
        if event == GameEvent::TimedOut(Player::P1) {
            timed_out = true;
        }
    }
    assert!(timed_out);
}
