//! Command-line interface for slash.

use crate::session::GameMode;
use clap::{Parser, Subcommand, ValueEnum};
use slash_core::Player;
use std::path::PathBuf;

/// Slash - a two-phase 3x3 board game with a minimax bot
#[derive(Parser, Debug)]
#[command(name = "slash")]
#[command(about = "Two-phase 3x3 board game with a minimax bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Two humans, or a human against the bot (overrides the config file)
        #[arg(short, long, value_enum)]
        mode: Option<GameMode>,

        /// Path to a TOML session config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Ask the bot for a move and print its decision as JSON
    Bot {
        /// Board in cell notation: `.` empty, `|` P1 mark, `-` P2 mark,
        /// `+` charged, `/` locked (whitespace ignored)
        #[arg(short, long)]
        board: String,

        /// Index (0-8) played on the previous move
        #[arg(short, long)]
        last: Option<usize>,

        /// Side the bot plays
        #[arg(short, long, value_enum, default_value = "p2")]
        player: Seat,
    },

    /// Let the bot play itself
    Selfplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,
    },
}

/// Player seat as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Seat {
    /// First player
    P1,
    /// Second player
    P2,
}

impl From<Seat> for Player {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::P1 => Player::P1,
            Seat::P2 => Player::P2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bot_command() {
        let cli = Cli::try_parse_from(["slash", "bot", "--board", "|-+ ... ...", "--last", "2"])
            .unwrap();
        let Command::Bot {
            board,
            last,
            player,
        } = cli.command
        else {
            panic!("Expected bot command");
        };
        assert_eq!(board, "|-+ ... ...");
        assert_eq!(last, Some(2));
        assert_eq!(Player::from(player), Player::P2);
    }

    #[test]
    fn test_parse_play_mode() {
        let cli = Cli::try_parse_from(["slash", "play", "--mode", "pvp"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Play {
                mode: Some(GameMode::Pvp),
                config: None
            }
        ));
    }
}
