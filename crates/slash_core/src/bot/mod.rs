//! Computer opponent for Slash.
//!
//! Move selection runs three steps in order:
//! - play any move that wins on the spot
//! - occupy a cell the opponent could win with next turn, if that cell
//!   is also legal for the bot
//! - otherwise run minimax with alpha-beta pruning, 2 plies during
//!   expansion and 4 during the contest phase
//!
//! The block step is a heuristic, not a guaranteed defence. It reads
//! threats from the position the bot faces, not the one the opponent will
//! face after the bot's reply. It never fires in practice: only locking a
//! charged cell can complete a line, either side may lock any charged
//! cell in any phase, and the bot shares the opponent's last move. Every
//! winning move the opponent has is therefore also one of the bot's and is
//! taken by the immediate-win step first.

mod eval;
mod search;

pub use eval::{WIN_SCORE, evaluate};
pub use search::{CONTEST_DEPTH, EXPANSION_DEPTH, Searcher, search_depth};

use crate::rules::successors;
use crate::{Board, Phase, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Why the bot picked its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionReason {
    /// The move completes a locked line.
    ImmediateWin,
    /// The move takes a cell the opponent could have won with.
    Block,
    /// Chosen by minimax; `score` is from the bot's point of view.
    Search {
        /// Minimax value of the chosen move.
        score: i32,
    },
}

/// A move chosen by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotDecision {
    /// Board index to play.
    pub index: usize,
    /// Which step produced the move.
    pub reason: DecisionReason,
    /// Search nodes visited (zero for the tactical shortcuts).
    pub nodes: u64,
}

/// Chooses a move for `bot` and explains the choice.
///
/// Returns `None` when the bot has no legal move; what that means for the
/// game is up to the caller.
#[instrument(skip(board), fields(board = %board))]
pub fn choose_move(
    board: &Board,
    phase: Phase,
    last_move: Option<usize>,
    bot: Player,
) -> Option<BotDecision> {
    let own: Vec<_> = successors(board, bot, phase, last_move).collect();
    if own.is_empty() {
        debug!("No legal moves");
        return None;
    }

    if let Some(&(index, _)) = own.iter().find(|(_, applied)| applied.caused_win) {
        debug!(index, "Taking immediate win");
        return Some(BotDecision {
            index,
            reason: DecisionReason::ImmediateWin,
            nodes: 0,
        });
    }

    // Threats are read from the same position and last move the bot faces.
    let opponent = bot.opponent();
    let threat = successors(board, opponent, phase, last_move)
        .filter(|(_, applied)| applied.caused_win)
        .map(|(index, _)| index)
        .find(|&index| own.iter().any(|&(own_index, _)| own_index == index));
    if let Some(index) = threat {
        debug!(index, "Blocking opponent win");
        return Some(BotDecision {
            index,
            reason: DecisionReason::Block,
            nodes: 0,
        });
    }

    let depth = search_depth(phase);
    let mut searcher = Searcher::new(bot);
    let scores = searcher.root_scores(board, phase, last_move, depth);

    // Strict comparison keeps the lowest index on ties.
    let mut best: Option<(usize, i32)> = None;
    for (index, score) in scores {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, score)| {
        debug!(index, score, depth, nodes = searcher.nodes(), "Search picked move");
        BotDecision {
            index,
            reason: DecisionReason::Search { score },
            nodes: searcher.nodes(),
        }
    })
}

/// Returns the bot's move index, or `None` if it has no legal move.
pub fn get_bot_move(
    board: &Board,
    phase: Phase,
    last_move: Option<usize>,
    bot: Player,
) -> Option<usize> {
    choose_move(board, phase, last_move, bot).map(|decision| decision.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply_move, check_win, derive_phase};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_takes_immediate_win_without_search() {
        let b = board("//+ -|- +|-");
        let decision = choose_move(&b, Phase::Contest, None, Player::P1).unwrap();
        assert_eq!(decision.index, 2);
        assert_eq!(decision.reason, DecisionReason::ImmediateWin);
        assert_eq!(decision.nodes, 0);
    }

    #[test]
    fn test_immediate_win_respects_anti_repeat() {
        // Cell 2 would win the top row but was just played; cell 8 wins
        // the diagonal instead.
        let b = board("//+ -/- |-+");
        let decision = choose_move(&b, Phase::Contest, Some(2), Player::P2).unwrap();
        assert_eq!(decision.index, 8);
        assert_eq!(decision.reason, DecisionReason::ImmediateWin);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let b = board("/-- -/- -/-");
        assert_eq!(get_bot_move(&b, Phase::Contest, None, Player::P2), None);
    }

    #[test]
    fn test_empty_board_search_is_deterministic() {
        let b = Board::new();
        let first = choose_move(&b, Phase::Expansion, None, Player::P2).unwrap();
        let second = choose_move(&b, Phase::Expansion, None, Player::P2).unwrap();
        assert!(first.index < 9);
        assert_eq!(first, second);
        assert!(matches!(first.reason, DecisionReason::Search { .. }));
        assert!(first.nodes > 0);
    }

    #[test]
    fn test_search_move_is_legal() {
        let b = board("|-| -+- |.|");
        let phase = derive_phase(&b);
        let index = get_bot_move(&b, phase, Some(8), Player::P2).unwrap();
        let applied = apply_move(&b, index, Player::P2, phase).unwrap();
        assert_ne!(index, 8);
        assert_ne!(applied.board, b);
        assert!(!check_win(&applied.board));
    }
}
