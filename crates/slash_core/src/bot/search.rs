//! Minimax search with alpha-beta pruning.

use super::eval::{WIN_SCORE, evaluate};
use crate::rules::{check_win, derive_phase, successors};
use crate::{Board, Phase, Player};

/// Depth used while empty cells remain: many moves, shallow search.
pub const EXPANSION_DEPTH: u8 = 2;

/// Depth used once the board is full: fewer moves, deeper search.
pub const CONTEST_DEPTH: u8 = 4;

/// Search depth for a phase.
pub fn search_depth(phase: Phase) -> u8 {
    match phase {
        Phase::Expansion => EXPANSION_DEPTH,
        Phase::Contest => CONTEST_DEPTH,
    }
}

/// Minimax searcher for one side.
///
/// Scores are always from `player`'s point of view: the maximizing side
/// is `player`, the minimizing side is its opponent.
#[derive(Debug, Clone)]
pub struct Searcher {
    player: Player,
    /// Node counter for statistics
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher scoring for `player`.
    pub fn new(player: Player) -> Self {
        Self { player, nodes: 0 }
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores every legal root move for `player`.
    ///
    /// Each move is applied and the opponent's reply searched to `depth`
    /// with a full window, so every returned score is exact. Moves come
    /// back in ascending index order.
    pub fn root_scores(
        &mut self,
        board: &Board,
        phase: Phase,
        last_move: Option<usize>,
        depth: u8,
    ) -> Vec<(usize, i32)> {
        successors(board, self.player, phase, last_move)
            .map(|(index, applied)| {
                let score =
                    self.minimax(&applied.board, depth, false, Some(index), i32::MIN, i32::MAX);
                (index, score)
            })
            .collect()
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when `player` is to move on `board`.
    /// `last_move` is the index just played, which the side to move may
    /// not replay.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        last_move: Option<usize>,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        // The side that just moved completed a line. Prefer faster wins
        // and slower losses.
        if check_win(board) {
            return if maximizing {
                -WIN_SCORE + i32::from(depth)
            } else {
                WIN_SCORE - i32::from(depth)
            };
        }

        if depth == 0 {
            let score = evaluate(board, self.player);
            return if maximizing { score } else { -score };
        }

        let phase = derive_phase(board);
        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let mut children = successors(board, mover, phase, last_move).peekable();

        // Stuck: the side to move has nothing to play.
        if children.peek().is_none() {
            return 0;
        }

        if maximizing {
            let mut best = i32::MIN;
            for (index, applied) in children {
                if applied.caused_win {
                    return WIN_SCORE;
                }
                let score =
                    self.minimax(&applied.board, depth - 1, false, Some(index), alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for (index, applied) in children {
                if applied.caused_win {
                    return -WIN_SCORE;
                }
                let score =
                    self.minimax(&applied.board, depth - 1, true, Some(index), alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
