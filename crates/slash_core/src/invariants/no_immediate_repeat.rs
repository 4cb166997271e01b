//! Anti-repeat invariant: no index is played twice in a row.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: Consecutive moves never target the same index.
pub struct NoImmediateRepeatInvariant;

impl Invariant<GameInProgress> for NoImmediateRepeatInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.history()
            .windows(2)
            .all(|pair| pair[0].index != pair[1].index)
    }

    fn description() -> &'static str {
        "No index is played on two consecutive moves"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSetup, Move, Player};

    #[test]
    fn test_empty_game_holds() {
        let game = GameSetup::new().start();
        assert!(NoImmediateRepeatInvariant::holds(&game));
    }

    #[test]
    fn test_repeat_violates() {
        let mut game = GameSetup::new().start();
        game.history.push(Move::new(Player::P1, 6));
        game.history.push(Move::new(Player::P2, 6));
        assert!(!NoImmediateRepeatInvariant::holds(&game));

        // Non-consecutive reuse is fine.
        game.history.pop();
        game.history.push(Move::new(Player::P2, 7));
        game.history.push(Move::new(Player::P1, 6));
        assert!(NoImmediateRepeatInvariant::holds(&game));
    }
}
