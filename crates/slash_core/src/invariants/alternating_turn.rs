//! Alternating turn invariant: players alternate P1, P2, P1, P2, ...

use super::super::{GameInProgress, Player};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must show the P1, P2, P1, ... pattern, and the player to
/// move must be the one the pattern calls for next.
pub struct AlternatingTurnInvariant;

fn expected_player(ply: usize) -> Player {
    if ply % 2 == 0 { Player::P1 } else { Player::P2 }
}

impl Invariant<GameInProgress> for AlternatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let history = game.history();

        let alternating = history
            .iter()
            .enumerate()
            .all(|(ply, action)| action.player == expected_player(ply));

        alternating && game.to_move() == expected_player(history.len())
    }

    fn description() -> &'static str {
        "Players alternate turns (P1, P2, P1, ...)"
    }
}
