//! First-class invariants for Slash.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
///
/// Invariants are checked in debug builds and can be tested independently.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for a tuple of three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod locked_permanent;
pub mod no_immediate_repeat;

pub use alternating_turn::AlternatingTurnInvariant;
pub use locked_permanent::LockedCellsPermanentInvariant;
pub use no_immediate_repeat::NoImmediateRepeatInvariant;

/// All Slash invariants as a composable set.
pub type SlashInvariants = (
    LockedCellsPermanentInvariant,
    AlternatingTurnInvariant,
    NoImmediateRepeatInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameInProgress, GameResult, GameSetup, Move, Player};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let game = GameSetup::new().start();
        assert!(SlashInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let moves = vec![
            Move::new(Player::P1, 0),
            Move::new(Player::P2, 4),
            Move::new(Player::P1, 1),
            Move::new(Player::P2, 0),
            Move::new(Player::P1, 4),
        ];

        let Ok(GameResult::InProgress(game)) = GameInProgress::replay(&moves) else {
            panic!("Expected in-progress game");
        };
        assert_eq!(game.board().get(0), Some(Cell::Charged));
        assert_eq!(game.board().get(4), Some(Cell::Charged));
        assert!(SlashInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let game = GameSetup::new().start();
        let Ok(GameResult::InProgress(mut game)) = game.make_move(Move::new(Player::P1, 4)) else {
            panic!("Expected in-progress game");
        };

        // Record a second move on the same index without applying it.
        game.history.push(Move::new(Player::P2, 4));

        let violations = SlashInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 3);
    }
}
