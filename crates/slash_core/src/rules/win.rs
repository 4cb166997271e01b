//! Win detection logic for Slash.

use super::super::{Board, Cell, Position};

/// The eight lines: three rows, three columns, two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line whose three cells are all locked.
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    LINES.into_iter().find(|line| {
        line.iter()
            .all(|pos| board.get(pos.to_index()) == Some(Cell::Locked))
    })
}

/// Checks whether any line is fully locked.
///
/// Locked cells belong to nobody, so a win is credited to whoever made
/// the move that completed the line.
pub fn check_win(board: &Board) -> bool {
    winning_line(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_win_empty_board() {
        assert!(!check_win(&Board::new()));
    }

    #[test]
    fn test_win_top_row() {
        let board: Board = "/// +|+ -+-".parse().unwrap();
        assert!(check_win(&board));
        assert_eq!(
            winning_line(&board),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_win_anti_diagonal() {
        let board: Board = "../ ./. /..".parse().unwrap();
        assert!(check_win(&board));
        assert_eq!(
            winning_line(&board),
            Some([Position::TopRight, Position::Center, Position::BottomLeft])
        );
    }

    #[test]
    fn test_charged_line_is_not_a_win() {
        let board: Board = "+++ ... ...".parse().unwrap();
        assert!(!check_win(&board));
    }

    #[test]
    fn test_two_locked_is_not_a_win() {
        let board: Board = "//+ |-| -|-".parse().unwrap();
        assert!(!check_win(&board));
    }
}
