//! Core domain types for Slash.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player 1 (moves first, places vertical marks).
    #[serde(alias = "p1")]
    P1,
    /// Player 2 (places horizontal marks).
    #[serde(alias = "p2")]
    P2,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// The mark this player claims cells with.
    pub fn mark(self) -> Cell {
        match self {
            Player::P1 => Cell::MarkA,
            Player::P2 => Cell::MarkB,
        }
    }

    /// The opponent's mark.
    pub fn opponent_mark(self) -> Cell {
        self.opponent().mark()
    }
}

/// Returns the other player.
pub fn other_player(player: Player) -> Player {
    player.opponent()
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unclaimed cell.
    Empty,
    /// Claimed by player 1.
    MarkA,
    /// Claimed by player 2.
    MarkB,
    /// Contested cell, ready to be locked during the contest phase.
    Charged,
    /// Permanently claimed cell. Counts toward win lines.
    Locked,
}

impl Cell {
    /// Single-character notation for the cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::MarkA => '|',
            Cell::MarkB => '-',
            Cell::Charged => '+',
            Cell::Locked => '/',
        }
    }

    /// Parses a notation character.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '|' => Some(Cell::MarkA),
            '-' => Some(Cell::MarkB),
            '+' => Some(Cell::Charged),
            '/' => Some(Cell::Locked),
            _ => None,
        }
    }

    /// The player owning this cell, if it holds a mark.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::MarkA => Some(Player::P1),
            Cell::MarkB => Some(Player::P2),
            Cell::Empty | Cell::Charged | Cell::Locked => None,
        }
    }
}

/// Game phase, always derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Some cell is still empty: claim cells or charge opponent marks.
    Expansion,
    /// The board is full: lock charged cells or charge opponent marks.
    Contest,
}

/// 3x3 Slash board.
///
/// Boards are plain values. Every transformation returns a new board,
/// so a board handed out can never change underneath its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from explicit cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns a copy of this board with one cell replaced.
    ///
    /// Out-of-range indices leave the board unchanged.
    pub fn with_cell(&self, index: usize, cell: Cell) -> Self {
        let mut next = *self;
        if let Some(slot) = next.cells.get_mut(index) {
            *slot = cell;
        }
        next
    }

    /// Overwrites a cell in place. Test-only corruption hook.
    #[cfg(test)]
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Counts cells in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Checks whether any cell is still empty.
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&Cell::Empty)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => result.push_str(&(index + 1).to_string()),
                    cell => result.push(cell.symbol()),
                }
                if col < 2 {
                    result.push(' ');
                }
            }
            if row < 2 {
                result.push('\n');
            }
        }
        result
    }
}

/// Returns the starting board: nine empty cells.
pub fn initial_board() -> Board {
    Board::new()
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing board notation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseBoardError {
    /// A character is not one of `. | - + /`.
    #[display("Unknown cell symbol {:?}", _0)]
    UnknownSymbol(char),
    /// The notation did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELL_COUNT {
            return Err(ParseBoardError::WrongLength(symbols.len()));
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (slot, c) in cells.iter_mut().zip(symbols) {
            *slot = Cell::from_symbol(c).ok_or(ParseBoardError::UnknownSymbol(c))?;
        }
        Ok(Self { cells })
    }
}
