//! Board representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell on the Tic-Tac-Toe board
///
/// Cells carry a numeric value so that a line of three identical marks sums
/// to +3 (crosses) or -3 (naughts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Cross,
    Naught,
}

impl Cell {
    /// Numeric value used for line sums: 0, +1 or -1
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Cross => 1,
            Cell::Naught => -1,
        }
    }

    pub fn from_value(value: i8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Cross),
            -1 => Some(Cell::Naught),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Cross => 'X',
            Cell::Naught => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Cross),
            'O' | 'o' | '0' => Some(Cell::Naught),
            _ => None,
        }
    }
}

/// One of the two sides. Crosses always open the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Cross,
    Naught,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Cross => Side::Naught,
            Side::Naught => Side::Cross,
        }
    }

    /// The mark this side places on the board
    pub fn mark(self) -> Cell {
        match self {
            Side::Cross => Cell::Cross,
            Side::Naught => Cell::Naught,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Cross => write!(f, "crosses"),
            Side::Naught => write!(f, "naughts"),
        }
    }
}

/// A full snapshot of all nine cells, row-major.
///
/// This is the key type of the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration([Cell; 9]);

impl Configuration {
    pub fn new(cells: [Cell; 9]) -> Self {
        Configuration(cells)
    }

    /// Build from raw numeric values, rejecting anything outside {-1, 0, 1}
    pub fn from_values(values: [i8; 9]) -> Option<Self> {
        let mut cells = [Cell::Empty; 9];
        for (cell, value) in cells.iter_mut().zip(values) {
            *cell = Cell::from_value(value)?;
        }
        Some(Configuration(cells))
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    pub fn values(&self) -> [i8; 9] {
        self.0.map(Cell::value)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.0.iter().filter(|&&c| c == cell).count()
    }

    /// Number of crosses minus number of naughts
    pub fn mark_balance(&self) -> isize {
        self.count(Cell::Cross) as isize - self.count(Cell::Naught) as isize
    }

    /// Indices of empty cells in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.0[i] == Cell::Empty).collect()
    }

    pub fn is_empty_at(&self, position: usize) -> bool {
        self.0.get(position) == Some(&Cell::Empty)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Configuration {
    type Err = crate::Error;

    /// Parse nine cell characters (`.` or `_` for empty), ignoring `|`, `/`
    /// and all whitespace as separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, '|' | '/') && !c.is_whitespace())
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("expected 9 cells, got {} in '{s}'", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidConfiguration {
                message: format!("invalid character '{c}' at position {i} in '{s}'"),
            })?;
        }
        Ok(Configuration(cells))
    }
}

/// The 3x3 playing grid
///
/// Only bounds are checked here. Whether a cell may be written is decided by
/// the referee and the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn from_configuration(configuration: Configuration) -> Self {
        Board {
            cells: *configuration.cells(),
        }
    }

    fn check_bounds(position: usize) -> crate::Result<()> {
        if position < 9 {
            Ok(())
        } else {
            Err(crate::Error::InvalidPosition { position })
        }
    }

    pub fn get(&self, position: usize) -> crate::Result<Cell> {
        Self::check_bounds(position)?;
        Ok(self.cells[position])
    }

    /// Place a mark. Overwriting is not checked; see [`Board`].
    pub fn set(&mut self, position: usize, mark: Side) -> crate::Result<()> {
        Self::check_bounds(position)?;
        self.cells[position] = mark.mark();
        Ok(())
    }

    pub fn is_empty(&self, position: usize) -> crate::Result<bool> {
        Ok(self.get(position)? == Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn empty_positions(&self) -> Vec<usize> {
        self.configuration().empty_positions()
    }

    /// Canonical configuration used as the state-table key
    pub fn configuration(&self) -> Configuration {
        Configuration(self.cells)
    }

    pub(crate) fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
