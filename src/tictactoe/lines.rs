//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Side};

/// Winning line indices on the 3x3 board, in scan order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Sum-based line scanning
pub struct LineScan;

impl LineScan {
    /// Sum of the numeric cell values along one line
    pub fn line_sum(cells: &[Cell; 9], line: &[usize; 3]) -> i8 {
        line.iter().map(|&idx| cells[idx].value()).sum()
    }

    /// First completed line in scan order (rows, columns, diagonals)
    pub fn winner(cells: &[Cell; 9]) -> Option<Side> {
        WINNING_LINES
            .iter()
            .find_map(|line| match Self::line_sum(cells, line) {
                3 => Some(Side::Cross),
                -3 => Some(Side::Naught),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_row_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Cross;
        cells[1] = Cell::Cross;
        cells[2] = Cell::Cross;

        assert_eq!(LineScan::line_sum(&cells, &WINNING_LINES[0]), 3);
        assert_eq!(LineScan::winner(&cells), Some(Side::Cross));
    }

    #[test]
    fn test_left_column_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Naught;
        cells[3] = Cell::Naught;
        cells[6] = Cell::Naught;

        assert_eq!(LineScan::winner(&cells), Some(Side::Naught));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Cross;
        cells[4] = Cell::Cross;
        cells[6] = Cell::Cross;

        assert_eq!(LineScan::winner(&cells), Some(Side::Cross));
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Cross;
        cells[1] = Cell::Naught;
        cells[2] = Cell::Cross;

        assert_eq!(LineScan::line_sum(&cells, &WINNING_LINES[0]), 1);
        assert_eq!(LineScan::winner(&cells), None);
    }

    #[test]
    fn test_first_line_in_scan_order_wins() {
        // Not reachable in play, but pins the scan order.
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 1, 2] {
            cells[idx] = Cell::Naught;
        }
        for idx in [6, 7, 8] {
            cells[idx] = Cell::Cross;
        }
        assert_eq!(LineScan::winner(&cells), Some(Side::Naught));
    }
}
