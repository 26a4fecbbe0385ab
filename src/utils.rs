use crate::engine::{Board, BOARD_SIZE};
use crate::error::{Error, Result};

/// Marker that ends a puzzle file. Any line containing it is skipped.
const END_MARKER: &str = "END";

/// Parses a puzzle file's contents into a `Board`.
///
/// The cells are whitespace-separated integers in row-major order, usually
/// three per line. Blank lines and any line containing `END` are ignored.
///
/// # Arguments
/// * `s`: The file contents.
///
/// # Returns
/// * `Ok(Board)` if exactly nine integers were found and they form a valid board.
/// * `Err(Error::ParseBoard)` if a token is not an integer. `line` is 1-based.
/// * `Err(Error::CellCount)` if there are not exactly nine cells.
/// * Any error of [`Board::from_grid`] (for example a missing blank).
///
/// # Examples
/// ```
/// use expense_puzzle::utils::board_from_str;
///
/// let board = board_from_str("2 3 6\n1 0 7\n4 8 5\nEND OF FILE\n").unwrap();
/// assert_eq!(board.get_tile(0, 2), 6);
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(board_from_str("1 2 3\n4 x 5\n6 7 0\n").is_err());
/// assert!(board_from_str("1 2 3\n4 0 5\n").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

    for (index, line) in s.lines().enumerate() {
        if line.contains(END_MARKER) {
            continue;
        }
        for token in line.split_whitespace() {
            let value = token.parse::<i32>().map_err(|_| Error::ParseBoard {
                line: index + 1,
                token: token.to_string(),
            })?;
            cells.push(value);
        }
    }

    if cells.len() != BOARD_SIZE * BOARD_SIZE {
        return Err(Error::CellCount { found: cells.len() });
    }

    let mut grid = [[0; BOARD_SIZE]; BOARD_SIZE];
    for (i, value) in cells.into_iter().enumerate() {
        grid[i / BOARD_SIZE][i % BOARD_SIZE] = value;
    }
    Board::from_grid(grid)
}
