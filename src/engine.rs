//! Board representation and move generation for the expense 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Board`: an immutable 3x3 grid of tile weights with exactly one blank cell.
//! - `Board::successors`: the move generator, producing every board reachable
//!   by sliding one tile into the blank.
//! - `Board::scramble`: a seeded random walk used to build solvable instances.
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Serialize, Serializer};
use std::fmt;

/// Width and height of the board. The board is always square.
pub const BOARD_SIZE: usize = 3;

/// Sentinel value of the blank cell.
pub const BLANK: i32 = 0;

/// Neighbour offsets tried by the move generator, in order: right, left, down, up.
const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// One configuration of the puzzle.
///
/// Every non-blank cell holds the weight of its tile, which is also the cost of
/// sliding that tile. Weights need not be unique. Boards are plain values:
/// moving a tile always produces a new `Board` and never touches the original.
///
/// The position of the blank is cached next to the grid; it is derived from the
/// grid, so equality and hashing still depend only on the nine cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[i32; BOARD_SIZE]; BOARD_SIZE],
    blank: (usize, usize),
}

impl Board {
    /// Creates a board from a row-major grid, validating it.
    ///
    /// # Arguments
    /// * `grid`: The 3x3 cell values. `0` marks the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if the grid holds exactly one blank and no negative weights.
    /// * `Err(Error::InvalidBoard)` if there are zero or several blanks.
    /// * `Err(Error::NegativeTile)` if a tile weight is negative.
    ///
    /// # Examples
    /// ```
    /// use expense_puzzle::engine::Board;
    ///
    /// let board = Board::from_grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    ///
    /// assert!(Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]).is_err());
    /// ```
    pub fn from_grid(grid: [[i32; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut blanks = Vec::new();
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == BLANK {
                    blanks.push((r, c));
                } else if value < 0 {
                    return Err(Error::NegativeTile { value });
                }
            }
        }

        match blanks.as_slice() {
            [blank] => Ok(Board {
                grid,
                blank: *blank,
            }),
            _ => Err(Error::InvalidBoard {
                blanks: blanks.len(),
            }),
        }
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> i32 {
        self.grid[r][c]
    }

    /// Returns the underlying grid.
    pub fn get_grid(&self) -> &[[i32; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Returns the (row, column) of the blank cell.
    pub fn blank_position(&self) -> (usize, usize) {
        self.blank
    }

    /// Returns the first position of `value` in row-major order, if present.
    pub fn position_of(&self, value: i32) -> Option<(usize, usize)> {
        (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .find(|&(r, c)| self.grid[r][c] == value)
    }

    /// Generates every board reachable by sliding one tile into the blank.
    ///
    /// Neighbours are tried in the fixed order right, left, down, up, so the
    /// result is deterministic. A corner blank yields 2 successors, an edge
    /// blank 3 and the centre 4.
    pub fn successors(&self) -> Vec<Board> {
        let (br, bc) = self.blank;
        let mut successors = Vec::with_capacity(NEIGHBOUR_OFFSETS.len());

        for (dr, dc) in NEIGHBOUR_OFFSETS {
            let nr = br as isize + dr;
            let nc = bc as isize + dc;
            if nr < 0 || nr >= BOARD_SIZE as isize || nc < 0 || nc >= BOARD_SIZE as isize {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);

            let mut grid = self.grid;
            grid[br][bc] = grid[nr][nc];
            grid[nr][nc] = BLANK;
            successors.push(Board {
                grid,
                blank: (nr, nc),
            });
        }

        successors
    }

    /// Cost of the slide that turns `self` into `successor`.
    ///
    /// This is the weight of the tile that moved into `self`'s blank cell.
    /// `successor` is expected to be one of `self.successors()`.
    pub fn slide_cost(&self, successor: &Board) -> u64 {
        let (r, c) = self.blank;
        successor.grid[r][c].unsigned_abs() as u64
    }

    /// Walks the blank `moves` times at random, starting from this board.
    ///
    /// The walk is driven by a `SmallRng` seeded with `seed`, so the same seed
    /// always yields the same board. The result is always reachable from (and
    /// therefore solvable towards) `self`.
    pub fn scramble(&self, moves: usize, seed: u64) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = *self;
        for _ in 0..moves {
            if let Some(next) = board.successors().choose(&mut rng) {
                board = *next;
            }
        }
        board
    }
}

impl Serialize for Board {
    /// Serializes as the bare 3x3 grid.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.grid.serialize(serializer)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if value == BLANK {
                    write!(f, "{:>3}", ".")?;
                } else {
                    write!(f, "{:>3}", value)?;
                }
            }
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
