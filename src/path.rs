//! Turns the board sequence of a solution into tile moves and a total cost.
use crate::engine::{Board, BOARD_SIZE};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Direction a tile slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One tile slide of a solution. Displays as `Move <weight> <direction>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub weight: i32,
    pub direction: Direction,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move {} {}", self.weight, self.direction)
    }
}

/// Derives the direction a tile took from its origin and destination cells.
fn direction_between(origin: (usize, usize), destination: (usize, usize)) -> Option<Direction> {
    let ((or, oc), (dr, dc)) = (origin, destination);
    if or == dr && oc.abs_diff(dc) == 1 {
        Some(if oc > dc { Direction::Left } else { Direction::Right })
    } else if oc == dc && or.abs_diff(dr) == 1 {
        Some(if or > dr { Direction::Up } else { Direction::Down })
    } else {
        None
    }
}

/// Works out which tile moved between two consecutive boards.
///
/// The difference grid (`before - after`) of a single slide has exactly two
/// non-zero cells: the tile's origin holds `+weight` and its destination holds
/// `-weight`. Anything else is not a single slide.
fn step_between(before: &Board, after: &Board) -> Option<Step> {
    let mut origin = None;
    let mut destination = None;

    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let diff = before.get_tile(r, c) - after.get_tile(r, c);
            if diff > 0 && origin.is_none() {
                origin = Some(((r, c), diff));
            } else if diff < 0 && destination.is_none() {
                destination = Some(((r, c), -diff));
            } else if diff != 0 {
                return None;
            }
        }
    }

    let ((from, weight), (to, moved)) = (origin?, destination?);
    if weight != moved {
        return None;
    }
    let direction = direction_between(from, to)?;
    Some(Step { weight, direction })
}

/// Converts the boards of a path, start to goal, into steps and their total cost.
///
/// # Returns
/// * `Ok((steps, cost))`, with one step per consecutive pair of boards.
///   A single-board path gives no steps and zero cost.
/// * `Err(Error::BrokenPath { index })` if boards `index` and `index + 1`
///   are not one slide apart.
///
/// # Examples
/// ```
/// use expense_puzzle::engine::Board;
/// use expense_puzzle::path::reconstruct;
///
/// let start = Board::from_grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
/// let goal = Board::from_grid([[1, 2, 3], [4, 5, 0], [6, 7, 8]]).unwrap();
/// let (steps, cost) = reconstruct(&[start, goal]).unwrap();
/// assert_eq!(steps[0].to_string(), "Move 5 Left");
/// assert_eq!(cost, 5);
/// ```
pub fn reconstruct(boards: &[Board]) -> Result<(Vec<Step>, u64)> {
    let mut steps = Vec::with_capacity(boards.len().saturating_sub(1));
    let mut total_cost = 0;

    for (index, pair) in boards.windows(2).enumerate() {
        let step = step_between(&pair[0], &pair[1]).ok_or(Error::BrokenPath { index })?;
        total_cost += step.weight.unsigned_abs() as u64;
        steps.push(step);
    }

    Ok((steps, total_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(grid: [[i32; 3]; 3]) -> Board {
        Board::from_grid(grid).unwrap()
    }

    fn rendered(boards: &[Board]) -> (Vec<String>, u64) {
        let (steps, cost) = reconstruct(boards).unwrap();
        (steps.iter().map(|s| s.to_string()).collect(), cost)
    }

    #[test]
    fn test_single_board_has_no_steps() {
        let b = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        assert_eq!(rendered(&[b]), (vec![], 0));
        assert_eq!(rendered(&[]), (vec![], 0));
    }

    #[test]
    fn test_all_four_directions() {
        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let mut labels = Vec::new();
        for child in centre.successors() {
            let (steps, cost) = rendered(&[centre, child]);
            labels.push(steps[0].clone());
            assert_eq!(cost, centre.slide_cost(&child));
        }
        // Blank goes right, left, down, up, so the tiles move the opposite way.
        assert_eq!(
            labels,
            vec!["Move 5 Left", "Move 4 Right", "Move 7 Up", "Move 2 Down"]
        );
    }

    #[test]
    fn test_two_step_path() {
        let start = board([[1, 2, 3], [0, 4, 5], [6, 7, 8]]);
        let middle = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let goal = board([[1, 2, 3], [4, 5, 0], [6, 7, 8]]);
        assert_eq!(
            rendered(&[start, middle, goal]),
            (vec!["Move 4 Left".to_string(), "Move 5 Left".to_string()], 9)
        );
    }

    #[test]
    fn test_duplicate_weights() {
        let start = board([[7, 7, 7], [7, 0, 7], [7, 7, 7]]);
        let after = board([[7, 0, 7], [7, 7, 7], [7, 7, 7]]);
        assert_eq!(rendered(&[start, after]), (vec!["Move 7 Down".to_string()], 7));
    }

    #[test]
    fn test_non_adjacent_boards_are_rejected() {
        let start = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let slid = board([[1, 2, 3], [4, 5, 0], [6, 7, 8]]);
        let jumped = board([[0, 2, 3], [4, 1, 5], [6, 7, 8]]);
        let result = reconstruct(&[start, slid, jumped]);
        assert!(matches!(result, Err(Error::BrokenPath { index: 1 })));
    }

    #[test]
    fn test_identical_boards_are_rejected() {
        let start = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        assert!(matches!(
            reconstruct(&[start, start]),
            Err(Error::BrokenPath { index: 0 })
        ));
    }
}
