use crate::engine::{Board, BOARD_SIZE};

/// Weighted Manhattan distance between `board` and `goal`.
///
/// For every cell whose value differs from the goal's value at that position,
/// the distance from the cell to the first (row-major) goal position holding
/// the same value is multiplied by the value and summed. The blank weighs zero,
/// and a value that does not occur in the goal contributes nothing.
///
/// With unique weights this never overestimates the remaining cost, since each
/// tile has to slide at least its Manhattan distance and every slide costs its
/// weight. With duplicate weights a tile can be measured against the wrong goal
/// cell, so the estimate may overshoot and A*/greedy lose their optimality
/// guarantee.
///
/// # Examples
/// ```
/// use expense_puzzle::engine::Board;
/// use expense_puzzle::heuristics::weighted_manhattan;
///
/// let start = Board::from_grid([[1, 2, 3], [0, 4, 5], [6, 7, 8]]).unwrap();
/// let goal = Board::from_grid([[1, 2, 3], [4, 5, 0], [6, 7, 8]]).unwrap();
/// assert_eq!(weighted_manhattan(&start, &goal), 4 + 5);
/// assert_eq!(weighted_manhattan(&goal, &goal), 0);
/// ```
pub fn weighted_manhattan(board: &Board, goal: &Board) -> u64 {
    let mut estimate = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = board.get_tile(r, c);
            if value == goal.get_tile(r, c) {
                continue;
            }
            if let Some((gr, gc)) = goal.position_of(value) {
                let distance = (r.abs_diff(gr) + c.abs_diff(gc)) as u64;
                estimate += distance * value.unsigned_abs() as u64;
            }
        }
    }
    estimate
}
