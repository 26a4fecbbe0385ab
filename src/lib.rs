//! # Expense 8-Puzzle Solver Library
//!
//! This library solves the expense 8-puzzle: a 3x3 sliding-tile puzzle in
//! which every tile carries a weight and sliding a tile costs its weight.
//! Seven interchangeable search strategies are provided, each reporting the
//! move list, its total cost and search-effort counters.
//!
//! It is used by two binaries:
//! - `expense_solver`: Loads a start and a goal board from files, runs one
//!   strategy and prints the solution, optionally writing a search trace.
//! - `strategy_evaluator`: Runs every strategy over seeded random instances
//!   and compares their costs and effort.
//!
//! ## Modules
//! - `engine`: The `Board` type and the move generator.
//! - `heuristics`: The weighted Manhattan distance used by greedy and A*.
//! - `fringe`: Search nodes, the node arena, the closed set and the fringe
//!   containers (FIFO, LIFO, depth-limited LIFO, priority queue).
//! - `solver`: The strategy drivers, `solve` and the report types.
//! - `path`: Turns a board sequence into `Move <weight> <direction>` steps.
//! - `trace`: Optional per-pop diagnostic records and their sinks.
//! - `utils`: Parsing puzzle files.
//! - `error`: The crate's error type.

pub mod engine;
pub mod error;
pub mod fringe;
pub mod heuristics;
pub mod path;
pub mod solver;
pub mod trace;
pub mod utils;

pub use error::{Error, Result};
