//! The seven search strategies and the loop they share.
//!
//! Every strategy runs the same pop → close → goal test → expand cycle over a
//! different [`Fringe`]; iterative deepening repeats the depth-limited run with
//! a growing limit. See [`solve`] for the entry point.
use crate::engine::Board;
use crate::error::{Error, Result};
use crate::fringe::{
    ClosedSet, DepthLimitedFringe, FifoFringe, Fringe, FringeEntry, LifoFringe, NodeArena,
    PriorityFringe, PriorityKey,
};
use crate::path::{reconstruct, Step};
use crate::trace::{TraceEvent, TraceRecord, TraceSink, TraceSummary, Tracer};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Search strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Breadth-first search
    Bfs,
    /// Uniform-cost search
    Ucs,
    /// Depth-first search
    Dfs,
    /// Depth-limited search (needs a depth limit)
    Dls,
    /// Iterative-deepening search
    Ids,
    /// Greedy best-first search
    Greedy,
    /// A* search
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Bfs,
        Strategy::Ucs,
        Strategy::Dfs,
        Strategy::Dls,
        Strategy::Ids,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Ucs => "UCS",
            Strategy::Dfs => "DFS",
            Strategy::Dls => "DLS",
            Strategy::Ids => "IDS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Search-effort counters.
///
/// - `nodes_popped`: nodes removed from the fringe, goal included.
/// - `nodes_expanded`: successor candidates examined, before the closed-set check.
/// - `nodes_generated`: nodes pushed onto the fringe, each root included.
/// - `max_fringe_size`: largest fringe length seen right after a push.
///
/// Iterative deepening keeps accumulating into the same counters across its
/// iterations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub nodes_popped: u64,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    pub max_fringe_size: usize,
}

/// Strategy parameters that not every strategy uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Depth limit for [`Strategy::Dls`]. Required by it, ignored by the others.
    pub depth_limit: Option<i64>,
    /// Last depth limit [`Strategy::Ids`] tries before giving up. `None` means
    /// iterate until the goal is found, which never ends on an unsolvable instance.
    pub max_depth: Option<u32>,
}

/// A path from the start board to the goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub steps: Vec<Step>,
    /// Sum of the weights of all moved tiles.
    pub cost: u64,
    /// Boards from start to goal, inclusive.
    pub boards: Vec<Board>,
}

impl Solution {
    /// Number of moves in the solution.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The fringe ran dry (or the IDS ceiling was reached) without popping the goal.
    NoSolution,
}

/// Everything a search run reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

/// The goal node as the driver saw it.
struct Found {
    boards: Vec<Board>,
    path_cost: u64,
}

/// Solves the puzzle from `start` to `goal` with `strategy`.
///
/// # Returns
/// * `Ok(report)` with `SearchOutcome::Solved` or `SearchOutcome::NoSolution`,
///   and the search statistics in both cases.
/// * `Err(Error::MissingDepthLimit)` / `Err(Error::InvalidDepthLimit)` if
///   `Strategy::Dls` is selected without a usable `options.depth_limit`.
///
/// # Examples
/// ```
/// use expense_puzzle::engine::Board;
/// use expense_puzzle::solver::{solve, SearchOptions, Strategy};
///
/// let start = Board::from_grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
/// let goal = Board::from_grid([[1, 2, 3], [4, 5, 0], [6, 7, 8]]).unwrap();
/// let report = solve(&start, &goal, Strategy::AStar, &SearchOptions::default()).unwrap();
/// let solution = report.solution().unwrap();
/// assert_eq!(solution.steps[0].to_string(), "Move 5 Left");
/// assert_eq!(solution.cost, 5);
/// ```
pub fn solve(
    start: &Board,
    goal: &Board,
    strategy: Strategy,
    options: &SearchOptions,
) -> Result<SearchReport> {
    run(start, goal, strategy, options, Tracer::new(None))
}

/// Like [`solve`], reporting every step of the search to `sink`.
pub fn solve_traced(
    start: &Board,
    goal: &Board,
    strategy: Strategy,
    options: &SearchOptions,
    sink: &mut dyn TraceSink,
) -> Result<SearchReport> {
    run(start, goal, strategy, options, Tracer::new(Some(sink)))
}

fn run(
    start: &Board,
    goal: &Board,
    strategy: Strategy,
    options: &SearchOptions,
    mut tracer: Tracer<'_>,
) -> Result<SearchReport> {
    let dls_limit = match strategy {
        Strategy::Dls => Some(validate_depth_limit(options.depth_limit)?),
        _ => None,
    };

    tracer.emit_with(|| TraceEvent::Start {
        strategy,
        start: *start,
        goal: *goal,
    })?;

    let mut stats = SearchStats::default();
    let found = match (strategy, dls_limit) {
        (Strategy::Bfs, _) => drive(FifoFringe::new(), start, goal, &mut stats, &mut tracer)?,
        (Strategy::Dfs, _) => drive(LifoFringe::new(), start, goal, &mut stats, &mut tracer)?,
        (Strategy::Dls, Some(limit)) => drive(
            DepthLimitedFringe::new(limit),
            start,
            goal,
            &mut stats,
            &mut tracer,
        )?,
        (Strategy::Dls, None) => return Err(Error::MissingDepthLimit),
        (Strategy::Ids, _) => {
            iterative_deepening(start, goal, options.max_depth, &mut stats, &mut tracer)?
        }
        (Strategy::Ucs, _) => drive(
            PriorityFringe::new(PriorityKey::PathCost, *goal),
            start,
            goal,
            &mut stats,
            &mut tracer,
        )?,
        (Strategy::Greedy, _) => drive(
            PriorityFringe::new(PriorityKey::Heuristic, *goal),
            start,
            goal,
            &mut stats,
            &mut tracer,
        )?,
        (Strategy::AStar, _) => drive(
            PriorityFringe::new(PriorityKey::CostPlusHeuristic, *goal),
            start,
            goal,
            &mut stats,
            &mut tracer,
        )?,
    };

    let outcome = match found {
        Some(found) => {
            let (steps, cost) = reconstruct(&found.boards)?;
            debug_assert_eq!(cost, found.path_cost);
            SearchOutcome::Solved(Solution {
                steps,
                cost,
                boards: found.boards,
            })
        }
        None => SearchOutcome::NoSolution,
    };

    tracer.emit_with(|| {
        let solution = match &outcome {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::NoSolution => None,
        };
        TraceEvent::Finish(TraceSummary {
            solved: solution.is_some(),
            depth: solution.map(Solution::depth),
            cost: solution.map(|s| s.cost),
            stats,
        })
    })?;

    Ok(SearchReport {
        strategy,
        outcome,
        stats,
    })
}

fn validate_depth_limit(limit: Option<i64>) -> Result<u32> {
    match limit {
        None => Err(Error::MissingDepthLimit),
        Some(limit) if limit < 0 => Err(Error::InvalidDepthLimit { limit }),
        Some(limit) => Ok(u32::try_from(limit).unwrap_or(u32::MAX)),
    }
}

/// The loop every strategy shares.
///
/// The root counts as one generated node. Each popped board is closed before
/// the goal test; successors the fringe skips (see [`Fringe::skips`]) are
/// counted as expanded but not pushed. Boards are closed on pop, not on push,
/// so the same board can sit in the fringe more than once.
fn drive<F: Fringe>(
    mut fringe: F,
    start: &Board,
    goal: &Board,
    stats: &mut SearchStats,
    tracer: &mut Tracer<'_>,
) -> Result<Option<Found>> {
    let mut arena = NodeArena::new();
    let mut closed = ClosedSet::new();

    fringe.push(arena.root(*start));
    stats.nodes_generated += 1;

    while let Some(node) = fringe.pop() {
        stats.nodes_popped += 1;
        closed.insert(node.board, node.depth);

        tracer.emit_with(|| {
            TraceEvent::Pop(TraceRecord {
                popped: FringeEntry {
                    board: node.board,
                    depth: node.depth,
                    path_cost: node.path_cost,
                    priority: fringe.priority(&node),
                },
                depth_limit: fringe.depth_limit(),
                fringe: fringe.snapshot(),
                closed: closed.boards().to_vec(),
                stats: *stats,
            })
        })?;

        if node.board == *goal {
            return Ok(Some(Found {
                boards: arena.path(&node),
                path_cost: node.path_cost,
            }));
        }

        if !fringe.admits_expansion(&node) {
            continue;
        }

        for successor in node.board.successors() {
            stats.nodes_expanded += 1;
            if fringe.skips(&closed, &successor, node.depth + 1) {
                continue;
            }
            let child = arena.child(&node, successor);
            fringe.push(child);
            stats.nodes_generated += 1;
            stats.max_fringe_size = stats.max_fringe_size.max(fringe.len());
        }
    }

    Ok(None)
}

/// Depth-limited runs with limits 0, 1, 2, … until one finds the goal.
///
/// A run with limit `L` reaches every board within `L + 1` moves, so the first
/// run that finds the goal finds it at its shallowest depth. Statistics are
/// never reset between iterations. With `max_depth` set, gives up after the
/// run with that limit.
fn iterative_deepening(
    start: &Board,
    goal: &Board,
    max_depth: Option<u32>,
    stats: &mut SearchStats,
    tracer: &mut Tracer<'_>,
) -> Result<Option<Found>> {
    let mut limit = 0;
    loop {
        let fringe = DepthLimitedFringe::new(limit);
        if let Some(found) = drive(fringe, start, goal, stats, tracer)? {
            return Ok(Some(found));
        }
        if matches!(max_depth, Some(max) if limit >= max) {
            return Ok(None);
        }
        limit += 1;
    }
}
