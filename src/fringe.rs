//! Search nodes, the containers that order them, and the closed set.
//!
//! Every strategy shares one expansion loop; what differs is the [`Fringe`]
//! it is handed:
//! - [`FifoFringe`]: breadth-first.
//! - [`LifoFringe`]: depth-first.
//! - [`DepthLimitedFringe`]: depth-first that refuses to expand past a depth.
//! - [`PriorityFringe`]: uniform-cost, greedy and A*, depending on [`PriorityKey`].
use crate::engine::Board;
use crate::heuristics::weighted_manhattan;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// A board reached by the search, with the cost and depth of the path to it.
///
/// The path itself lives in the [`NodeArena`] that created the node; `slot`
/// points at this node's entry there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub board: Board,
    pub path_cost: u64,
    pub depth: u32,
    slot: usize,
}

/// Owns the parent links of every node created during one search.
///
/// Nodes only carry an index into the arena, so creating a child is O(1) no
/// matter how deep the search goes. The board sequence is rebuilt once, for
/// the node that reaches the goal.
#[derive(Debug, Default)]
pub struct NodeArena {
    entries: Vec<(Board, Option<usize>)>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the start node: zero cost, depth zero, no parent.
    pub fn root(&mut self, board: Board) -> SearchNode {
        self.entries.push((board, None));
        SearchNode {
            board,
            path_cost: 0,
            depth: 0,
            slot: self.entries.len() - 1,
        }
    }

    /// Creates the node reached by sliding from `parent` to `board`.
    ///
    /// The path cost grows by the weight of the tile that moved.
    pub fn child(&mut self, parent: &SearchNode, board: Board) -> SearchNode {
        self.entries.push((board, Some(parent.slot)));
        SearchNode {
            board,
            path_cost: parent.path_cost + parent.board.slide_cost(&board),
            depth: parent.depth + 1,
            slot: self.entries.len() - 1,
        }
    }

    /// Returns the boards from the start to `node`, inclusive.
    pub fn path(&self, node: &SearchNode) -> Vec<Board> {
        let mut boards = Vec::with_capacity(node.depth as usize + 1);
        let mut cursor = Some(node.slot);
        while let Some(slot) = cursor {
            let (board, parent) = self.entries[slot];
            boards.push(board);
            cursor = parent;
        }
        boards.reverse();
        boards
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Boards that have been popped for expansion, with the shallowest depth each
/// was popped at.
///
/// Insertion order is kept next to the map so that trace snapshots list the
/// boards in the order they were first closed.
#[derive(Debug, Default)]
pub struct ClosedSet {
    depths: HashMap<Board, u32>,
    order: Vec<Board>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `board` closed at `depth`.
    ///
    /// Returns `false` if it already was closed at `depth` or shallower.
    pub fn insert(&mut self, board: Board, depth: u32) -> bool {
        match self.depths.entry(board) {
            Entry::Vacant(slot) => {
                slot.insert(depth);
                self.order.push(board);
                true
            }
            Entry::Occupied(mut slot) if depth < *slot.get() => {
                slot.insert(depth);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.depths.contains_key(board)
    }

    /// Shallowest depth `board` was closed at.
    pub fn depth_of(&self, board: &Board) -> Option<u32> {
        self.depths.get(board).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Closed boards in the order they were first closed.
    pub fn boards(&self) -> &[Board] {
        &self.order
    }
}

/// A fringe entry as recorded in a trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FringeEntry {
    pub board: Board,
    pub depth: u32,
    pub path_cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u64>,
}

impl FringeEntry {
    fn of(node: &SearchNode, priority: Option<u64>) -> Self {
        FringeEntry {
            board: node.board,
            depth: node.depth,
            path_cost: node.path_cost,
            priority,
        }
    }
}

/// The ordering discipline of a search.
pub trait Fringe {
    fn push(&mut self, node: SearchNode);

    /// Removes the node to expand next.
    fn pop(&mut self) -> Option<SearchNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest node this fringe will expand, if it is bounded.
    fn depth_limit(&self) -> Option<u32> {
        None
    }

    /// Whether a popped node may have its successors generated.
    fn admits_expansion(&self, node: &SearchNode) -> bool {
        self.depth_limit().map_or(true, |limit| node.depth <= limit)
    }

    /// Whether `successor`, reached at `depth`, must be skipped.
    ///
    /// Unbounded fringes skip every closed board. Depth-bounded ones only skip
    /// boards already closed at `depth` or shallower, so a shorter route to a
    /// board reopens it and its subtree gets the deeper budget it is owed.
    fn skips(&self, closed: &ClosedSet, successor: &Board, depth: u32) -> bool {
        match (self.depth_limit(), closed.depth_of(successor)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(_), Some(closed_depth)) => closed_depth <= depth,
        }
    }

    /// The key `node` is ordered by, for fringes that order by one.
    fn priority(&self, _node: &SearchNode) -> Option<u64> {
        None
    }

    /// Current contents, in the order they would be popped.
    fn snapshot(&self) -> Vec<FringeEntry>;
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct FifoFringe {
    queue: VecDeque<SearchNode>,
}

impl FifoFringe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fringe for FifoFringe {
    fn push(&mut self, node: SearchNode) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn snapshot(&self) -> Vec<FringeEntry> {
        self.queue.iter().map(|n| FringeEntry::of(n, None)).collect()
    }
}

/// Last in, first out.
#[derive(Debug, Default)]
pub struct LifoFringe {
    stack: Vec<SearchNode>,
}

impl LifoFringe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fringe for LifoFringe {
    fn push(&mut self, node: SearchNode) {
        self.stack.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn snapshot(&self) -> Vec<FringeEntry> {
        self.stack
            .iter()
            .rev()
            .map(|n| FringeEntry::of(n, None))
            .collect()
    }
}

/// A [`LifoFringe`] that refuses to expand nodes deeper than `limit`.
///
/// Nodes one level past the limit are still pushed, popped and goal-tested;
/// they just produce no successors. Closed boards are reopened when reached
/// by a shorter route.
#[derive(Debug)]
pub struct DepthLimitedFringe {
    inner: LifoFringe,
    limit: u32,
}

impl DepthLimitedFringe {
    pub fn new(limit: u32) -> Self {
        DepthLimitedFringe {
            inner: LifoFringe::new(),
            limit,
        }
    }
}

impl Fringe for DepthLimitedFringe {
    fn push(&mut self, node: SearchNode) {
        self.inner.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.inner.pop()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn depth_limit(&self) -> Option<u32> {
        Some(self.limit)
    }

    fn snapshot(&self) -> Vec<FringeEntry> {
        self.inner.snapshot()
    }
}

/// What a [`PriorityFringe`] orders its nodes by, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityKey {
    /// Accumulated path cost (uniform-cost search).
    PathCost,
    /// Heuristic estimate to the goal (greedy best-first).
    Heuristic,
    /// Path cost plus heuristic estimate (A*).
    CostPlusHeuristic,
}

#[derive(Debug)]
struct Queued {
    key: u64,
    seq: u64,
    node: SearchNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Queued {}

/// Reversed so that `BinaryHeap` pops the lowest key, earliest insertion first.
impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with stable ordering among equal keys.
#[derive(Debug)]
pub struct PriorityFringe {
    heap: BinaryHeap<Queued>,
    key: PriorityKey,
    goal: Board,
    next_seq: u64,
}

impl PriorityFringe {
    pub fn new(key: PriorityKey, goal: Board) -> Self {
        PriorityFringe {
            heap: BinaryHeap::new(),
            key,
            goal,
            next_seq: 0,
        }
    }

    /// The priority `node` would be queued under.
    pub fn priority_of(&self, node: &SearchNode) -> u64 {
        match self.key {
            PriorityKey::PathCost => node.path_cost,
            PriorityKey::Heuristic => weighted_manhattan(&node.board, &self.goal),
            PriorityKey::CostPlusHeuristic => {
                node.path_cost + weighted_manhattan(&node.board, &self.goal)
            }
        }
    }
}

impl Fringe for PriorityFringe {
    fn priority(&self, node: &SearchNode) -> Option<u64> {
        Some(self.priority_of(node))
    }

    fn push(&mut self, node: SearchNode) {
        let key = self.priority_of(&node);
        self.heap.push(Queued {
            key,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|queued| queued.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn snapshot(&self) -> Vec<FringeEntry> {
        let mut queued: Vec<&Queued> = self.heap.iter().collect();
        // Queued's ordering is reversed, so descending order is pop order.
        queued.sort_by(|a, b| b.cmp(a));
        queued
            .into_iter()
            .map(|q| FringeEntry::of(&q.node, Some(q.key)))
            .collect()
    }
}
