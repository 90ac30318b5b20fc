use crate::errors::SearchError;
use crate::geometry::Pos;
use crate::grid::{CellState, Grid};
use super::path::{reconstruct, Path};
use super::{Distance, GraphNodeMap, NO_PARENT};

use std::{collections::BinaryHeap, cmp::Ordering, ops::ControlFlow};
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};


/// Every move between adjacent cells costs exactly this much
const UNIT_WEIGHT: Distance = 1;


/// Result of a search that ran without a precondition failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path), // end reached, path marked on the grid
    NoPath, // frontier exhausted without reaching the end
    Cancelled, // on_step asked to stop
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}


/// What a single call to Search::step did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Expanded(Pos), // cell popped and its neighbors relaxed
    Stale(Pos), // outdated frontier entry discarded
    Found(Path), // end popped, path marked
    Exhausted, // nothing left to pop
}


/// Frontier entry
/// - ordered by cost, ties go to the entry pushed first
/// - entries whose cost no longer matches the node map are stale and skipped on pop
#[derive(Debug)]
struct NodeId<T> {
    index: usize, // index in the node map
    cost: T,
    seq: u64, // push order
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the biggest, so both keys are reversed
        other.cost.cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}


/// Dijkstra's Algorithm on a unit-weight grid, one popped cell at a time
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// The search mutates cell classifications as it goes: discovered cells become
/// Frontier, expanded cells become Finalized (the start keeps its state) and the
/// cells strictly between start and end become Path once the end is reached.
///
/// Among several shortest paths the one returned depends on the push order of
/// equal-cost frontier entries, another frontier implementation may pick a
/// different path of the same length.
#[derive(Debug)]
pub struct Search {
    start: Pos,
    end: Pos,
    // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId reverses it
    nodes_to_visit: BinaryHeap<NodeId<Distance>>,
    // Distance and predecessor of every discovered node, absent means infinite
    nodes_map: GraphNodeMap<Pos, Distance>,
    seq: u64,
    pending: Option<Pos>, // expanded last step, finalized at the start of the next one
    nbuf: Vec<Pos>,
}

impl Search {

    /// Validate the grid's endpoints and prepare it for a fresh run
    /// Nothing on the grid changes when validation fails
    pub fn new(grid: &mut Grid) -> Result<Self, SearchError> {
        let (start, end) = match (grid.start(), grid.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(SearchError::MissingEndpoints),
        };
        if start == end {
            return Err(SearchError::SameEndpoints);
        }
        for (role, pos) in [("start", start), ("end", end)] {
            if !grid.contains(pos) {
                return Err(SearchError::InvalidState(format!("{role} {pos} is outside the grid")));
            }
            if grid.is_barrier(pos) {
                return Err(SearchError::InvalidState(format!("{role} {pos} is a barrier")));
            }
        }

        // Leftovers of a previous run and stale neighbor lists
        grid.clear_search();
        grid.update_neighbors();

        let mut nodes_map: GraphNodeMap<Pos, Distance> = GraphNodeMap::default();
        let start_index = nodes_map.insert_full(start, (NO_PARENT, 0)).0;

        let mut nodes_to_visit = BinaryHeap::new();
        nodes_to_visit.push(NodeId {
            index: start_index,
            cost: 0,
            seq: 0,
        });

        debug!("dijkstra from {start} to {end} on a {n}x{n} grid", n = grid.size());

        Ok(Self {
            start,
            end,
            nodes_to_visit,
            nodes_map,
            seq: 1,
            pending: None,
            nbuf: Vec::with_capacity(4),
        })
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    /// Best known distance from the start, None while undiscovered
    pub fn distance(&self, pos: Pos) -> Option<Distance> {
        self.nodes_map.get(&pos).map(|&(_, cost)| cost)
    }

    /// Cell the given one was most recently improved from
    pub fn predecessor(&self, pos: Pos) -> Option<Pos> {
        let &(parent_index, _) = self.nodes_map.get(&pos)?;
        self.nodes_map.get_index(parent_index).map(|(&parent, _)| parent)
    }

    /// Frontier entries still queued, stale ones included
    pub fn frontier_len(&self) -> usize {
        self.nodes_to_visit.len()
    }

    /// Pop one frontier entry and process it
    /// Once the end is found or the frontier runs dry every further call reports Exhausted
    pub fn step(&mut self, grid: &mut Grid) -> Result<Step, SearchError> {
        if let Some(pos) = self.pending.take() {
            if pos != self.start {
                grid.set_state(pos, CellState::Finalized);
            }
        }

        let Some(NodeId { index, cost, .. }) = self.nodes_to_visit.pop() else {
            return Ok(Step::Exhausted);
        };

        // fetch current best cost for node
        let (&pos, &(_, c)) = self.nodes_map.get_index(index).ok_or_else(|| {
            SearchError::InvalidState(format!("frontier entry {index} has no node"))
        })?;

        // A cheaper entry for this node was pushed after this one
        if cost > c {
            trace!("discarding stale entry for {pos} at {cost}, best is {c}");
            return Ok(Step::Stale(pos));
        }

        if pos == self.end {
            let path = Path::from_backtrack(reconstruct(&self.nodes_map, pos)).ok_or_else(|| {
                SearchError::InvalidState(format!("no predecessor chain for {pos}"))
            })?;
            for &cell in path.interior() {
                grid.set_state(cell, CellState::Path);
            }
            self.nodes_to_visit.clear();
            debug!("reached {pos} at distance {c}");
            return Ok(Step::Found(path));
        }

        trace!("expanding {pos} at distance {c}");

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(pos));

        for &neighbor in nbuf.iter() {
            let new_cost = c + UNIT_WEIGHT;

            let neighbor_index;
            match self.nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            self.nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
                seq: self.seq,
            });
            self.seq += 1;

            if grid.state(neighbor) == Some(CellState::Open) {
                grid.set_state(neighbor, CellState::Frontier);
            }
        }
        self.nbuf = nbuf;

        self.pending = Some(pos);
        Ok(Step::Expanded(pos))
    }
}


/// Run the search to completion, calling on_step after every expanded cell
/// and once more when the end is reached
///
/// on_step sees the grid between steps and may return ControlFlow::Break to
/// cancel, in which case the cell just expanded is left unfinalized.
pub fn run<F>(grid: &mut Grid, mut on_step: F) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(&Grid) -> ControlFlow<()>,
    {

    let mut search = Search::new(grid)?;

    loop {
        match search.step(grid)? {
            Step::Expanded(_) => {
                if on_step(grid).is_break() {
                    debug!("search cancelled");
                    return Ok(SearchOutcome::Cancelled);
                }
            }
            Step::Stale(_) => continue,
            Step::Found(path) => {
                // Final frame, the search is over so a break changes nothing
                let _ = on_step(grid);
                debug!("shortest path has {} moves", path.len());
                return Ok(SearchOutcome::Found(path));
            }
            Step::Exhausted => {
                debug!("no path from {} to {}", search.start(), search.end());
                return Ok(SearchOutcome::NoPath);
            }
        }
    }
}

/// Run the search without observing intermediate frames
pub fn shortest_path(grid: &mut Grid) -> Result<SearchOutcome, SearchError> {
    run(grid, |_| ControlFlow::Continue(()))
}
