use crate::geometry::Pos;
use super::{Distance, GraphNodeMap, NO_PARENT};


/// Walk the predecessor chain from a node back to the start
/// Yields the end first and the start last
/// Cloning the walker (or calling reconstruct again) restarts the walk
#[derive(Clone, Debug)]
pub struct Backtrack<'a> {
    node_map: &'a GraphNodeMap<Pos, Distance>,
    current: usize,
}

impl Iterator for Backtrack<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.current == NO_PARENT {
            return None;
        }
        match self.node_map.get_index(self.current) {
            Some((&pos, &(parent_index, _))) => {
                self.current = parent_index;
                Some(pos)
            }
            None => {
                self.current = NO_PARENT;
                None
            }
        }
    }
}

/// Construct the backward walk from end to the start node
/// An end that was never reached produces an empty walk
/// The walk terminates: every parent index points at a node inserted earlier
pub fn reconstruct(node_map: &GraphNodeMap<Pos, Distance>, end: Pos) -> Backtrack<'_> {
    let current = node_map.get_index_of(&end).unwrap_or(NO_PARENT);
    Backtrack { node_map, current }
}


/// Shortest path ordered from start to end, both included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {

    /// Collect a backward walk into start-to-end order
    pub fn from_backtrack(walk: Backtrack<'_>) -> Option<Self> {
        let mut cells: Vec<Pos> = walk.collect();
        if cells.is_empty() {
            return None;
        }
        // The walk is in reverse order, so reverse it
        cells.reverse();
        Some(Self { cells })
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of unit moves, equal to the end's distance
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    /// True when start and end coincide, which a search never produces
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Pos {
        self.cells[0]
    }

    pub fn end(&self) -> Pos {
        self.cells[self.cells.len() - 1]
    }

    /// Cells strictly between start and end, the ones drawn as path
    pub fn interior(&self) -> &[Pos] {
        if self.cells.len() < 2 {
            return &[];
        }
        &self.cells[1..self.cells.len() - 1]
    }

    /// Every consecutive pair shares an edge
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(&w[1]))
    }
}
