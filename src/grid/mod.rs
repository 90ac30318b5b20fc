//! Square grid of cells and its 4-connected adjacency.
//!
//! The grid owns every [`Cell`] in a flat row-major vector; everything else
//! (search state, paths, renderers) refers to cells by [`Pos`]. Neighbor lists
//! are cached on the cells and are only refreshed by [`Grid::compute_neighbors`]
//! or [`Grid::update_neighbors`], so barrier edits stay O(1).

use std::fmt;

use crate::config::GridConfig;
use crate::errors::GridError;
use crate::geometry::{Pos, CARDINALS};


/// Classification of a cell, shared by the editor and the search engine
/// Start and end are roles held by the grid, not states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open, // passable, not reached by a search
    Barrier, // impassable
    Frontier, // distance known, not yet finalized
    Finalized, // shortest distance locked in
    Path, // on the reconstructed shortest path
}

impl CellState {
    /// Search marks are wiped between runs, editor marks are kept
    pub fn is_search_mark(&self) -> bool {
        matches!(self, CellState::Frontier | CellState::Finalized | CellState::Path)
    }
}


/// One grid position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    state: CellState,
    neighbors: Vec<Pos>, // cached, see Grid::compute_neighbors
}

impl Cell {

    fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Open,
            neighbors: Vec::new(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Neighbors as of the last recomputation
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }
}


/// N x N matrix of cells plus the optional start and end roles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>, // row-major
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {

    /// Build an n x n grid of open cells
    pub fn build(n: usize) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::InvalidSize);
        }
        let cells = (0..n * n)
            .map(|i| Cell::new(Pos::new(i / n, i % n)))
            .collect();

        Ok(Self {
            size: n,
            cells,
            start: None,
            end: None,
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        Self::build(config.rows)
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Flat index of a position, the key used by the search engine
    pub fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.size + pos.col)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn state(&self, pos: Pos) -> Option<CellState> {
        self.cell(pos).map(Cell::state)
    }

    pub fn is_barrier(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_barrier)
    }

    /// Overwrite the classification of one cell
    /// pos must belong to this grid, out of bounds positions are ignored
    pub fn set_state(&mut self, pos: Pos, state: CellState) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.state = state;
        }
    }

    pub fn set_barrier(&mut self, pos: Pos) {
        self.set_state(pos, CellState::Barrier);
    }

    pub fn clear_barrier(&mut self, pos: Pos) {
        if self.is_barrier(pos) {
            self.set_state(pos, CellState::Open);
        }
    }

    pub fn reset(&mut self, pos: Pos) {
        self.set_state(pos, CellState::Open);
    }

    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    pub fn set_start(&mut self, pos: Pos) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        self.start = Some(pos);
        Ok(())
    }

    pub fn set_end(&mut self, pos: Pos) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        self.end = Some(pos);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        self.start = None;
    }

    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Recompute the up, right, down, left neighbors of pos that exist and are not barriers
    /// The result is cached on the cell and returned
    pub fn compute_neighbors(&mut self, pos: Pos) -> &[Pos] {
        let Some(index) = self.index(pos) else {
            return &[];
        };
        let neighbors: Vec<Pos> = CARDINALS
            .iter()
            .filter_map(|&d| pos.offset(d, self.size))
            .filter(|&p| !self.is_barrier(p))
            .collect();

        let cell = &mut self.cells[index];
        cell.neighbors = neighbors;
        &cell.neighbors
    }

    /// Recompute the neighbor list of every cell
    /// Needed after barrier edits, before a search runs
    pub fn update_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let pos = self.cells[i].pos;
            self.compute_neighbors(pos);
        }
    }

    /// Cached neighbors of pos
    pub fn neighbors(&self, pos: Pos) -> &[Pos] {
        self.cell(pos).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Return frontier, finalized and path cells to open, leaving barriers and roles alone
    pub fn clear_search(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            cell.state = CellState::Open;
        }
    }

    /// Editor primary action
    /// places the start, then the end, then barriers; start and end are never overwritten
    pub fn paint(&mut self, pos: Pos) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        let is_start = self.start == Some(pos);
        let is_end = self.end == Some(pos);

        if self.start.is_none() && !is_end {
            self.reset(pos);
            self.start = Some(pos);
        } else if self.end.is_none() && !is_start {
            self.reset(pos);
            self.end = Some(pos);
        } else if !is_start && !is_end {
            self.set_barrier(pos);
        }
        Ok(())
    }

    /// Editor secondary action
    /// opens the cell and drops any role it held
    pub fn erase(&mut self, pos: Pos) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        self.reset(pos);
        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        }
        Ok(())
    }

    /// Open every cell and forget start and end
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::new(cell.pos);
        }
        self.start = None;
        self.end = None;
    }

    /// Character drawn for a cell, roles take precedence over states
    pub fn glyph(&self, pos: Pos) -> char {
        if self.start == Some(pos) {
            return 'S';
        }
        if self.end == Some(pos) {
            return 'E';
        }
        match self.state(pos) {
            Some(CellState::Open) => ' ',
            Some(CellState::Barrier) => '#',
            Some(CellState::Frontier) => '+',
            Some(CellState::Finalized) => '.',
            Some(CellState::Path) => '*',
            None => '?',
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size)
                .map(|col| self.glyph(Pos::new(row, col)))
                .collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_zero() {
        assert_eq!(Grid::build(0), Err(GridError::InvalidSize));
    }

    #[test]
    fn test_build_layout() {
        let grid = Grid::build(3).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cells().count(), 9);
        for cell in grid.cells() {
            assert_eq!(cell.state(), CellState::Open);
            assert_eq!(grid.cell(cell.pos()), Some(cell));
        }
        assert_eq!(grid.index(Pos::new(2, 1)), Some(7));
        assert_eq!(grid.index(Pos::new(3, 0)), None);
        assert_eq!(grid.start(), None);
        assert_eq!(grid.end(), None);
    }

    #[test]
    fn test_from_config() {
        let grid = Grid::from_config(&GridConfig::default()).unwrap();
        assert_eq!(grid.size(), 50);
        assert!(Grid::from_config(&GridConfig::new(0, 800)).is_err());
    }

    #[test]
    fn test_compute_neighbors_order_and_bounds() {
        let mut grid = Grid::build(3).unwrap();

        let centre = grid.compute_neighbors(Pos::new(1, 1)).to_vec();
        assert_eq!(centre, vec![Pos::new(0, 1), Pos::new(1, 2), Pos::new(2, 1), Pos::new(1, 0)]);

        let corner = grid.compute_neighbors(Pos::new(0, 0)).to_vec();
        assert_eq!(corner, vec![Pos::new(0, 1), Pos::new(1, 0)]);

        let other = grid.compute_neighbors(Pos::new(2, 2)).to_vec();
        assert_eq!(other, vec![Pos::new(2, 1), Pos::new(1, 2)]);

        assert!(grid.compute_neighbors(Pos::new(5, 5)).is_empty());
    }

    #[test]
    fn test_compute_neighbors_skips_barriers() {
        let mut grid = Grid::build(3).unwrap();
        grid.set_barrier(Pos::new(0, 1));
        grid.set_barrier(Pos::new(1, 0));

        assert!(grid.compute_neighbors(Pos::new(0, 0)).is_empty());
        assert_eq!(grid.compute_neighbors(Pos::new(1, 1)), &[Pos::new(1, 2), Pos::new(2, 1)]);
    }

    #[test]
    fn test_compute_neighbors_idempotent() {
        let mut grid = Grid::build(4).unwrap();
        grid.set_barrier(Pos::new(1, 2));
        for cell in grid.cells().map(Cell::pos).collect::<Vec<_>>() {
            let first = grid.compute_neighbors(cell).to_vec();
            let second = grid.compute_neighbors(cell).to_vec();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_neighbors_are_not_auto_maintained() {
        let mut grid = Grid::build(2).unwrap();
        grid.update_neighbors();
        assert_eq!(grid.neighbors(Pos::new(0, 0)).len(), 2);

        grid.set_barrier(Pos::new(0, 1));
        assert_eq!(grid.neighbors(Pos::new(0, 0)).len(), 2); // stale until recomputed

        grid.update_neighbors();
        assert_eq!(grid.neighbors(Pos::new(0, 0)), &[Pos::new(1, 0)]);
    }

    #[test]
    fn test_barrier_edits() {
        let mut grid = Grid::build(2).unwrap();
        let p = Pos::new(1, 1);
        grid.set_barrier(p);
        assert!(grid.is_barrier(p));
        grid.clear_barrier(p);
        assert_eq!(grid.state(p), Some(CellState::Open));

        grid.set_state(p, CellState::Finalized);
        grid.clear_barrier(p); // not a barrier, untouched
        assert_eq!(grid.state(p), Some(CellState::Finalized));
        grid.reset(p);
        assert_eq!(grid.state(p), Some(CellState::Open));

        grid.set_barrier(Pos::new(9, 9)); // ignored
    }

    #[test]
    fn test_paint_order() {
        let mut grid = Grid::build(3).unwrap();
        grid.paint(Pos::new(0, 0)).unwrap();
        assert_eq!(grid.start(), Some(Pos::new(0, 0)));

        // painting the start again does not turn it into the end
        grid.paint(Pos::new(0, 0)).unwrap();
        assert_eq!(grid.end(), None);

        grid.paint(Pos::new(2, 2)).unwrap();
        assert_eq!(grid.end(), Some(Pos::new(2, 2)));

        grid.paint(Pos::new(1, 1)).unwrap();
        assert!(grid.is_barrier(Pos::new(1, 1)));

        // start and end are never painted over
        grid.paint(Pos::new(0, 0)).unwrap();
        grid.paint(Pos::new(2, 2)).unwrap();
        assert!(!grid.is_barrier(Pos::new(0, 0)));
        assert!(!grid.is_barrier(Pos::new(2, 2)));

        assert_eq!(grid.paint(Pos::new(3, 0)), Err(GridError::OutOfBounds(Pos::new(3, 0))));
    }

    #[test]
    fn test_erase_drops_roles() {
        let mut grid = Grid::build(3).unwrap();
        grid.paint(Pos::new(0, 0)).unwrap();
        grid.paint(Pos::new(2, 2)).unwrap();
        grid.paint(Pos::new(1, 1)).unwrap();

        grid.erase(Pos::new(1, 1)).unwrap();
        assert_eq!(grid.state(Pos::new(1, 1)), Some(CellState::Open));

        grid.erase(Pos::new(0, 0)).unwrap();
        assert_eq!(grid.start(), None);
        assert_eq!(grid.end(), Some(Pos::new(2, 2)));

        // next paint fills the missing start first
        grid.paint(Pos::new(1, 2)).unwrap();
        assert_eq!(grid.start(), Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_clear_and_clear_search() {
        let mut grid = Grid::build(2).unwrap();
        grid.set_start(Pos::new(0, 0)).unwrap();
        grid.set_end(Pos::new(1, 1)).unwrap();
        grid.set_barrier(Pos::new(0, 1));
        grid.set_state(Pos::new(1, 0), CellState::Path);

        grid.clear_search();
        assert_eq!(grid.state(Pos::new(1, 0)), Some(CellState::Open));
        assert!(grid.is_barrier(Pos::new(0, 1)));
        assert_eq!(grid.start(), Some(Pos::new(0, 0)));

        grid.clear();
        assert!(grid.cells().all(|c| c.state() == CellState::Open));
        assert_eq!(grid.start(), None);
        assert_eq!(grid.end(), None);
    }

    #[test]
    fn test_set_roles_bounds() {
        let mut grid = Grid::build(2).unwrap();
        assert_eq!(grid.set_start(Pos::new(2, 0)), Err(GridError::OutOfBounds(Pos::new(2, 0))));
        assert_eq!(grid.set_end(Pos::new(0, 2)), Err(GridError::OutOfBounds(Pos::new(0, 2))));
        grid.set_end(Pos::new(0, 1)).unwrap();
        grid.clear_end();
        assert_eq!(grid.end(), None);
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::build(3).unwrap();
        grid.set_start(Pos::new(0, 0)).unwrap();
        grid.set_end(Pos::new(2, 2)).unwrap();
        grid.set_barrier(Pos::new(1, 1));
        grid.set_state(Pos::new(0, 1), CellState::Path);
        grid.set_state(Pos::new(1, 0), CellState::Finalized);
        grid.set_state(Pos::new(2, 0), CellState::Frontier);

        assert_eq!(grid.to_string(), "|S* |\n|.# |\n|+ E|\n");
    }
}
