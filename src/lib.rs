//! Shortest paths on editable square grids.
//!
//! A [`Grid`] holds N x N cells that can be painted as barriers and carries an
//! optional start and end. [`graph_algos::dijkstra::run`] searches it with
//! Dijkstra's algorithm specialised to unit weights, classifying cells as it
//! goes and handing the grid to a callback after every expanded cell so a
//! renderer can draw each frame or cancel the run.
//!
//! ```
//! use std::ops::ControlFlow;
//! use gridpath::{Grid, Pos, SearchOutcome, run};
//!
//! let mut grid = Grid::build(5).unwrap();
//! grid.set_start(Pos::new(0, 0)).unwrap();
//! grid.set_end(Pos::new(4, 4)).unwrap();
//! grid.set_barrier(Pos::new(1, 1));
//!
//! let outcome = run(&mut grid, |_frame| ControlFlow::Continue(())).unwrap();
//! if let SearchOutcome::Found(path) = outcome {
//!     assert_eq!(path.len(), 8);
//! }
//! ```

mod collections;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod grid;

pub use config::GridConfig;
pub use errors::{GridError, SearchError};
pub use geometry::Pos;
pub use graph_algos::Distance;
pub use graph_algos::dijkstra::{run, shortest_path, Search, SearchOutcome, Step};
pub use graph_algos::path::{reconstruct, Backtrack, Path};
pub use grid::{Cell, CellState, Grid};
