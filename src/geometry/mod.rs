use std::fmt;

use num_traits::{Num, Signed};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}


/// Cell position on a square grid
/// row grows downward, col grows rightward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// Cardinal offsets in the order neighbors are reported: up, right, down, left
pub const CARDINALS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Pos {

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of unit moves between two positions, ignoring barriers
    pub fn manhattan(&self, other: &Pos) -> usize {
        manhattan_distance(
            self.row as isize,
            self.col as isize,
            other.row as isize,
            other.col as isize,
        ) as usize
    }

    /// True when the two positions share an edge
    pub fn is_adjacent(&self, other: &Pos) -> bool {
        self.manhattan(other) == 1
    }

    /// Step by an offset, None if that leaves an n x n grid
    pub fn offset(&self, (dr, dc): (isize, isize), n: usize) -> Option<Pos> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < n && col < n {
            Some(Pos { row, col })
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
