use crate::geometry::Pos;


/// Construction parameters handed over by the input layer
/// width is the logical (pixel) side length of the square drawing surface,
/// the search itself only cares about rows
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub rows: usize,
    pub width: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 50, width: 800 }
    }
}

impl GridConfig {

    pub fn new(rows: usize, width: u32) -> Self {
        Self { rows, width }
    }

    /// Side length of one cell on the drawing surface
    pub fn cell_size(&self) -> u32 {
        if self.rows == 0 {
            return 0;
        }
        self.width / self.rows as u32
    }

    /// Map a point on the drawing surface to the cell under it
    /// x runs along rows and y along columns, matching how cells are laid out
    pub fn pos_at(&self, x: u32, y: u32) -> Option<Pos> {
        let gap = self.cell_size();
        if gap == 0 {
            return None;
        }
        let row = (x / gap) as usize;
        let col = (y / gap) as usize;
        if row < self.rows && col < self.rows {
            Some(Pos::new(row, col))
        } else {
            None
        }
    }
}
