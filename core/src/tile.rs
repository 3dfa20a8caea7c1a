use serde::{Deserialize, Serialize};

use crate::{CellIndex, Coord};

/// Per-cell descriptor handed to presentation layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub index: CellIndex,
    /// One-based label for display.
    pub id: CellIndex,
    pub row: Coord,
    pub col: Coord,
    pub is_mine: bool,
}

impl Tile {
    pub fn new(index: CellIndex, cols: Coord, is_mine: bool) -> Self {
        let cols = usize::from(cols);
        Self {
            index,
            id: index + 1,
            row: (index / cols) as Coord,
            col: (index % cols) as Coord,
            is_mine,
        }
    }
}
