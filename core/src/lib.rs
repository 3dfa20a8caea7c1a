use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use path::*;
pub use rng::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod path;
pub mod rng;
mod tile;
mod types;

pub const DEFAULT_COLUMNS: Coord = 6;
pub const DEFAULT_ROWS: Coord = 5;
pub const DEFAULT_MINE_COUNT: CellCount = 10;

/// Upper bound on mines regardless of board size.
pub const MAX_MINE_COUNT: CellCount = 20;

/// The player always enters at the top-left corner.
pub const START_INDEX: CellIndex = 0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: Coord,
    pub rows: Coord,
    pub mine_count: CellCount,
    pub seed: Option<Seed>,
}

impl GameConfig {
    pub fn new(columns: Coord, rows: Coord, mine_count: CellCount) -> Self {
        let clamped = (columns.max(1), rows.max(1));
        if clamped != (columns, rows) {
            log::warn!("Board dimensions {columns}x{rows} clamped to {}x{}", clamped.0, clamped.1);
        }
        Self {
            columns: clamped.0,
            rows: clamped.1,
            mine_count,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.columns, self.rows)
    }

    pub const fn goal_index(&self) -> CellIndex {
        self.total_cells().saturating_sub(1) as CellIndex
    }

    /// Cells that can never hold a mine: start, goal, and the two orthogonal
    /// neighbors of the start, clipped to the grid.
    pub fn reserved_safe(&self) -> CellSet {
        let total = self.total_cells() as CellIndex;
        [
            START_INDEX,
            self.goal_index(),
            START_INDEX + 1,
            START_INDEX + CellIndex::from(self.columns),
        ]
        .into_iter()
        .filter(|&index| index < total)
        .collect()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_MINE_COUNT)
    }
}

/// Immutable result of generation: a mine layout with a guaranteed escape
/// route from start to goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    seed: u32,
    cols: Coord,
    rows: Coord,
    start_index: CellIndex,
    goal_index: CellIndex,
    mines: CellSet,
    tiles: Vec<Tile>,
}

impl Board {
    /// Assembles a board without checking solvability. Generation goes through
    /// [`BoardGenerator`]; this exists for callers that already hold a layout.
    pub fn from_layout(
        seed: u32,
        (cols, rows): (Coord, Coord),
        start_index: CellIndex,
        goal_index: CellIndex,
        mines: CellSet,
    ) -> Self {
        let total = mult(cols, rows) as CellIndex;
        let tiles = (0..total)
            .map(|index| Tile::new(index, cols, mines.contains(index)))
            .collect();
        Self {
            seed,
            cols,
            rows,
            start_index,
            goal_index,
            mines,
            tiles,
        }
    }

    /// The trial seed that produced this layout. Reproduce the board by
    /// feeding this value back, not the seed originally requested.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn start_index(&self) -> CellIndex {
        self.start_index
    }

    pub fn goal_index(&self) -> CellIndex {
        self.goal_index
    }

    pub fn mines(&self) -> &CellSet {
        &self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn total_cells(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn safe_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: CellIndex) -> Result<&Tile> {
        self.tiles.get(index).ok_or(GameError::InvalidCell(index))
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        index < self.tiles.len()
    }

    pub fn is_mine(&self, index: CellIndex) -> bool {
        self.mines.contains(index)
    }

    /// Mine mask laid out as `(row, col)`.
    pub fn mine_mask(&self) -> Array2<bool> {
        let shape = (usize::from(self.rows), usize::from(self.cols));
        Array2::from_shape_fn(shape, |(row, col)| {
            self.is_mine(row * usize::from(self.cols) + col)
        })
    }

    /// Shortest safe route from the start to the goal.
    pub fn escape_route(&self) -> Option<Path> {
        shortest_path(self.start_index, self.goal_index, self.cols, self.rows, &self.mines)
    }

    /// Shortest safe route from `index` to the goal.
    pub fn escape_route_from(&self, index: CellIndex) -> Result<Option<Path>> {
        self.tile(index)?;
        Ok(shortest_path(index, self.goal_index, self.cols, self.rows, &self.mines))
    }
}

impl Index<CellIndex> for Board {
    type Output = Tile;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.tiles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!((config.columns, config.rows, config.mine_count), (6, 5, 10));
        assert_eq!(config.total_cells(), 30);
        assert_eq!(config.goal_index(), 29);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn config_clamps_empty_dimensions() {
        let config = GameConfig::new(0, 0, 3);
        assert_eq!((config.columns, config.rows), (1, 1));
    }

    #[test]
    fn reserved_cells_are_clipped_and_deduplicated() {
        let classic = GameConfig::default().reserved_safe();
        assert_eq!(classic.iter().collect::<Vec<_>>(), [0, 1, 6, 29]);

        let tiny = GameConfig::new(1, 1, 1).reserved_safe();
        assert_eq!(tiny.iter().collect::<Vec<_>>(), [0]);

        let strip = GameConfig::new(2, 1, 1).reserved_safe();
        assert_eq!(strip.iter().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"mine_count": 4, "seed": "abc"}"#).unwrap();
        assert_eq!((config.columns, config.rows, config.mine_count), (6, 5, 4));
        assert_eq!(config.seed, Some(Seed::from("abc")));

        let numeric: GameConfig = serde_json::from_str(r#"{"seed": 77}"#).unwrap();
        assert_eq!(numeric.seed, Some(Seed::Number(77)));

        let negative: GameConfig = serde_json::from_str(r#"{"seed": -5}"#).unwrap();
        assert_eq!(negative.seed, Some(Seed::Signed(-5)));

        let fractional: GameConfig = serde_json::from_str(r#"{"seed": 1.5}"#).unwrap();
        assert_eq!(fractional.seed, Some(Seed::Float(1.5)));
    }

    #[test]
    fn board_derives_tiles_and_counts() {
        let mines: CellSet = [3, 10].into_iter().collect();
        let board = Board::from_layout(5, (6, 5), 0, 29, mines);

        assert_eq!(board.total_cells(), 30);
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_count(), 28);
        assert_eq!(board[10], Tile { index: 10, id: 11, row: 1, col: 4, is_mine: true });
        assert!(!board[11].is_mine);
        assert_eq!(board.tile(30), Err(GameError::InvalidCell(30)));

        let mask = board.mine_mask();
        assert_eq!(mask.dim(), (5, 6));
        assert!(mask[(0, 3)]);
        assert!(mask[(1, 4)]);
        assert_eq!(mask.iter().filter(|&&mine| mine).count(), 2);
    }

    #[test]
    fn escape_route_avoids_mines() {
        let mines: CellSet = [7, 8, 9, 10].into_iter().collect();
        let board = Board::from_layout(0, (6, 5), 0, 29, mines);

        let route = board.escape_route().unwrap();
        assert_eq!(route.first(), Some(&0));
        assert_eq!(route.last(), Some(&29));
        assert!(route.iter().all(|&cell| !board.is_mine(cell)));

        let from_middle = board.escape_route_from(20).unwrap().unwrap();
        assert_eq!(from_middle.first(), Some(&20));
        assert_eq!(board.escape_route_from(99), Err(GameError::InvalidCell(99)));
    }
}
