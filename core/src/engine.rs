use core::num::Saturating;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Ready,
    Playing,
    Dead,
    Clear,
}

impl GamePhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Dead | Self::Clear)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// What the player finds on the cell they step onto.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    Safe,
    Mine,
    Goal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected,
    Landed(Landing),
}

/// Whether the player at `state` may step onto `target`. Mines are legal
/// targets; stepping on one is a losing move, not an illegal one.
pub fn can_move_to(board: &Board, state: &GameState, target: CellIndex) -> bool {
    if state.phase.is_finished() {
        return false;
    }

    if !board.contains(target) || target == state.current_index {
        return false;
    }

    NeighborIter::new(state.current_index, board.cols(), board.rows()).any(|cell| cell == target)
}

/// Classifies `target`; cells off the board count as plain ground.
pub fn evaluate_landing(board: &Board, target: CellIndex) -> Landing {
    if board.is_mine(target) {
        Landing::Mine
    } else if target == board.goal_index() {
        Landing::Goal
    } else {
        Landing::Safe
    }
}

/// Session record for one board. Replaced wholesale when a new board is
/// generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    phase: GamePhase,
    current_index: CellIndex,
    steps: Saturating<u32>,
    visited_safe: CellSet,
}

impl GameState {
    pub fn new(start_index: CellIndex, phase: GamePhase) -> Self {
        let mut visited_safe = CellSet::default();
        visited_safe.insert(start_index);
        Self {
            phase,
            current_index: start_index,
            steps: Saturating(0),
            visited_safe,
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.start_index(), GamePhase::Ready)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_index(&self) -> CellIndex {
        self.current_index
    }

    pub fn steps(&self) -> u32 {
        self.steps.0
    }

    pub fn visited_safe(&self) -> &CellSet {
        &self.visited_safe
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Leaves `Ready`; no effect in any other phase.
    pub fn start(&mut self) {
        if self.phase.is_ready() {
            self.phase = GamePhase::Playing;
        }
    }

    /// Steps onto `target` if [`can_move_to`] allows it. An accepted move from
    /// `Ready` starts play first.
    pub fn apply_move(&mut self, board: &Board, target: CellIndex) -> MoveOutcome {
        if !can_move_to(board, self, target) {
            return MoveOutcome::Rejected;
        }

        self.start();
        let landing = evaluate_landing(board, target);
        self.steps += 1;
        self.current_index = target;

        match landing {
            Landing::Mine => self.phase = GamePhase::Dead,
            Landing::Goal => {
                self.visited_safe.insert(target);
                self.phase = GamePhase::Clear;
            }
            Landing::Safe => {
                self.visited_safe.insert(target);
            }
        }
        MoveOutcome::Landed(landing)
    }

    /// Shortest safe route from where the player stands.
    pub fn escape_route(&self, board: &Board) -> Option<Path> {
        board.escape_route_from(self.current_index).ok().flatten()
    }
}

/// One of the eight king-move directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Column and row change.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Left => (-1, 0),
            Right => (1, 0),
            Up => (0, -1),
            Down => (0, 1),
            UpLeft => (-1, -1),
            UpRight => (1, -1),
            DownLeft => (-1, 1),
            DownRight => (1, 1),
        }
    }

    /// Primary and alternate key names, lowercase.
    pub const fn keys(self) -> [&'static str; 2] {
        use Direction::*;
        match self {
            Left => ["arrowleft", "a"],
            Right => ["arrowright", "d"],
            Up => ["arrowup", "w"],
            Down => ["arrowdown", "s"],
            UpLeft => ["q", "home"],
            UpRight => ["e", "pageup"],
            DownLeft => ["z", "end"],
            DownRight => ["c", "pagedown"],
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(key: &str) -> core::result::Result<Self, Self::Err> {
        let normalized = key.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.keys().contains(&normalized.as_str()))
            .ok_or_else(|| UnknownDirection(key.to_owned()))
    }
}

/// Cell one step from `current` in `direction`, if it is on the grid.
pub fn directional_target(
    current: CellIndex,
    direction: Direction,
    cols: Coord,
    rows: Coord,
) -> Option<CellIndex> {
    crate::types::offset(current, direction.delta(), cols, rows)
}

/// Same as [`directional_target`], starting from a key name.
pub fn key_target(current: CellIndex, key: &str, cols: Coord, rows: Coord) -> Option<CellIndex> {
    let direction = key.parse().ok()?;
    directional_target(current, direction, cols, rows)
}
