use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines: requested {requested}, but only {available} cells can hold one")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Failed to generate a solvable board layout after {attempts} attempts")]
    UnsolvableLayout { attempts: u32 },
    #[error("Invalid cell index {0}")]
    InvalidCell(CellIndex),
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized direction key {0:?}")]
pub struct UnknownDirection(pub String);
