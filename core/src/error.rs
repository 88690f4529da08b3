use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board size must be between 2 and 26, got {0}")]
    InvalidSize(Coord),
    #[error("mine count must be between 1 and {max}, got {requested}")]
    InvalidMineCount { requested: CellCount, max: CellCount },
    #[error("mine position out of bounds")]
    InvalidPosition,
}

pub type Result<T> = core::result::Result<T, GameError>;
