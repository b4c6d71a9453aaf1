use thiserror::Error;

use crate::{CellCount, Coord2};

/// Rejections from the checked board and difficulty constructors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("mine at {0:?} lies outside the board")]
    MineOutOfBounds(Coord2),
    #[error("{mines} mines do not fit on a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("a board is 1 to 255 cells wide and high, got {width}x{height}")]
    BadDimensions { width: usize, height: usize },
    #[error("unknown difficulty, expected easy, normal, hard or very-hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
