use serde::{Deserialize, Serialize};

use crate::*;

pub use certain::*;
pub use heuristic::*;
pub use probability::*;

mod certain;
mod heuristic;
mod probability;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Open,
    Flag,
}

/// A single action proposed by the assist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub kind: MoveKind,
    pub coords: Coord2,
}

impl AiMove {
    pub const fn open(coords: Coord2) -> Self {
        Self {
            kind: MoveKind::Open,
            coords,
        }
    }

    pub const fn flag(coords: Coord2) -> Self {
        Self {
            kind: MoveKind::Flag,
            coords,
        }
    }
}

/// Move for one auto-assist step: a certain move when one exists, otherwise the heuristic pick if `allow_heuristic`.
pub fn assist_move(board: &Board, allow_heuristic: bool) -> Option<AiMove> {
    certain_move(board).or_else(|| {
        if allow_heuristic {
            heuristic_move(board)
        } else {
            None
        }
    })
}
