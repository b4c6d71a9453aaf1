use serde::{Deserialize, Serialize};

/// Adjacency value carried by mine cells.
pub const MINE_SENTINEL: i8 = -1;

/// A single board cell.
///
/// A flagged cell is never open, and an exploded cell is always an open mine. The one exception is the end-of-game
/// display produced by [`Board::reveal_all_mines`](crate::Board::reveal_all_mines), which opens flagged mines too.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_open: bool,
    pub is_flagged: bool,
    pub is_exploded: bool,
    pub adjacent_mines: i8,
}

impl Cell {
    /// Closed and not flagged, the only state in which a cell is still a free variable.
    pub const fn is_unopened(self) -> bool {
        !self.is_open && !self.is_flagged
    }

    /// Open safe cell showing a non-zero number.
    pub const fn is_numbered(self) -> bool {
        self.is_open && self.adjacent_mines > 0
    }

    /// Open safe cell, including zeros.
    pub const fn is_open_safe(self) -> bool {
        self.is_open && !self.is_mine
    }

    /// Counts against a neighbouring number: either flagged or an already detonated mine.
    pub const fn is_resolved_mine(self) -> bool {
        self.is_flagged || (self.is_open && self.is_mine)
    }
}
