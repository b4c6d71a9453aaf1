use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangular grid of cells indexed by `(x, y)`.
///
/// Every operation that changes the board takes `&self` and hands back a fresh copy, so a board kept in undo history
/// can never be observed changing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

/// What a single numbered cell sees around itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborTally {
    /// Closed, unflagged neighbors.
    pub unopened: SmallVec<[Coord2; 8]>,
    /// Flagged neighbors plus detonated mines.
    pub resolved: u8,
}

impl NeighborTally {
    /// Mines still unaccounted for around a cell showing `adjacent_mines`; negative when over-flagged.
    pub fn remaining(&self, adjacent_mines: i8) -> i16 {
        i16::from(adjacent_mines) - i16::from(self.resolved)
    }
}

impl Board {
    /// Mine-free board with every cell closed.
    pub fn empty(config: DifficultyConfig) -> Self {
        Self {
            cells: Array2::default(nd_index(config.size())),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (width, height) = cells.dim();
        let fits = 1..=usize::from(Coord::MAX);
        if !fits.contains(&width) || !fits.contains(&height) {
            return Err(GameError::BadDimensions { width, height });
        }
        Ok(Self { cells })
    }

    /// Closed board with mines at `mine_coords` and adjacency counts filled in.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let config = DifficultyConfig::new(size.0, size.1, 0)?;
        let mut board = Self::empty(config);

        for &coords in mine_coords {
            let cell = board.cell_mut(coords).ok_or(GameError::MineOutOfBounds(coords))?;
            cell.is_mine = true;
        }

        Ok(board.with_adjacency_counts())
    }

    pub fn size(&self) -> Coord2 {
        size_of(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (size_x, size_y) = self.size();
        x < size_x && y < size_y
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(nd_index(coords))
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(nd_index(coords))
    }

    /// In-bounds neighbors of `coords`; out-of-range neighbors are skipped, never an error.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn neighbor_cells(&self, coords: Coord2) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.neighbors(coords).map(|pos| (pos, self[pos]))
    }

    pub fn coords(&self) -> RowMajor {
        RowMajor::new(self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.coords().map(|pos| (pos, self[pos]))
    }

    /// New board where every safe cell holds its mine-neighbor count and every mine holds [`MINE_SENTINEL`].
    pub fn with_adjacency_counts(&self) -> Board {
        let mut next = self.clone();
        for coords in self.coords() {
            let adjacent_mines = if self[coords].is_mine {
                MINE_SENTINEL
            } else {
                self.neighbor_cells(coords)
                    .filter(|(_, cell)| cell.is_mine)
                    .count() as i8
            };
            next.cells[nd_index(coords)].adjacent_mines = adjacent_mines;
        }
        next
    }

    pub fn tally(&self, coords: Coord2) -> NeighborTally {
        let mut unopened = SmallVec::new();
        let mut resolved = 0;
        for (pos, cell) in self.neighbor_cells(coords) {
            if cell.is_resolved_mine() {
                resolved += 1;
            } else if cell.is_unopened() {
                unopened.push(pos);
            }
        }
        NeighborTally { unopened, resolved }
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    /// Mines that were opened without being flagged.
    pub fn detonated_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_open && cell.is_mine && !cell.is_flagged)
    }

    pub fn open_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_open)
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd_index(coords)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_board_matches_config() {
        let board = Board::empty(Difficulty::Hard.config());

        assert_eq!(board.size(), (24, 16));
        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.open_count(), 0);
        assert!(board.iter().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn neighbors_are_clipped_to_bounds() {
        let board = Board::empty(Difficulty::Easy.config());

        assert_eq!(board.neighbors((0, 0)).count(), 3);
        assert_eq!(board.neighbors((8, 4)).count(), 5);
        assert_eq!(board.neighbors((4, 4)).count(), 8);
        assert_eq!(board.neighbors((40, 40)).count(), 0);
    }

    #[test]
    fn adjacency_counts_match_mine_neighbors() {
        let board = Board::from_mine_coords((4, 3), &[(0, 0), (2, 1), (3, 2)]).unwrap();

        for (coords, cell) in board.iter() {
            if cell.is_mine {
                assert_eq!(cell.adjacent_mines, MINE_SENTINEL);
            } else {
                let expected = board.neighbor_cells(coords).filter(|(_, n)| n.is_mine).count();
                assert_eq!(cell.adjacent_mines as usize, expected, "at {coords:?}");
            }
        }
        assert_eq!(board[(1, 1)].adjacent_mines, 2);
        assert_eq!(board[(3, 1)].adjacent_mines, 2);
    }

    #[test]
    fn adjacency_recount_does_not_touch_source() {
        let board = Board::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let mut raw = Board::empty(DifficultyConfig::new_unchecked(3, 3, 1));
        raw.cell_mut((1, 1)).unwrap().is_mine = true;

        let counted = raw.with_adjacency_counts();

        assert_eq!(counted, board);
        assert_eq!(raw[(0, 0)].adjacent_mines, 0);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_range() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::MineOutOfBounds((2, 0)))
        );
    }

    #[test]
    fn from_cells_rejects_empty_shape() {
        let cells = Array2::from_shape_vec([0, 3], Vec::<Cell>::new()).unwrap();
        assert_eq!(Board::from_cells(cells), Err(GameError::BadDimensions { width: 0, height: 3 }));
    }

    #[test]
    fn tally_counts_flags_and_detonations() {
        let mut board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 0)]).unwrap();
        board.cell_mut((0, 0)).unwrap().is_flagged = true;
        board.cell_mut((2, 0)).unwrap().is_open = true;
        board.cell_mut((1, 0)).unwrap().is_open = true;

        let tally = board.tally((1, 1));

        assert_eq!(tally.resolved, 2);
        assert_eq!(tally.unopened.as_slice(), &[(0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]);
        assert_eq!(tally.remaining(board[(1, 1)].adjacent_mines), 0);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let board = Board::empty(Difficulty::Easy.config());
        assert!(board.get((9, 0)).is_none());
        assert!(!board.contains((0, 9)));
    }

    #[test]
    fn board_survives_json() {
        let board = Board::from_mine_coords((4, 3), &[(0, 0), (3, 2)])
            .unwrap()
            .open_cell((2, 0))
            .toggle_flag((0, 0))
            .with_exploded(&[(3, 2)]);

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(back, board);
        assert_eq!(back[(0, 0)], board[(0, 0)]);
        assert_eq!(back.size(), (4, 3));
    }
}
