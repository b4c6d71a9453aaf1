use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Strategy deciding where mines go once the first click is known.
pub trait MinePlacer {
    fn place(self, board: &Board, mine_count: CellCount, safe: Coord2) -> Board;
}

/// Uniformly random placement that keeps the 3x3 block around the first click clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, board: &Board, mine_count: CellCount, safe: Coord2) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        board.place_mines_avoiding(mine_count, safe, &mut rng)
    }
}

impl Board {
    /// New board with `mine_count` mines placed outside the 3x3 block centered on `safe`, adjacency recomputed.
    ///
    /// When fewer candidates than requested are available every candidate becomes a mine.
    pub fn place_mines_avoiding<R: Rng + ?Sized>(
        &self,
        mine_count: CellCount,
        safe: Coord2,
        rng: &mut R,
    ) -> Board {
        let mut candidates: Vec<Coord2> = self
            .coords()
            .filter(|&coords| !within_block(coords, safe))
            .collect();

        let requested = usize::from(mine_count);
        if requested > candidates.len() {
            log::warn!(
                "Cannot keep the start area clear with {} mines, placing {} instead",
                requested,
                candidates.len()
            );
        }

        let amount = requested.min(candidates.len());
        let (chosen, _) = candidates.partial_shuffle(rng, amount);

        let mut next = self.clone();
        for &coords in chosen.iter() {
            if let Some(cell) = next.cell_mut(coords) {
                cell.is_mine = true;
            }
        }
        next.with_adjacency_counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_block_is_always_clear() {
        let board = Board::empty(Difficulty::Easy.config());

        for seed in 0..64 {
            for safe in [(4, 4), (0, 0), (8, 8), (0, 5)] {
                let mined = RandomMinePlacer::new(seed).place(&board, 10, safe);

                assert_eq!(mined.mine_count(), 10);
                for (coords, cell) in mined.iter() {
                    if within_block(coords, safe) {
                        assert!(!cell.is_mine, "seed {seed} placed a mine at {coords:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn placement_recomputes_adjacency() {
        let board = Board::empty(Difficulty::Normal.config());

        let mined = RandomMinePlacer::new(7).place(&board, 40, (8, 8));

        assert_eq!(mined, mined.with_adjacency_counts());
        assert!(mined.iter().any(|(_, cell)| cell.adjacent_mines > 0));
    }

    #[test]
    fn overfull_request_fills_every_candidate() {
        let board = Board::empty(DifficultyConfig::new_unchecked(4, 4, 16));

        let mined = RandomMinePlacer::new(1).place(&board, 16, (1, 1));

        assert_eq!(mined.mine_count(), 16 - 9);
        assert!(!mined[(1, 1)].is_mine);
        assert!(mined[(3, 3)].is_mine);
    }

    #[test]
    fn same_seed_same_layout() {
        let board = Board::empty(Difficulty::Hard.config());

        let a = RandomMinePlacer::new(99).place(&board, 72, (3, 3));
        let b = RandomMinePlacer::new(99).place(&board, 72, (3, 3));

        assert_eq!(a, b);
    }

    #[test]
    fn source_board_is_untouched() {
        let board = Board::empty(Difficulty::Easy.config());

        let _ = RandomMinePlacer::new(3).place(&board, 10, (4, 4));

        assert_eq!(board.mine_count(), 0);
    }
}
