//! Aggressive auto-assist layered on top of the frontier estimate.
//!
//! This is a heuristic, not a proof. The estimate is local and merges overlapping constraints pessimistically, so a
//! cell it reports at 0% or 100% is only as trustworthy as that approximation. Correctness guarantees belong to
//! [`certain_move`](super::certain_move); nothing here should be tested as if it were certain at ambiguous positions.

use crate::*;

/// Flag the first cell estimated at 100%, otherwise open the first cell estimated at 0%.
pub fn heuristic_move(board: &Board) -> Option<AiMove> {
    let map = probability_map(board);

    map.iter()
        .find(|&(_, percent)| percent == 100)
        .map(|(coords, _)| AiMove::flag(coords))
        .or_else(|| {
            map.iter()
                .find(|&(_, percent)| percent == 0)
                .map(|(coords, _)| AiMove::open(coords))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_before_opening() {
        // (1, 0) is pinned at 100% and (3, 0) at 0%
        let board = testing::board(&["o*..o"]);

        assert_eq!(heuristic_move(&board), Some(AiMove::flag((1, 0))));
    }

    #[test]
    fn opens_zero_percent_cells() {
        let board = testing::board(&["o..", "...", "..*"]);

        assert_eq!(heuristic_move(&board), Some(AiMove::open((1, 0))));
    }

    #[test]
    fn nothing_without_extreme_estimates() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0)])
            .unwrap()
            .open_cell((1, 1));

        assert_eq!(heuristic_move(&board), None);
        assert_eq!(assist_move(&board, true), None);
    }

    #[test]
    fn assist_prefers_certain_moves() {
        let numbered = testing::board(&["o*."]);
        assert_eq!(assist_move(&numbered, false), Some(AiMove::flag((1, 0))));

        // an open zero with closed neighbors is not a number, only the estimate sees it
        let zero = testing::board(&["o..", "...", "..*"]);
        assert_eq!(certain_move(&zero), None);
        assert_eq!(assist_move(&zero, false), None);
        assert_eq!(assist_move(&zero, true), Some(AiMove::open((1, 0))));
    }
}
