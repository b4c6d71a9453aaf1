use crate::*;

/// First move that local constraints prove correct, scanning numbered cells in row-major order.
///
/// A number whose resolved neighbors already match it makes its first closed neighbor safe to open; a number whose
/// closed neighbors are exactly the mines it still needs makes its first closed neighbor a mine to flag.
pub fn certain_move(board: &Board) -> Option<AiMove> {
    board
        .iter()
        .filter(|(_, cell)| cell.is_numbered())
        .find_map(|(coords, cell)| {
            let tally = board.tally(coords);
            let &first = tally.unopened.first()?;
            let remaining = tally.remaining(cell.adjacent_mines);

            if remaining == 0 {
                Some(AiMove::open(first))
            } else if remaining > 0 && remaining as usize == tally.unopened.len() {
                Some(AiMove::flag(first))
            } else {
                None
            }
        })
}
