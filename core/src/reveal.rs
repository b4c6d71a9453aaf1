use alloc::collections::VecDeque;

use crate::*;

impl Board {
    /// Opens `coords` and flood-fills through the zero region around it.
    ///
    /// No-op when the cell is out of range, already open, or flagged. The flood never opens a flagged cell, even one
    /// sitting on a mine, and stops at numbered cells after opening them.
    pub fn open_cell(&self, coords: Coord2) -> Board {
        let mut next = self.clone();
        match self.get(coords) {
            Some(cell) if cell.is_unopened() => next.flood_open(coords),
            _ => {}
        }
        next
    }

    /// Chording on an open numbered cell.
    ///
    /// When the flags around the number satisfy it, every other closed neighbor is opened. When the closed neighbors
    /// are exactly the mines still missing, they are all flagged instead. Anything else leaves the board unchanged.
    /// Chording never floods past the direct neighbors.
    pub fn open_from_number(&self, coords: Coord2) -> Board {
        let mut next = self.clone();
        let Some(&center) = self.get(coords) else {
            return next;
        };
        if !center.is_numbered() {
            return next;
        }

        let tally = self.tally(coords);
        let remaining = tally.remaining(center.adjacent_mines);

        if remaining == 0 {
            for &pos in &tally.unopened {
                next.cells_mut(pos).is_open = true;
            }
        } else if remaining > 0 && remaining as usize == tally.unopened.len() {
            for &pos in &tally.unopened {
                next.cells_mut(pos).is_flagged = true;
            }
        }
        next
    }

    /// Flips the flag on a closed cell; open cells are left alone.
    pub fn toggle_flag(&self, coords: Coord2) -> Board {
        let mut next = self.clone();
        if let Some(cell) = next.cell_mut(coords) {
            if !cell.is_open {
                cell.is_flagged = !cell.is_flagged;
            }
        }
        next
    }

    /// Opens every mine for the end-of-game display, leaving flags as they are.
    pub fn reveal_all_mines(&self) -> Board {
        let mut next = self.clone();
        for coords in self.coords() {
            if self[coords].is_mine {
                next.cells_mut(coords).is_open = true;
            }
        }
        next
    }

    /// Marks detonated mines; coordinates that are not open mines are ignored.
    pub fn with_exploded(&self, exploded: &[Coord2]) -> Board {
        let mut next = self.clone();
        for &coords in exploded {
            if let Some(cell) = next.cell_mut(coords) {
                if cell.is_open && cell.is_mine {
                    cell.is_exploded = true;
                }
            }
        }
        next
    }

    /// Every safe cell is open.
    pub fn check_win(&self) -> bool {
        self.iter().all(|(_, cell)| cell.is_mine || cell.is_open)
    }

    fn flood_open(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = self.cells_mut(coords);
            if cell.is_open || cell.is_flagged {
                continue;
            }
            cell.is_open = true;

            if cell.is_mine || cell.adjacent_mines != 0 {
                continue;
            }

            to_visit.extend(
                self.neighbor_cells(coords)
                    .filter(|(_, n)| n.is_unopened() && !n.is_mine)
                    .map(|(pos, _)| pos),
            );
        }
    }

    fn cells_mut(&mut self, coords: Coord2) -> &mut Cell {
        self.cell_mut(coords)
            .unwrap_or_else(|| unreachable!("coordinates come from this board: {coords:?}"))
    }
}
