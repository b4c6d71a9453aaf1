use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// `ndarray` index of the cell at `(x, y)`; the first axis is x.
pub fn nd_index((x, y): Coord2) -> [usize; 2] {
    [x.into(), y.into()]
}

/// Cell count of a `(width, height)` board.
pub const fn area((width, height): Coord2) -> CellCount {
    width as CellCount * height as CellCount
}

/// Whether `a` lies inside the 3x3 block centered on `b`.
pub const fn within_block(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

pub(crate) fn size_of<T>(grid: &Array2<T>) -> Coord2 {
    let (x, y) = grid.dim();
    (
        x.try_into().unwrap_or(Coord::MAX),
        y.try_into().unwrap_or(Coord::MAX),
    )
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn apply_delta(coords: Coord2, (dx, dy): (i8, i8), (max_x, max_y): Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(dx).filter(|&x| x < max_x)?;
    let next_y = coords.1.checked_add_signed(dy).filter(|&y| y < max_y)?;
    Some((next_x, next_y))
}

/// In-bounds neighbors of a cell, in a fixed order: the row above left to right, then left and right, then the row
/// below.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = apply_delta(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

/// All coordinates of a board, top row first and left to right within a row.
#[derive(Clone, Debug)]
pub struct RowMajor {
    size: Coord2,
    next: Option<Coord2>,
}

impl RowMajor {
    pub(crate) fn new(size: Coord2) -> Self {
        let next = (size.0 > 0 && size.1 > 0).then_some((0, 0));
        Self { size, next }
    }
}

impl Iterator for RowMajor {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (x, y) = current;
        self.next = if x + 1 < self.size.0 {
            Some((x + 1, y))
        } else if y + 1 < self.size.1 {
            Some((0, y + 1))
        } else {
            None
        };
        Some(current)
    }
}
