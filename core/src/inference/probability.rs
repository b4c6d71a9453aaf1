use core::cmp::Ordering;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lowest-risk inferred cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub coords: Coord2,
    /// Estimated mine probability in percent, `0..=100`.
    pub mine_probability: u8,
}

impl Hint {
    /// Percent chance the hinted cell is safe.
    pub const fn confidence(&self) -> u8 {
        100 - self.mine_probability
    }
}

/// Mine probability in percent for every cell touched by at least one open number.
///
/// Cells no number touches are absent: the overlay never shows a flat prior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMap {
    percents: Array2<Option<u8>>,
}

impl ProbabilityMap {
    pub fn get(&self, coords: Coord2) -> Option<u8> {
        self.percents.get(nd_index(coords)).copied().flatten()
    }

    /// Inferred cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, u8)> + '_ {
        RowMajor::new(size_of(&self.percents))
            .filter_map(|coords| self.get(coords).map(|percent| (coords, percent)))
    }

    pub fn len(&self) -> usize {
        self.percents.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fraction `mines / cells` kept exact so that merging and rounding need no floating point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Risk {
    mines: u8,
    cells: u8,
}

impl Risk {
    const SAFE: Risk = Risk { mines: 0, cells: 1 };
    const MINE: Risk = Risk { mines: 1, cells: 1 };

    fn new(mines: i16, cells: usize) -> Self {
        let cells = cells.clamp(1, 8) as u8;
        let mines = mines.clamp(0, i16::from(cells)) as u8;
        Self { mines, cells }
    }

    /// Rounded to the nearest percent, halves rounding up.
    fn percent(self) -> u8 {
        let mines = u16::from(self.mines);
        let cells = u16::from(self.cells);
        ((200 * mines + cells) / (2 * cells)) as u8
    }
}

impl PartialOrd for Risk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Risk {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u16::from(self.mines) * u16::from(other.cells);
        let rhs = u16::from(other.mines) * u16::from(self.cells);
        lhs.cmp(&rhs)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Certainty {
    #[default]
    Unknown,
    Safe,
    Mine,
}

/// Per-cell risk from every open safe cell around it, merged by taking the most pessimistic constraint, with cells a
/// single constraint proves safe or mined pinned to 0 or 1.
fn estimate(board: &Board) -> Array2<Option<Risk>> {
    let size = nd_index(board.size());
    let mut risks: Array2<Option<Risk>> = Array2::from_elem(size, None);
    let mut certain: Array2<Certainty> = Array2::default(size);

    for (coords, cell) in board.iter() {
        if !cell.is_open_safe() {
            continue;
        }

        let tally = board.tally(coords);
        let remaining = tally.remaining(cell.adjacent_mines);
        if tally.unopened.is_empty() || remaining < 0 {
            continue;
        }

        let risk = Risk::new(remaining, tally.unopened.len());
        let verdict = if remaining == 0 {
            Certainty::Safe
        } else if remaining as usize == tally.unopened.len() {
            Certainty::Mine
        } else {
            Certainty::Unknown
        };

        for &pos in &tally.unopened {
            let index = nd_index(pos);
            risks[index] = Some(risks[index].map_or(risk, |current| current.max(risk)));
            match (certain[index], verdict) {
                (Certainty::Safe, _) | (_, Certainty::Unknown) => {}
                (_, verdict) => certain[index] = verdict,
            }
        }
    }

    for (risk, certainty) in risks.iter_mut().zip(certain.iter()) {
        match certainty {
            Certainty::Safe => *risk = Some(Risk::SAFE),
            Certainty::Mine => *risk = Some(Risk::MINE),
            Certainty::Unknown => {}
        }
    }

    risks
}

/// Frontier estimate for the probability overlay.
pub fn probability_map(board: &Board) -> ProbabilityMap {
    ProbabilityMap {
        percents: estimate(board).map(|&risk| risk.map(Risk::percent)),
    }
}

/// Inferred cell with the lowest estimated mine probability, the first one in row-major order on ties.
pub fn uncertain_hint(board: &Board) -> Option<Hint> {
    let risks = estimate(board);
    let mut best: Option<(Coord2, Risk)> = None;

    for coords in board.coords() {
        let Some(risk) = risks[nd_index(coords)] else {
            continue;
        };
        if best.is_none_or(|(_, best_risk)| risk < best_risk) {
            best = Some((coords, risk));
        }
    }

    best.map(|(coords, risk)| Hint {
        coords,
        mine_probability: risk.percent(),
    })
}
