use serde::{Deserialize, Serialize};

use crate::*;

/// Board shape and mine density.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
}

impl DifficultyConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mine_count: CellCount) -> Self {
        Self {
            width,
            height,
            mine_count,
        }
    }

    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::BadDimensions {
                width: width.into(),
                height: height.into(),
            });
        }
        let cells = area((width, height));
        if mine_count > cells {
            return Err(GameError::TooManyMines {
                mines: mine_count,
                cells,
            });
        }
        Ok(Self::new_unchecked(width, height, mine_count))
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::VeryHard];

    pub const fn config(self) -> DifficultyConfig {
        use Difficulty::*;
        match self {
            Easy => DifficultyConfig::new_unchecked(9, 9, 10),
            Normal => DifficultyConfig::new_unchecked(16, 16, 40),
            Hard => DifficultyConfig::new_unchecked(24, 16, 72),
            VeryHard => DifficultyConfig::new_unchecked(30, 16, 99),
        }
    }

    /// Position in leaderboard ordering, easiest first.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Normal => "normal",
            Hard => "hard",
            VeryHard => "very-hard",
        }
    }
}

impl core::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_fit_their_boards() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(
                DifficultyConfig::new(config.width, config.height, config.mine_count),
                Ok(config)
            );
        }
    }

    #[test]
    fn checked_config_rejects_overfull_board() {
        assert_eq!(
            DifficultyConfig::new(2, 2, 5),
            Err(GameError::TooManyMines { mines: 5, cells: 4 })
        );
        assert_eq!(
            DifficultyConfig::new(0, 2, 0),
            Err(GameError::BadDimensions { width: 0, height: 2 })
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("very-hard".parse(), Ok(Difficulty::VeryHard));
        assert_eq!("Normal".parse(), Ok(Difficulty::Normal));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
