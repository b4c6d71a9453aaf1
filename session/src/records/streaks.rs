use lifesweeper_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{GameResult, StoreError};

/// Run of identical results on one difficulty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: Option<GameResult>,
    pub count: u32,
}

impl Streak {
    pub fn record(self, result: GameResult) -> Self {
        let count = if self.kind == Some(result) {
            self.count.saturating_add(1)
        } else {
            1
        };
        Self {
            kind: Some(result),
            count,
        }
    }

    /// Losing streaks survive an abandoned game, winning ones do not.
    pub fn break_win(self) -> Self {
        match self.kind {
            Some(GameResult::Win) => Self::default(),
            _ => self,
        }
    }
}

pub trait StreakStore {
    fn get(&self, difficulty: Difficulty) -> Result<Streak, StoreError>;
    fn update(&mut self, difficulty: Difficulty, result: GameResult) -> Result<Streak, StoreError>;
    fn break_win_streak(&mut self, difficulty: Difficulty) -> Result<Streak, StoreError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStreaks {
    streaks: BTreeMap<Difficulty, Streak>,
}

impl MemoryStreaks {
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, Streak)> + '_ {
        self.streaks.iter().map(|(&difficulty, &streak)| (difficulty, streak))
    }

    fn apply(&mut self, difficulty: Difficulty, change: impl FnOnce(Streak) -> Streak) -> Streak {
        let streak = self.streaks.entry(difficulty).or_default();
        *streak = change(*streak);
        *streak
    }
}

impl StreakStore for MemoryStreaks {
    fn get(&self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        Ok(self.streaks.get(&difficulty).copied().unwrap_or_default())
    }

    fn update(&mut self, difficulty: Difficulty, result: GameResult) -> Result<Streak, StoreError> {
        Ok(self.apply(difficulty, |streak| streak.record(result)))
    }

    fn break_win_streak(&mut self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        Ok(self.apply(difficulty, Streak::break_win))
    }
}

impl<T: StreakStore + ?Sized> StreakStore for Rc<RefCell<T>> {
    fn get(&self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        self.borrow().get(difficulty)
    }

    fn update(&mut self, difficulty: Difficulty, result: GameResult) -> Result<Streak, StoreError> {
        self.borrow_mut().update(difficulty, result)
    }

    fn break_win_streak(&mut self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        self.borrow_mut().break_win_streak(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_result_extends_streak() {
        let mut streaks = MemoryStreaks::default();

        streaks.update(Difficulty::Easy, GameResult::Win).unwrap();
        let streak = streaks.update(Difficulty::Easy, GameResult::Win).unwrap();

        assert_eq!(
            streak,
            Streak {
                kind: Some(GameResult::Win),
                count: 2
            }
        );
        assert_eq!(streaks.get(Difficulty::Hard).unwrap(), Streak::default());
    }

    #[test]
    fn other_result_restarts_at_one() {
        let mut streaks = MemoryStreaks::default();
        streaks.update(Difficulty::Normal, GameResult::Win).unwrap();
        streaks.update(Difficulty::Normal, GameResult::Win).unwrap();

        let streak = streaks.update(Difficulty::Normal, GameResult::Lose).unwrap();

        assert_eq!(streak.kind, Some(GameResult::Lose));
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn breaking_only_clears_wins() {
        let mut streaks = MemoryStreaks::default();
        streaks.update(Difficulty::Easy, GameResult::Win).unwrap();
        streaks.update(Difficulty::Hard, GameResult::Lose).unwrap();

        assert_eq!(streaks.break_win_streak(Difficulty::Easy).unwrap(), Streak::default());
        assert_eq!(streaks.break_win_streak(Difficulty::Hard).unwrap().count, 1);
    }
}
