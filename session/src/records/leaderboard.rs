use chrono::{DateTime, Utc};
use lifesweeper_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::{GameSummary, StoreError};

/// Entries kept after sorting; the rest fall off the bottom.
pub const LEADERBOARD_CAPACITY: usize = 90;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub difficulty: Difficulty,
    pub time_seconds: f64,
    pub assists: u32,
    pub lives: u8,
    pub auto_solve_used: bool,
    pub probability_assist_used: bool,
    pub created_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_summary(summary: &GameSummary) -> Self {
        let created_at = i64::try_from(summary.finished_at)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default();
        Self {
            difficulty: summary.difficulty,
            time_seconds: summary.time_seconds,
            assists: summary.assists,
            lives: summary.lives,
            auto_solve_used: summary.auto_solve_used,
            probability_assist_used: summary.probability_assist_used,
            created_at,
        }
    }

    /// Probability help weighs more than auto-solving.
    pub const fn assist_penalty(&self) -> u8 {
        if self.probability_assist_used {
            2
        } else if self.auto_solve_used {
            1
        } else {
            0
        }
    }

    /// Leaderboard order: easier difficulties first, then unassisted, more lives, faster, older.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.difficulty
            .rank()
            .cmp(&other.difficulty.rank())
            .then(self.assist_penalty().cmp(&other.assist_penalty()))
            .then(other.lives.cmp(&self.lives))
            .then(self.time_seconds.total_cmp(&other.time_seconds))
            .then(self.created_at.cmp(&other.created_at))
    }
}

/// Adds `entry`, re-sorts and trims to [`LEADERBOARD_CAPACITY`].
pub fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.push(entry);
    entries.sort_by(LeaderboardEntry::rank_cmp);
    entries.truncate(LEADERBOARD_CAPACITY);
}

pub trait LeaderboardStore {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), StoreError>;
    /// Entries in leaderboard order.
    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardStore for MemoryLeaderboard {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        insert_ranked(&mut self.entries, entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for Rc<RefCell<T>> {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        self.borrow_mut().append(entry)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.borrow().entries()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.borrow_mut().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(difficulty: Difficulty, time_seconds: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            difficulty,
            time_seconds,
            assists: 0,
            lives: 3,
            auto_solve_used: false,
            probability_assist_used: false,
            created_at: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn orders_by_difficulty_penalty_lives_time() {
        let mut board = MemoryLeaderboard::default();
        let probability = LeaderboardEntry {
            probability_assist_used: true,
            ..entry(Difficulty::Easy, 10.0)
        };
        let auto = LeaderboardEntry {
            auto_solve_used: true,
            ..entry(Difficulty::Easy, 12.0)
        };
        let hurt = LeaderboardEntry {
            lives: 1,
            ..entry(Difficulty::Easy, 5.0)
        };

        for e in [
            entry(Difficulty::Hard, 1.0),
            probability.clone(),
            auto.clone(),
            hurt.clone(),
            entry(Difficulty::Easy, 30.0),
            entry(Difficulty::Easy, 20.0),
        ] {
            board.append(e).unwrap();
        }

        assert_eq!(
            board.entries().unwrap(),
            [
                entry(Difficulty::Easy, 20.0),
                entry(Difficulty::Easy, 30.0),
                hurt,
                auto,
                probability,
                entry(Difficulty::Hard, 1.0),
            ]
        );
    }

    #[test]
    fn ties_keep_older_first() {
        let older = entry(Difficulty::Normal, 50.0);
        let newer = LeaderboardEntry {
            created_at: older.created_at + chrono::TimeDelta::seconds(1),
            ..older.clone()
        };
        let mut entries = Vec::new();

        insert_ranked(&mut entries, newer.clone());
        insert_ranked(&mut entries, older.clone());

        assert_eq!(entries, [older, newer]);
    }

    #[test]
    fn capacity_drops_the_worst() {
        let mut entries = Vec::new();
        for second in 0..LEADERBOARD_CAPACITY + 5 {
            insert_ranked(&mut entries, entry(Difficulty::Easy, second as f64));
        }
        insert_ranked(&mut entries, entry(Difficulty::Easy, 0.5));

        assert_eq!(entries.len(), LEADERBOARD_CAPACITY);
        assert_eq!(entries[1].time_seconds, 0.5);
        assert_eq!(entries.last().unwrap().time_seconds, (LEADERBOARD_CAPACITY - 2) as f64);
    }

    #[test]
    fn summary_timestamp_becomes_created_at() {
        let summary = GameSummary {
            difficulty: Difficulty::Hard,
            result: crate::GameResult::Win,
            time_seconds: 88.5,
            lives: 2,
            assists: 4,
            auto_solve_used: true,
            probability_assist_used: false,
            finished_at: 1_700_000_000_000,
        };

        let entry = LeaderboardEntry::from_summary(&summary);

        assert_eq!(entry.created_at.timestamp(), 1_700_000_000);
        assert_eq!(entry.assist_penalty(), 1);
        assert_eq!(entry.assists, 4);
    }
}
