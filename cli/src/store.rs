use lifesweeper_core::Difficulty;
use lifesweeper_session::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type FileRecords = RecordKeeper<JsonLeaderboard, JsonStreaks>;

pub fn file_records(dir: &Path) -> FileRecords {
    RecordKeeper::new(JsonLeaderboard::new(dir), JsonStreaks::new(dir))
}

/// Leaderboard kept in `leaderboard.json`, rewritten on every append.
#[derive(Clone, Debug)]
pub struct JsonLeaderboard {
    path: PathBuf,
}

impl JsonLeaderboard {
    pub const FILE_NAME: &'static str = "leaderboard.json";

    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }
}

impl LeaderboardStore for JsonLeaderboard {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        let mut entries: Vec<LeaderboardEntry> = read_json(&self.path)?;
        insert_ranked(&mut entries, entry);
        write_json(&self.path, &entries)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        read_json(&self.path)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        write_json(&self.path, &Vec::<LeaderboardEntry>::new())
    }
}

/// Streaks kept in `streaks.json`.
#[derive(Clone, Debug)]
pub struct JsonStreaks {
    path: PathBuf,
}

impl JsonStreaks {
    pub const FILE_NAME: &'static str = "streaks.json";

    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    fn modify(
        &mut self,
        change: impl FnOnce(&mut MemoryStreaks) -> Result<Streak, StoreError>,
    ) -> Result<Streak, StoreError> {
        let mut streaks: MemoryStreaks = read_json(&self.path)?;
        let streak = change(&mut streaks)?;
        write_json(&self.path, &streaks)?;
        Ok(streak)
    }
}

impl StreakStore for JsonStreaks {
    fn get(&self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        read_json::<MemoryStreaks>(&self.path)?.get(difficulty)
    }

    fn update(&mut self, difficulty: Difficulty, result: GameResult) -> Result<Streak, StoreError> {
        self.modify(|streaks| streaks.update(difficulty, result))
    }

    fn break_win_streak(&mut self, difficulty: Difficulty) -> Result<Streak, StoreError> {
        self.modify(|streaks| streaks.break_win_streak(difficulty))
    }
}

fn backend(err: impl Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// A missing or unparsable file reads as the default value; the next write replaces it.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(backend(err)),
    };
    match serde_json::from_str(&json) {
        Ok(value) => Ok(value),
        Err(err) => {
            log::warn!("Discarding unreadable {}: {err}", path.display());
            Ok(T::default())
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(backend)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(backend)?;
    fs::write(path, json).map_err(backend)
}
