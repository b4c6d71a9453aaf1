use lifesweeper_core::Difficulty;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Per-session settings fixed when the session is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives at the start of every game.
    pub lives: u8,
    /// Difficulty of the first game.
    pub difficulty: Difficulty,
    /// Fixed seed for reproducible mine layouts.
    pub seed: Option<u64>,
    /// Let auto-assist act on 0%/100% estimates when no certain move exists.
    pub heuristic_assist: bool,
    /// Oldest undo snapshots are dropped beyond this many.
    pub undo_limit: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            difficulty: Difficulty::Easy,
            seed: None,
            heuristic_assist: false,
            undo_limit: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.undo_limit == Some(0) {
            return Err(ConfigError::ZeroUndoLimit);
        }
        Ok(())
    }
}
