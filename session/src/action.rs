use lifesweeper_core::{Coord2, Difficulty};
use serde::{Deserialize, Serialize};

use crate::{AssistSpeed, SoundPreset, Theme};

/// Everything a frontend or timer can ask of a session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Opens a closed cell or chords an open number.
    Open(Coord2),
    ToggleFlag(Coord2),
    /// New game, on a new difficulty when given.
    Reset(Option<Difficulty>),
    SetDifficulty(Difficulty),
    Tick,
    TogglePause,
    Undo,
    Hint,
    ToggleAutoAssist,
    AssistStep,
    SetAssistSpeed(AssistSpeed),
    SetShowProbabilities(bool),
    SetTheme(Theme),
    SetSoundEnabled(bool),
    SetSoundVolume(f32),
    SetSoundPreset(SoundPreset),
    SetCellSize(u8),
}
