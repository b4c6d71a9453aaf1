use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Modern,
    WindowsXp,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundPreset {
    #[default]
    Soft,
    Retro,
    Arcade,
}

/// Multiplier applied to the auto-assist cadence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssistSpeed {
    #[default]
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl AssistSpeed {
    pub const ALL: [AssistSpeed; 5] = [Self::X1, Self::X2, Self::X4, Self::X8, Self::X16];

    pub const fn multiplier(self) -> u64 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }

    pub fn from_multiplier(multiplier: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.multiplier() == multiplier)
    }
}

/// Cross-game settings; a reset or difficulty change keeps them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub sound_enabled: bool,
    pub sound_volume: f32,
    pub sound_preset: SoundPreset,
    pub cell_size: u8,
    pub show_probabilities: bool,
    pub auto_assist: bool,
    pub assist_speed: AssistSpeed,
}

impl Preferences {
    pub const MIN_CELL_SIZE: u8 = 18;
    pub const MAX_CELL_SIZE: u8 = 40;

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    }

    pub fn set_cell_size(&mut self, size: u8) {
        self.cell_size = size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE);
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sound_enabled: true,
            sound_volume: 0.35,
            sound_preset: SoundPreset::default(),
            cell_size: 28,
            show_probabilities: false,
            auto_assist: false,
            assist_speed: AssistSpeed::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp() {
        let mut prefs = Preferences::default();

        prefs.set_sound_volume(1.7);
        assert_eq!(prefs.sound_volume, 1.0);
        prefs.set_sound_volume(f32::NAN);
        assert_eq!(prefs.sound_volume, 0.0);

        prefs.set_cell_size(4);
        assert_eq!(prefs.cell_size, Preferences::MIN_CELL_SIZE);
        prefs.set_cell_size(200);
        assert_eq!(prefs.cell_size, Preferences::MAX_CELL_SIZE);
    }

    #[test]
    fn assist_speed_multipliers() {
        assert_eq!(AssistSpeed::from_multiplier(8), Some(AssistSpeed::X8));
        assert_eq!(AssistSpeed::from_multiplier(3), None);
        assert_eq!(AssistSpeed::X16.multiplier(), 16);
    }

    #[test]
    fn theme_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&Theme::WindowsXp).unwrap(), r#""windowsXp""#);
    }
}
