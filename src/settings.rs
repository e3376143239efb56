//! Game settings and preferences
//!
//! Everything the options screen can change, plus a few knobs for the
//! headless runner. Settings are plain data; loading from disk is optional.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::PALETTE_LEN;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Boss max HP on level 1
    pub fn base_boss_hp(&self) -> u32 {
        match self {
            Difficulty::Easy => 70,
            Difficulty::Normal => 100,
            Difficulty::Hard => 150,
        }
    }

    /// Seconds between heal pickup spawns
    pub fn heal_interval(&self) -> f32 {
        match self {
            Difficulty::Easy => 8.0,
            Difficulty::Normal => 12.0,
            Difficulty::Hard => 18.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnknownDifficulty(String),
    ColorOutOfRange { field: &'static str, index: usize },
    FinalLevelZero,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "malformed settings: {e}"),
            Self::UnknownDifficulty(name) => write!(f, "unknown difficulty '{name}'"),
            Self::ColorOutOfRange { field, index } => write!(
                f,
                "{field} {index} is outside the palette (0..{PALETTE_LEN})"
            ),
            Self::FinalLevelZero => write!(f, "final_level must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Used by the next run or level reset
    pub difficulty: Difficulty,
    /// Palette index for the player ship
    pub player_color: usize,
    /// Palette index for the boss. Only set from a settings file; the
    /// options screen cycles the player color alone.
    pub boss_color: usize,
    /// Clearing this level wins the run. `None` plays forever.
    pub final_level: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            player_color: 0,
            boss_color: 1,
            final_level: None,
        }
    }
}

impl Settings {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player_color >= PALETTE_LEN {
            return Err(SettingsError::ColorOutOfRange {
                field: "player_color",
                index: self.player_color,
            });
        }
        if self.boss_color >= PALETTE_LEN {
            return Err(SettingsError::ColorOutOfRange {
                field: "boss_color",
                index: self.boss_color,
            });
        }
        if self.final_level == Some(0) {
            return Err(SettingsError::FinalLevelZero);
        }
        Ok(())
    }

    /// Step the player color forward through the palette
    pub fn next_player_color(&mut self) {
        self.player_color = (self.player_color + 1) % PALETTE_LEN;
    }

    /// Step the player color backward through the palette
    pub fn prev_player_color(&mut self) {
        self.player_color = (self.player_color + PALETTE_LEN - 1) % PALETTE_LEN;
    }

    /// Whether clearing `level` ends the run
    pub fn is_final_level(&self, level: u32) -> bool {
        self.final_level.is_some_and(|last| level >= last)
    }
}

/// Parse a difficulty name, for CLI and config front ends
pub fn parse_difficulty(name: &str) -> Result<Difficulty, SettingsError> {
    Difficulty::from_str(name).ok_or_else(|| SettingsError::UnknownDifficulty(name.to_string()))
}
