use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::logging::TracingConfig;

/// Runtime tunables. Every field has a default, so a config file only needs
/// the values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub tick_rate: f64,
    pub movement_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub jump_tolerance: f32,
    pub stand_tolerance: f32,
    pub fall_out_y: f32,
    pub start_lives: u32,
    pub levels_dir: PathBuf,
    pub log: TracingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE_HZ,
            movement_speed: PLAYER_MOVEMENT_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: GRAVITY,
            jump_tolerance: JUMP_TOLERANCE,
            stand_tolerance: STAND_TOLERANCE,
            fall_out_y: FALL_OUT_Y,
            start_lives: START_LIVES,
            levels_dir: PathBuf::from("levels"),
            log: TracingConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Missing file → defaults. Unreadable or malformed file → error.
    pub fn load_or_default(path: &Path) -> GameResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_ron_str(&content).map_err(|e| GameError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(GameError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
