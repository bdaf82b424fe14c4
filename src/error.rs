//! Error types for the platformer core.
//!
//! Only startup/level-entry failures are errors. Hazard hits, fall-outs and
//! opposing key presses are ordinary gameplay and never surface here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Level {level} not found")]
    LevelNotFound { level: u32 },

    #[error("Failed to read level file {path:?}: {source}")]
    LevelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse level file {path:?}: {source}")]
    LevelParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("Level {level} is invalid: {reason}")]
    InvalidLevel { level: u32, reason: String },

    #[error("Config error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type GameResult<T> = Result<T, GameError>;
