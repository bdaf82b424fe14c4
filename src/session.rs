//! Data carried between screens and the per-run score/lives record.

use serde::{Deserialize, Serialize};

/// Level index and lives handed from one screen to the next.
///
/// Copied on every transition; a screen never writes back into the value it
/// was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub current_level: u32,
    pub lives_carried: u32,
}

impl Session {
    /// Session created by the start menu's "Play" button.
    pub fn new_game(start_lives: u32) -> Self {
        Self {
            current_level: 1,
            lives_carried: start_lives,
        }
    }

    /// Session for the map screen following a finished level.
    pub fn advance(self, lives: u32) -> Self {
        Self {
            current_level: self.current_level + 1,
            lives_carried: lives,
        }
    }
}

/// Score and lives for one gameplay screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    pub level_id: u32,
}

impl RunState {
    pub fn start(session: Session) -> Self {
        Self {
            score: 0,
            lives: session.lives_carried,
            level_id: session.current_level,
        }
    }
}
