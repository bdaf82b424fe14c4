//! Fire-and-forget audio cues.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Collectible or heal pickup taken
    Collect,
    Jump,
    /// Hazard hit with a life to spare
    Damage,
    /// Fell off the map
    Fail,
}

impl AudioCue {
    pub fn asset_path(&self) -> &'static str {
        match self {
            AudioCue::Collect => "sounds/collect.ogg",
            AudioCue::Jump => "sounds/jump.ogg",
            AudioCue::Damage | AudioCue::Fail => "sounds/gameover.ogg",
        }
    }
}

/// Playback collaborator. Implementations must not block; the core never
/// waits on or inspects the result of a cue.
pub trait AudioPlayer: Send + Sync {
    fn play(&mut self, cue: AudioCue);
}

/// Emits cues to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioPlayer for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        debug!(?cue, path = cue.asset_path(), "audio cue");
    }
}

/// Keeps every cue in order, for hosts that drain them once per frame.
#[derive(Debug, Default, Clone)]
pub struct CueQueue {
    cues: Vec<AudioCue>,
}

impl CueQueue {
    pub fn drain(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn as_slice(&self) -> &[AudioCue] {
        &self.cues
    }
}

impl AudioPlayer for CueQueue {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}
