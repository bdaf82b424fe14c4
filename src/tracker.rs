//! Score and lives rules for one gameplay screen.
//!
//! Runs after physics each frame. Order: collectibles, heal pickups, exit
//! qualification, fall-out, hazards. Exit qualification uses the position
//! from before any respawn this frame; the hazard check uses the position
//! after it. GameOver outranks LevelComplete.

use bevy::math::Vec2;
use tracing::{debug, info};

use crate::audio::{AudioCue, AudioPlayer};
use crate::constants::{LIFE_ICON_ORIGIN, LIFE_ICON_SPACING};
use crate::level::{LevelData, LevelDescriptor};
use crate::player::PlayerState;
use crate::session::{RunState, Session};

/// What the frame means for the screen flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    LevelComplete,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct HealthAndScoreTracker {
    run: RunState,
    required: u32,
    spawn: Vec2,
    fall_out_y: f32,
}

impl HealthAndScoreTracker {
    pub fn new(session: Session, descriptor: &LevelDescriptor, fall_out_y: f32) -> Self {
        Self {
            run: RunState::start(session),
            required: descriptor.required_collectibles,
            spawn: descriptor.spawn,
            fall_out_y,
        }
    }

    pub fn run(&self) -> RunState {
        self.run
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn process(
        &mut self,
        player: &mut PlayerState,
        level: &mut LevelData,
        audio: &mut dyn AudioPlayer,
    ) -> FrameOutcome {
        let hitbox = player.hitbox();

        for id in level.collectibles.take_overlapping(hitbox) {
            self.run.score += 1;
            audio.play(AudioCue::Collect);
            debug!(?id, score = self.run.score, required = self.required, "collected");
        }

        for id in level.heals.take_overlapping(hitbox) {
            self.run.lives += 1;
            audio.play(AudioCue::Collect);
            debug!(?id, lives = self.run.lives, "heal picked up");
        }

        let exit_reached = self.run.score == self.required && level.touches_exit(hitbox);

        if player.position.y < self.fall_out_y {
            // Position only; the fall keeps its velocity and costs no life
            player.respawn(self.spawn, false);
            audio.play(AudioCue::Fail);
            debug!("fell out of the map");
        }

        // A fall-out respawn above moves the player; hazards see the new box
        let hitbox = player.hitbox();
        if level.hits_hazard(hitbox) {
            if self.run.lives == 0 {
                info!(level = self.run.level_id, "hazard with no lives left");
                return FrameOutcome::GameOver;
            }
            self.run.lives -= 1;
            player.respawn(self.spawn, true);
            audio.play(AudioCue::Damage);
            debug!(lives = self.run.lives, "hazard hit");
        }

        if exit_reached {
            info!(level = self.run.level_id, score = self.run.score, "level complete");
            return FrameOutcome::LevelComplete;
        }
        FrameOutcome::Continue
    }

    pub fn lives_icons(&self) -> Vec<Vec2> {
        lives_icon_positions(self.run.lives)
    }

    pub fn score_text(&self, label: &str) -> String {
        format!("{}: {} of {}", label, self.run.score, self.required)
    }
}

/// Screen-space centres of the lives indicator, right-aligned and stacking
/// leftwards.
pub fn lives_icon_positions(lives: u32) -> Vec<Vec2> {
    (0..lives)
        .map(|i| {
            Vec2::new(
                LIFE_ICON_ORIGIN.0 - LIFE_ICON_SPACING * i as f32,
                LIFE_ICON_ORIGIN.1,
            )
        })
        .collect()
}
