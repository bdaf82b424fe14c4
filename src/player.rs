//! Player record owned by the gameplay screen.

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::PLAYER_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Climb,
}

/// Opaque reference to the renderable entity the renderer keeps for the
/// player. The core never looks inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Centre of the player box, world pixels, y up
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    pub facing: Facing,
    /// Touching a climbable while not standing on solid ground
    pub on_ladder: bool,
    /// Remembers ladder contact between frames
    pub climbing: bool,
    pub anim_state: AnimState,
    /// 0 or 1
    pub anim_frame: u8,
    pub handle: RenderHandle,
}

impl PlayerState {
    pub fn spawn_at(position: Vec2, handle: RenderHandle) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            on_ladder: false,
            climbing: false,
            anim_state: AnimState::Idle,
            anim_frame: 0,
            handle,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1))
    }

    /// Put the player back on the spawn point, optionally stopping it.
    pub fn respawn(&mut self, spawn: Vec2, stop: bool) {
        self.position = spawn;
        if stop {
            self.velocity = Vec2::ZERO;
        }
    }
}
