//! Player animation as a pure function of the physics signals.
//!
//! Priority, first match wins: facing flip, ladder latch, climb, jump, fall,
//! idle, walk. Vertical motion on a ladder is intentional, so the ladder
//! check masks jump/fall.
//!
//! A jump apex with `vy == 0` and no horizontal input reads as Idle for that
//! one frame. This is kept as-is; see DESIGN.md.

use bevy::math::Vec2;

use crate::constants::CLIMB_ANIM_THRESHOLD;
use crate::player::{AnimState, Facing, PlayerState};

/// Everything the controller carries from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationFrame {
    pub state: AnimState,
    pub frame: u8,
    pub facing: Facing,
    pub climbing: bool,
}

impl AnimationFrame {
    pub fn of(player: &PlayerState) -> Self {
        Self {
            state: player.anim_state,
            frame: player.anim_frame,
            facing: player.facing,
            climbing: player.climbing,
        }
    }

    pub fn apply_to(self, player: &mut PlayerState) {
        player.anim_state = self.state;
        player.anim_frame = self.frame;
        player.facing = self.facing;
        player.climbing = self.climbing;
    }
}

fn next_frame(frame: u8) -> u8 {
    (frame + 1) % 2
}

/// Compute this frame's animation from last frame's.
pub fn animate(prev: AnimationFrame, velocity: Vec2, on_ladder: bool) -> AnimationFrame {
    let facing = if velocity.x < 0.0 {
        Facing::Left
    } else if velocity.x > 0.0 {
        Facing::Right
    } else {
        prev.facing
    };

    // Latch follows contact edges: set on entry, cleared on exit.
    let climbing = on_ladder;

    let mut next = AnimationFrame {
        state: prev.state,
        frame: prev.frame,
        facing,
        climbing,
    };

    if climbing {
        if velocity.y.abs() > CLIMB_ANIM_THRESHOLD {
            next.frame = next_frame(prev.frame);
        }
        next.state = AnimState::Climb;
        return next;
    }

    if velocity.y > 0.0 {
        next.state = AnimState::Jump;
    } else if velocity.y < 0.0 {
        next.state = AnimState::Fall;
    } else if velocity.x == 0.0 {
        next.state = AnimState::Idle;
    } else {
        next.state = AnimState::Walk;
        next.frame = next_frame(prev.frame);
    }
    next
}

/// Run the controller against the player record in place.
pub fn update_player_animation(player: &mut PlayerState) {
    let next = animate(AnimationFrame::of(player), player.velocity, player.on_ladder);
    next.apply_to(player);
}
