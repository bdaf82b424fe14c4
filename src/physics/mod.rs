//! Physics collaborator boundary and the built-in AABB platformer physics.
//!
//! Velocities are pixels per frame. Gravity applies only off ladders, and
//! movement is resolved one axis at a time against solid platforms. Moving
//! platforms advance first each frame and carry a player standing on them.

use bevy::math::{Rect, Vec2};

use crate::config::GameConfig;
use crate::input::{Intent, Vertical};
use crate::level::{overlaps, LevelData, MovingPlatform};
use crate::player::PlayerState;

/// What the gameplay screen needs from a physics engine.
pub trait PhysicsAdapter: Send + Sync {
    /// Apply `intent`, integrate one frame and resolve collisions.
    fn update(&mut self, player: &mut PlayerState, intent: Intent);

    /// Player box touches a climbable region.
    fn is_on_climbable(&self, player: &PlayerState) -> bool;

    /// Solid ground lies within `tolerance` pixels below the player.
    fn can_stand_or_jump(&self, player: &PlayerState, tolerance: f32) -> bool;

    /// Current boxes of platforms the adapter moves, for drawing.
    fn moving_platform_rects(&self) -> Vec<Rect> {
        Vec::new()
    }
}

/// Max gap between the player's feet and a platform top that still counts
/// as riding it
const RIDE_TOLERANCE: f32 = 1.0;

/// Builds the physics collaborator for a freshly entered level.
pub type PhysicsFactory = fn(&LevelData, &GameConfig) -> Box<dyn PhysicsAdapter>;

#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    platforms: Vec<Rect>,
    moving: Vec<MovingPlatform>,
    ladders: Vec<Rect>,
    gravity: f32,
    movement_speed: f32,
    jump_speed: f32,
}

impl PlatformerPhysics {
    pub fn new(platforms: Vec<Rect>, ladders: Vec<Rect>, config: &GameConfig) -> Self {
        Self {
            platforms,
            moving: Vec::new(),
            ladders,
            gravity: config.gravity,
            movement_speed: config.movement_speed,
            jump_speed: config.jump_speed,
        }
    }

    pub fn for_level(level: &LevelData, config: &GameConfig) -> Self {
        Self::new(level.platforms.clone(), level.ladders.clone(), config)
            .with_moving_platforms(level.moving_platforms.clone())
    }

    pub fn with_moving_platforms(mut self, moving: Vec<MovingPlatform>) -> Self {
        self.moving = moving;
        self
    }

    pub fn moving_platforms(&self) -> &[MovingPlatform] {
        &self.moving
    }

    /// Static and moving platforms at their current positions.
    fn solids(&self) -> impl Iterator<Item = Rect> + '_ {
        self.platforms
            .iter()
            .copied()
            .chain(self.moving.iter().map(|m| m.rect))
    }

    fn rides(player: &PlayerState, platform: Rect) -> bool {
        let feet = player.hitbox();
        let gap = feet.min.y - platform.max.y;
        player.velocity.y <= 0.0
            && (0.0..=RIDE_TOLERANCE).contains(&gap)
            && feet.min.x < platform.max.x
            && feet.max.x > platform.min.x
    }

    /// Advance every moving platform and carry the player along with the
    /// one it stands on.
    fn advance_platforms(&mut self, player: &mut PlayerState) {
        let mut carried = None;
        for platform in &mut self.moving {
            let riding = Self::rides(player, platform.rect);
            let delta = platform.step();
            if riding && carried.is_none() {
                carried = Some(delta);
            }
        }
        if let Some(delta) = carried {
            player.position += delta;
        }
    }

    /// Default [`PhysicsFactory`].
    pub fn boxed(level: &LevelData, config: &GameConfig) -> Box<dyn PhysicsAdapter> {
        Box::new(Self::for_level(level, config))
    }

    fn resolve_x(&self, player: &mut PlayerState) {
        let half = player.hitbox().half_size();
        for platform in self.solids() {
            if !overlaps(player.hitbox(), platform) {
                continue;
            }
            if player.velocity.x > 0.0 {
                player.position.x = platform.min.x - half.x;
            } else if player.velocity.x < 0.0 {
                player.position.x = platform.max.x + half.x;
            }
        }
    }

    fn resolve_y(&self, player: &mut PlayerState) {
        let half = player.hitbox().half_size();
        for platform in self.solids() {
            if !overlaps(player.hitbox(), platform) {
                continue;
            }
            if player.velocity.y > 0.0 {
                // Head bump
                player.position.y = platform.min.y - half.y;
            } else {
                player.position.y = platform.max.y + half.y;
            }
            player.velocity.y = 0.0;
        }
    }
}

impl PhysicsAdapter for PlatformerPhysics {
    fn update(&mut self, player: &mut PlayerState, intent: Intent) {
        self.advance_platforms(player);
        let on_ladder = self.is_on_climbable(player);

        player.velocity.x = f32::from(intent.horizontal) * self.movement_speed;
        match intent.vertical {
            Vertical::Climb(dir) => player.velocity.y = f32::from(dir) * self.movement_speed,
            Vertical::Jump => player.velocity.y = self.jump_speed,
            Vertical::Free => {}
        }
        if !on_ladder {
            player.velocity.y -= self.gravity;
        }

        player.position.x += player.velocity.x;
        self.resolve_x(player);
        player.position.y += player.velocity.y;
        self.resolve_y(player);
    }

    fn is_on_climbable(&self, player: &PlayerState) -> bool {
        let hitbox = player.hitbox();
        self.ladders.iter().any(|l| overlaps(hitbox, *l))
    }

    fn can_stand_or_jump(&self, player: &PlayerState, tolerance: f32) -> bool {
        let feet = player.hitbox();
        let feet = Rect {
            min: feet.min - Vec2::new(0.0, tolerance),
            max: feet.max - Vec2::new(0.0, tolerance),
        };
        self.solids().any(|p| overlaps(feet, p))
    }

    fn moving_platform_rects(&self) -> Vec<Rect> {
        self.moving.iter().map(|m| m.rect).collect()
    }
}
