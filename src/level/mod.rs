//! Level data: the static descriptor plus the entity sets a gameplay screen
//! mutates (collectibles and heal pickups are consumed once).

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

mod loader;

pub use loader::{LevelFile, MemoryLevelLoader, MovingRegion, Region, RonLevelLoader, SpawnPoint};

/// Static per-level data, read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescriptor {
    pub id: u32,
    pub required_collectibles: u32,
    /// Name of the thing being collected, shown in the HUD
    pub display_label: String,
    pub spawn: Vec2,
    pub map_width_pixels: f32,
}

/// Stable identity of a consumable map entity within one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Consumable regions. Removing on first overlap makes double-consumption
/// impossible: a taken entity is no longer part of any later query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySet {
    entries: Vec<(EntityId, Rect)>,
}

impl EntitySet {
    pub fn from_regions(regions: impl IntoIterator<Item = Rect>) -> Self {
        let entries = regions
            .into_iter()
            .enumerate()
            .map(|(i, r)| (EntityId(i as u32), r))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|(e, _)| *e == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EntityId, Rect)> {
        self.entries.iter()
    }

    /// Remove and return every entity overlapping `hitbox`.
    pub fn take_overlapping(&mut self, hitbox: Rect) -> Vec<EntityId> {
        let mut taken = Vec::new();
        self.entries.retain(|(id, region)| {
            if overlaps(hitbox, *region) {
                taken.push(*id);
                false
            } else {
                true
            }
        });
        taken
    }
}

/// Edge limits for a moving platform. An unset edge never turns it around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub right: Option<f32>,
    #[serde(default)]
    pub bottom: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
}

/// Solid platform moving at a constant speed that reverses an axis once an
/// edge passes its travel limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingPlatform {
    pub rect: Rect,
    /// Pixels per frame
    pub velocity: Vec2,
    pub travel: Travel,
}

impl MovingPlatform {
    /// Advance one frame and return the displacement applied.
    pub fn step(&mut self) -> Vec2 {
        let delta = self.velocity;
        self.rect.min += delta;
        self.rect.max += delta;

        let t = self.travel;
        if (self.velocity.x < 0.0 && t.left.is_some_and(|l| self.rect.min.x < l))
            || (self.velocity.x > 0.0 && t.right.is_some_and(|r| self.rect.max.x > r))
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.velocity.y < 0.0 && t.bottom.is_some_and(|b| self.rect.min.y < b))
            || (self.velocity.y > 0.0 && t.top.is_some_and(|top| self.rect.max.y > top))
        {
            self.velocity.y = -self.velocity.y;
        }
        delta
    }
}

/// Everything a gameplay screen needs from one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub descriptor: LevelDescriptor,
    pub platforms: Vec<Rect>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub ladders: Vec<Rect>,
    pub collectibles: EntitySet,
    pub heals: EntitySet,
    pub hazards: Vec<Rect>,
    pub exits: Vec<Rect>,
}

impl LevelData {
    /// Reject levels that could never be completed or would break the
    /// score bound.
    pub fn validate(&self) -> GameResult<()> {
        let level = self.descriptor.id;
        let invalid = |reason: String| GameError::InvalidLevel { level, reason };

        if self.exits.is_empty() {
            return Err(invalid("no exit zone".into()));
        }
        if self.collectibles.len() as u32 != self.descriptor.required_collectibles {
            return Err(invalid(format!(
                "{} collectibles placed but {} required",
                self.collectibles.len(),
                self.descriptor.required_collectibles
            )));
        }
        if self.descriptor.map_width_pixels <= 0.0 {
            return Err(invalid("map width must be positive".into()));
        }
        Ok(())
    }

    pub fn hits_hazard(&self, hitbox: Rect) -> bool {
        self.hazards.iter().any(|h| overlaps(hitbox, *h))
    }

    pub fn touches_exit(&self, hitbox: Rect) -> bool {
        self.exits.iter().any(|e| overlaps(hitbox, *e))
    }
}

/// Resolves a level id into its data. Failure is fatal to the caller.
pub trait LevelLoader: Send + Sync {
    fn load(&self, level: u32) -> GameResult<LevelData>;
}

/// Strict AABB overlap; rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, y), Vec2::splat(10.0))
    }

    fn sample_level() -> LevelData {
        LevelData {
            descriptor: LevelDescriptor {
                id: 1,
                required_collectibles: 2,
                display_label: "Cats".into(),
                spawn: Vec2::new(128.0, 128.0),
                map_width_pixels: 3200.0,
            },
            platforms: vec![],
            moving_platforms: vec![],
            ladders: vec![],
            collectibles: EntitySet::from_regions([square(0.0, 0.0), square(100.0, 0.0)]),
            heals: EntitySet::default(),
            hazards: vec![square(50.0, 0.0)],
            exits: vec![square(300.0, 0.0)],
        }
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        assert!(overlaps(square(0.0, 0.0), square(5.0, 5.0)));
        assert!(!overlaps(square(0.0, 0.0), square(10.0, 0.0)));
    }

    #[test]
    fn test_take_overlapping_removes_once() {
        let mut set = EntitySet::from_regions([square(0.0, 0.0), square(100.0, 0.0)]);
        let taken = set.take_overlapping(square(2.0, 2.0));
        assert_eq!(taken, vec![EntityId(0)]);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(EntityId(0)));

        let again = set.take_overlapping(square(2.0, 2.0));
        assert!(again.is_empty());
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_level().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_collectible_mismatch() {
        let mut level = sample_level();
        level.descriptor.required_collectibles = 3;
        let err = level.validate().unwrap_err();
        assert!(err.to_string().contains("3 required"));
    }

    #[test]
    fn test_validate_rejects_missing_exit() {
        let mut level = sample_level();
        level.exits.clear();
        assert!(matches!(
            level.validate(),
            Err(GameError::InvalidLevel { level: 1, .. })
        ));
    }

    fn lift(velocity: Vec2, travel: Travel) -> MovingPlatform {
        MovingPlatform {
            rect: Rect::new(0.0, 0.0, 64.0, 16.0),
            velocity,
            travel,
        }
    }

    #[test]
    fn test_moving_platform_reverses_past_limit() {
        let mut p = lift(
            Vec2::new(2.0, 0.0),
            Travel {
                right: Some(68.0),
                ..Travel::default()
            },
        );
        assert_eq!(p.step(), Vec2::new(2.0, 0.0));
        assert_eq!(p.velocity.x, 2.0);
        // max.x 68 is on the limit, 70 is past it
        p.step();
        assert_eq!(p.rect.max.x, 68.0);
        assert_eq!(p.step(), Vec2::new(2.0, 0.0));
        assert_eq!(p.velocity.x, -2.0);
        assert_eq!(p.step(), Vec2::new(-2.0, 0.0));
        assert_eq!(p.rect.min.x, 4.0);
    }

    #[test]
    fn test_moving_platform_vertical_bounds() {
        let mut p = lift(
            Vec2::new(0.0, -1.0),
            Travel {
                bottom: Some(0.0),
                top: Some(40.0),
                ..Travel::default()
            },
        );
        p.step();
        assert_eq!(p.velocity.y, 1.0);
        for _ in 0..30 {
            p.step();
        }
        assert!(p.rect.max.y <= 41.0);
        assert!(p.rect.min.y >= -1.0);
    }

    #[test]
    fn test_unbounded_platform_keeps_going() {
        let mut p = lift(Vec2::new(0.0, 3.0), Travel::default());
        for _ in 0..100 {
            p.step();
        }
        assert_eq!(p.rect.min.y, 300.0);
    }

    #[test]
    fn test_zone_queries() {
        let level = sample_level();
        assert!(level.hits_hazard(square(50.0, 3.0)));
        assert!(!level.hits_hazard(square(200.0, 0.0)));
        assert!(level.touches_exit(square(305.0, 0.0)));
    }
}
