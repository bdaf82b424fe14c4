use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::{EntitySet, LevelData, LevelDescriptor, LevelLoader, MovingPlatform, Travel};
use crate::constants::{GRID_PIXEL_SIZE, PLAYER_START_X, PLAYER_START_Y};
use crate::error::{GameError, GameResult};
use crate::logging::TimedSection;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Region {
    // Centre in world pixels
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub fn to_rect(self) -> Rect {
        Rect::from_center_size(Vec2::new(self.x, self.y), Vec2::new(self.w, self.h))
    }
}

/// Moving platform as written in a level file: a region plus its speed in
/// pixels per frame and optional edge limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MovingRegion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    #[serde(default)]
    pub travel: Travel,
}

impl MovingRegion {
    pub fn to_platform(self) -> MovingPlatform {
        MovingPlatform {
            rect: Region {
                x: self.x,
                y: self.y,
                w: self.w,
                h: self.h,
            }
            .to_rect(),
            velocity: Vec2::new(self.vx, self.vy),
            travel: self.travel,
        }
    }
}

/// On-disk level layout (RON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelFile {
    pub id: u32,
    pub label: String,
    pub required_collectibles: u32,
    /// Map width in tile columns
    pub width_tiles: u32,
    #[serde(default)]
    pub spawn: SpawnPoint,
    #[serde(default)]
    pub platforms: Vec<Region>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingRegion>,
    #[serde(default)]
    pub ladders: Vec<Region>,
    #[serde(default)]
    pub collectibles: Vec<Region>,
    #[serde(default)]
    pub heals: Vec<Region>,
    #[serde(default)]
    pub hazards: Vec<Region>,
    #[serde(default)]
    pub exits: Vec<Region>,
}

impl LevelFile {
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    pub fn into_level_data(self) -> LevelData {
        let rects = |regions: Vec<Region>| regions.into_iter().map(Region::to_rect).collect();
        LevelData {
            descriptor: LevelDescriptor {
                id: self.id,
                required_collectibles: self.required_collectibles,
                display_label: self.label,
                spawn: Vec2::new(self.spawn.x, self.spawn.y),
                map_width_pixels: self.width_tiles as f32 * GRID_PIXEL_SIZE,
            },
            platforms: rects(self.platforms),
            moving_platforms: self
                .moving_platforms
                .into_iter()
                .map(MovingRegion::to_platform)
                .collect(),
            ladders: rects(self.ladders),
            collectibles: EntitySet::from_regions(self.collectibles.into_iter().map(Region::to_rect)),
            heals: EntitySet::from_regions(self.heals.into_iter().map(Region::to_rect)),
            hazards: rects(self.hazards),
            exits: rects(self.exits),
        }
    }
}

/// Reads `level_{id}.ron` files from a directory.
#[derive(Debug, Clone)]
pub struct RonLevelLoader {
    dir: PathBuf,
}

impl RonLevelLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level_{level}.ron"))
    }

    fn read(path: &Path, level: u32) -> GameResult<String> {
        std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                GameError::LevelNotFound { level }
            } else {
                GameError::LevelIo {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }
}

impl LevelLoader for RonLevelLoader {
    fn load(&self, level: u32) -> GameResult<LevelData> {
        let _timed = TimedSection::start("load_level");
        let path = self.path_for(level);

        let content = Self::read(&path, level).inspect_err(|e| error!("{e}"))?;
        let file = LevelFile::from_ron_str(&content).map_err(|source| GameError::LevelParse {
            path: path.clone(),
            source,
        })?;
        if file.id != level {
            return Err(GameError::InvalidLevel {
                level,
                reason: format!("file {path:?} declares id {}", file.id),
            });
        }

        let data = file.into_level_data();
        data.validate()?;
        info!(
            level,
            label = %data.descriptor.display_label,
            collectibles = data.collectibles.len(),
            "Loaded level"
        );
        Ok(data)
    }
}

/// Serves pre-built levels from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelLoader {
    levels: HashMap<u32, LevelData>,
}

impl MemoryLevelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, data: LevelData) -> Self {
        self.levels.insert(data.descriptor.id, data);
        self
    }
}

impl LevelLoader for MemoryLevelLoader {
    fn load(&self, level: u32) -> GameResult<LevelData> {
        let data = self
            .levels
            .get(&level)
            .cloned()
            .ok_or(GameError::LevelNotFound { level })?;
        data.validate()?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_ONE: &str = r#"(
        id: 1,
        label: "Cats",
        required_collectibles: 1,
        width_tiles: 100,
        platforms: [(x: 400.0, y: 16.0, w: 800.0, h: 32.0)],
        collectibles: [(x: 300.0, y: 60.0, w: 32.0, h: 32.0)],
        exits: [(x: 700.0, y: 60.0, w: 32.0, h: 64.0)],
    )"#;

    #[test]
    fn test_parse_level_file_with_defaults() {
        let file = LevelFile::from_ron_str(LEVEL_ONE).unwrap();
        assert_eq!(file.spawn, SpawnPoint::default());
        assert!(file.ladders.is_empty());

        let data = file.into_level_data();
        assert_eq!(data.descriptor.map_width_pixels, 3200.0);
        assert_eq!(data.descriptor.spawn, Vec2::new(128.0, 128.0));
        assert_eq!(data.collectibles.len(), 1);
    }

    #[test]
    fn test_parse_moving_platform() {
        let file = LevelFile::from_ron_str(
            r#"(
            id: 1,
            label: "Cats",
            required_collectibles: 0,
            width_tiles: 40,
            moving_platforms: [
                (x: 500.0, y: 100.0, w: 96.0, h: 16.0, vy: 1.0, travel: (bottom: Some(40.0), top: Some(300.0))),
                (x: 900.0, y: 100.0, w: 96.0, h: 16.0),
            ],
            exits: [(x: 1200.0, y: 60.0, w: 32.0, h: 64.0)],
        )"#,
        )
        .unwrap();

        let data = file.into_level_data();
        let lift = data.moving_platforms[0];
        assert_eq!(lift.velocity, Vec2::new(0.0, 1.0));
        assert_eq!(lift.rect.min, Vec2::new(452.0, 92.0));
        assert_eq!(lift.travel.top, Some(300.0));
        assert_eq!(lift.travel.left, None);

        let idle = data.moving_platforms[1];
        assert_eq!(idle.velocity, Vec2::ZERO);
        assert_eq!(idle.travel, Travel::default());
    }

    #[test]
    fn test_region_is_centre_based() {
        let r = Region {
            x: 10.0,
            y: 20.0,
            w: 4.0,
            h: 6.0,
        }
        .to_rect();
        assert_eq!(r.min, Vec2::new(8.0, 17.0));
        assert_eq!(r.max, Vec2::new(12.0, 23.0));
    }

    #[test]
    fn test_ron_loader_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_1.ron"), LEVEL_ONE).unwrap();

        let loader = RonLevelLoader::new(dir.path());
        let data = loader.load(1).unwrap();
        assert_eq!(data.descriptor.display_label, "Cats");
    }

    #[test]
    fn test_ron_loader_missing_level() {
        let dir = tempfile::tempdir().unwrap();
        let loader = RonLevelLoader::new(dir.path());
        assert!(matches!(
            loader.load(3),
            Err(GameError::LevelNotFound { level: 3 })
        ));
    }

    #[test]
    fn test_ron_loader_rejects_id_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_2.ron"), LEVEL_ONE).unwrap();
        let loader = RonLevelLoader::new(dir.path());
        assert!(matches!(
            loader.load(2),
            Err(GameError::InvalidLevel { level: 2, .. })
        ));
    }

    #[test]
    fn test_ron_loader_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_1.ron"), "(id: 1, label: )").unwrap();
        let loader = RonLevelLoader::new(dir.path());
        assert!(matches!(loader.load(1), Err(GameError::LevelParse { .. })));
    }

    #[test]
    fn test_memory_loader() {
        let data = LevelFile::from_ron_str(LEVEL_ONE).unwrap().into_level_data();
        let loader = MemoryLevelLoader::new().with_level(data);
        assert!(loader.load(1).is_ok());
        assert!(matches!(
            loader.load(2),
            Err(GameError::LevelNotFound { level: 2 })
        ));
    }
}
