//! The level and config files shipped with the game must load cleanly.

use std::path::PathBuf;

use platformer_core::config::GameConfig;
use platformer_core::level::{LevelLoader, RonLevelLoader};
use platformer_core::GameError;

const EXPECTED: [(u32, &str, u32); 6] = [
    (1, "Cats", 3),
    (2, "Chickens", 4),
    (3, "Puppies", 3),
    (4, "Raccoons", 3),
    (5, "Birds", 3),
    (6, "Bear", 1),
];

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn loader() -> RonLevelLoader {
    RonLevelLoader::new(root().join("levels"))
}

#[test]
fn test_shipped_levels_load() {
    let loader = loader();
    for (id, label, required) in EXPECTED {
        let level = loader.load(id).unwrap_or_else(|e| panic!("level {id}: {e}"));
        assert_eq!(level.descriptor.id, id);
        assert_eq!(level.descriptor.display_label, label);
        assert_eq!(level.descriptor.required_collectibles, required);
        assert_eq!(level.collectibles.len() as u32, required);
    }
}

#[test]
fn test_shipped_levels_are_playable() {
    let loader = loader();
    for (id, _, _) in EXPECTED {
        let level = loader.load(id).unwrap();
        let width = level.descriptor.map_width_pixels;
        assert!(width >= 800.0, "level {id} narrower than the screen");

        for exit in &level.exits {
            assert!(exit.max.x <= width, "level {id} exit outside the map");
        }
        for platform in &level.moving_platforms {
            assert!(platform.velocity != bevy::math::Vec2::ZERO, "level {id} has a stuck platform");
            assert!(platform.rect.max.x <= width, "level {id} platform outside the map");
        }
        let spawn = level.descriptor.spawn;
        assert!(
            !level.hazards.iter().any(|h| h.contains(spawn)),
            "level {id} spawns inside a hazard"
        );
    }
}

#[test]
fn test_some_levels_have_moving_platforms() {
    let loader = loader();
    let moving: usize = EXPECTED
        .iter()
        .map(|(id, _, _)| loader.load(*id).unwrap().moving_platforms.len())
        .sum();
    assert!(moving >= 2);
}

#[test]
fn test_level_after_last_is_missing() {
    let err = loader().load(7).unwrap_err();
    assert!(matches!(err, GameError::LevelNotFound { level: 7 }));
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = GameConfig::load_or_default(&root().join("config/game.ron")).unwrap();
    let defaults = GameConfig::default();
    assert_eq!(config.screen_width, defaults.screen_width);
    assert_eq!(config.tick_rate, defaults.tick_rate);
    assert_eq!(config.jump_speed, defaults.jump_speed);
    assert_eq!(config.start_lives, defaults.start_lives);
    assert_eq!(config.levels_dir, defaults.levels_dir);
    assert_eq!(
        config.log.directives(),
        defaults.log.directives()
    );
}
