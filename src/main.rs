use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use platformer_core::config::GameConfig;
use platformer_core::constants::SCREEN_TITLE;
use platformer_core::logging::LoggingPlugin;
use platformer_core::plugin::PlatformerPlugin;
use platformer_core::presentation::PresentationPlugin;

const CONFIG_PATH: &str = "config/game.ron";

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH))
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    let mut app = App::new();
    app.add_plugins(LoggingPlugin {
        config: config.log.clone(),
    });
    tracing::info!(?config, "Starting platformer");

    let screen_size = Vec2::new(config.screen_width, config.screen_height);
    let exit = app
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: SCREEN_TITLE.into(),
                        resolution: (config.screen_width, config.screen_height).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // LoggingPlugin owns the subscriber
                .disable::<bevy::log::LogPlugin>(),
        )
        .add_plugins(PlatformerPlugin { config })
        .add_plugins(PresentationPlugin { screen_size })
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("platformer exited with code {code}"),
    }
}
