//! Draws the published [`FrameDraw`] with Bevy sprites and text, and plays the
//! audio cues raised by the fixed step.
//!
//! Only the binary adds this plugin; headless apps keep the draw list as data
//! and send cues to the log.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use tracing::debug;

use crate::plugin::{FrameDraw, PendingCues, PublishFrame};
use crate::render::{DrawList, SpriteDraw, TextureKey};

const WORLD_Z: f32 = 1.0;
const PLAYER_Z: f32 = 2.0;
const HUD_Z: f32 = 10.0;
const TEXT_Z: f32 = 20.0;

// Platforms have no art of their own
const PLATFORM_COLOR: Color = Color::srgb(0.36, 0.27, 0.18);

pub struct PresentationPlugin {
    /// Logical screen size the draw list is laid out in
    pub screen_size: Vec2,
}

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LogicalScreen(self.screen_size))
            .init_resource::<FrameDraw>()
            .init_resource::<PendingCues>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (
                    draw_frame.run_if(resource_changed::<FrameDraw>),
                    play_cues,
                )
                    .after(PublishFrame),
            );
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct LogicalScreen(pub Vec2);

/// Marks entities spawned for the current frame's draw list.
#[derive(Component, Debug)]
pub struct Drawn;

#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Sprite {
        texture: TextureKey,
        size: Vec2,
        flip_x: bool,
    },
    Text {
        text: String,
        font_size: f32,
    },
}

/// One drawable with its Bevy translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub visual: Visual,
    pub translation: Vec3,
}

/// Lays out a draw list in Bevy world space, where the origin is the window
/// centre. Screen space has its origin bottom-left; world sprites are
/// shifted by the list's camera first.
pub fn placements(list: &DrawList, screen: Vec2) -> Vec<Placement> {
    let half = screen / 2.0;
    let sprite = |draw: &SpriteDraw, at: Vec2, z: f32| Placement {
        visual: Visual::Sprite {
            texture: draw.texture,
            size: draw.size,
            flip_x: draw.flip_x,
        },
        translation: (at - half).extend(z),
    };

    let mut out = Vec::with_capacity(
        list.world.len() + list.hud.len() + list.text.len() + usize::from(list.player.is_some()),
    );
    out.extend(
        list.world
            .iter()
            .map(|d| sprite(d, d.center - list.camera, WORLD_Z)),
    );
    if let Some((_, d)) = &list.player {
        out.push(sprite(d, d.center - list.camera, PLAYER_Z));
    }
    out.extend(
        list.hud
            .iter()
            .enumerate()
            .map(|(i, d)| sprite(d, d.center, HUD_Z + i as f32 * 0.01)),
    );
    out.extend(list.text.iter().map(|t| Placement {
        visual: Visual::Text {
            text: t.text.clone(),
            font_size: t.font_size,
        },
        translation: (t.anchor - half).extend(TEXT_Z),
    }));
    out
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn draw_frame(
    mut commands: Commands,
    assets: Res<AssetServer>,
    frame: Res<FrameDraw>,
    screen: Res<LogicalScreen>,
    drawn: Query<Entity, With<Drawn>>,
) {
    for entity in &drawn {
        commands.entity(entity).despawn();
    }

    for placement in placements(&frame.0, screen.0) {
        let transform = Transform::from_translation(placement.translation);
        match placement.visual {
            Visual::Sprite {
                texture: TextureKey::Platform,
                size,
                ..
            } => {
                commands.spawn((Drawn, Sprite::from_color(PLATFORM_COLOR, size), transform));
            }
            Visual::Sprite {
                texture,
                size,
                flip_x,
            } => {
                let sprite = Sprite {
                    image: assets.load(texture.asset_path()),
                    custom_size: Some(size),
                    flip_x,
                    ..default()
                };
                commands.spawn((Drawn, sprite, transform));
            }
            Visual::Text { text, font_size } => {
                commands.spawn((
                    Drawn,
                    Text2d::new(text),
                    TextFont {
                        font_size,
                        ..default()
                    },
                    Anchor::BottomLeft,
                    transform,
                ));
            }
        }
    }
}

fn play_cues(mut commands: Commands, assets: Res<AssetServer>, mut cues: ResMut<PendingCues>) {
    if cues.as_slice().is_empty() {
        return;
    }
    for cue in cues.drain() {
        debug!(?cue, "playing cue");
        commands.spawn((
            AudioPlayer::new(assets.load(cue.asset_path())),
            PlaybackSettings::DESPAWN,
        ));
    }
}
