//! Draw list handed to the rendering collaborator each frame.
//!
//! The core decides *what* is on screen (texture keys, positions, sizes,
//! camera); how it is drawn is entirely up to the renderer.

use bevy::math::{Rect, Vec2};

use crate::player::{AnimState, Facing, PlayerState, RenderHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    StartBackground,
    PlayButton,
    ExitButton,
    NextButton,
    MapBackground(u32),
    LevelStartBackground(u32),
    LevelFinishBackground(u32),
    GameOverBackground,
    Player { anim: AnimState, frame: u8 },
    Platform,
    Collectible,
    HealPickup,
    LifeIcon,
}

impl TextureKey {
    pub fn asset_path(&self) -> String {
        match self {
            TextureKey::StartBackground => "img/views/start.jpg".into(),
            TextureKey::PlayButton => "img/views/startmenu1.png".into(),
            TextureKey::ExitButton => "img/views/startmenu2.png".into(),
            TextureKey::NextButton => "img/views/next.png".into(),
            TextureKey::MapBackground(level) => format!("img/views/map_{level}.jpg"),
            TextureKey::LevelStartBackground(level) => {
                format!("img/views/level_{level}_start.jpg")
            }
            TextureKey::LevelFinishBackground(level) => {
                format!("img/views/level_{level}_finish.jpg")
            }
            TextureKey::GameOverBackground => "img/views/gameover.png".into(),
            TextureKey::Player { anim, frame } => match anim {
                AnimState::Idle => "img/player/player_idle.png".into(),
                AnimState::Jump => "img/player/player_jump.png".into(),
                AnimState::Fall => "img/player/player_fall.png".into(),
                AnimState::Walk => format!("img/player/player_walk{frame}.png"),
                AnimState::Climb => format!("img/player/player_climb{frame}.png"),
            },
            TextureKey::Platform => "img/platform.png".into(),
            TextureKey::Collectible => "img/collectible.png".into(),
            TextureKey::HealPickup => "img/heals.png".into(),
            TextureKey::LifeIcon => "img/heals.png".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureKey,
    pub center: Vec2,
    pub size: Vec2,
    /// Mirror horizontally (left-facing player art)
    pub flip_x: bool,
}

impl SpriteDraw {
    pub fn new(texture: TextureKey, center: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            center,
            size,
            flip_x: false,
        }
    }

    pub fn in_rect(texture: TextureKey, rect: Rect) -> Self {
        Self::new(texture, rect.center(), rect.size())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    /// Bottom-left anchor, screen space
    pub anchor: Vec2,
    pub font_size: f32,
}

/// One frame's worth of drawing.
///
/// `world` sprites are in world space and go through `camera`; `hud`
/// sprites and `text` are in screen space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub camera: Vec2,
    pub world: Vec<SpriteDraw>,
    pub player: Option<(RenderHandle, SpriteDraw)>,
    pub hud: Vec<SpriteDraw>,
    pub text: Vec<TextDraw>,
}

impl DrawList {
    /// Screen-space list with the camera at the origin.
    pub fn screen() -> Self {
        Self::default()
    }
}

/// Rendering collaborator; returns nothing to the core.
pub trait Renderer {
    fn draw(&mut self, list: &DrawList);
}

/// Sprite for the player's current animation. Climb art has no mirrored
/// variant.
pub fn player_sprite(player: &PlayerState) -> SpriteDraw {
    let mut sprite = SpriteDraw::in_rect(
        TextureKey::Player {
            anim: player.anim_state,
            frame: player.anim_frame,
        },
        player.hitbox(),
    );
    sprite.flip_x = player.facing == Facing::Left && player.anim_state != AnimState::Climb;
    sprite
}
