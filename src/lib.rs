//! Platformer Core Library
//!
//! Gameplay logic for a 2D side-scrolling platformer:
//! - Screen flow (start menu, level map, level dialogs, gameplay, game over)
//! - Keyboard intent and jump latching
//! - Platformer physics adapter (gravity, ladders, solid and moving platforms)
//! - Player animation state machine
//! - Score, lives and level completion tracking
//! - Camera follow with map-edge clamping
//! - RON level files and config
//!
//! Rendering, audio and physics sit behind traits; [`plugin::PlatformerPlugin`]
//! wires the core into a Bevy app and [`presentation::PresentationPlugin`]
//! draws its frames and plays its sounds.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod level;
pub mod logging;
pub mod physics;
pub mod player;
pub mod plugin;
pub mod presentation;
pub mod render;
pub mod screens;
pub mod session;
pub mod tracker;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use screens::{Control, ScreenKind, ViewStateMachine};
pub use session::{RunState, Session};
