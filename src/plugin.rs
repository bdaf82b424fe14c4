//! Bevy glue: feeds window input into the screen flow, steps it at a fixed
//! rate and publishes the frame's draw list.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use tracing::{error, info};

use crate::audio::{CueQueue, LogAudio};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::{InputEvent, Key};
use crate::level::RonLevelLoader;
use crate::render::{DrawList, Renderer};
use crate::screens::{Control, ViewStateMachine};

pub struct PlatformerPlugin {
    pub config: GameConfig,
}

impl Plugin for PlatformerPlugin {
    fn build(&self, app: &mut App) {
        let loader = RonLevelLoader::new(self.config.levels_dir.clone());
        let flow = ViewStateMachine::new(self.config.clone(), Box::new(loader));
        info!(
            levels_dir = %self.config.levels_dir.display(),
            tick_rate = self.config.tick_rate,
            "Platformer plugin ready"
        );

        app.add_event::<KeyboardInput>()
            .add_event::<CursorMoved>()
            .init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_rate))
            .insert_resource(ActiveFlow(flow))
            .init_resource::<FrameDraw>()
            .add_systems(
                Update,
                (
                    forward_keyboard,
                    forward_pointer,
                    publish_draw_list,
                    sync_cursor_visibility,
                )
                    .chain()
                    .in_set(PublishFrame),
            )
            .add_systems(FixedUpdate, step_frame);
    }
}

/// The screen flow, owned by the ECS world.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct ActiveFlow(pub ViewStateMachine);

/// Input forwarding and draw-list publishing; renderers run after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishFrame;

/// Latest draw list. Only replaced when the frame differs, so readers can
/// use change detection.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct FrameDraw(pub DrawList);

/// Cues raised by the fixed step. When the resource is absent, cues go to
/// the log instead.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct PendingCues(pub CueQueue);

impl Renderer for FrameDraw {
    fn draw(&mut self, list: &DrawList) {
        self.0 = list.clone();
    }
}

/// Window cursor position (origin top-left, y down) to logical screen space
/// (origin bottom-left, y up).
pub fn to_screen_space(window_size: Vec2, cursor: Vec2, logical: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::new(cursor.x, logical.y - cursor.y);
    }
    let flipped = Vec2::new(cursor.x, window_size.y - cursor.y);
    flipped * logical / window_size
}

fn apply(result: GameResult<Control>, exit: &mut EventWriter<AppExit>) {
    match result {
        Ok(Control::Continue) => {}
        Ok(Control::Exit) => {
            exit.send(AppExit::Success);
        }
        Err(err) => {
            error!(error = %err, "Screen flow failed");
            exit.send(AppExit::error());
        }
    }
}

fn forward_keyboard(
    mut keys: EventReader<KeyboardInput>,
    mut flow: ResMut<ActiveFlow>,
    mut exit: EventWriter<AppExit>,
) {
    for event in keys.read() {
        let Some(key) = Key::from_key_code(event.key_code) else {
            continue;
        };
        let input = match event.state {
            ButtonState::Pressed => InputEvent::KeyDown(key),
            ButtonState::Released => InputEvent::KeyUp(key),
        };
        apply(flow.handle_input(input), &mut exit);
    }
}

fn forward_pointer(
    mut moves: EventReader<CursorMoved>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut flow: ResMut<ActiveFlow>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok(window) = windows.get_single() else {
        moves.clear();
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    let logical = Vec2::new(flow.config().screen_width, flow.config().screen_height);

    for event in moves.read() {
        let at = to_screen_space(window_size, event.position, logical);
        apply(flow.handle_input(InputEvent::PointerMove(at)), &mut exit);
    }

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(cursor) = window.cursor_position() {
            let at = to_screen_space(window_size, cursor, logical);
            apply(flow.handle_input(InputEvent::PointerPress(at)), &mut exit);
        }
    }
}

fn step_frame(
    mut flow: ResMut<ActiveFlow>,
    cues: Option<ResMut<PendingCues>>,
    mut exit: EventWriter<AppExit>,
) {
    let result = match cues {
        Some(mut cues) => flow.update(&mut cues.0),
        None => flow.update(&mut LogAudio),
    };
    apply(result, &mut exit);
}

fn publish_draw_list(flow: Res<ActiveFlow>, mut frame: ResMut<FrameDraw>) {
    let mut next = FrameDraw::default();
    flow.render(&mut next);
    frame.set_if_neq(next);
}

fn sync_cursor_visibility(
    flow: Res<ActiveFlow>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let visible = flow.cursor_visible();
    for mut window in &mut windows {
        if window.cursor_options.visible != visible {
            window.cursor_options.visible = visible;
        }
    }
}
