//! Raw input events and the per-frame movement intent derived from held keys.

use bevy::input::keyboard::KeyCode;
use bevy::math::Vec2;

/// Directional keys the gameplay screen cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Arrow keys and WASD; everything else is ignored.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Key::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Key::Down),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
            _ => None,
        }
    }
}

/// Discrete events delivered by the input collaborator.
/// Pointer positions are screen space with the origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMove(Vec2),
    PointerPress(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    /// Leave vertical velocity to gravity
    #[default]
    Free,
    /// Ladder movement: -1 down, 0 hold, 1 up
    Climb(i8),
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    /// -1 left, 0 none, 1 right
    pub horizontal: i8,
    pub vertical: Vertical,
}

/// Held-key state plus the jump latch that stops a held Up from
/// re-jumping on landing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump_needs_reset: bool,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Up => {
                self.up = false;
                self.jump_needs_reset = false;
            }
            Key::Down => self.down = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
        }
    }

    pub fn horizontal(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Derive this frame's intent. Choosing a jump arms the latch.
    pub fn intent(&mut self, on_climbable: bool, can_jump: bool) -> Intent {
        let vertical = if on_climbable {
            match (self.up, self.down) {
                (true, false) => Vertical::Climb(1),
                (false, true) => Vertical::Climb(-1),
                _ => Vertical::Climb(0),
            }
        } else if self.up && can_jump && !self.jump_needs_reset {
            self.jump_needs_reset = true;
            Vertical::Jump
        } else {
            Vertical::Free
        };

        Intent {
            horizontal: self.horizontal(),
            vertical,
        }
    }
}
