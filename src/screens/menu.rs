//! Pointer-driven screens: start menu, map, level dialogs and game over.

use bevy::math::{Rect, Vec2};

use super::Trigger;
use crate::constants::*;
use crate::input::InputEvent;
use crate::render::{DrawList, SpriteDraw, TextureKey};
use crate::session::Session;

fn region((min_x, min_y, max_x, max_y): (f32, f32, f32, f32)) -> Rect {
    Rect::new(min_x, min_y, max_x, max_y)
}

fn background(texture: TextureKey) -> SpriteDraw {
    SpriteDraw::new(
        texture,
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
    )
}

/// Screen-space button: a hit region plus art that grows while hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub region: Rect,
    pub texture: TextureKey,
    center: Vec2,
    base_size: Vec2,
    hover_scale: f32,
    hovered: bool,
}

impl Button {
    fn new(
        region_bounds: (f32, f32, f32, f32),
        texture: TextureKey,
        center: (f32, f32),
        size: (f32, f32),
        hover_scale: f32,
    ) -> Self {
        Self {
            region: region(region_bounds),
            texture,
            center: Vec2::new(center.0, center.1),
            base_size: Vec2::new(size.0, size.1),
            hover_scale,
            hovered: false,
        }
    }

    pub fn play() -> Self {
        Self::new(
            PLAY_REGION,
            TextureKey::PlayButton,
            PLAY_BUTTON_CENTER,
            MENU_BUTTON_SIZE,
            MENU_HOVER_SCALE,
        )
    }

    pub fn exit() -> Self {
        Self::new(
            EXIT_REGION,
            TextureKey::ExitButton,
            EXIT_BUTTON_CENTER,
            MENU_BUTTON_SIZE,
            MENU_HOVER_SCALE,
        )
    }

    pub fn enter() -> Self {
        Self::new(
            ENTER_REGION,
            TextureKey::NextButton,
            ENTER_BUTTON_CENTER,
            ENTER_BUTTON_SIZE,
            DIALOG_HOVER_SCALE,
        )
    }

    /// Inclusive on all edges.
    pub fn contains(&self, point: Vec2) -> bool {
        self.region.contains(point)
    }

    pub fn hover(&mut self, point: Vec2) {
        self.hovered = self.contains(point);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn draw_size(&self) -> Vec2 {
        if self.hovered {
            self.base_size * self.hover_scale
        } else {
            self.base_size
        }
    }

    pub fn sprite(&self) -> SpriteDraw {
        SpriteDraw::new(self.texture, self.center, self.draw_size())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartScreen {
    /// Session handed to the map when "Play" is pressed
    pub session: Session,
    pub play: Button,
    pub exit: Button,
}

impl StartScreen {
    pub fn new(start_lives: u32) -> Self {
        Self {
            session: Session::new_game(start_lives),
            play: Button::play(),
            exit: Button::exit(),
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::PointerMove(p) => {
                self.play.hover(p);
                self.exit.hover(p);
                None
            }
            InputEvent::PointerPress(p) if self.play.contains(p) => Some(Trigger::Play),
            InputEvent::PointerPress(p) if self.exit.contains(p) => Some(Trigger::Exit),
            _ => None,
        }
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::screen();
        list.hud.push(background(TextureKey::StartBackground));
        list.hud.push(self.play.sprite());
        list.hud.push(self.exit.sprite());
        list
    }
}

/// Which full-screen art a dialog shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Map,
    LevelIntro,
    LevelOutro,
}

/// Map and level intro/outro: a picture and a single "Enter" button.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogScreen {
    pub kind: DialogKind,
    pub session: Session,
    pub enter: Button,
}

impl DialogScreen {
    pub fn new(kind: DialogKind, session: Session) -> Self {
        Self {
            kind,
            session,
            enter: Button::enter(),
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::PointerMove(p) => {
                self.enter.hover(p);
                None
            }
            InputEvent::PointerPress(p) if self.enter.contains(p) => Some(Trigger::Enter),
            _ => None,
        }
    }

    pub fn background(&self) -> TextureKey {
        let level = self.session.current_level;
        match self.kind {
            DialogKind::Map => TextureKey::MapBackground(level),
            DialogKind::LevelIntro => TextureKey::LevelStartBackground(level),
            DialogKind::LevelOutro => TextureKey::LevelFinishBackground(level),
        }
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::screen();
        list.hud.push(background(self.background()));
        list.hud.push(self.enter.sprite());
        list
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverScreen;

impl GameOverScreen {
    /// Any press acknowledges.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::PointerPress(_) => Some(Trigger::Acknowledge),
            _ => None,
        }
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::screen();
        list.hud.push(background(TextureKey::GameOverBackground));
        list
    }
}
