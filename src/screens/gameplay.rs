//! The level being played.
//!
//! One `update` call is one frame: intent → physics → animation → score and
//! lives → camera. Everything the screen owns (level geometry, the player,
//! the physics collaborator) is dropped with it.

use bevy::math::Vec2;
use tracing::info;

use super::Trigger;
use crate::animation::update_player_animation;
use crate::audio::{AudioCue, AudioPlayer};
use crate::camera::CameraFollowController;
use crate::config::GameConfig;
use crate::constants::{LIFE_ICON_SIZE, SCORE_FONT_SIZE, SCORE_TEXT_POS};
use crate::error::GameResult;
use crate::input::{InputEvent, InputState, Vertical};
use crate::level::{LevelData, LevelLoader};
use crate::physics::{PhysicsAdapter, PhysicsFactory};
use crate::player::{PlayerState, RenderHandle};
use crate::render::{player_sprite, DrawList, SpriteDraw, TextDraw, TextureKey};
use crate::session::{RunState, Session};
use crate::tracker::{FrameOutcome, HealthAndScoreTracker};

pub struct GameplayScreen {
    session: Session,
    level: LevelData,
    player: PlayerState,
    input: InputState,
    physics: Box<dyn PhysicsAdapter>,
    tracker: HealthAndScoreTracker,
    camera: CameraFollowController,
    camera_focus: Vec2,
    jump_tolerance: f32,
    stand_tolerance: f32,
}

impl std::fmt::Debug for GameplayScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameplayScreen")
            .field("session", &self.session)
            .field("run", &self.tracker.run())
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

impl GameplayScreen {
    /// Load the session's level and place the player on its spawn point.
    pub fn enter(
        session: Session,
        loader: &dyn LevelLoader,
        physics: PhysicsFactory,
        config: &GameConfig,
        handle: RenderHandle,
    ) -> GameResult<Self> {
        let level = loader.load(session.current_level)?;
        let descriptor = &level.descriptor;
        info!(
            level = descriptor.id,
            lives = session.lives_carried,
            required = descriptor.required_collectibles,
            "Entering gameplay"
        );

        let camera = CameraFollowController::new(Vec2::new(config.screen_width, config.screen_height));
        let player = PlayerState::spawn_at(descriptor.spawn, handle);
        let camera_focus = camera.focus(player.position, descriptor.map_width_pixels);

        Ok(Self {
            session,
            tracker: HealthAndScoreTracker::new(session, descriptor, config.fall_out_y),
            physics: physics(&level, config),
            level,
            player,
            input: InputState::default(),
            camera,
            camera_focus,
            jump_tolerance: config.jump_tolerance,
            stand_tolerance: config.stand_tolerance,
        })
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn run(&self) -> RunState {
        self.tracker.run()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn camera_focus(&self) -> Vec2 {
        self.camera_focus
    }

    /// Key events only; pointer input does nothing during play.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::KeyDown(key) => self.input.press(key),
            InputEvent::KeyUp(key) => self.input.release(key),
            InputEvent::PointerMove(_) | InputEvent::PointerPress(_) => {}
        }
        None
    }

    pub fn update(&mut self, audio: &mut dyn AudioPlayer) -> Option<Trigger> {
        let on_climbable = self.physics.is_on_climbable(&self.player);
        let can_jump = self.physics.can_stand_or_jump(&self.player, self.jump_tolerance);
        let intent = self.input.intent(on_climbable, can_jump);
        if intent.vertical == Vertical::Jump {
            audio.play(AudioCue::Jump);
        }

        self.physics.update(&mut self.player, intent);

        self.player.on_ladder = self.physics.is_on_climbable(&self.player)
            && !self.physics.can_stand_or_jump(&self.player, self.stand_tolerance);
        update_player_animation(&mut self.player);

        let outcome = self.tracker.process(&mut self.player, &mut self.level, audio);

        self.camera_focus = self
            .camera
            .focus(self.player.position, self.level.descriptor.map_width_pixels);

        match outcome {
            FrameOutcome::Continue => None,
            FrameOutcome::LevelComplete => Some(Trigger::LevelComplete {
                lives: self.tracker.run().lives,
            }),
            FrameOutcome::GameOver => Some(Trigger::Defeated),
        }
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList {
            camera: self.camera_focus,
            ..DrawList::default()
        };

        let moving = self.physics.moving_platform_rects();
        for platform in self.level.platforms.iter().chain(&moving) {
            list.world.push(SpriteDraw::in_rect(TextureKey::Platform, *platform));
        }
        for (_, region) in self.level.collectibles.iter() {
            list.world.push(SpriteDraw::in_rect(TextureKey::Collectible, *region));
        }
        for (_, region) in self.level.heals.iter() {
            list.world.push(SpriteDraw::in_rect(TextureKey::HealPickup, *region));
        }
        list.player = Some((self.player.handle, player_sprite(&self.player)));

        for center in self.tracker.lives_icons() {
            list.hud.push(SpriteDraw::new(
                TextureKey::LifeIcon,
                center,
                Vec2::splat(LIFE_ICON_SIZE),
            ));
        }
        list.text.push(TextDraw {
            text: self.tracker.score_text(&self.level.descriptor.display_label),
            anchor: Vec2::new(SCORE_TEXT_POS.0, SCORE_TEXT_POS.1),
            font_size: SCORE_FONT_SIZE,
        });
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueQueue;
    use crate::input::Key;
    use crate::level::{LevelFile, MemoryLevelLoader};
    use crate::physics::PlatformerPhysics;
    use crate::player::AnimState;

    // Floor top at y = 32; spawn standing on it at (128, 56).
    const LEVEL: &str = r#"(
        id: 1,
        label: "Cats",
        required_collectibles: 1,
        width_tiles: 100,
        spawn: (x: 128.0, y: 56.0),
        platforms: [(x: 1600.0, y: 16.0, w: 3200.0, h: 32.0)],
        moving_platforms: [(x: 2000.0, y: 300.0, w: 96.0, h: 16.0, vx: 1.0)],
        ladders: [(x: 1000.0, y: 232.0, w: 32.0, h: 400.0)],
        collectibles: [(x: 400.0, y: 56.0, w: 32.0, h: 32.0)],
        heals: [(x: 600.0, y: 56.0, w: 32.0, h: 32.0)],
        exits: [(x: 3000.0, y: 80.0, w: 32.0, h: 96.0)],
    )"#;

    fn screen(lives: u32) -> GameplayScreen {
        let loader =
            MemoryLevelLoader::new().with_level(LevelFile::from_ron_str(LEVEL).unwrap().into_level_data());
        GameplayScreen::enter(
            Session {
                current_level: 1,
                lives_carried: lives,
            },
            &loader,
            PlatformerPhysics::boxed,
            &GameConfig::default(),
            RenderHandle(1),
        )
        .unwrap()
    }

    #[test]
    fn test_enter_starts_fresh_run() {
        let s = screen(2);
        assert_eq!(s.run().score, 0);
        assert_eq!(s.run().lives, 2);
        assert_eq!(s.player().position, Vec2::new(128.0, 56.0));
    }

    #[test]
    fn test_enter_missing_level_is_error() {
        let loader = MemoryLevelLoader::new();
        let result = GameplayScreen::enter(
            Session::new_game(0),
            &loader,
            PlatformerPhysics::boxed,
            &GameConfig::default(),
            RenderHandle(1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_idle_on_floor() {
        let mut s = screen(0);
        let mut audio = CueQueue::default();
        assert_eq!(s.update(&mut audio), None);
        assert_eq!(s.player().anim_state, AnimState::Idle);
        assert_eq!(s.player().position, Vec2::new(128.0, 56.0));
    }

    #[test]
    fn test_jump_plays_cue_once() {
        let mut s = screen(0);
        let mut audio = CueQueue::default();
        s.handle_input(InputEvent::KeyDown(Key::Up));
        s.update(&mut audio);
        s.update(&mut audio);
        assert_eq!(audio.drain(), vec![AudioCue::Jump]);
        assert_eq!(s.player().anim_state, AnimState::Jump);
    }

    #[test]
    fn test_walk_right_collects() {
        let mut s = screen(0);
        let mut audio = CueQueue::default();
        s.handle_input(InputEvent::KeyDown(Key::Right));
        // 128 → 400 minus overlap margin at 3 px per frame
        for _ in 0..90 {
            s.update(&mut audio);
        }
        assert_eq!(s.run().score, 1);
        assert_eq!(s.player().anim_state, AnimState::Walk);
        assert!(audio.as_slice().contains(&AudioCue::Collect));
    }

    #[test]
    fn test_camera_follows_player() {
        let mut s = screen(0);
        s.player_mut().position = Vec2::new(1500.0, 56.0);
        s.update(&mut CueQueue::default());
        assert_eq!(s.camera_focus().x, 1100.0);
    }

    #[test]
    fn test_moving_platform_drawn_where_physics_has_it() {
        let mut s = screen(0);
        s.update(&mut CueQueue::default());
        let list = s.draw();
        let platforms: Vec<_> = list
            .world
            .iter()
            .filter(|d| d.texture == TextureKey::Platform)
            .collect();
        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[1].center, Vec2::new(2001.0, 300.0));
    }

    #[test]
    fn test_draw_list_contents() {
        let s = screen(2);
        let list = s.draw();
        // floor, collectible, heal
        assert_eq!(list.world.len(), 3);
        assert_eq!(list.world[0].texture, TextureKey::Platform);
        assert_eq!(list.hud.len(), 2);
        assert_eq!(list.text[0].text, "Cats: 0 of 1");
        assert!(list.player.is_some());
    }
}
