//! Screen flow state machine.
//!
//! Start → Map → LevelIntro → Gameplay → LevelOutro → Map(next) …, with
//! Gameplay → GameOver → Start on defeat.
//!
//! The active screen is a single owned [`Screen`] value. A transition builds
//! the next screen from the [`Session`] handed over and drops the old one, so
//! nothing from a finished screen can fire a second transition.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audio::AudioPlayer;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::InputEvent;
use crate::level::LevelLoader;
use crate::physics::{PhysicsFactory, PlatformerPhysics};
use crate::player::RenderHandle;
use crate::render::{DrawList, Renderer};
use crate::session::Session;

pub mod gameplay;
pub mod menu;

pub use gameplay::GameplayScreen;
pub use menu::{Button, DialogKind, DialogScreen, GameOverScreen, StartScreen};

/// Observable state of the flow, carrying only each screen's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenKind {
    Start,
    Map { level: u32 },
    LevelIntro { level: u32, lives: u32 },
    Gameplay { level: u32, lives: u32 },
    LevelOutro { level: u32, lives: u32 },
    GameOver,
}

/// Events that can move the flow forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// "Play" pressed on the start menu
    Play,
    /// "Exit" pressed on the start menu
    Exit,
    /// "Enter" pressed on a map or level dialog
    Enter,
    /// All collectibles taken and the exit reached
    LevelComplete { lives: u32 },
    /// Hazard hit with no lives left
    Defeated,
    /// Any press on the game-over screen
    Acknowledge,
}

/// Result of looking a trigger up in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Enter(ScreenKind, Session),
    ExitProcess,
}

/// What the engine loop should do after an input or frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The transition table. `session` is the one held by the current screen;
/// triggers that do not apply to `current` yield `None`.
pub fn resolve(current: ScreenKind, trigger: Trigger, session: Session) -> Option<Step> {
    use ScreenKind as S;
    use Trigger as T;

    let step = match (current, trigger) {
        (S::Start, T::Play) => Step::Enter(
            S::Map {
                level: session.current_level,
            },
            session,
        ),
        (S::Start, T::Exit) => Step::ExitProcess,
        (S::Map { level }, T::Enter) => Step::Enter(
            S::LevelIntro {
                level,
                lives: session.lives_carried,
            },
            session,
        ),
        (S::LevelIntro { level, lives }, T::Enter) => {
            Step::Enter(S::Gameplay { level, lives }, session)
        }
        (S::Gameplay { level, .. }, T::LevelComplete { lives }) => Step::Enter(
            S::LevelOutro { level, lives },
            Session {
                current_level: level,
                lives_carried: lives,
            },
        ),
        (S::Gameplay { .. }, T::Defeated) => Step::Enter(S::GameOver, session),
        (S::LevelOutro { lives, .. }, T::Enter) => {
            let next = session.advance(lives);
            Step::Enter(
                S::Map {
                    level: next.current_level,
                },
                next,
            )
        }
        (S::GameOver, T::Acknowledge) => Step::Enter(S::Start, session),
        _ => return None,
    };
    Some(step)
}

/// The active screen and everything it owns.
#[derive(Debug)]
pub enum Screen {
    Start(StartScreen),
    Map(DialogScreen),
    LevelIntro(DialogScreen),
    Gameplay(Box<GameplayScreen>),
    LevelOutro(DialogScreen),
    GameOver(GameOverScreen, Session),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start(_) => ScreenKind::Start,
            Screen::Map(d) => ScreenKind::Map {
                level: d.session.current_level,
            },
            Screen::LevelIntro(d) => ScreenKind::LevelIntro {
                level: d.session.current_level,
                lives: d.session.lives_carried,
            },
            Screen::Gameplay(g) => ScreenKind::Gameplay {
                level: g.session().current_level,
                lives: g.session().lives_carried,
            },
            Screen::LevelOutro(d) => ScreenKind::LevelOutro {
                level: d.session.current_level,
                lives: d.session.lives_carried,
            },
            Screen::GameOver(..) => ScreenKind::GameOver,
        }
    }

    pub fn session(&self) -> Session {
        match self {
            Screen::Start(s) => s.session,
            Screen::Map(d) | Screen::LevelIntro(d) | Screen::LevelOutro(d) => d.session,
            Screen::Gameplay(g) => g.session(),
            Screen::GameOver(_, session) => *session,
        }
    }

    fn handle_input(&mut self, event: InputEvent) -> Option<Trigger> {
        match self {
            Screen::Start(s) => s.handle_input(event),
            Screen::Map(d) | Screen::LevelIntro(d) | Screen::LevelOutro(d) => d.handle_input(event),
            Screen::Gameplay(g) => g.handle_input(event),
            Screen::GameOver(o, _) => o.handle_input(event),
        }
    }

    fn update(&mut self, audio: &mut dyn AudioPlayer) -> Option<Trigger> {
        match self {
            Screen::Gameplay(g) => g.update(audio),
            _ => None,
        }
    }

    pub fn draw(&self) -> DrawList {
        match self {
            Screen::Start(s) => s.draw(),
            Screen::Map(d) | Screen::LevelIntro(d) | Screen::LevelOutro(d) => d.draw(),
            Screen::Gameplay(g) => g.draw(),
            Screen::GameOver(o, _) => o.draw(),
        }
    }

    /// The pointer is hidden only while playing.
    pub fn cursor_visible(&self) -> bool {
        !matches!(self, Screen::Gameplay(_))
    }
}

/// Serializable view of the flow for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenSnapshot {
    pub screen: ScreenKind,
    pub level: u32,
    pub lives: u32,
    pub score: Option<u32>,
    pub transitions: u64,
}

impl ScreenSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Top-level controller owning the active screen.
pub struct ViewStateMachine {
    screen: Screen,
    config: GameConfig,
    loader: Box<dyn LevelLoader>,
    physics: PhysicsFactory,
    transitions: u64,
}

impl std::fmt::Debug for ViewStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateMachine")
            .field("screen", &self.screen.kind())
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

impl ViewStateMachine {
    pub fn new(config: GameConfig, loader: Box<dyn LevelLoader>) -> Self {
        Self {
            screen: Screen::Start(StartScreen::new(config.start_lives)),
            config,
            loader,
            physics: PlatformerPhysics::boxed,
            transitions: 0,
        }
    }

    /// Swap the physics collaborator used for every later gameplay screen.
    pub fn with_physics(mut self, factory: PhysicsFactory) -> Self {
        self.physics = factory;
        self
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn session(&self) -> Session {
        self.screen.session()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn gameplay(&self) -> Option<&GameplayScreen> {
        match &self.screen {
            Screen::Gameplay(g) => Some(g),
            _ => None,
        }
    }

    pub fn gameplay_mut(&mut self) -> Option<&mut GameplayScreen> {
        match &mut self.screen {
            Screen::Gameplay(g) => Some(g),
            _ => None,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> GameResult<Control> {
        match self.screen.handle_input(event) {
            Some(trigger) => self.fire(trigger),
            None => Ok(Control::Continue),
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, audio: &mut dyn AudioPlayer) -> GameResult<Control> {
        match self.screen.update(audio) {
            Some(trigger) => self.fire(trigger),
            None => Ok(Control::Continue),
        }
    }

    pub fn draw(&self) -> DrawList {
        self.screen.draw()
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.draw());
    }

    pub fn cursor_visible(&self) -> bool {
        self.screen.cursor_visible()
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        let session = self.session();
        let (lives, score) = match self.gameplay() {
            Some(g) => (g.run().lives, Some(g.run().score)),
            None => (session.lives_carried, None),
        };
        ScreenSnapshot {
            screen: self.kind(),
            level: session.current_level,
            lives,
            score,
            transitions: self.transitions,
        }
    }

    fn fire(&mut self, trigger: Trigger) -> GameResult<Control> {
        let from = self.kind();
        match resolve(from, trigger, self.session()) {
            None => Ok(Control::Continue),
            Some(Step::ExitProcess) => {
                info!("Exit requested from start menu");
                Ok(Control::Exit)
            }
            Some(Step::Enter(to, session)) => {
                self.screen = self.enter(to, session)?;
                self.transitions += 1;
                info!(?from, ?to, ?trigger, "Screen transition");
                Ok(Control::Continue)
            }
        }
    }

    fn enter(&self, kind: ScreenKind, session: Session) -> GameResult<Screen> {
        let screen = match kind {
            ScreenKind::Start => Screen::Start(StartScreen::new(self.config.start_lives)),
            ScreenKind::Map { .. } => Screen::Map(DialogScreen::new(DialogKind::Map, session)),
            ScreenKind::LevelIntro { .. } => {
                Screen::LevelIntro(DialogScreen::new(DialogKind::LevelIntro, session))
            }
            ScreenKind::Gameplay { .. } => Screen::Gameplay(Box::new(GameplayScreen::enter(
                session,
                self.loader.as_ref(),
                self.physics,
                &self.config,
                RenderHandle(self.transitions + 1),
            )?)),
            ScreenKind::LevelOutro { .. } => {
                Screen::LevelOutro(DialogScreen::new(DialogKind::LevelOutro, session))
            }
            ScreenKind::GameOver => Screen::GameOver(GameOverScreen, session),
        };
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::MemoryLevelLoader;
    use bevy::math::Vec2;

    fn session(level: u32, lives: u32) -> Session {
        Session {
            current_level: level,
            lives_carried: lives,
        }
    }

    #[test]
    fn test_table_start() {
        let s = Session::new_game(0);
        assert_eq!(
            resolve(ScreenKind::Start, Trigger::Play, s),
            Some(Step::Enter(ScreenKind::Map { level: 1 }, s))
        );
        assert_eq!(
            resolve(ScreenKind::Start, Trigger::Exit, s),
            Some(Step::ExitProcess)
        );
    }

    #[test]
    fn test_table_map_to_intro_carries_lives() {
        let s = session(3, 2);
        assert_eq!(
            resolve(ScreenKind::Map { level: 3 }, Trigger::Enter, s),
            Some(Step::Enter(ScreenKind::LevelIntro { level: 3, lives: 2 }, s))
        );
    }

    #[test]
    fn test_table_gameplay_outcomes() {
        let s = session(2, 1);
        let playing = ScreenKind::Gameplay { level: 2, lives: 1 };
        assert_eq!(
            resolve(playing, Trigger::LevelComplete { lives: 4 }, s),
            Some(Step::Enter(
                ScreenKind::LevelOutro { level: 2, lives: 4 },
                session(2, 4)
            ))
        );
        assert_eq!(
            resolve(playing, Trigger::Defeated, s),
            Some(Step::Enter(ScreenKind::GameOver, s))
        );
    }

    #[test]
    fn test_table_outro_advances_level() {
        let s = session(2, 4);
        assert_eq!(
            resolve(ScreenKind::LevelOutro { level: 2, lives: 4 }, Trigger::Enter, s),
            Some(Step::Enter(ScreenKind::Map { level: 3 }, session(3, 4)))
        );
    }

    #[test]
    fn test_table_rejects_foreign_triggers() {
        let s = Session::new_game(0);
        assert_eq!(resolve(ScreenKind::Start, Trigger::Enter, s), None);
        assert_eq!(resolve(ScreenKind::Map { level: 1 }, Trigger::Play, s), None);
        assert_eq!(
            resolve(ScreenKind::LevelOutro { level: 1, lives: 0 }, Trigger::Defeated, s),
            None
        );
        assert_eq!(resolve(ScreenKind::GameOver, Trigger::Enter, s), None);
    }

    #[test]
    fn test_machine_starts_on_start_screen() {
        let vsm = ViewStateMachine::new(GameConfig::default(), Box::new(MemoryLevelLoader::new()));
        assert_eq!(vsm.kind(), ScreenKind::Start);
        assert!(vsm.cursor_visible());
        assert_eq!(vsm.session(), Session::new_game(0));
    }

    #[test]
    fn test_exit_button_requests_exit() {
        let mut vsm =
            ViewStateMachine::new(GameConfig::default(), Box::new(MemoryLevelLoader::new()));
        let control = vsm
            .handle_input(InputEvent::PointerPress(Vec2::new(600.0, 200.0)))
            .unwrap();
        assert_eq!(control, Control::Exit);
        assert_eq!(vsm.kind(), ScreenKind::Start);
    }

    #[test]
    fn test_missing_level_fails_on_gameplay_entry() {
        let mut vsm =
            ViewStateMachine::new(GameConfig::default(), Box::new(MemoryLevelLoader::new()));
        let enter = InputEvent::PointerPress(Vec2::new(150.0, 50.0));
        vsm.handle_input(InputEvent::PointerPress(Vec2::new(600.0, 400.0)))
            .unwrap();
        vsm.handle_input(enter).unwrap();
        assert_eq!(vsm.kind(), ScreenKind::LevelIntro { level: 1, lives: 0 });
        assert!(vsm.handle_input(enter).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let vsm = ViewStateMachine::new(GameConfig::default(), Box::new(MemoryLevelLoader::new()));
        let snap = vsm.snapshot();
        assert_eq!(snap.screen, ScreenKind::Start);
        assert!(snap.score.is_none());
        let restored: ScreenSnapshot = serde_json::from_str(&snap.to_json()).unwrap();
        assert_eq!(restored, snap);
    }
}
