//! Centralized game constants for the platformer core.
//!
//! Defaults for [`crate::config::GameConfig`] and the fixed screen-space
//! layout of menus and HUD live here. Per-frame tunables are read from the
//! config so a level designer can change them without recompiling.

// =====================================================
// Window
// =====================================================

pub const SCREEN_TITLE: &str = "Platformer";

/// Logical screen width in pixels; also the camera's right-edge clamp width.
pub const SCREEN_WIDTH: f32 = 800.0;

pub const SCREEN_HEIGHT: f32 = 600.0;

/// Nominal fixed update rate (frames per second)
pub const TICK_RATE_HZ: f64 = 60.0;

// =====================================================
// Tiles
// =====================================================

pub const SPRITE_PIXEL_SIZE: f32 = 16.0;

pub const TILE_SCALING: f32 = 2.0;

/// World pixels per tile column: SPRITE_PIXEL_SIZE * TILE_SCALING
pub const GRID_PIXEL_SIZE: f32 = SPRITE_PIXEL_SIZE * TILE_SCALING;

// =====================================================
// Player movement (pixels per frame)
// =====================================================

pub const PLAYER_MOVEMENT_SPEED: f32 = 3.0;

pub const PLAYER_JUMP_SPEED: f32 = 15.0;

pub const GRAVITY: f32 = 1.0;

/// Player collision box (width, height) centred on the player position
pub const PLAYER_SIZE: (f32, f32) = (32.0, 48.0);

pub const PLAYER_START_X: f32 = 128.0;

pub const PLAYER_START_Y: f32 = 128.0;

/// Ground check distance used when deciding whether a jump may start
pub const JUMP_TOLERANCE: f32 = 10.0;

/// Ground check distance used when deciding whether the player hangs on a ladder
pub const STAND_TOLERANCE: f32 = 5.0;

/// Vertical speed above which the climb animation advances a frame
pub const CLIMB_ANIM_THRESHOLD: f32 = 1.0;

// =====================================================
// Health & score
// =====================================================

/// Lives carried into the first level
pub const START_LIVES: u32 = 0;

/// Below this world y the player is considered to have fallen off the map
pub const FALL_OUT_Y: f32 = -100.0;

/// Right-most lives icon centre (screen space); further icons stack left
pub const LIFE_ICON_ORIGIN: (f32, f32) = (770.0, 570.0);

pub const LIFE_ICON_SPACING: f32 = 24.0;

/// Drawn size of one lives icon (8 px art at scale 2)
pub const LIFE_ICON_SIZE: f32 = 16.0;

/// Score text anchor (screen space, bottom-left)
pub const SCORE_TEXT_POS: (f32, f32) = (10.0, 10.0);

pub const SCORE_FONT_SIZE: f32 = 18.0;

// =====================================================
// Menu layout (screen space, origin bottom-left)
// =====================================================

/// Start menu "Play" hit region: (min_x, min_y, max_x, max_y)
pub const PLAY_REGION: (f32, f32, f32, f32) = (500.0, 350.0, 750.0, 440.0);

/// Start menu "Exit" hit region
pub const EXIT_REGION: (f32, f32, f32, f32) = (500.0, 150.0, 750.0, 240.0);

/// "Enter"/next button hit region shared by map and level dialogs
pub const ENTER_REGION: (f32, f32, f32, f32) = (25.0, 20.0, 275.0, 80.0);

pub const PLAY_BUTTON_CENTER: (f32, f32) = (640.0, 400.0);

pub const EXIT_BUTTON_CENTER: (f32, f32) = (640.0, 200.0);

pub const MENU_BUTTON_SIZE: (f32, f32) = (235.0, 77.0);

pub const ENTER_BUTTON_CENTER: (f32, f32) = (150.0, 50.0);

pub const ENTER_BUTTON_SIZE: (f32, f32) = (247.0, 58.0);

/// Hover magnification on the start menu
pub const MENU_HOVER_SCALE: f32 = 1.2;

/// Hover magnification on map and level dialogs
pub const DIALOG_HOVER_SCALE: f32 = 1.1;
