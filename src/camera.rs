use bevy::math::Vec2;

use crate::constants::SCREEN_WIDTH;

/// Lower-left corner of the world camera, recomputed every frame from the
/// post-update player position. No smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollowController {
    pub viewport: Vec2,
    /// Width used for the right-edge clamp
    pub screen_width: f32,
}

impl CameraFollowController {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            screen_width: SCREEN_WIDTH,
        }
    }

    /// X is clamped to `[0, mapWidth - screenWidth]`; Y only from below.
    pub fn focus(&self, player_center: Vec2, map_width: f32) -> Vec2 {
        let max_x = (map_width - self.screen_width).max(0.0);
        let x = (player_center.x - self.viewport.x / 2.0).clamp(0.0, max_x);
        let y = (player_center.y - self.viewport.y / 2.0).max(0.0);
        Vec2::new(x, y)
    }
}
