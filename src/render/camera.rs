//! Follow camera
//!
//! Handles viewport positioning, zoom, and pointer aim. The camera
//! eases toward the player every tick; the presentation layer reads it.

use crate::core::config::CameraConfig;
use crate::core::types::Vec2;
use serde::Serialize;

/// Default viewport when the presentation layer has not reported one
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    /// Center position in world coordinates
    pub position: Vec2,
    /// Zoom level (1.0 = normal, below 1.0 zooms out)
    pub zoom: f32,
    /// Viewport size in pixels
    pub viewport_size: (f32, f32),
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            viewport_size: (viewport_width, viewport_height),
        }
    }

    /// Ease position and zoom toward their targets
    pub fn follow(&mut self, target: Vec2, target_zoom: f32, config: &CameraConfig) {
        self.zoom += (target_zoom - self.zoom) * config.zoom_rate;
        self.position += (target - self.position) * config.follow_rate;
    }

    /// Aim direction for a pointer in screen space, measured from the viewport center
    pub fn aim_direction(&self, pointer: Vec2) -> Vec2 {
        pointer - Vec2::new(self.viewport_size.0 / 2.0, self.viewport_size.1 / 2.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }
}
