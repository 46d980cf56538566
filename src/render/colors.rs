//! Color palette for cosmetic effects
//!
//! The core only tags particles and floating text with a color; how that
//! color is drawn is up to the presentation layer.

use serde::{Deserialize, Serialize};

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed 0xRRGGBB value
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }
}

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const DAMAGE: Color = Color::new(0.937, 0.267, 0.267, 1.0);
pub const HURT: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const HEAL: Color = Color::new(0.937, 0.267, 0.267, 1.0);
pub const MANA: Color = Color::new(0.231, 0.51, 0.965, 1.0);
pub const XP: Color = Color::new(0.984, 0.749, 0.141, 1.0);
pub const GOLD: Color = Color::new(0.988, 0.827, 0.302, 1.0);
pub const LEVEL_UP: Color = Color::new(0.984, 0.749, 0.141, 1.0);
pub const PROJECTILE_HIT: Color = Color::new(1.0, 0.8, 0.0, 1.0);
pub const RUBBLE: Color = Color::new(0.667, 0.667, 0.667, 1.0);
pub const CRATE_SPLINTERS: Color = Color::new(0.365, 0.251, 0.216, 1.0);
pub const FIREBALL: Color = Color::new(0.937, 0.267, 0.267, 1.0);
pub const DRONE_BOLT: Color = Color::new(0.659, 0.333, 0.969, 1.0);
pub const ARROW: Color = Color::new(0.996, 0.953, 0.78, 1.0);
pub const BLOOD: Color = Color::new(0.498, 0.114, 0.114, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_darken_keeps_alpha() {
        let c = Color::new(1.0, 0.5, 0.2, 0.7).darken(0.5);
        assert_eq!(c.r, 0.5);
        assert_eq!(c.a, 0.7);
    }
}
