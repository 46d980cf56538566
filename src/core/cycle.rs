//! Day/night cycle
//!
//! The cycle is a phase in [0, 1) advanced a fixed amount every tick.
//! Night is a sub-range of the phase; darkness peaks halfway through.

use crate::core::config::TimeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayCycle {
    phase: f32,
}

impl DayCycle {
    pub fn new(start_phase: f32) -> Self {
        Self {
            phase: start_phase.rem_euclid(1.0),
        }
    }

    pub fn from_config(config: &TimeConfig) -> Self {
        Self::new(config.start_phase)
    }

    pub fn advance(&mut self, config: &TimeConfig) {
        self.phase += config.cycle_speed;
        if self.phase > 1.0 {
            self.phase = 0.0;
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Night is the open interval (night_start, night_end)
    pub fn is_night(&self, config: &TimeConfig) -> bool {
        self.phase > config.night_start && self.phase < config.night_end
    }

    /// 0 at dawn/dusk, 1 at the middle of the cycle
    pub fn darkness(&self) -> f32 {
        (self.phase * std::f32::consts::PI).sin()
    }

    /// Screen-edge darkening strength for the presentation layer
    pub fn vignette(&self) -> f32 {
        0.3 + self.darkness() * 0.5
    }
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::from_config(&TimeConfig::default())
    }
}
