//! Logical input surface
//!
//! Physical devices are translated into these intents before they reach the
//! simulation. Contradictory directions cancel instead of erroring.

use crate::core::types::Vec2;
use serde::{Deserialize, Serialize};

/// Held movement directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalInput {
    /// Net movement vector; diagonals are normalized, opposing keys cancel
    pub fn vector(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }
}

/// Everything the player asked for on one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intents {
    pub movement: DirectionalInput,
    pub melee: bool,
    pub cast: bool,
    pub dash: bool,
    pub interact: bool,
    /// Pointer in screen space, used only for aiming
    pub pointer: Option<Vec2>,
}

impl Intents {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: DirectionalInput) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}
