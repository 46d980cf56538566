//! Player animation state machine
//!
//! The core never touches drawable frames. It only needs the length of each
//! named sequence, validated once at setup, and indexes modulo those lengths.

use crate::core::error::{GameError, Result};
use crate::entity::player::{AnimState, Player};
use serde::{Deserialize, Serialize};

/// Lengths of the three frame sequences supplied by the asset provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrameCounts")]
pub struct FrameCounts {
    walk: usize,
    attack: usize,
    death: usize,
}

/// Unchecked form read from an asset manifest
#[derive(Deserialize)]
struct RawFrameCounts {
    walk: usize,
    attack: usize,
    death: usize,
}

impl TryFrom<RawFrameCounts> for FrameCounts {
    type Error = GameError;

    fn try_from(raw: RawFrameCounts) -> Result<Self> {
        Self::new(raw.walk, raw.attack, raw.death)
    }
}

impl FrameCounts {
    /// Reject empty sequences; this is a setup-time fatal condition
    pub fn new(walk: usize, attack: usize, death: usize) -> Result<Self> {
        if walk == 0 {
            return Err(GameError::EmptyFrameSequence("walk"));
        }
        if attack == 0 {
            return Err(GameError::EmptyFrameSequence("attack"));
        }
        if death == 0 {
            return Err(GameError::EmptyFrameSequence("death"));
        }
        Ok(Self { walk, attack, death })
    }

    /// Build from the provider's actual frame lists
    pub fn from_sequences<T>(walk: &[T], attack: &[T], death: &[T]) -> Result<Self> {
        Self::new(walk.len(), attack.len(), death.len())
    }

    pub fn walk(&self) -> usize {
        self.walk
    }

    pub fn attack(&self) -> usize {
        self.attack
    }

    pub fn death(&self) -> usize {
        self.death
    }

    /// Sequence length played for a state; idle shows the first walk frame
    pub fn len_for(&self, state: AnimState) -> usize {
        match state {
            AnimState::Idle | AnimState::Walk => self.walk,
            AnimState::Attack => self.attack,
            AnimState::Dead => self.death,
        }
    }
}

impl Default for FrameCounts {
    fn default() -> Self {
        Self {
            walk: 6,
            attack: 4,
            death: 4,
        }
    }
}

/// Advance the player's frame counter by one tick.
///
/// A new frame is shown once the timer exceeds `frame_ticks`. Attack falls
/// back to idle at the end of its sequence; death holds its last frame.
pub fn step_player(player: &mut Player, frames: &FrameCounts, frame_ticks: u32) {
    player.frame_timer += 1;
    if player.frame_timer <= frame_ticks {
        return;
    }
    player.frame_timer = 0;

    if player.anim == AnimState::Idle {
        player.frame = 0;
        return;
    }

    let len = frames.len_for(player.anim);
    player.frame += 1;
    if player.frame >= len {
        match player.anim {
            AnimState::Dead => player.frame = len - 1,
            AnimState::Attack => {
                player.anim = AnimState::Idle;
                player.frame = 0;
            }
            _ => player.frame = 0,
        }
    }
}

/// The death sequence has reached its final frame
pub fn death_finished(player: &Player, frames: &FrameCounts) -> bool {
    player.anim == AnimState::Dead && player.frame + 1 >= frames.death()
}
