//! Loot pickups

use crate::core::types::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropKind {
    Xp,
    Health,
    Gold,
}

#[derive(Debug, Clone, Serialize)]
pub struct LootDrop {
    pub kind: DropKind,
    pub position: Vec2,
    pub value: u32,
    pub life: u32,
    /// Once set, the drop homes in on the player every tick
    pub magnetized: bool,
}

impl LootDrop {
    pub fn new(kind: DropKind, position: Vec2, value: u32, life: u32) -> Self {
        Self {
            kind,
            position,
            value,
            life,
            magnetized: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}
