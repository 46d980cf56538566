//! Friendly NPCs: the safe-zone guide and outpost merchants

use crate::core::config::NpcConfig;
use crate::core::types::Vec2;
use crate::world::chunk::ChunkCoord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcRole {
    Guide,
    Merchant,
}

/// Stable identity; a merchant is identified by the outpost chunk it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcId {
    Guide,
    Merchant(ChunkCoord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub role: NpcRole,
    pub position: Vec2,
    pub interaction_range: f32,
}

impl Npc {
    /// The Old Knight who lives in the safe zone for the whole session
    pub fn guide(config: &NpcConfig) -> Self {
        Self {
            id: NpcId::Guide,
            name: "Old Knight".into(),
            role: NpcRole::Guide,
            position: Vec2::from(config.guide_position),
            interaction_range: config.guide_range,
        }
    }

    pub fn merchant(coord: ChunkCoord, position: Vec2, interaction_range: f32) -> Self {
        Self {
            id: NpcId::Merchant(coord),
            name: "Wandering Merchant".into(),
            role: NpcRole::Merchant,
            position,
            interaction_range,
        }
    }

    /// Persistent NPCs survive distance pruning
    pub fn is_persistent(&self) -> bool {
        self.id == NpcId::Guide
    }

    pub fn in_range(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.interaction_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_is_persistent() {
        let guide = Npc::guide(&NpcConfig::default());
        assert!(guide.is_persistent());
        assert_eq!(guide.role, NpcRole::Guide);
        assert_eq!(guide.position, Vec2::new(100.0, 80.0));
    }

    #[test]
    fn test_merchant_range() {
        let merchant = Npc::merchant(ChunkCoord::new(2, 3), Vec2::new(2560.0, 3584.0), 120.0);
        assert!(!merchant.is_persistent());
        assert!(merchant.in_range(Vec2::new(2600.0, 3584.0)));
        assert!(!merchant.in_range(Vec2::new(2680.0, 3584.0)));
    }
}
