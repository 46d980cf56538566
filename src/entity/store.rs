//! Owner of every transient entity in a session

use crate::core::config::{EffectsConfig, NpcConfig};
use crate::core::types::Vec2;
use crate::entity::drop::{DropKind, LootDrop};
use crate::entity::effects::Effects;
use crate::entity::enemy::Enemy;
use crate::entity::npc::Npc;
use crate::entity::projectile::Projectile;

#[derive(Debug, Clone)]
pub struct EntityStore {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub drops: Vec<LootDrop>,
    pub effects: Effects,
    pub npcs: Vec<Npc>,
}

impl EntityStore {
    /// Empty store holding only the safe-zone guide
    pub fn new(effects: &EffectsConfig, npcs: &NpcConfig) -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            drops: Vec::new(),
            effects: Effects::new(effects),
            npcs: vec![Npc::guide(npcs)],
        }
    }

    /// Live non-boss enemies
    pub fn regular_enemy_count(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.is_alive() && !e.is_boss())
            .count()
    }

    /// Live enemies of any kind, boss included
    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.is_boss() && e.is_alive())
    }

    pub fn boss_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_boss()).count()
    }

    /// Remove enemies whose death has already been resolved
    pub fn purge_dead_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(Enemy::is_alive);
        before - self.enemies.len()
    }

    /// Drop enemies that wandered past the despawn radius; bosses stay
    pub fn despawn_distant(&mut self, player: Vec2, radius: f32) -> usize {
        let before = self.enemies.len();
        self.enemies
            .retain(|e| e.is_boss() || e.position.distance(player) < radius);
        before - self.enemies.len()
    }

    pub fn spawn_drop(&mut self, kind: DropKind, position: Vec2, value: u32, life: u32) {
        self.drops.push(LootDrop::new(kind, position, value, life));
    }

    /// Register an NPC unless one with the same id is already present
    pub fn add_npc(&mut self, npc: Npc) -> bool {
        if self.npcs.iter().any(|n| n.id == npc.id) {
            return false;
        }
        self.npcs.push(npc);
        true
    }

    /// Closest NPC whose interaction range covers `point`
    pub fn nearest_npc_in_range(&self, point: Vec2) -> Option<&Npc> {
        self.npcs
            .iter()
            .filter(|n| n.in_range(point))
            .min_by(|a, b| {
                a.position
                    .distance(point)
                    .total_cmp(&b.position.distance(point))
            })
    }
}
