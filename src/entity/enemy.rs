//! Hostile entities

use crate::core::types::{EntityId, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Skeleton,
    Archer,
    Boss,
}

impl EnemyKind {
    /// Archers keep their distance and shoot; everything else deals contact damage
    pub fn is_ranged(self) -> bool {
        matches!(self, EnemyKind::Archer)
    }

    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::Boss)
    }
}

/// Result of applying damage to an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Survived with this much health left
    Wounded(f32),
    /// This hit took the enemy from alive to dead
    Killed,
    /// Already dead; the hit was ignored
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    pub elite: bool,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub speed: f32,
    pub damage: f32,
    pub flash_timer: u32,
    pub anim_timer: f32,
    pub attack_timer: u32,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtract exactly `amount` from health.
    ///
    /// Dead enemies are never hit again, so `Killed` is reported once.
    pub fn apply_damage(&mut self, amount: f32, flash_ticks: u32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        self.flash_timer = flash_ticks;
        if self.health <= 0.0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded(self.health)
        }
    }

    /// Melee target box; bosses are drawn three times larger
    pub fn hurtbox(&self, regular_scale: f32, boss_scale: f32) -> Rect {
        let scale = if self.is_boss() { boss_scale } else { regular_scale };
        Rect::new(
            self.position.x,
            self.position.y,
            self.width * scale,
            self.height * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime(health: f32) -> Enemy {
        Enemy {
            id: EntityId::new(),
            kind: EnemyKind::Slime,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            width: 24.0,
            height: 24.0,
            health,
            max_health: health,
            elite: false,
            aggro_range: 800.0,
            attack_range: 40.0,
            speed: 1.2,
            damage: 5.0,
            flash_timer: 0,
            anim_timer: 0.0,
            attack_timer: 0,
        }
    }

    #[test]
    fn test_damage_is_exact() {
        let mut enemy = slime(60.0);
        assert_eq!(enemy.apply_damage(25.0, 10), DamageOutcome::Wounded(35.0));
        assert_eq!(enemy.health, 35.0);
        assert_eq!(enemy.flash_timer, 10);
    }

    #[test]
    fn test_kill_reported_once() {
        let mut enemy = slime(10.0);
        assert_eq!(enemy.apply_damage(25.0, 10), DamageOutcome::Killed);
        assert!(enemy.health <= 0.0);
        assert_eq!(enemy.apply_damage(25.0, 10), DamageOutcome::Ignored);
        assert_eq!(enemy.health, -15.0);
    }

    #[test]
    fn test_boss_hurtbox_is_larger() {
        let mut enemy = slime(10.0);
        assert_eq!(enemy.hurtbox(1.5, 3.0).w, 36.0);
        enemy.kind = EnemyKind::Boss;
        enemy.width = 64.0;
        assert_eq!(enemy.hurtbox(1.5, 3.0).w, 192.0);
    }

    #[test]
    fn test_kind_traits() {
        assert!(EnemyKind::Archer.is_ranged());
        assert!(!EnemyKind::Boss.is_ranged());
        assert!(EnemyKind::Boss.is_boss());
    }
}
