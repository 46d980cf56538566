//! Projectiles: fireballs, drone bolts and arrows

use crate::core::types::Vec2;
use crate::render::colors::Color;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
    Drone,
}

impl ProjectileOwner {
    /// Player and drone shots hit enemies; enemy shots hit the player
    pub fn targets_enemies(self) -> bool {
        !matches!(self, ProjectileOwner::Enemy)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: u32,
    pub damage: f32,
    pub radius: f32,
    pub color: Color,
    /// Always leave trail particles (fireballs)
    pub trail: bool,
}

impl Projectile {
    /// Fired from `origin` along `direction` (normalized here)
    #[allow(clippy::too_many_arguments)]
    pub fn aimed(
        owner: ProjectileOwner,
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        life: u32,
        damage: f32,
        radius: f32,
        color: Color,
    ) -> Self {
        Self {
            owner,
            position: origin,
            velocity: direction.normalize_or_zero() * speed,
            life,
            damage,
            radius,
            color,
            trail: false,
        }
    }

    pub fn with_trail(mut self) -> Self {
        self.trail = true;
        self
    }

    pub fn is_spent(&self) -> bool {
        self.life == 0
    }

    /// Terminate on the current tick
    pub fn expire(&mut self) {
        self.life = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors;

    #[test]
    fn test_aimed_velocity_has_speed() {
        let p = Projectile::aimed(
            ProjectileOwner::Player,
            Vec2::ZERO,
            Vec2::new(3.0, 4.0),
            10.0,
            60,
            50.0,
            12.0,
            colors::FIREBALL,
        );
        assert!((p.velocity.length() - 10.0).abs() < 1e-5);
        assert!(!p.trail);
        assert!(p.with_trail().trail);
    }

    #[test]
    fn test_owner_targets() {
        assert!(ProjectileOwner::Player.targets_enemies());
        assert!(ProjectileOwner::Drone.targets_enemies());
        assert!(!ProjectileOwner::Enemy.targets_enemies());
    }
}
