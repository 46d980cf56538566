//! The player character

use crate::core::config::PlayerConfig;
use crate::core::types::{Facing, Vec2};
use serde::{Deserialize, Serialize};

/// Animation state; `Dead` is terminal until the session restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Attack,
    Dead,
}

/// Companion drone bought from a merchant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub position: Vec2,
    pub cooldown: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,

    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,

    pub level: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub gold: u32,
    pub damage: f32,

    pub facing: Facing,
    pub anim: AnimState,
    pub frame: usize,
    pub frame_timer: u32,

    pub attack_cooldown: u32,
    pub dash_cooldown: u32,
    /// Ticks left in the current dash; zero when not dashing
    pub dash_timer: u32,
    pub invulnerable: u32,

    pub drone: Option<Drone>,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            width: config.width,
            height: config.height,
            health: config.max_health,
            max_health: config.max_health,
            mana: config.max_mana,
            max_mana: config.max_mana,
            level: 1,
            xp: 0,
            max_xp: config.first_level_xp,
            gold: 0,
            damage: config.base_damage,
            facing: Facing::Right,
            anim: AnimState::Idle,
            frame: 0,
            frame_timer: 0,
            attack_cooldown: 0,
            dash_cooldown: 0,
            dash_timer: 0,
            invulnerable: 0,
            drone: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.anim != AnimState::Dead
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    pub fn has_drone(&self) -> bool {
        self.drone.is_some()
    }

    /// Subtract health, clamping at zero.
    ///
    /// Returns true only on the tick the player dies.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.anim = AnimState::Dead;
            self.frame = 0;
            self.frame_timer = 0;
            self.dash_timer = 0;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn regen_mana(&mut self, amount: f32) {
        if self.mana < self.max_mana {
            self.mana = (self.mana + amount).min(self.max_mana);
        }
    }

    /// Spend gold if the balance covers it
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    /// Where the drone hovers: behind the player's back, above the head
    pub fn drone_anchor(&self, offset_x: f32, offset_y: f32) -> Vec2 {
        Vec2::new(
            self.position.x - self.facing.sign() * offset_x,
            self.position.y + offset_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(&PlayerConfig::default());
        assert_eq!(player.level, 1);
        assert_eq!(player.max_xp, 100);
        assert_eq!(player.health, 200.0);
        assert_eq!(player.gold, 0);
        assert!(player.is_alive());
        assert!(!player.has_drone());
    }

    #[test]
    fn test_damage_clamps_and_kills_once() {
        let mut player = Player::new(&PlayerConfig::default());
        assert!(!player.take_damage(150.0));
        assert!(player.take_damage(500.0));
        assert_eq!(player.health, 0.0);
        assert_eq!(player.anim, AnimState::Dead);
        // Already dead: no second death
        assert!(!player.take_damage(10.0));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = Player::new(&PlayerConfig::default());
        player.health = 190.0;
        player.heal(50.0);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_try_spend_never_goes_negative() {
        let mut player = Player::new(&PlayerConfig::default());
        player.gold = 40;
        assert!(!player.try_spend(50));
        assert_eq!(player.gold, 40);
        assert!(player.try_spend(40));
        assert_eq!(player.gold, 0);
    }

    #[test]
    fn test_drone_anchor_follows_facing() {
        let mut player = Player::new(&PlayerConfig::default());
        player.position = Vec2::new(100.0, 100.0);
        assert_eq!(player.drone_anchor(30.0, -40.0), Vec2::new(70.0, 60.0));
        player.facing = Facing::Left;
        assert_eq!(player.drone_anchor(30.0, -40.0), Vec2::new(130.0, 60.0));
    }
}
