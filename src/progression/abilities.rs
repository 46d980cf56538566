//! Level-gated abilities: dash, fireball, and the companion drone

use crate::core::config::{AbilityConfig, DroneConfig};
use crate::core::types::Vec2;
use crate::entity::player::Drone;
use crate::entity::projectile::{Projectile, ProjectileOwner};
use crate::render::colors;
use crate::simulation::state::GameState;

/// Result of an ability intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityOutcome {
    Used,
    /// Below the unlock level; a lock message was shown
    Locked,
    /// On cooldown, out of mana, already active, or dead
    NotReady,
}

/// Dash cooldown in ticks, shrinking past the reduction offset level
pub fn dash_cooldown(config: &AbilityConfig, level: u32) -> u32 {
    let steps = level.saturating_sub(config.dash_reduction_offset) as f32;
    let reduction = (steps * config.dash_reduction_per_level).min(config.dash_max_reduction);
    (config.dash_cooldown as f32 * (1.0 - reduction)).round() as u32
}

pub fn fireball_cost(config: &AbilityConfig, level: u32) -> f32 {
    (config.fireball_mana_cost - level as f32 * config.fireball_cost_per_level)
        .max(config.fireball_min_cost)
}

pub fn fireball_damage(config: &AbilityConfig, level: u32) -> f32 {
    config.fireball_damage + level as f32 * config.fireball_damage_per_level
}

fn show_lock(state: &mut GameState, unlock_level: u32) {
    let at = state.player.position - Vec2::new(0.0, 50.0);
    state
        .entities
        .effects
        .text(at, format!("Lvl {} Required", unlock_level), colors::HURT);
}

pub fn try_dash(state: &mut GameState) -> AbilityOutcome {
    let config = state.config.abilities.clone();
    if state.player.level < config.dash_unlock_level {
        let unlock = config.dash_unlock_level;
        show_lock(state, unlock);
        return AbilityOutcome::Locked;
    }

    let player = &mut state.player;
    if player.dash_cooldown > 0 || player.is_dashing() || !player.is_alive() {
        return AbilityOutcome::NotReady;
    }

    player.dash_timer = config.dash_duration;
    player.dash_cooldown = dash_cooldown(&config, player.level);
    player.invulnerable = config.dash_duration + config.dash_invulnerability_bonus;

    let at = player.position;
    state
        .entities
        .effects
        .burst(&mut state.rng, at, colors::WHITE, 10);
    state.feedback.shake(2.0);
    AbilityOutcome::Used
}

/// Launch a fireball along `aim`; a zero aim falls back to the facing direction
pub fn try_cast(state: &mut GameState, aim: Vec2) -> AbilityOutcome {
    let config = state.config.abilities.clone();
    if state.player.level < config.fireball_unlock_level {
        let unlock = config.fireball_unlock_level;
        show_lock(state, unlock);
        return AbilityOutcome::Locked;
    }

    let cost = fireball_cost(&config, state.player.level);
    let player = &mut state.player;
    if !player.is_alive() || player.mana < cost {
        return AbilityOutcome::NotReady;
    }
    player.mana -= cost;

    let direction = if aim.length_squared() > 0.0 {
        aim
    } else {
        Vec2::new(player.facing.sign(), 0.0)
    };
    let origin = player.position - Vec2::new(0.0, config.fireball_origin_lift);
    let fireball = Projectile::aimed(
        ProjectileOwner::Player,
        origin,
        direction,
        config.fireball_speed,
        config.fireball_life,
        fireball_damage(&config, player.level),
        config.fireball_radius,
        colors::FIREBALL,
    )
    .with_trail();

    state.entities.projectiles.push(fireball);
    state.feedback.shake(3.0);
    AbilityOutcome::Used
}

/// Grant the companion, hovering at its anchor
pub fn grant_drone(state: &mut GameState) {
    let config = &state.config.drone;
    let anchor = state.player.drone_anchor(config.offset_x, config.offset_y);
    state.player.drone = Some(Drone {
        position: anchor,
        cooldown: 0,
    });
}

/// Ease the drone toward its anchor and fire at the nearest enemy when ready
pub fn update_drone(state: &mut GameState) {
    let DroneConfig {
        offset_x,
        offset_y,
        follow_rate,
        cooldown,
        range,
        damage,
        bolt_speed,
        bolt_life,
        bolt_radius,
    } = state.config.drone;

    let anchor = state.player.drone_anchor(offset_x, offset_y);
    let player_pos = state.player.position;
    let Some(drone) = state.player.drone.as_mut() else {
        return;
    };

    drone.position += (anchor - drone.position) * follow_rate;
    if drone.cooldown > 0 {
        drone.cooldown -= 1;
        return;
    }

    let target = state
        .entities
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .map(|e| (e.position, e.position.distance(player_pos)))
        .filter(|&(_, d)| d < range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos);

    if let Some(target) = target {
        drone.cooldown = cooldown;
        let bolt = Projectile::aimed(
            ProjectileOwner::Drone,
            drone.position,
            target - drone.position,
            bolt_speed,
            bolt_life,
            damage,
            bolt_radius,
            colors::DRONE_BOLT,
        );
        state.entities.projectiles.push(bolt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::render::animation::FrameCounts;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), FrameCounts::default(), 9).unwrap()
    }

    #[test]
    fn test_dash_cooldown_scaling() {
        let config = AbilityConfig::default();
        assert_eq!(dash_cooldown(&config, 3), 180);
        assert_eq!(dash_cooldown(&config, 5), 162);
        // Reduction floors at half
        assert_eq!(dash_cooldown(&config, 13), 90);
        assert_eq!(dash_cooldown(&config, 40), 90);
    }

    #[test]
    fn test_fireball_cost_floor() {
        let config = AbilityConfig::default();
        assert_eq!(fireball_cost(&config, 2), 33.0);
        assert_eq!(fireball_cost(&config, 30), 10.0);
        assert_eq!(fireball_damage(&config, 2), 60.0);
    }

    #[test]
    fn test_dash_locked_below_level() {
        let mut state = state();
        assert_eq!(try_dash(&mut state), AbilityOutcome::Locked);
        assert!(!state.player.is_dashing());
        assert_eq!(
            state.entities.effects.texts.iter().last().map(|t| t.text.as_str()),
            Some("Lvl 3 Required")
        );
    }

    #[test]
    fn test_dash_sets_timers() {
        let mut state = state();
        state.player.level = 3;
        assert_eq!(try_dash(&mut state), AbilityOutcome::Used);
        assert_eq!(state.player.dash_timer, 15);
        assert_eq!(state.player.dash_cooldown, 180);
        assert_eq!(state.player.invulnerable, 20);
        assert_eq!(try_dash(&mut state), AbilityOutcome::NotReady);
    }

    #[test]
    fn test_cast_spends_mana() {
        let mut state = state();
        state.player.level = 2;
        assert_eq!(try_cast(&mut state, Vec2::new(1.0, 0.0)), AbilityOutcome::Used);
        assert_eq!(state.player.mana, 67.0);
        let fireball = &state.entities.projectiles[0];
        assert_eq!(fireball.owner, ProjectileOwner::Player);
        assert_eq!(fireball.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(fireball.position, Vec2::new(0.0, -10.0));
        assert!(fireball.trail);
    }

    #[test]
    fn test_cast_without_mana() {
        let mut state = state();
        state.player.level = 2;
        state.player.mana = 5.0;
        assert_eq!(try_cast(&mut state, Vec2::X), AbilityOutcome::NotReady);
        assert_eq!(state.player.mana, 5.0);
        assert!(state.entities.projectiles.is_empty());
    }

    #[test]
    fn test_drone_without_targets_holds_fire() {
        let mut state = state();
        grant_drone(&mut state);
        update_drone(&mut state);
        assert!(state.entities.projectiles.is_empty());
        assert!(state.player.has_drone());
    }
}
