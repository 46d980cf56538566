//! Experience and level-ups

use crate::core::config::ProgressionConfig;
use crate::core::types::Vec2;
use crate::entity::player::Player;
use crate::render::colors;
use crate::simulation::state::GameState;
use tracing::info;

/// Particles thrown by a level-up
const LEVEL_UP_PARTICLES: usize = 20;

/// Apply at most one level-up if xp reached the threshold.
///
/// Only a single threshold crossing is processed per call; leftover xp
/// above the new threshold waits for the next gain.
pub fn check_level_up(player: &mut Player, config: &ProgressionConfig) -> bool {
    if player.xp < player.max_xp {
        return false;
    }
    player.xp -= player.max_xp;
    player.level += 1;
    player.max_xp = (player.max_xp as f32 * config.xp_growth).floor() as u32;
    player.max_health += config.health_per_level;
    player.max_mana += config.mana_per_level;
    player.damage += config.damage_per_level;
    player.health = player.max_health;
    player.mana = player.max_mana;
    true
}

/// Grant xp and run the level-up check with its feedback.
///
/// Returns the new level when one was gained.
pub fn apply_xp(state: &mut GameState, amount: u32) -> Option<u32> {
    state.player.xp = state.player.xp.saturating_add(amount);
    if !check_level_up(&mut state.player, &state.config.progression) {
        return None;
    }

    let at = state.player.position;
    let effects = &mut state.entities.effects;
    effects.text(at - Vec2::new(0.0, 40.0), "LEVEL UP!", colors::LEVEL_UP);
    effects.burst(&mut state.rng, at, colors::LEVEL_UP, LEVEL_UP_PARTICLES);
    state.feedback.shake(5.0);

    info!(level = state.player.level, max_xp = state.player.max_xp, "level up");
    Some(state.player.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, PlayerConfig};
    use crate::render::animation::FrameCounts;

    #[test]
    fn test_level_up_threshold() {
        let config = ProgressionConfig::default();
        let mut player = Player::new(&PlayerConfig::default());
        player.xp = 110;
        player.health = 10.0;

        assert!(check_level_up(&mut player, &config));
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 10);
        assert_eq!(player.max_xp, 150);
        assert_eq!(player.max_health, 220.0);
        assert_eq!(player.health, 220.0);
        assert_eq!(player.max_mana, 110.0);
        assert_eq!(player.damage, 30.0);
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let config = ProgressionConfig::default();
        let mut player = Player::new(&PlayerConfig::default());
        player.xp = 99;
        assert!(!check_level_up(&mut player, &config));
        assert_eq!(player.level, 1);
    }

    #[test]
    fn test_single_crossing_per_gain() {
        let mut state =
            GameState::new(GameConfig::default(), FrameCounts::default(), 1).unwrap();
        // Enough for two levels; only one is applied
        assert_eq!(apply_xp(&mut state, 300), Some(2));
        assert_eq!(state.player.xp, 200);
        assert_eq!(state.player.max_xp, 150);
        // The next gain picks up the remainder
        assert_eq!(apply_xp(&mut state, 0), Some(3));
        assert!(state.feedback.shake > 0.0);
    }
}
