//! Combat resolution: melee swings, projectiles, and deaths

pub mod death;
pub mod melee;
pub mod ranged;

pub use death::{resolve_death, Fallen};
pub use melee::{break_crates, melee_attack};
pub use ranged::update_projectiles;

use crate::core::types::Vec2;
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use tracing::info;

/// Damage the player and open a fresh invulnerability window.
///
/// Returns true if this hit killed the player.
pub fn hurt_player(
    state: &mut GameState,
    damage: f32,
    invulnerability: u32,
    shake: f32,
    particles: usize,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let died = state.player.take_damage(damage);
    state.player.invulnerable = invulnerability;

    let at = state.player.position;
    let effects = &mut state.entities.effects;
    effects.text(at - Vec2::new(0.0, 30.0), format!("-{}", damage), colors::HURT);
    effects.burst(&mut state.rng, at, colors::HURT, particles);
    state.feedback.shake(shake);

    events.push(SimulationEvent::PlayerHit {
        damage,
        remaining: state.player.health,
    });
    if died {
        info!(tick = state.tick, score = state.score, "player died");
        events.push(SimulationEvent::PlayerDied { tick: state.tick });
    }
    died
}
