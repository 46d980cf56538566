//! Death resolution: score, loot table, and the corpse's cosmetics

use crate::core::types::Vec2;
use crate::entity::drop::DropKind;
use crate::entity::enemy::{Enemy, EnemyKind};
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use rand::Rng;
use tracing::debug;

/// What is left to resolve once an enemy's health reached zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fallen {
    pub kind: EnemyKind,
    pub position: Vec2,
}

impl From<&Enemy> for Fallen {
    fn from(enemy: &Enemy) -> Self {
        Self {
            kind: enemy.kind,
            position: enemy.position,
        }
    }
}

/// Run exactly once per enemy, on the hit that killed it
pub fn resolve_death(state: &mut GameState, fallen: Fallen, events: &mut Vec<SimulationEvent>) {
    let boss = fallen.kind.is_boss();
    let at = fallen.position;
    let combat = &state.config.combat;
    let drops = state.config.drops.clone();

    let base = if boss { combat.boss_kill_score } else { combat.kill_score };
    let gained = base * state.player.level as u64;
    state.score += gained;

    let effects = &mut state.entities.effects;
    effects.burst(&mut state.rng, at, colors::WHITE, if boss { 50 } else { 10 });
    effects.decal(&mut state.rng, at);

    let xp = if boss {
        drops.xp_value * drops.boss_xp_multiplier
    } else {
        drops.xp_value
    };
    state.entities.spawn_drop(DropKind::Xp, at, xp, drops.life);

    if state.rng.gen::<f32>() < drops.gold_chance || boss {
        let span = (drops.gold_max - drops.gold_min) as f32;
        let mut gold = (drops.gold_min as f32 + state.rng.gen::<f32>() * span).floor() as u32;
        if boss {
            gold *= drops.boss_gold_multiplier;
        }
        state.entities.spawn_drop(DropKind::Gold, at, gold, drops.life);
    }

    if state.rng.gen::<f32>() < drops.health_chance || boss {
        let offset = at + Vec2::new(drops.health_offset, 0.0);
        state
            .entities
            .spawn_drop(DropKind::Health, offset, drops.health_value, drops.life);
    }

    if boss {
        state.feedback.shake(20.0);
    }

    debug!(kind = ?fallen.kind, score = state.score, "enemy killed");
    events.push(SimulationEvent::EnemyKilled {
        kind: fallen.kind,
        position: at,
        score: gained,
    });
}
