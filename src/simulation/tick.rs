//! Tick system - orchestrates one fixed simulation step
//!
//! Phase order matters and is fixed:
//! timers -> player -> animation -> drops -> projectiles -> spawns -> enemies
//! -> effects -> camera -> NPC discovery
//!
//! A hit-stop freezes everything except its own countdown. Once the death
//! animation has finished the session is over and ticks are no-ops.

use crate::ai::update_enemies;
use crate::combat::update_projectiles;
use crate::core::types::{Tick, Vec2};
use crate::entity::drop::DropKind;
use crate::entity::enemy::EnemyKind;
use crate::progression::leveling::apply_xp;
use crate::render::animation::{death_finished, step_player};
use crate::render::colors;
use crate::simulation::player_update::update_player;
use crate::simulation::state::GameState;
use crate::spawn::run_spawn_director;
use crate::ui::input::Intents;
use tracing::info;

/// Events generated during a simulation tick
///
/// These are returned by `run_simulation_tick` for the event log and the driver.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// An enemy took damage from a swing, fireball, or drone bolt
    EnemyHit {
        kind: EnemyKind,
        damage: f32,
        /// Health left after the hit, clamped at zero
        remaining: f32,
    },
    /// An enemy died; emitted exactly once per enemy
    EnemyKilled {
        kind: EnemyKind,
        position: Vec2,
        /// Score awarded for the kill
        score: u64,
    },
    /// Crates smashed by one swing or one fireball impact
    CratesBroken { count: usize },
    /// The player lost health
    PlayerHit { damage: f32, remaining: f32 },
    /// The hit that dropped the player to zero
    PlayerDied { tick: Tick },
    BossSpawned { level: u32 },
    LevelUp { level: u32 },
    /// A loot drop was collected
    Pickup { kind: DropKind, value: u32 },
    /// The death animation finished; no further ticks advance
    GameOver { score: u64, level: u32 },
}

/// Run a single simulation tick.
///
/// Returns the events produced in phase order.
pub fn run_simulation_tick(state: &mut GameState, intents: &Intents) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    if state.game_over {
        return events;
    }
    if state.feedback.hit_stop > 0 {
        state.feedback.hit_stop -= 1;
        return events;
    }

    state.tick += 1;
    state.day.advance(&state.config.time);
    let camera = &state.config.camera;
    state.feedback.decay_shake(camera.shake_decay, camera.shake_floor);

    update_player(state, intents, &mut events);

    step_player(&mut state.player, &state.frames, state.config.player.frame_ticks);
    if death_finished(&state.player, &state.frames) {
        state.game_over = true;
        info!(
            tick = state.tick,
            score = state.score,
            level = state.player.level,
            "game over"
        );
        events.push(SimulationEvent::GameOver {
            score: state.score,
            level: state.player.level,
        });
    }

    update_drops(state, &mut events);

    update_projectiles(state, &mut events);
    state.entities.purge_dead_enemies();

    run_spawn_director(state, &mut events);
    update_enemies(state, &mut events);

    state.entities.effects.update();
    follow_camera(state);
    state.absorb_discovered_npcs();

    events
}

/// Age drops, collect those in reach, and pull magnetized ones closer
fn update_drops(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    let cfg = state.config.drops.clone();
    let mut drops = std::mem::take(&mut state.entities.drops);

    for drop in drops.iter_mut() {
        drop.life = drop.life.saturating_sub(1);
        let gap = state.player.position - drop.position;
        let distance = gap.length();

        if distance < cfg.pickup_range {
            collect(state, drop.kind, drop.value, events);
            drop.life = 0;
        } else if distance < cfg.magnet_range || drop.magnetized {
            drop.magnetized = true;
            drop.position += gap * cfg.magnet_pull;
        }
    }

    drops.retain(|d| !d.is_expired());
    drops.append(&mut state.entities.drops);
    state.entities.drops = drops;
}

fn collect(state: &mut GameState, kind: DropKind, value: u32, events: &mut Vec<SimulationEvent>) {
    let at = state.player.position;
    let above = at - Vec2::new(0.0, 40.0);

    match kind {
        DropKind::Xp => {
            if let Some(level) = apply_xp(state, value) {
                events.push(SimulationEvent::LevelUp { level });
            }
            state.entities.effects.burst(&mut state.rng, at, colors::XP, 2);
        }
        DropKind::Health => {
            state.player.heal(value as f32);
            let effects = &mut state.entities.effects;
            effects.text(above, format!("+{}", value), colors::HEAL);
            effects.burst(&mut state.rng, at, colors::HEAL, 8);
        }
        DropKind::Gold => {
            state.player.gold = state.player.gold.saturating_add(value);
            let effects = &mut state.entities.effects;
            effects.text(above, format!("+{} G", value), colors::GOLD);
            effects.burst(&mut state.rng, at, colors::GOLD, 5);
        }
    }

    events.push(SimulationEvent::Pickup { kind, value });
}

/// Ease toward the player; zoom out while dashing or facing a boss
fn follow_camera(state: &mut GameState) {
    let cfg = &state.config.camera;
    let zoom = if state.player.is_dashing() {
        cfg.dash_zoom
    } else if state.entities.boss_alive() {
        cfg.boss_zoom
    } else {
        1.0
    };
    state.camera.follow(state.player.position, zoom, cfg);
}
