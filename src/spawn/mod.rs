//! Spawn director
//!
//! Keeps the enemy population near a level- and time-dependent target,
//! placing newcomers in an annulus around the player, and brings in a boss
//! at every boss level.

use crate::core::config::{EnemyConfig, SpawnConfig};
use crate::core::types::{from_angle, EntityId, Vec2};
use crate::entity::enemy::{Enemy, EnemyKind};
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use crate::world::tile::Biome;
use rand::Rng;
use std::f32::consts::TAU;
use tracing::{debug, info};

/// Target population for a level; doubled (cap included) at night
pub fn desired_enemy_count(config: &SpawnConfig, level: u32, night: bool) -> usize {
    let multiplier = if night { config.night_multiplier } else { 1 };
    let wanted = (config.base_population + config.population_per_level * level) * multiplier;
    wanted.min(config.population_cap * multiplier) as usize
}

/// A boss level is a positive multiple of the interval, level 1 excluded
pub fn is_boss_level(level: u32, interval: u32) -> bool {
    level > 1 && level % interval == 0
}

pub fn should_spawn_boss(state: &GameState) -> bool {
    is_boss_level(state.player.level, state.config.boss.level_interval)
        && state.entities.boss_count() == 0
}

/// Biome-weighted enemy type
pub fn pick_enemy_kind(biome: Biome, rng: &mut impl Rng) -> EnemyKind {
    match biome {
        Biome::Desert => {
            if rng.gen::<f32>() > 0.6 {
                EnemyKind::Archer
            } else {
                EnemyKind::Skeleton
            }
        }
        Biome::Corruption => {
            if rng.gen::<f32>() > 0.5 {
                EnemyKind::Skeleton
            } else if rng.gen::<f32>() > 0.5 {
                EnemyKind::Archer
            } else {
                EnemyKind::Slime
            }
        }
        Biome::Grass | Biome::Outpost => {
            if rng.gen::<f32>() > 0.8 {
                EnemyKind::Archer
            } else {
                EnemyKind::Slime
            }
        }
    }
}

/// Place the boss at a fixed distance in a random direction
pub fn spawn_boss(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    let boss = &state.config.boss;
    let level = state.player.level;
    let angle = state.rng.gen::<f32>() * TAU;
    let position = state.player.position + from_angle(angle) * boss.spawn_distance;
    let health = boss.health_per_level * level as f32;

    state.entities.enemies.push(Enemy {
        id: EntityId::new(),
        kind: EnemyKind::Boss,
        position,
        velocity: Vec2::ZERO,
        width: boss.size,
        height: boss.size,
        health,
        max_health: health,
        elite: false,
        aggro_range: boss.aggro_range,
        attack_range: boss.attack_range,
        speed: boss.speed,
        damage: boss.base_damage + boss.damage_per_level * level as f32,
        flash_timer: 0,
        anim_timer: 0.0,
        attack_timer: 0,
    });

    let above = state.player.position - Vec2::new(0.0, 100.0);
    state
        .entities
        .effects
        .text(above, "BOSS SPAWNED!", colors::HURT);
    state.feedback.shake(10.0);

    info!(level, x = position.x, y = position.y, "boss spawned");
    events.push(SimulationEvent::BossSpawned { level });
}

/// Build a regular enemy scaled to the player's level
fn regular_enemy(
    config: &EnemyConfig,
    kind: EnemyKind,
    position: Vec2,
    level: u32,
    night: bool,
    rng: &mut impl Rng,
    elite_chance: f32,
) -> Enemy {
    let level_f = level as f32;
    let elite = rng.gen::<f32>() < elite_chance;
    let mut health = config.base_health + config.health_per_level * level_f;
    if elite {
        health *= config.elite_health_multiplier;
    }
    let jitter = config.speed_jitter_min + rng.gen::<f32>() * config.speed_jitter_span;
    let night_factor = if night { config.night_speed_multiplier } else { 1.0 };

    Enemy {
        id: EntityId::new(),
        kind,
        position,
        velocity: Vec2::ZERO,
        width: config.size,
        height: config.size,
        health,
        max_health: health,
        elite,
        aggro_range: if night {
            config.night_aggro_range
        } else {
            config.aggro_range
        },
        attack_range: if kind.is_ranged() {
            config.archer_range
        } else {
            config.melee_range
        },
        speed: (config.base_speed + config.speed_per_level * level_f) * jitter * night_factor,
        damage: config.base_damage + (config.damage_per_level * level_f).floor(),
        flash_timer: 0,
        anim_timer: rng.gen::<f32>() * 100.0,
        attack_timer: 0,
    }
}

/// Try a bounded number of placements while the population is short.
///
/// Returns how many enemies were added.
pub fn spawn_enemies(state: &mut GameState, desired: usize, night: bool) -> usize {
    let spawn = state.config.spawn.clone();
    let level = state.player.level;
    let mut spawned = 0;

    for _ in 0..spawn.attempts_per_tick {
        if state.entities.live_count() >= desired {
            break;
        }

        let angle = state.rng.gen::<f32>() * TAU;
        let distance = spawn.min_distance + state.rng.gen::<f32>() * spawn.distance_span;
        let position = state.player.position + from_angle(angle) * distance;

        if state.chunks.is_blocked(position)
            || state.chunks.is_outpost_at(position)
            || state.chunks.generator().is_safe(position)
        {
            continue;
        }

        let elite_chance = spawn.elite_chance_per_level * level as f32;
        let biome = state.chunks.biome_at(position);
        let kind = pick_enemy_kind(biome, &mut state.rng);
        let enemy = regular_enemy(
            &state.config.enemies,
            kind,
            position,
            level,
            night,
            &mut state.rng,
            elite_chance,
        );
        state.entities.enemies.push(enemy);
        spawned += 1;
    }

    spawned
}

/// Remove the farthest regular enemies until the population fits `desired`.
///
/// Only needed when the target shrinks, at dawn. Bosses are never culled.
pub fn cull_excess(state: &mut GameState, desired: usize) -> usize {
    let excess = state.entities.live_count().saturating_sub(desired);
    if excess == 0 {
        return 0;
    }

    let player = state.player.position;
    let mut candidates: Vec<(usize, f32)> = state
        .entities
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive() && !e.is_boss())
        .map(|(i, e)| (i, e.position.distance(player)))
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut doomed: Vec<usize> = candidates.into_iter().take(excess).map(|(i, _)| i).collect();
    doomed.sort_unstable();
    for &i in doomed.iter().rev() {
        state.entities.enemies.swap_remove(i);
    }

    debug!(culled = doomed.len(), desired, "population trimmed");
    doomed.len()
}

/// One spawn phase: boss check, population trim, then top-up
pub fn run_spawn_director(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    let night = state.is_night();
    let desired = desired_enemy_count(&state.config.spawn, state.player.level, night);

    if should_spawn_boss(state) {
        spawn_boss(state, events);
    }
    cull_excess(state, desired);
    spawn_enemies(state, desired, night);
}
