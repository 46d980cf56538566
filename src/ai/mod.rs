//! Enemy behavior
//!
//! Each tick every enemy decays its velocity, picks a steering impulse
//! (flee, chase, or keep an archer's distance band), separates from its
//! neighbours, and moves one axis at a time against the terrain.
//!
//! Separation is computed against positions captured at the start of the
//! phase so the result does not depend on iteration order.

use crate::combat::hurt_player;
use crate::core::types::{angle_between, from_angle, Vec2};
use crate::entity::enemy::EnemyKind;
use crate::entity::projectile::{Projectile, ProjectileOwner};
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use tracing::debug;

/// Decide the steering impulse for one enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Stand still (beyond aggro, inside standoff, or player dead)
    Idle,
    /// Run from the world origin out of a sanctuary
    Flee(Vec2),
    /// Move along this vector
    Steer(Vec2),
}

/// Archer distance band: close in when far, back off when near
pub fn archer_steering(distance: f32, toward: Vec2, speed: f32, retreat: f32, advance: f32) -> Vec2 {
    if distance > advance {
        toward * speed
    } else if distance < retreat {
        -toward * speed
    } else {
        Vec2::ZERO
    }
}

/// Push away from every neighbour closer than the minimum separation
pub fn separation_impulse(
    index: usize,
    snapshot: &[(Vec2, bool)],
    separation: f32,
    boss_separation: f32,
    push: f32,
) -> Vec2 {
    let (here, boss) = snapshot[index];
    let mut impulse = Vec2::ZERO;
    for (j, &(there, other_boss)) in snapshot.iter().enumerate() {
        if j == index {
            continue;
        }
        let min = if boss || other_boss {
            boss_separation
        } else {
            separation
        };
        let d = here.distance(there);
        if d < min {
            let away = if d > 0.0 {
                from_angle(angle_between(there, here))
            } else {
                Vec2::X
            };
            impulse += away * push;
        }
    }
    impulse
}

/// Advance every enemy one tick, then drop the dead and the distant
pub fn update_enemies(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    let cfg = state.config.enemies.clone();
    let combat = state.config.combat.clone();

    let snapshot: Vec<(Vec2, bool)> = state
        .entities
        .enemies
        .iter()
        .map(|e| (e.position, e.is_boss()))
        .collect();

    for i in 0..state.entities.enemies.len() {
        let player_pos = state.player.position;
        let player_alive = state.player.is_alive();

        let enemy = &mut state.entities.enemies[i];
        if !enemy.is_alive() {
            continue;
        }
        enemy.flash_timer = enemy.flash_timer.saturating_sub(1);
        enemy.anim_timer += 1.0;
        enemy.attack_timer = enemy.attack_timer.saturating_sub(1);
        enemy.velocity *= cfg.damping;

        let position = enemy.position;
        let boss = enemy.is_boss();
        let distance = position.distance(player_pos);
        let in_safe_zone = state.chunks.generator().is_safe(position);
        let in_outpost = state.chunks.is_outpost_at(position);
        let toward = from_angle(angle_between(position, player_pos));
        let standoff = if boss { cfg.boss_standoff } else { cfg.standoff };

        let intent = if (in_safe_zone || in_outpost) && !boss {
            let outward = from_angle(angle_between(Vec2::ZERO, position));
            Intent::Flee(outward * enemy.speed * cfg.flee_multiplier)
        } else if player_alive && distance < enemy.aggro_range && distance > standoff {
            if enemy.kind == EnemyKind::Archer {
                if distance < enemy.attack_range && enemy.attack_timer == 0 {
                    enemy.attack_timer = cfg.archer_cooldown;
                    state.entities.projectiles.push(Projectile::aimed(
                        ProjectileOwner::Enemy,
                        position,
                        toward,
                        cfg.arrow_speed,
                        cfg.arrow_life,
                        enemy.damage,
                        cfg.arrow_radius,
                        colors::ARROW,
                    ));
                }
                Intent::Steer(archer_steering(
                    distance,
                    toward,
                    enemy.speed,
                    cfg.archer_retreat_distance,
                    cfg.archer_advance_distance,
                ))
            } else {
                Intent::Steer(toward * enemy.speed)
            }
        } else {
            Intent::Idle
        };

        let desired = match intent {
            Intent::Idle => Vec2::ZERO,
            Intent::Flee(v) | Intent::Steer(v) => v,
        };
        enemy.velocity += desired * cfg.steering;
        enemy.velocity += separation_impulse(
            i,
            &snapshot,
            cfg.separation,
            cfg.boss_separation,
            cfg.separation_push,
        );

        // One axis at a time; a blocked axis loses its velocity
        let step_x = enemy.position + Vec2::new(enemy.velocity.x, 0.0);
        if state.chunks.is_blocked(step_x) {
            enemy.velocity.x = 0.0;
        } else {
            enemy.position.x = step_x.x;
        }
        let step_y = enemy.position + Vec2::new(0.0, enemy.velocity.y);
        if state.chunks.is_blocked(step_y) {
            enemy.velocity.y = 0.0;
        } else {
            enemy.position.y = step_y.y;
        }

        if enemy.kind.is_ranged() {
            continue;
        }
        let reach = if boss {
            combat.boss_contact_radius
        } else {
            combat.contact_radius
        };
        let damage = enemy.damage;
        let contact = distance < reach
            && state.player.health > 0.0
            && (!in_safe_zone || boss)
            && !state.player.is_invulnerable();
        if !contact {
            continue;
        }

        let (shake, force) = if boss {
            (15.0, combat.boss_contact_knockback)
        } else {
            (5.0, combat.contact_knockback)
        };
        hurt_player(
            state,
            damage,
            combat.contact_invulnerability,
            shake,
            5,
            events,
        );
        knock_back_player(state, from_angle(angle_between(position, player_pos)) * force);
    }

    state.entities.purge_dead_enemies();
    let player = state.player.position;
    let despawned = state.entities.despawn_distant(player, cfg.despawn_radius);
    if despawned > 0 {
        debug!(despawned, "enemies left the area");
    }
}

/// Displace the player, checking each axis against the terrain
fn knock_back_player(state: &mut GameState, push: Vec2) {
    state.player.velocity = push;
    let step_x = state.player.position + Vec2::new(push.x, 0.0);
    if !state.chunks.is_blocked(step_x) {
        state.player.position.x = step_x.x;
    }
    let step_y = state.player.position + Vec2::new(0.0, push.y);
    if !state.chunks.is_blocked(step_y) {
        state.player.position.y = step_y.y;
    }
}
