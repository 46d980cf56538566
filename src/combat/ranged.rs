//! Projectile flight and hit resolution

use crate::combat::death::{resolve_death, Fallen};
use crate::combat::hurt_player;
use crate::combat::melee::break_crates;
use crate::core::types::{Rect, Vec2};
use crate::entity::enemy::DamageOutcome;
use crate::entity::projectile::{Projectile, ProjectileOwner};
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use rand::Rng;

/// Side of the box checked for crates where a fireball meets terrain
const IMPACT_BOX: f32 = 20.0;

/// Advance every projectile one tick and resolve what it touches.
///
/// Life is decremented before the move. A projectile that hit something
/// this tick does not also test terrain.
pub fn update_projectiles(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    let mut projectiles = std::mem::take(&mut state.entities.projectiles);

    for proj in projectiles.iter_mut() {
        proj.life = proj.life.saturating_sub(1);
        proj.position += proj.velocity;

        if proj.trail || state.rng.gen::<f32>() > 0.5 {
            state
                .entities
                .effects
                .trail(proj.position, proj.color, proj.radius / 2.0);
        }

        let hit = if proj.owner.targets_enemies() {
            strike_enemy(state, proj, events)
        } else {
            strike_player(state, proj, events)
        };

        if !hit && state.chunks.is_blocked(proj.position) {
            proj.expire();
            state
                .entities
                .effects
                .burst(&mut state.rng, proj.position, colors::RUBBLE, 5);
            if proj.owner == ProjectileOwner::Player {
                let half = IMPACT_BOX / 2.0;
                let area = Rect::new(
                    proj.position.x - half,
                    proj.position.y - half,
                    IMPACT_BOX,
                    IMPACT_BOX,
                );
                break_crates(state, area, events);
            }
        }
    }

    projectiles.retain(|p| !p.is_spent());
    // Anything queued while the list was taken goes after the survivors
    projectiles.append(&mut state.entities.projectiles);
    state.entities.projectiles = projectiles;
}

/// Every live enemy inside the contact radius takes the hit; the projectile
/// is spent once, after all of them
fn strike_enemy(
    state: &mut GameState,
    proj: &mut Projectile,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let radius = state.config.combat.projectile_hit_radius;
    let flash = state.config.combat.flash_ticks;

    let mut struck = Vec::new();
    let mut fallen = Vec::new();
    for enemy in state.entities.enemies.iter_mut() {
        if !enemy.is_alive() || enemy.position.distance(proj.position) >= radius {
            continue;
        }
        let outcome = enemy.apply_damage(proj.damage, flash);
        struck.push((enemy.position, enemy.kind, enemy.health.max(0.0)));
        if outcome == DamageOutcome::Killed {
            fallen.push(Fallen::from(&*enemy));
        }
    }
    if struck.is_empty() {
        return false;
    }
    proj.expire();

    for (at, kind, remaining) in struck {
        let effects = &mut state.entities.effects;
        effects.burst(&mut state.rng, at, proj.color, 10);
        effects.text(
            at - Vec2::new(0.0, 40.0),
            format!("{}", proj.damage),
            colors::PROJECTILE_HIT,
        );
        events.push(SimulationEvent::EnemyHit {
            kind,
            damage: proj.damage,
            remaining,
        });
    }
    for body in fallen {
        resolve_death(state, body, events);
    }
    true
}

fn strike_player(
    state: &mut GameState,
    proj: &mut Projectile,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let player = &state.player;
    let in_reach = player.position.distance(proj.position) < state.config.combat.player_hit_radius;
    if !in_reach || player.is_invulnerable() || !player.is_alive() {
        return false;
    }

    proj.expire();
    let invulnerability = state.config.combat.projectile_invulnerability;
    hurt_player(state, proj.damage, invulnerability, 5.0, 10, events);
    true
}
