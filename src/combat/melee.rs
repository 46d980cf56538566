//! Melee swings and crate smashing

use crate::combat::death::{resolve_death, Fallen};
use crate::core::types::{angle_between, from_angle, Facing, Rect, Vec2};
use crate::entity::drop::DropKind;
use crate::entity::enemy::DamageOutcome;
use crate::entity::player::AnimState;
use crate::render::colors;
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use rand::Rng;

/// The swing's hitbox: in front of the player, tall enough to cover the sprite
pub fn attack_hitbox(state: &GameState) -> Rect {
    let combat = &state.config.combat;
    let player = &state.player;
    let x = match player.facing {
        Facing::Right => player.position.x,
        Facing::Left => player.position.x - combat.attack_range,
    };
    Rect::new(
        x,
        player.position.y - combat.attack_vertical_offset,
        combat.attack_range,
        player.height * state.config.player.draw_scale + combat.attack_height_padding,
    )
}

/// Swing if the attack is off cooldown. Returns whether a swing happened.
pub fn melee_attack(state: &mut GameState, events: &mut Vec<SimulationEvent>) -> bool {
    let player = &state.player;
    if player.attack_cooldown > 0 || !player.is_alive() || player.is_dashing() {
        return false;
    }

    let combat = state.config.combat.clone();
    let draw_scale = state.config.player.draw_scale;
    state.player.anim = AnimState::Attack;
    state.player.frame = 0;
    state.player.attack_cooldown = combat.attack_cooldown;

    let hitbox = attack_hitbox(state);
    let damage = state.player.damage;
    let origin = state.player.position;
    let mut fallen = Vec::new();

    for enemy in state.entities.enemies.iter_mut() {
        if !enemy.is_alive() {
            continue;
        }
        if !hitbox.overlaps(&enemy.hurtbox(draw_scale, combat.boss_hitbox_scale)) {
            continue;
        }

        let outcome = enemy.apply_damage(damage, combat.flash_ticks);
        let force = if enemy.is_boss() {
            combat.boss_knockback
        } else {
            combat.knockback
        };
        enemy.velocity = from_angle(angle_between(origin, enemy.position)) * force;

        let lift = if enemy.is_boss() { 60.0 } else { 20.0 };
        let effects = &mut state.entities.effects;
        effects.text(
            enemy.position - Vec2::new(0.0, lift),
            format!("{}", damage),
            colors::WHITE,
        );
        effects.burst(&mut state.rng, enemy.position, colors::DAMAGE, 5);
        state.feedback.shake(3.0);
        state.feedback.hit_stop(combat.hit_stop_frames);

        events.push(SimulationEvent::EnemyHit {
            kind: enemy.kind,
            damage,
            remaining: enemy.health.max(0.0),
        });
        if outcome == DamageOutcome::Killed {
            fallen.push(Fallen::from(&*enemy));
        }
    }

    for body in fallen {
        resolve_death(state, body, events);
    }

    break_crates(state, hitbox, events);
    true
}

/// Destroy crates overlapping `area`, each leaving one loot drop
pub fn break_crates(state: &mut GameState, area: Rect, events: &mut Vec<SimulationEvent>) -> usize {
    let smashed = state.chunks.destroy_crates(area);
    if smashed.is_empty() {
        return 0;
    }

    let drops = state.config.drops.clone();
    for &at in &smashed {
        state
            .entities
            .effects
            .burst(&mut state.rng, at, colors::CRATE_SPLINTERS, 10);
        if state.rng.gen::<f32>() < drops.crate_xp_chance {
            state
                .entities
                .spawn_drop(DropKind::Xp, at, drops.xp_value, drops.life);
        } else {
            state
                .entities
                .spawn_drop(DropKind::Health, at, drops.health_value / 2, drops.life);
        }
    }

    events.push(SimulationEvent::CratesBroken {
        count: smashed.len(),
    });
    smashed.len()
}
