//! Player phase of the tick: intents, timers, movement, drone

use crate::combat::melee_attack;
use crate::core::types::{Facing, Vec2};
use crate::entity::player::AnimState;
use crate::progression::abilities::{try_cast, try_dash, update_drone};
use crate::simulation::state::GameState;
use crate::simulation::tick::SimulationEvent;
use crate::ui::input::Intents;
use crate::world::tile::Biome;

/// Act on the discrete intents, then move the player one tick.
///
/// A dead player ignores everything; the tick watches the death animation.
pub fn update_player(state: &mut GameState, intents: &Intents, events: &mut Vec<SimulationEvent>) {
    if !state.player.is_alive() {
        return;
    }

    if intents.melee {
        melee_attack(state, events);
    }
    if intents.cast {
        let aim = intents
            .pointer
            .map(|p| state.camera.aim_direction(p))
            .unwrap_or(Vec2::ZERO);
        try_cast(state, aim);
    }
    if intents.dash {
        try_dash(state);
    }

    let mana_regen = state.config.player.mana_regen;
    let player = &mut state.player;
    player.regen_mana(mana_regen);
    player.invulnerable = player.invulnerable.saturating_sub(1);
    player.dash_cooldown = player.dash_cooldown.saturating_sub(1);

    move_player(state, intents.movement.vector());
    update_attack_pose(state, intents.movement.vector());
    update_drone(state);
}

fn move_player(state: &mut GameState, direction: Vec2) {
    let cfg = &state.config;
    let mut speed = cfg.player.speed;
    if state.chunks.biome_at(state.player.position) == Biome::Desert {
        speed *= cfg.player.desert_speed_factor;
    }

    if state.player.is_dashing() {
        speed = cfg.abilities.dash_speed;
        state.player.dash_timer -= 1;
        let window = cfg.abilities.ghost_trail_window.max(1);
        if (state.tick / window) % 2 == 0 {
            let player = &state.player;
            state
                .entities
                .effects
                .ghost(player.position, player.facing, player.frame);
        }
    }

    let velocity = direction * speed;
    state.player.velocity = velocity;

    let next_x = state.player.position + Vec2::new(velocity.x, 0.0);
    if !state.chunks.is_blocked(next_x) {
        state.player.position.x = next_x.x;
    }
    let next_y = state.player.position + Vec2::new(0.0, velocity.y);
    if !state.chunks.is_blocked(next_y) {
        state.player.position.y = next_y.y;
    }

    if direction.x < 0.0 {
        state.player.facing = Facing::Left;
    } else if direction.x > 0.0 {
        state.player.facing = Facing::Right;
    }
}

/// Count down the attack cooldown; once it expires the pose follows movement
fn update_attack_pose(state: &mut GameState, direction: Vec2) {
    let cooldown = state.config.combat.attack_cooldown;
    let recovery = state.config.combat.attack_recovery;
    let last_attack_frame = state.frames.attack() - 1;
    let player = &mut state.player;

    if player.attack_cooldown > 0 {
        player.attack_cooldown -= 1;
        if player.attack_cooldown < cooldown.saturating_sub(recovery)
            && player.anim == AnimState::Attack
            && player.frame == last_attack_frame
        {
            player.anim = AnimState::Idle;
        }
    } else {
        player.anim = if direction != Vec2::ZERO {
            AnimState::Walk
        } else {
            AnimState::Idle
        };
    }
}
