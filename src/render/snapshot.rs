//! Read-only presentation snapshot
//!
//! Everything a renderer needs for one frame, as plain serializable data.
//! Sprites come pre-sorted by the bottom edge of their footprint so that
//! drawing them in order gives correct occlusion.

use crate::core::types::{Facing, Vec2};
use crate::entity::drop::LootDrop;
use crate::entity::effects::{Decal, FloatingText, GhostTrail, Particle};
use crate::entity::enemy::EnemyKind;
use crate::entity::npc::NpcRole;
use crate::entity::player::AnimState;
use crate::progression::abilities::fireball_cost;
use crate::render::colors::Color;
use crate::simulation::state::GameState;
use crate::ui::state::{GameUI, LogEntry, ModalKind};
use crate::world::chunk::{ChunkCoord, CHUNK_TILES, TILE_SIZE};
use crate::world::tile::{Decoration, Tile};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Ticks per displayed second
const TICKS_PER_SECOND: f32 = 60.0;

/// Extra chunk ring drawn around the viewport so edges never pop in
const VIEW_MARGIN: i32 = 1;

#[derive(Debug, Clone, Serialize)]
pub enum SpriteKind {
    Player {
        anim: AnimState,
        frame: usize,
        /// Blink while invulnerable
        blinking: bool,
    },
    Enemy {
        kind: EnemyKind,
        elite: bool,
        flashing: bool,
        health_fraction: f32,
    },
    Npc {
        role: NpcRole,
    },
    Obstacle {
        decoration: Decoration,
        variant: f32,
        scale: f32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub position: Vec2,
    pub facing: Facing,
    pub kind: SpriteKind,
    /// World y used for ordering
    pub depth: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraView {
    pub position: Vec2,
    pub zoom: f32,
    pub viewport: (f32, f32),
    /// Shake amplitude; the renderer picks the per-frame offset
    pub shake: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ambient {
    pub phase: f32,
    pub darkness: f32,
    pub vignette: f32,
    pub night: bool,
    pub raining: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub xp: u32,
    pub max_xp: u32,
    pub level: u32,
    pub gold: u32,
    pub score: u64,
    pub dash_cooldown_seconds: f32,
    pub dash_unlocked: bool,
    pub fireball_unlocked: bool,
    pub fireball_affordable: bool,
    pub has_drone: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Ground layer of one visible chunk
#[derive(Debug, Clone, Serialize)]
pub struct ChunkView {
    pub coord: ChunkCoord,
    pub outpost: bool,
    /// Tiles indexed `[tx * CHUNK_TILES + ty]`, clutter included.
    /// Colliding decorations are also emitted as depth-sorted sprites.
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentationSnapshot {
    pub tick: u64,
    pub camera: CameraView,
    pub ambient: Ambient,
    pub hud: Hud,
    pub chunks: Vec<ChunkView>,
    pub sprites: Vec<Sprite>,
    pub drones: Vec<Vec2>,
    pub drops: Vec<LootDrop>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<Particle>,
    pub decals: Vec<Decal>,
    pub texts: Vec<FloatingText>,
    pub ghosts: Vec<GhostTrail>,
    pub modal: Option<ModalKind>,
    pub log: Vec<LogEntry>,
    pub game_over: bool,
}

impl PresentationSnapshot {
    /// Capture the current frame.
    ///
    /// Takes the state mutably only because chunks under the viewport are
    /// generated on first look; no gameplay value changes.
    pub fn capture(state: &mut GameState, ui: &GameUI) -> Self {
        let coords = visible_chunks(state);
        let mut chunks = Vec::with_capacity(coords.len());
        let mut sprites = Vec::new();

        for coord in coords {
            let chunk = state.chunks.get(coord);
            let mut tiles = Vec::with_capacity(CHUNK_TILES * CHUNK_TILES);
            for (tx, column) in chunk.tiles.iter().enumerate() {
                for (ty, tile) in column.iter().enumerate() {
                    tiles.push(*tile);
                    if !tile.decoration.collides() {
                        continue;
                    }
                    let rect = chunk.tile_rect(tx, ty);
                    sprites.push(Sprite {
                        position: Vec2::new(rect.x + TILE_SIZE / 2.0, rect.y + TILE_SIZE / 2.0),
                        facing: Facing::Right,
                        kind: SpriteKind::Obstacle {
                            decoration: tile.decoration,
                            variant: tile.variant,
                            scale: tile.scale,
                        },
                        depth: rect.y + rect.h,
                    });
                }
            }
            chunks.push(ChunkView {
                coord,
                outpost: chunk.has_outpost,
                tiles,
            });
        }

        let player = &state.player;
        sprites.push(Sprite {
            position: player.position,
            facing: player.facing,
            kind: SpriteKind::Player {
                anim: player.anim,
                frame: player.frame,
                blinking: player.is_invulnerable() && (state.tick / 4) % 2 == 0,
            },
            depth: player.position.y + player.height,
        });
        for enemy in state.entities.enemies.iter().filter(|e| e.is_alive()) {
            let facing = if enemy.velocity.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };
            sprites.push(Sprite {
                position: enemy.position,
                facing,
                kind: SpriteKind::Enemy {
                    kind: enemy.kind,
                    elite: enemy.elite,
                    flashing: enemy.flash_timer > 0,
                    health_fraction: enemy.health / enemy.max_health,
                },
                depth: enemy.position.y + enemy.height,
            });
        }
        for npc in &state.entities.npcs {
            sprites.push(Sprite {
                position: npc.position,
                facing: Facing::Left,
                kind: SpriteKind::Npc { role: npc.role },
                depth: npc.position.y,
            });
        }
        sprites.sort_by_key(|s| OrderedFloat(s.depth));

        let raining = state.is_raining();
        let effects = &state.entities.effects;
        Self {
            tick: state.tick,
            camera: CameraView {
                position: state.camera.position,
                zoom: state.camera.zoom,
                viewport: state.camera.viewport_size,
                shake: state.feedback.shake,
            },
            ambient: Ambient {
                phase: state.day.phase(),
                darkness: state.day.darkness(),
                vignette: state.day.vignette(),
                night: state.is_night(),
                raining,
            },
            hud: hud(state),
            chunks,
            sprites,
            drones: state.player.drone.iter().map(|d| d.position).collect(),
            drops: state.entities.drops.clone(),
            projectiles: state
                .entities
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    position: p.position,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            particles: effects.particles.iter().cloned().collect(),
            decals: effects.decals.iter().cloned().collect(),
            texts: effects.texts.iter().cloned().collect(),
            ghosts: effects.ghosts.clone(),
            modal: ui.modal.as_ref().map(|m| m.kind),
            log: ui.event_log.iter().cloned().collect(),
            game_over: state.game_over,
        }
    }
}

fn hud(state: &GameState) -> Hud {
    let player = &state.player;
    let abilities = &state.config.abilities;
    Hud {
        health: player.health,
        max_health: player.max_health,
        mana: player.mana,
        max_mana: player.max_mana,
        xp: player.xp,
        max_xp: player.max_xp,
        level: player.level,
        gold: player.gold,
        score: state.score,
        dash_cooldown_seconds: player.dash_cooldown as f32 / TICKS_PER_SECOND,
        dash_unlocked: player.level >= abilities.dash_unlock_level,
        fireball_unlocked: player.level >= abilities.fireball_unlock_level,
        fireball_affordable: player.mana >= fireball_cost(abilities, player.level),
        has_drone: player.has_drone(),
    }
}

/// Chunks overlapping the camera's view, plus a margin ring
fn visible_chunks(state: &GameState) -> Vec<ChunkCoord> {
    let camera = &state.camera;
    let half = Vec2::new(camera.viewport_size.0, camera.viewport_size.1) / (2.0 * camera.zoom);
    let min = ChunkCoord::from_world(camera.position - half);
    let max = ChunkCoord::from_world(camera.position + half);

    let mut coords = Vec::new();
    for x in (min.x - VIEW_MARGIN)..=(max.x + VIEW_MARGIN) {
        for y in (min.y - VIEW_MARGIN)..=(max.y + VIEW_MARGIN) {
            coords.push(ChunkCoord::new(x, y));
        }
    }
    coords
}
