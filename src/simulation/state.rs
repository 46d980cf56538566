//! The simulation context
//!
//! One `GameState` holds everything a session mutates. Each phase of the
//! tick borrows it mutably in turn; nothing lives in shared global cells.

use crate::core::config::GameConfig;
use crate::core::cycle::DayCycle;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::entity::effects::Feedback;
use crate::entity::player::Player;
use crate::entity::store::EntityStore;
use crate::render::animation::FrameCounts;
use crate::render::camera::Camera;
use crate::world::cache::{prune_npcs, ChunkCache};
use crate::world::chunk::ChunkCoord;
use crate::world::tile::Biome;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub struct GameState {
    pub config: GameConfig,
    pub frames: FrameCounts,
    pub seed: u64,
    pub tick: Tick,
    pub player: Player,
    pub entities: EntityStore,
    pub chunks: ChunkCache,
    pub day: DayCycle,
    pub camera: Camera,
    pub feedback: Feedback,
    pub score: u64,
    /// Spawn-time randomness only; world generation is hashed
    pub rng: ChaCha8Rng,
    pub game_over: bool,
}

impl GameState {
    /// Start a session. Fails only on an inconsistent configuration.
    pub fn new(config: GameConfig, frames: FrameCounts, seed: u64) -> Result<Self> {
        config.validate()?;
        info!(seed, "starting session");
        Ok(Self::fresh(config, frames, seed, Camera::default()))
    }

    fn fresh(config: GameConfig, frames: FrameCounts, seed: u64, camera: Camera) -> Self {
        let mut camera = camera;
        camera.position = Default::default();
        camera.zoom = 1.0;
        Self {
            player: Player::new(&config.player),
            entities: EntityStore::new(&config.effects, &config.npcs),
            chunks: ChunkCache::from_config(seed, &config),
            day: DayCycle::from_config(&config.time),
            camera,
            feedback: Feedback::default(),
            score: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            game_over: false,
            tick: 0,
            seed,
            frames,
            config,
        }
    }

    /// Discard everything and begin again with a new seed
    pub fn restart(&mut self, seed: u64) {
        info!(seed, previous_score = self.score, "restarting session");
        let camera = self.camera.clone();
        let config = self.config.clone();
        *self = Self::fresh(config, self.frames, seed, camera);
    }

    pub fn is_night(&self) -> bool {
        self.day.is_night(&self.config.time)
    }

    pub fn player_chunk(&self) -> ChunkCoord {
        ChunkCoord::from_world(self.player.position)
    }

    /// Precipitation: never in the desert; otherwise at deep night or during a storm
    pub fn is_raining(&mut self) -> bool {
        if self.chunks.biome_at(self.player.position) == Biome::Desert {
            return false;
        }
        let time = &self.config.time;
        let storm = (self.chunks.generator().seed_offset() as f32
            + self.day.phase() * time.storm_frequency)
            .sin();
        self.day.darkness() > time.rain_darkness || storm > time.storm_threshold
    }

    /// Move merchants of freshly generated outposts into the entity store
    pub fn absorb_discovered_npcs(&mut self) {
        for npc in self.chunks.take_discovered_npcs() {
            if self.entities.add_npc(npc) {
                debug!("merchant discovered");
            }
        }
    }

    /// Periodic maintenance: evict distant chunks and prune distant NPCs.
    ///
    /// Merchants of outposts that are still cached and within range are
    /// re-registered, so walking back to a kept outpost finds its merchant.
    pub fn sweep_chunks(&mut self) -> usize {
        let world = &self.config.world;
        let evicted = self.chunks.sweep(self.player_chunk(), world.keep_distance);
        let pruned = prune_npcs(
            &mut self.entities.npcs,
            self.player.position,
            world.npc_prune_distance,
        );

        let player = self.player.position;
        let max_distance = world.npc_prune_distance;
        let returning: Vec<_> = self
            .chunks
            .coords()
            .filter_map(|c| self.chunks.peek(c).and_then(|chunk| chunk.npc.clone()))
            .filter(|npc| npc.position.distance(player) <= max_distance)
            .collect();
        for npc in returning {
            self.entities.add_npc(npc);
        }

        debug!(evicted, pruned, cached = self.chunks.len(), "maintenance sweep");
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::npc::NpcId;

    fn state(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), FrameCounts::default(), seed).unwrap()
    }

    #[test]
    fn test_new_state() {
        let state = state(1);
        assert_eq!(state.tick, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.entities.npcs.len(), 1);
        assert!(!state.game_over);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.time.night_start = 0.95;
        assert!(GameState::new(config, FrameCounts::default(), 1).is_err());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = state(3);
        state.score = 500;
        state.player.level = 7;
        state.tick = 1000;
        state.chunks.get(ChunkCoord::new(2, 2));

        state.restart(4);
        assert_eq!(state.seed, 4);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.tick, 0);
        assert!(state.chunks.is_empty());
    }

    #[test]
    fn test_sweep_keeps_guide_and_nearby_chunks() {
        let mut state = state(5);
        for x in -8..=8 {
            state.chunks.get(ChunkCoord::new(x, 0));
        }
        state.player.position = Vec2::new(20_000.0, 0.0);
        state.sweep_chunks();

        let center = state.player_chunk();
        assert!(state
            .chunks
            .coords()
            .all(|c| c.chebyshev_distance(center) <= state.config.world.keep_distance));
        assert!(state.entities.npcs.iter().any(|n| n.id == NpcId::Guide));
    }
}
