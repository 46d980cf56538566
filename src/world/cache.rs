//! Bounded chunk cache
//!
//! Chunks are generated lazily on first access and evicted wholesale by a
//! distance sweep. Because generation is pure, an evicted chunk is simply
//! regenerated on the next query; only destructive edits (smashed crates)
//! are forgotten.

use crate::core::config::GameConfig;
use crate::core::types::Vec2;
use crate::entity::npc::Npc;
use crate::world::chunk::{Chunk, ChunkCoord, VisualHandle};
use crate::world::generator::WorldGenerator;
use ahash::AHashMap;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct ChunkCache {
    chunks: AHashMap<ChunkCoord, Chunk>,
    generator: WorldGenerator,
    /// Merchants from freshly generated outposts, waiting to join the entity store
    discovered: Vec<Npc>,
}

impl ChunkCache {
    pub fn new(generator: WorldGenerator) -> Self {
        Self {
            chunks: AHashMap::new(),
            generator,
            discovered: Vec::new(),
        }
    }

    pub fn from_config(seed: u64, config: &GameConfig) -> Self {
        Self::new(WorldGenerator::from_config(seed, config))
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    /// Fetch a chunk, generating and storing it on first access
    pub fn get(&mut self, coord: ChunkCoord) -> &Chunk {
        self.get_mut(coord)
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        let discovered = &mut self.discovered;
        self.chunks.entry(coord).or_insert_with(|| {
            let chunk = generator.generate(coord);
            debug!(x = coord.x, y = coord.y, outpost = chunk.has_outpost, "generated chunk");
            if let Some(npc) = &chunk.npc {
                discovered.push(npc.clone());
            }
            chunk
        })
    }

    /// Cached chunk without generating
    pub fn peek(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Evict every chunk farther than `keep` (Chebyshev) from `center`.
    ///
    /// Returns the number of chunks removed.
    pub fn sweep(&mut self, center: ChunkCoord, keep: i32) -> usize {
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| coord.chebyshev_distance(center) <= keep);
        let evicted = before - self.chunks.len();
        debug!(evicted, remaining = self.chunks.len(), "chunk sweep");
        evicted
    }

    /// Attach a renderer handle to a cached chunk; ignored for absent chunks
    pub fn attach_visual(&mut self, coord: ChunkCoord, handle: VisualHandle) -> bool {
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.visual = Some(handle);
                true
            }
            None => false,
        }
    }

    pub fn take_discovered_npcs(&mut self) -> Vec<Npc> {
        std::mem::take(&mut self.discovered)
    }
}

/// Drop NPCs farther than `max_distance` from the player, keeping persistent ones
pub fn prune_npcs(npcs: &mut Vec<Npc>, player: Vec2, max_distance: f32) -> usize {
    let before = npcs.len();
    npcs.retain(|npc| npc.is_persistent() || npc.position.distance(player) <= max_distance);
    before - npcs.len()
}

/// Wall-clock interval gate for the eviction sweep
#[derive(Debug, Clone)]
pub struct SweepTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl SweepTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// True when a sweep is due; the first poll only arms the timer
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::npc::NpcId;

    fn cache() -> ChunkCache {
        ChunkCache::from_config(42, &GameConfig::default())
    }

    #[test]
    fn test_get_fills_lazily() {
        let mut cache = cache();
        assert!(cache.is_empty());
        cache.get(ChunkCoord::new(1, 2));
        cache.get(ChunkCoord::new(1, 2));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(ChunkCoord::new(1, 2)));
    }

    #[test]
    fn test_sweep_removes_distant_chunks() {
        let mut cache = cache();
        for x in -6..=6 {
            cache.get(ChunkCoord::new(x, 0));
        }
        let evicted = cache.sweep(ChunkCoord::new(0, 0), 3);
        assert_eq!(evicted, 6);
        assert!(cache.coords().all(|c| c.chebyshev_distance(ChunkCoord::ORIGIN) <= 3));
    }

    #[test]
    fn test_outpost_merchant_is_discovered_once() {
        let mut cache = cache();
        let outpost = (-30..30)
            .flat_map(|x| (-30..30).map(move |y| ChunkCoord::new(x, y)))
            .find(|&c| cache.generator().is_outpost(c))
            .expect("no outpost found");

        cache.get(outpost);
        cache.get(outpost);
        let npcs = cache.take_discovered_npcs();
        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].id, NpcId::Merchant(outpost));
        assert!(cache.take_discovered_npcs().is_empty());
    }

    #[test]
    fn test_prune_keeps_guide() {
        let config = GameConfig::default();
        let mut npcs = vec![
            Npc::guide(&config.npcs),
            Npc::merchant(ChunkCoord::new(5, 5), Vec2::new(5632.0, 5632.0), 120.0),
            Npc::merchant(ChunkCoord::new(0, 1), Vec2::new(512.0, 1536.0), 120.0),
        ];
        let removed = prune_npcs(&mut npcs, Vec2::new(50_000.0, 0.0), 2000.0);
        assert_eq!(removed, 2);
        assert_eq!(npcs.len(), 1);
        assert!(npcs[0].is_persistent());
    }

    #[test]
    fn test_sweep_timer_interval() {
        let mut timer = SweepTimer::from_millis(5000);
        let start = Instant::now();
        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(4999)));
        assert!(timer.poll(start + Duration::from_millis(5000)));
        assert!(!timer.poll(start + Duration::from_millis(6000)));
        assert!(timer.poll(start + Duration::from_millis(10_001)));
    }
}
