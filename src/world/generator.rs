//! Deterministic chunk generation
//!
//! `WorldGenerator::generate` is a pure function of (seed, chunk coordinate).
//! All per-cell randomness comes from `noise::hash_unit`, keyed on the tile's
//! integer world-pixel corner, so a chunk evicted from the cache is rebuilt
//! bit-for-bit the next time it is queried.

use crate::core::config::{GameConfig, WorldConfig};
use crate::core::types::Vec2;
use crate::entity::npc::Npc;
use crate::world::chunk::{Chunk, ChunkCoord, CHUNK_TILES, TILE_SIZE};
use crate::world::noise::{hash_unit, seed_offset, Channel};
use crate::world::tile::{Biome, Decoration, Tile};

/// Multiplier applied to outpost hash coordinates so neighbouring chunks
/// land far apart in hash space
const OUTPOST_SPREAD: i64 = 999;

#[derive(Debug, Clone)]
pub struct WorldGenerator {
    seed: u64,
    offset: f64,
    config: WorldConfig,
    merchant_range: f32,
}

impl WorldGenerator {
    pub fn new(seed: u64, config: WorldConfig, merchant_range: f32) -> Self {
        Self {
            seed,
            offset: seed_offset(seed),
            config,
            merchant_range,
        }
    }

    pub fn from_config(seed: u64, config: &GameConfig) -> Self {
        Self::new(seed, config.world.clone(), config.npcs.merchant_range)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Seed-derived phase, also used for the storm oscillator
    pub fn seed_offset(&self) -> f64 {
        self.offset
    }

    /// Inside the fixed-radius safe zone around the world origin
    pub fn is_safe(&self, pos: Vec2) -> bool {
        pos.length() < self.config.safe_zone_radius
    }

    /// Classify the natural biome at a world position.
    ///
    /// Never returns `Biome::Outpost`; outposts are a chunk-level override.
    pub fn biome_at(&self, pos: Vec2) -> Biome {
        let f = self.config.biome_scale * 0.01;
        let value = (pos.x as f64 * f + self.offset).sin() + (pos.y as f64 * f + self.offset).cos();
        if value < self.config.corruption_threshold {
            Biome::Corruption
        } else if value > self.config.desert_threshold {
            Biome::Desert
        } else {
            Biome::Grass
        }
    }

    /// Chunk-level outpost roll; the origin chunk never hosts one
    pub fn is_outpost(&self, coord: ChunkCoord) -> bool {
        if coord == ChunkCoord::ORIGIN {
            return false;
        }
        let roll = hash_unit(
            self.seed,
            coord.x as i64 * OUTPOST_SPREAD,
            coord.y as i64 * OUTPOST_SPREAD,
            Channel::Outpost,
        );
        roll < self.config.outpost_chance
    }

    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let has_outpost = self.is_outpost(coord);
        let mut tiles = [[Tile::default(); CHUNK_TILES]; CHUNK_TILES];

        let base_x = coord.x as i64 * (CHUNK_TILES as i64) * TILE_SIZE as i64;
        let base_y = coord.y as i64 * (CHUNK_TILES as i64) * TILE_SIZE as i64;

        for (tx, column) in tiles.iter_mut().enumerate() {
            for (ty, tile) in column.iter_mut().enumerate() {
                let hx = base_x + tx as i64 * TILE_SIZE as i64;
                let hy = base_y + ty as i64 * TILE_SIZE as i64;
                let corner = Vec2::new(hx as f32, hy as f32);

                tile.variant = hash_unit(self.seed, hx, hy, Channel::Variant);
                tile.scale = 0.8 + hash_unit(self.seed, hx, hy, Channel::Scale) * 0.7;

                if has_outpost {
                    tile.biome = Biome::Outpost;
                    let border = tx == 0 || ty == 0 || tx == CHUNK_TILES - 1 || ty == CHUNK_TILES - 1;
                    tile.decoration = if border { Decoration::Fence } else { Decoration::None };
                    continue;
                }

                tile.biome = self.biome_at(corner);

                let center = corner + Vec2::splat(TILE_SIZE / 2.0);
                let roll = hash_unit(self.seed, hx, hy, Channel::Decoration);
                tile.decoration = if !self.is_safe(center) && roll < self.config.obstacle_density {
                    let kind = hash_unit(self.seed, hx, hy, Channel::ObstacleKind);
                    tile.biome.pick_obstacle(kind)
                } else if roll > self.config.flower_clutter_threshold {
                    Decoration::Flower
                } else if roll > self.config.grass_clutter_threshold {
                    Decoration::Grass
                } else {
                    Decoration::None
                };
            }
        }

        let npc = has_outpost.then(|| Npc::merchant(coord, coord.center(), self.merchant_range));

        Chunk {
            coord,
            tiles,
            has_outpost,
            npc,
            visual: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> WorldGenerator {
        WorldGenerator::from_config(seed, &GameConfig::default())
    }

    /// Scan for an outpost chunk near the origin
    fn find_outpost(gen: &WorldGenerator) -> Option<ChunkCoord> {
        (-30..30)
            .flat_map(|x| (-30..30).map(move |y| ChunkCoord::new(x, y)))
            .find(|&c| gen.is_outpost(c))
    }

    #[test]
    fn test_generation_is_deterministic() {
        let gen = generator(1234);
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-3, 7), ChunkCoord::new(12, -9)] {
            let a = gen.generate(coord);
            let b = gen.generate(coord);
            assert!(a.same_content(&b), "chunk {:?} differs on regeneration", coord);
        }
    }

    #[test]
    fn test_separate_generators_agree() {
        let a = generator(77).generate(ChunkCoord::new(4, 4));
        let b = generator(77).generate(ChunkCoord::new(4, 4));
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_origin_chunk_is_never_outpost() {
        for seed in 0..200 {
            assert!(!generator(seed).is_outpost(ChunkCoord::ORIGIN));
        }
    }

    #[test]
    fn test_safe_zone_has_no_obstacles() {
        let gen = generator(99);
        // The safe zone spans the four chunks touching the origin
        for coord in [(0, 0), (-1, 0), (0, -1), (-1, -1)] {
            let chunk = gen.generate(ChunkCoord::new(coord.0, coord.1));
            for tx in 0..CHUNK_TILES {
                for ty in 0..CHUNK_TILES {
                    let rect = chunk.tile_rect(tx, ty);
                    let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
                    if gen.is_safe(center) {
                        assert!(!chunk.tile(tx, ty).is_blocking());
                    }
                }
            }
        }
    }

    #[test]
    fn test_outpost_layout() {
        let gen = generator(5);
        let coord = find_outpost(&gen).expect("no outpost in a 60x60 chunk scan");
        let chunk = gen.generate(coord);

        assert!(chunk.has_outpost);
        assert_eq!(chunk.tile(0, 5).decoration, Decoration::Fence);
        assert_eq!(chunk.tile(15, 15).decoration, Decoration::Fence);
        assert_eq!(chunk.tile(7, 7).decoration, Decoration::None);
        assert!(chunk.tiles.iter().flatten().all(|t| t.biome == Biome::Outpost));

        let npc = chunk.npc.expect("outpost without merchant");
        assert_eq!(npc.position, coord.center());
    }

    #[test]
    fn test_decoration_density_is_sparse() {
        let gen = generator(2024);
        let mut obstacles = 0;
        let mut clutter = 0;
        let mut total = 0;
        for cx in 3..9 {
            for cy in 3..9 {
                let chunk = gen.generate(ChunkCoord::new(cx, cy));
                if chunk.has_outpost {
                    continue;
                }
                for tile in chunk.tiles.iter().flatten() {
                    total += 1;
                    if tile.is_blocking() {
                        obstacles += 1;
                    } else if tile.decoration != Decoration::None {
                        clutter += 1;
                    }
                }
            }
        }
        let obstacle_ratio = obstacles as f32 / total as f32;
        let clutter_ratio = clutter as f32 / total as f32;
        assert!((0.03..0.07).contains(&obstacle_ratio), "obstacles {}", obstacle_ratio);
        assert!((0.12..0.18).contains(&clutter_ratio), "clutter {}", clutter_ratio);
    }

    #[test]
    fn test_flowers_are_generated() {
        let gen = generator(8);
        let flowers: usize = (2..6)
            .flat_map(|x| (2..6).map(move |y| ChunkCoord::new(x, y)))
            .map(|c| {
                gen.generate(c)
                    .tiles
                    .iter()
                    .flatten()
                    .filter(|t| t.decoration == Decoration::Flower)
                    .count()
            })
            .sum();
        assert!(flowers > 0);
    }

    #[test]
    fn test_tile_scale_range() {
        let chunk = generator(3).generate(ChunkCoord::new(2, -2));
        for tile in chunk.tiles.iter().flatten() {
            assert!((0.8..1.5).contains(&tile.scale));
            assert!((0.0..1.0).contains(&tile.variant));
        }
    }
}
