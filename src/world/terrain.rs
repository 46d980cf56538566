//! Terrain queries over the chunk cache

use crate::core::types::{Rect, Vec2};
use crate::world::cache::ChunkCache;
use crate::world::chunk::{ChunkCoord, CHUNK_TILES, TILE_SIZE};
use crate::world::tile::{Biome, Decoration};

impl ChunkCache {
    /// Collision query used for movement and projectiles.
    ///
    /// The safe zone and outpost chunks are always walkable.
    pub fn is_blocked(&mut self, pos: Vec2) -> bool {
        if self.generator().is_safe(pos) {
            return false;
        }
        let chunk = self.get(ChunkCoord::from_world(pos));
        if chunk.has_outpost {
            return false;
        }
        chunk.tile_at_world(pos).is_blocking()
    }

    pub fn is_outpost_at(&mut self, pos: Vec2) -> bool {
        self.get(ChunkCoord::from_world(pos)).has_outpost
    }

    /// Biome of the tile under a world position
    pub fn biome_at(&mut self, pos: Vec2) -> Biome {
        self.get(ChunkCoord::from_world(pos)).tile_at_world(pos).biome
    }

    /// Smash every crate whose tile overlaps `area`.
    ///
    /// Checks all chunks the area touches. Returns the world centers of the
    /// destroyed tiles so the caller can spawn loot there.
    pub fn destroy_crates(&mut self, area: Rect) -> Vec<Vec2> {
        let min = ChunkCoord::from_world(Vec2::new(area.x, area.y));
        let max = ChunkCoord::from_world(Vec2::new(area.x + area.w, area.y + area.h));
        let mut destroyed = Vec::new();

        for cx in min.x..=max.x {
            for cy in min.y..=max.y {
                let chunk = self.get_mut(ChunkCoord::new(cx, cy));
                for tx in 0..CHUNK_TILES {
                    for ty in 0..CHUNK_TILES {
                        if !chunk.tile(tx, ty).decoration.is_destructible() {
                            continue;
                        }
                        let rect = chunk.tile_rect(tx, ty);
                        if rect.overlaps(&area) {
                            chunk.tile_mut(tx, ty).decoration = Decoration::None;
                            destroyed.push(Vec2::new(
                                rect.x + TILE_SIZE / 2.0,
                                rect.y + TILE_SIZE / 2.0,
                            ));
                        }
                    }
                }
            }
        }

        destroyed
    }
}
