//! Chunk grid geometry and chunk data

use crate::core::types::{Rect, Vec2};
use crate::entity::npc::Npc;
use crate::world::tile::Tile;
use serde::{Deserialize, Serialize};

/// Tile edge length in world pixels
pub const TILE_SIZE: f32 = 64.0;

/// Tiles along each chunk edge
pub const CHUNK_TILES: usize = 16;

/// Chunk edge length in world pixels
pub const CHUNK_PIXELS: f32 = TILE_SIZE * CHUNK_TILES as f32;

/// Integer chunk grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const ORIGIN: ChunkCoord = ChunkCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position
    pub fn from_world(pos: Vec2) -> Self {
        Self {
            x: (pos.x / CHUNK_PIXELS).floor() as i32,
            y: (pos.y / CHUNK_PIXELS).floor() as i32,
        }
    }

    /// Max of the per-axis distances
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// World position of the chunk's top-left corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x as f32 * CHUNK_PIXELS, self.y as f32 * CHUNK_PIXELS)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + Vec2::splat(CHUNK_PIXELS / 2.0)
    }
}

/// Renderer-owned handle for a cached chunk image; never read by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// A generated 16x16 block of tiles
#[derive(Debug, Clone)]
pub struct Chunk {
    pub coord: ChunkCoord,
    /// Indexed `tiles[x][y]`
    pub tiles: [[Tile; CHUNK_TILES]; CHUNK_TILES],
    pub has_outpost: bool,
    /// Merchant spawned by an outpost chunk
    pub npc: Option<Npc>,
    pub visual: Option<VisualHandle>,
}

impl Chunk {
    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[x][y]
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        &mut self.tiles[x][y]
    }

    /// Local tile index of a world position, clamped into this chunk
    pub fn local_index(&self, pos: Vec2) -> (usize, usize) {
        let local = (pos - self.coord.origin()) / TILE_SIZE;
        let clamp = |v: f32| (v.floor().max(0.0) as usize).min(CHUNK_TILES - 1);
        (clamp(local.x), clamp(local.y))
    }

    pub fn tile_at_world(&self, pos: Vec2) -> &Tile {
        let (x, y) = self.local_index(pos);
        self.tile(x, y)
    }

    /// World-space bounds of one tile
    pub fn tile_rect(&self, x: usize, y: usize) -> Rect {
        let origin = self.coord.origin();
        Rect::new(
            origin.x + x as f32 * TILE_SIZE,
            origin.y + y as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        )
    }

    /// Tiles, outpost flag and spawned NPC match exactly
    pub fn same_content(&self, other: &Chunk) -> bool {
        self.coord == other.coord
            && self.has_outpost == other.has_outpost
            && self.npc == other.npc
            && self
                .tiles
                .iter()
                .flatten()
                .zip(other.tiles.iter().flatten())
                .all(|(a, b)| a.bit_identical(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_world_floors_negative_positions() {
        assert_eq!(ChunkCoord::from_world(Vec2::new(0.0, 0.0)), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(Vec2::new(1023.9, 10.0)), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(Vec2::new(1024.0, 10.0)), ChunkCoord::new(1, 0));
        assert_eq!(ChunkCoord::from_world(Vec2::new(-0.5, -1025.0)), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = ChunkCoord::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(3, -1)), 3);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(-2, 4)), 4);
        assert_eq!(a.chebyshev_distance(a), 0);
    }

    #[test]
    fn test_center_and_origin() {
        let c = ChunkCoord::new(1, -1);
        assert_eq!(c.origin(), Vec2::new(1024.0, -1024.0));
        assert_eq!(c.center(), Vec2::new(1536.0, -512.0));
    }
}
