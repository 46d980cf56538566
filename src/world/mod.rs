//! Infinite tile world: deterministic generation and the chunk cache

pub mod cache;
pub mod chunk;
pub mod generator;
pub mod noise;
pub mod terrain;
pub mod tile;

pub use cache::{prune_npcs, ChunkCache, SweepTimer};
pub use chunk::{Chunk, ChunkCoord, VisualHandle, CHUNK_PIXELS, CHUNK_TILES, TILE_SIZE};
pub use generator::WorldGenerator;
pub use tile::{Biome, Decoration, Tile};
