//! World generation and chunk cache integration tests

use endless_wilds::core::config::GameConfig;
use endless_wilds::core::types::{Rect, Vec2};
use endless_wilds::world::{ChunkCache, ChunkCoord, Decoration, WorldGenerator, CHUNK_TILES};
use proptest::prelude::*;

fn cache(seed: u64) -> ChunkCache {
    ChunkCache::from_config(seed, &GameConfig::default())
}

proptest! {
    #[test]
    fn test_generation_ignores_cache_history(
        seed in any::<u64>(),
        x in -40i32..40,
        y in -40i32..40,
    ) {
        let coord = ChunkCoord::new(x, y);
        let mut cache = cache(seed);
        let first = cache.get(coord).clone();

        // Wander far away so the chunk is evicted, then come back
        cache.get(ChunkCoord::new(x + 100, y + 100));
        cache.sweep(ChunkCoord::new(x + 100, y + 100), 2);
        prop_assert!(!cache.contains(coord));

        let second = cache.get(coord).clone();
        prop_assert!(first.same_content(&second));

        let fresh = WorldGenerator::from_config(seed, &GameConfig::default()).generate(coord);
        prop_assert!(first.same_content(&fresh));
    }

    #[test]
    fn test_safe_zone_is_always_walkable(
        seed in any::<u64>(),
        angle in 0.0f32..std::f32::consts::TAU,
        radius in 0.0f32..299.0,
    ) {
        let mut cache = cache(seed);
        let pos = Vec2::new(angle.cos(), angle.sin()) * radius;
        prop_assert!(!cache.is_blocked(pos));
    }
}

#[test]
fn test_origin_chunk_regenerates_after_eviction() {
    let mut cache = cache(2024);
    let origin = cache.get(ChunkCoord::ORIGIN).clone();
    assert!(!origin.has_outpost);

    cache.get(ChunkCoord::new(30, 30));
    let evicted = cache.sweep(ChunkCoord::new(30, 30), 2);
    assert!(evicted >= 1);
    assert!(!cache.contains(ChunkCoord::ORIGIN));

    assert!(cache.get(ChunkCoord::ORIGIN).same_content(&origin));
}

#[test]
fn test_sweep_keeps_neighbourhood() {
    let mut cache = cache(7);
    for x in -4..=4 {
        for y in -4..=4 {
            cache.get(ChunkCoord::new(x, y));
        }
    }
    assert_eq!(cache.len(), 81);
    cache.sweep(ChunkCoord::ORIGIN, 2);
    assert_eq!(cache.len(), 25);
    assert!(cache.coords().all(|c| c.chebyshev_distance(ChunkCoord::ORIGIN) <= 2));
}

#[test]
fn test_smashed_crates_return_after_regeneration() {
    let mut cache = cache(99);

    // Find some chunk with a crate in it
    let found = (1..60).find_map(|x| {
        let coord = ChunkCoord::new(x, 3);
        let chunk = cache.get(coord);
        (0..CHUNK_TILES)
            .flat_map(|tx| (0..CHUNK_TILES).map(move |ty| (tx, ty)))
            .find(|&(tx, ty)| chunk.tile(tx, ty).decoration == Decoration::Crate)
            .map(|(tx, ty)| (coord, chunk.tile_rect(tx, ty)))
    });
    let Some((coord, rect)) = found else {
        return;
    };

    let inner = Rect::new(rect.x + 8.0, rect.y + 8.0, 8.0, 8.0);
    assert_eq!(cache.destroy_crates(inner).len(), 1);
    assert!(cache.destroy_crates(inner).is_empty());

    cache.sweep(ChunkCoord::new(coord.x + 50, coord.y), 0);
    assert!(!cache.contains(coord));
    assert_eq!(cache.destroy_crates(inner).len(), 1);
}
