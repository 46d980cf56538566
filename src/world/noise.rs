//! Seeded coordinate hashing
//!
//! Every generation decision is a pure function of the world seed, an
//! integer coordinate pair and a channel constant. No generator state is
//! carried between calls, so any chunk can be rebuilt bit-for-bit.

/// Independent hash streams for the different per-cell decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Channel {
    Outpost = 1,
    Decoration = 2,
    ObstacleKind = 3,
    Variant = 4,
    Scale = 5,
}

const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_A: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
fn finalize(mut h: u64) -> u64 {
    h ^= h >> 30;
    h = h.wrapping_mul(MIX_A);
    h ^= h >> 27;
    h = h.wrapping_mul(MIX_B);
    h ^ (h >> 31)
}

/// Raw 64-bit hash of (seed, x, y, channel)
pub fn hash64(seed: u64, x: i64, y: i64, channel: Channel) -> u64 {
    let mut h = finalize(seed ^ (channel as u64).wrapping_mul(GOLDEN));
    h = finalize(h ^ (x as u64).wrapping_mul(MIX_A));
    finalize(h ^ (y as u64).wrapping_mul(MIX_B))
}

/// Uniform value in [0, 1)
///
/// Keeps the top 24 bits so the result is exactly representable in an f32.
pub fn hash_unit(seed: u64, x: i64, y: i64, channel: Channel) -> f32 {
    (hash64(seed, x, y, channel) >> 40) as f32 / (1u64 << 24) as f32
}

/// Phase offset applied to the biome field for a given seed
pub fn seed_offset(seed: u64) -> f64 {
    (finalize(seed) % 10_000) as f64
}
