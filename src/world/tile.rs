//! Tile contents: biome and decoration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Grass,
    Desert,
    Corruption,
    Outpost,
}

impl Biome {
    /// Obstacle weights rolled when a tile gets a colliding decoration.
    ///
    /// Weights are consumed in order against a unit roll, so the first
    /// entry owns the low end of [0, 1).
    pub fn obstacle_table(self) -> &'static [(Decoration, f32)] {
        match self {
            Biome::Grass => &[
                (Decoration::Crate, 0.3),
                (Decoration::Rock, 0.3),
                (Decoration::Tree, 0.4),
            ],
            Biome::Desert => &[(Decoration::Rock, 0.5), (Decoration::Cactus, 0.5)],
            Biome::Corruption => &[(Decoration::Rock, 0.6), (Decoration::Spikes, 0.4)],
            Biome::Outpost => &[(Decoration::Fence, 1.0)],
        }
    }

    /// Pick an obstacle from this biome's table with a unit roll
    pub fn pick_obstacle(self, roll: f32) -> Decoration {
        let table = self.obstacle_table();
        let mut cumulative = 0.0;
        for &(decoration, weight) in table {
            cumulative += weight;
            if roll < cumulative {
                return decoration;
            }
        }
        // Rounding can leave the last sliver uncovered
        table.last().map(|&(d, _)| d).unwrap_or(Decoration::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Decoration {
    #[default]
    None,
    Tree,
    Rock,
    Grass,
    Flower,
    Crate,
    Fence,
    Cactus,
    Spikes,
}

impl Decoration {
    /// Whether movement and projectiles are blocked by this decoration
    pub fn collides(self) -> bool {
        match self {
            Decoration::Tree
            | Decoration::Rock
            | Decoration::Crate
            | Decoration::Fence
            | Decoration::Cactus
            | Decoration::Spikes => true,
            Decoration::None | Decoration::Grass | Decoration::Flower => false,
        }
    }

    /// Only crates can be smashed
    pub fn is_destructible(self) -> bool {
        matches!(self, Decoration::Crate)
    }
}

/// One cell of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub biome: Biome,
    pub decoration: Decoration,
    /// Visual variety value in [0, 1)
    pub variant: f32,
    /// Decoration size multiplier
    pub scale: f32,
}

impl Tile {
    pub fn is_blocking(&self) -> bool {
        self.decoration.collides()
    }

    /// Bitwise equality, used to prove regeneration is exact
    pub fn bit_identical(&self, other: &Tile) -> bool {
        self.biome == other.biome
            && self.decoration == other.decoration
            && self.variant.to_bits() == other.variant.to_bits()
            && self.scale.to_bits() == other.scale.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_flags() {
        assert!(Decoration::Tree.collides());
        assert!(Decoration::Crate.collides());
        assert!(Decoration::Spikes.collides());
        assert!(!Decoration::Grass.collides());
        assert!(!Decoration::Flower.collides());
        assert!(!Decoration::None.collides());
    }

    #[test]
    fn test_grass_table_thresholds() {
        assert_eq!(Biome::Grass.pick_obstacle(0.1), Decoration::Crate);
        assert_eq!(Biome::Grass.pick_obstacle(0.45), Decoration::Rock);
        assert_eq!(Biome::Grass.pick_obstacle(0.9), Decoration::Tree);
    }

    #[test]
    fn test_desert_and_corruption_tables() {
        assert_eq!(Biome::Desert.pick_obstacle(0.2), Decoration::Rock);
        assert_eq!(Biome::Desert.pick_obstacle(0.7), Decoration::Cactus);
        assert_eq!(Biome::Corruption.pick_obstacle(0.5), Decoration::Rock);
        assert_eq!(Biome::Corruption.pick_obstacle(0.99), Decoration::Spikes);
    }

    #[test]
    fn test_tables_sum_to_one() {
        for biome in [Biome::Grass, Biome::Desert, Biome::Corruption, Biome::Outpost] {
            let total: f32 = biome.obstacle_table().iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-6, "{:?} sums to {}", biome, total);
        }
    }

    #[test]
    fn test_only_crates_are_destructible() {
        assert!(Decoration::Crate.is_destructible());
        assert!(!Decoration::Rock.is_destructible());
        assert!(!Decoration::Fence.is_destructible());
    }
}
