//! Game configuration with documented constants
//!
//! Every tunable number the simulation reads lives here. Units are world
//! pixels and ticks (one tick per display frame, roughly 60 per second).
//! Sections deserialize from TOML; any missing key falls back to the default.

use crate::core::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration set handed to a simulation session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub progression: ProgressionConfig,
    pub combat: CombatConfig,
    pub abilities: AbilityConfig,
    pub drone: DroneConfig,
    pub enemies: EnemyConfig,
    pub boss: BossConfig,
    pub spawn: SpawnConfig,
    pub drops: DropConfig,
    pub shop: ShopConfig,
    pub time: TimeConfig,
    pub camera: CameraConfig,
    pub effects: EffectsConfig,
    pub npcs: NpcConfig,
}

// === WORLD GENERATION ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Radius around the origin where nothing hostile happens
    pub safe_zone_radius: f32,
    /// Per-tile probability of a colliding obstacle outside safe areas
    pub obstacle_density: f32,
    /// Biome field frequency (multiplied by 0.01 per world pixel)
    pub biome_scale: f64,
    /// Biome field values below this become corruption
    pub corruption_threshold: f64,
    /// Biome field values above this become desert
    pub desert_threshold: f64,
    /// Per-chunk probability of an outpost
    pub outpost_chance: f32,
    /// Clutter roll above which a tile gets decorative grass
    pub grass_clutter_threshold: f32,
    /// Clutter roll above which a tile gets a flower
    pub flower_clutter_threshold: f32,
    /// Chebyshev distance (in chunks) kept by the cache sweep
    pub keep_distance: i32,
    /// Wall-clock interval between cache sweeps
    pub sweep_interval_ms: u64,
    /// NPCs further than this from the player are pruned on sweep
    pub npc_prune_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            safe_zone_radius: 300.0,
            obstacle_density: 0.05,
            biome_scale: 0.05,
            corruption_threshold: -0.8,
            desert_threshold: 0.8,
            outpost_chance: 0.05,
            grass_clutter_threshold: 0.85,
            flower_clutter_threshold: 0.98,
            keep_distance: 3,
            sweep_interval_ms: 5000,
            npc_prune_distance: 2000.0,
        }
    }
}

// === PLAYER ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Speed multiplier while standing on desert sand
    pub desert_speed_factor: f32,
    /// Sprite draw scale; also scales the melee hitbox height
    pub draw_scale: f32,
    pub width: f32,
    pub height: f32,
    pub max_health: f32,
    pub max_mana: f32,
    pub base_damage: f32,
    pub first_level_xp: u32,
    /// Mana restored per tick
    pub mana_regen: f32,
    /// Ticks per animation frame
    pub frame_ticks: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            desert_speed_factor: 0.9,
            draw_scale: 1.5,
            width: 20.0,
            height: 20.0,
            max_health: 200.0,
            max_mana: 100.0,
            base_damage: 25.0,
            first_level_xp: 100,
            mana_regen: 0.05,
            frame_ticks: 8,
        }
    }
}

// === PROGRESSION ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// maxXp multiplier applied on every level-up (result floored)
    pub xp_growth: f32,
    pub health_per_level: f32,
    pub mana_per_level: f32,
    pub damage_per_level: f32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_growth: 1.5,
            health_per_level: 20.0,
            mana_per_level: 10.0,
            damage_per_level: 5.0,
        }
    }
}

// === MELEE AND CONTACT COMBAT ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub attack_cooldown: u32,
    /// Ticks into the cooldown after which the attack pose may end
    pub attack_recovery: u32,
    pub attack_range: f32,
    /// Hitbox top sits this far above the player position
    pub attack_vertical_offset: f32,
    /// Extra hitbox height on top of the scaled player height
    pub attack_height_padding: f32,
    pub knockback: f32,
    pub boss_knockback: f32,
    /// Multiplier applied to a boss's body for hit tests
    pub boss_hitbox_scale: f32,
    pub flash_ticks: u32,
    pub hit_stop_frames: u32,
    /// Contact radius for player and drone projectiles against enemies
    pub projectile_hit_radius: f32,
    /// Contact radius for enemy projectiles against the player
    pub player_hit_radius: f32,
    pub projectile_invulnerability: u32,
    pub contact_radius: f32,
    pub boss_contact_radius: f32,
    pub contact_invulnerability: u32,
    pub contact_knockback: f32,
    pub boss_contact_knockback: f32,
    pub kill_score: u64,
    pub boss_kill_score: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_cooldown: 25,
            attack_recovery: 12,
            attack_range: 90.0,
            attack_vertical_offset: 30.0,
            attack_height_padding: 40.0,
            knockback: 10.0,
            boss_knockback: 2.0,
            boss_hitbox_scale: 3.0,
            flash_ticks: 10,
            hit_stop_frames: 3,
            projectile_hit_radius: 30.0,
            player_hit_radius: 20.0,
            projectile_invulnerability: 60,
            contact_radius: 30.0,
            boss_contact_radius: 60.0,
            contact_invulnerability: 90,
            contact_knockback: 15.0,
            boss_contact_knockback: 30.0,
            kill_score: 10,
            boss_kill_score: 500,
        }
    }
}

// === ABILITIES ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    pub dash_unlock_level: u32,
    pub dash_speed: f32,
    pub dash_duration: u32,
    /// Base dash cooldown in ticks
    pub dash_cooldown: u32,
    /// Extra invulnerability granted past the dash itself
    pub dash_invulnerability_bonus: u32,
    /// Level past which the dash cooldown starts shrinking
    pub dash_reduction_offset: u32,
    pub dash_reduction_per_level: f32,
    pub dash_max_reduction: f32,
    /// Ticks per ghost trail window; trails spawn on every other window
    pub ghost_trail_window: u64,

    pub fireball_unlock_level: u32,
    pub fireball_mana_cost: f32,
    pub fireball_cost_per_level: f32,
    pub fireball_min_cost: f32,
    pub fireball_speed: f32,
    pub fireball_damage: f32,
    pub fireball_damage_per_level: f32,
    pub fireball_life: u32,
    pub fireball_radius: f32,
    /// Fireballs leave the player this far above its feet
    pub fireball_origin_lift: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            dash_unlock_level: 3,
            dash_speed: 12.0,
            dash_duration: 15,
            dash_cooldown: 180,
            dash_invulnerability_bonus: 5,
            dash_reduction_offset: 3,
            dash_reduction_per_level: 0.05,
            dash_max_reduction: 0.5,
            ghost_trail_window: 3,
            fireball_unlock_level: 2,
            fireball_mana_cost: 35.0,
            fireball_cost_per_level: 1.0,
            fireball_min_cost: 10.0,
            fireball_speed: 10.0,
            fireball_damage: 50.0,
            fireball_damage_per_level: 5.0,
            fireball_life: 60,
            fireball_radius: 12.0,
            fireball_origin_lift: 10.0,
        }
    }
}

// === COMPANION DRONE ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Horizontal hover offset behind the player (mirrored by facing)
    pub offset_x: f32,
    pub offset_y: f32,
    /// Fraction of the remaining distance covered each tick
    pub follow_rate: f32,
    pub cooldown: u32,
    pub range: f32,
    pub damage: f32,
    pub bolt_speed: f32,
    pub bolt_life: u32,
    pub bolt_radius: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            offset_x: 30.0,
            offset_y: -40.0,
            follow_rate: 0.1,
            cooldown: 60,
            range: 400.0,
            damage: 15.0,
            bolt_speed: 8.0,
            bolt_life: 50,
            bolt_radius: 4.0,
        }
    }
}

// === REGULAR ENEMIES ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub base_health: f32,
    pub health_per_level: f32,
    pub elite_health_multiplier: f32,
    pub base_speed: f32,
    pub speed_per_level: f32,
    /// Random speed factor is drawn from [jitter_min, jitter_min + jitter_span)
    pub speed_jitter_min: f32,
    pub speed_jitter_span: f32,
    pub night_speed_multiplier: f32,
    pub base_damage: f32,
    pub damage_per_level: f32,
    pub aggro_range: f32,
    pub night_aggro_range: f32,
    pub melee_range: f32,
    pub archer_range: f32,
    pub archer_cooldown: u32,
    /// Archers back off when the player is closer than this
    pub archer_retreat_distance: f32,
    /// Archers close in when the player is further than this
    pub archer_advance_distance: f32,
    pub arrow_speed: f32,
    pub arrow_life: u32,
    pub arrow_radius: f32,
    /// Enemies stop pushing toward the player inside this distance
    pub standoff: f32,
    pub boss_standoff: f32,
    /// Residual velocity kept each tick
    pub damping: f32,
    /// Fraction of the desired velocity added each tick
    pub steering: f32,
    pub flee_multiplier: f32,
    pub separation: f32,
    pub boss_separation: f32,
    pub separation_push: f32,
    pub despawn_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: 24.0,
            base_health: 50.0,
            health_per_level: 10.0,
            elite_health_multiplier: 2.0,
            base_speed: 1.2,
            speed_per_level: 0.05,
            speed_jitter_min: 0.8,
            speed_jitter_span: 0.3,
            night_speed_multiplier: 1.2,
            base_damage: 5.0,
            damage_per_level: 1.5,
            aggro_range: 800.0,
            night_aggro_range: 1200.0,
            melee_range: 40.0,
            archer_range: 400.0,
            archer_cooldown: 120,
            archer_retreat_distance: 150.0,
            archer_advance_distance: 250.0,
            arrow_speed: 7.0,
            arrow_life: 100,
            arrow_radius: 4.0,
            standoff: 20.0,
            boss_standoff: 60.0,
            damping: 0.85,
            steering: 0.2,
            flee_multiplier: 1.5,
            separation: 30.0,
            boss_separation: 60.0,
            separation_push: 0.5,
            despawn_radius: 1500.0,
        }
    }
}

// === BOSS ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// A boss appears at every positive multiple of this level
    pub level_interval: u32,
    pub spawn_distance: f32,
    pub size: f32,
    pub health_per_level: f32,
    pub base_damage: f32,
    pub damage_per_level: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub speed: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            level_interval: 5,
            spawn_distance: 800.0,
            size: 64.0,
            health_per_level: 300.0,
            base_damage: 20.0,
            damage_per_level: 2.0,
            aggro_range: 2000.0,
            attack_range: 100.0,
            speed: 2.0,
        }
    }
}

// === POPULATION ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub base_population: u32,
    pub population_per_level: u32,
    pub population_cap: u32,
    pub night_multiplier: u32,
    /// Placement attempts per tick
    pub attempts_per_tick: u32,
    pub min_distance: f32,
    pub distance_span: f32,
    pub elite_chance_per_level: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_population: 5,
            population_per_level: 2,
            population_cap: 60,
            night_multiplier: 2,
            attempts_per_tick: 5,
            min_distance: 700.0,
            distance_span: 400.0,
            elite_chance_per_level: 0.05,
        }
    }
}

// === LOOT ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    /// Ticks before an uncollected drop vanishes
    pub life: u32,
    pub xp_value: u32,
    pub boss_xp_multiplier: u32,
    pub gold_chance: f32,
    pub gold_min: u32,
    pub gold_max: u32,
    pub boss_gold_multiplier: u32,
    pub health_chance: f32,
    pub health_value: u32,
    /// Health drops spawn this far to the right of the corpse
    pub health_offset: f32,
    /// Probability that a smashed crate yields xp instead of health
    pub crate_xp_chance: f32,
    pub pickup_range: f32,
    pub magnet_range: f32,
    /// Fraction of the gap closed per tick once magnetized
    pub magnet_pull: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            life: 600,
            xp_value: 10,
            boss_xp_multiplier: 20,
            gold_chance: 0.3,
            gold_min: 5,
            gold_max: 15,
            boss_gold_multiplier: 5,
            health_chance: 0.05,
            health_value: 30,
            health_offset: 10.0,
            crate_xp_chance: 0.5,
            pickup_range: 60.0,
            magnet_range: 120.0,
            magnet_pull: 0.15,
        }
    }
}

// === SHOP ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub potion_price: u32,
    pub vitality_price: u32,
    pub focus_price: u32,
    pub insight_price: u32,
    pub drone_price: u32,
    pub potion_heal: f32,
    pub vitality_bonus: f32,
    pub focus_bonus: f32,
    pub insight_xp: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            potion_price: 50,
            vitality_price: 200,
            focus_price: 150,
            insight_price: 300,
            drone_price: 1000,
            potion_heal: 50.0,
            vitality_bonus: 50.0,
            focus_bonus: 50.0,
            insight_xp: 100,
        }
    }
}

// === TIME OF DAY ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Phase advance per tick; the phase wraps to 0 past 1
    pub cycle_speed: f32,
    pub start_phase: f32,
    pub night_start: f32,
    pub night_end: f32,
    /// Darkness above which it always rains (outside deserts)
    pub rain_darkness: f32,
    pub storm_frequency: f32,
    pub storm_threshold: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            cycle_speed: 0.00002,
            start_phase: 0.3,
            night_start: 0.6,
            night_end: 0.9,
            rain_darkness: 0.6,
            storm_frequency: 20.0,
            storm_threshold: 0.8,
        }
    }
}

// === CAMERA AND FEEDBACK ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub follow_rate: f32,
    pub zoom_rate: f32,
    pub dash_zoom: f32,
    pub boss_zoom: f32,
    pub shake_decay: f32,
    /// Shake below this snaps to zero
    pub shake_floor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_rate: 0.1,
            zoom_rate: 0.05,
            dash_zoom: 0.9,
            boss_zoom: 0.85,
            shake_decay: 0.9,
            shake_floor: 0.5,
        }
    }
}

// === COSMETICS ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub decal_cap: usize,
    pub particle_cap: usize,
    pub floating_text_cap: usize,
    pub floating_text_life: u32,
    pub floating_text_rise: f32,
    pub particle_speed: f32,
    pub particle_life_min: f32,
    pub particle_life_span: f32,
    pub ghost_trail_life: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            decal_cap: 50,
            particle_cap: 4096,
            floating_text_cap: 256,
            floating_text_life: 60,
            floating_text_rise: -2.0,
            particle_speed: 10.0,
            particle_life_min: 30.0,
            particle_life_span: 20.0,
            ghost_trail_life: 10,
        }
    }
}

// === NPCS ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub guide_position: [f32; 2],
    pub guide_range: f32,
    pub merchant_range: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            guide_position: [100.0, 80.0],
            guide_range: 100.0,
            merchant_range: 120.0,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.world.corruption_threshold >= self.world.desert_threshold {
            return invalid(format!(
                "corruption_threshold ({}) must be < desert_threshold ({})",
                self.world.corruption_threshold, self.world.desert_threshold
            ));
        }

        if self.world.grass_clutter_threshold > self.world.flower_clutter_threshold {
            return invalid("grass_clutter_threshold must be <= flower_clutter_threshold".into());
        }

        if self.world.keep_distance < 1 {
            return invalid("keep_distance must be at least 1 chunk".into());
        }

        let t = &self.time;
        if !(0.0..=1.0).contains(&t.night_start) || !(0.0..=1.0).contains(&t.night_end) {
            return invalid("night window must lie inside [0, 1]".into());
        }
        if t.night_start >= t.night_end {
            return invalid(format!(
                "night_start ({}) must be < night_end ({})",
                t.night_start, t.night_end
            ));
        }

        if self.enemies.archer_retreat_distance >= self.enemies.archer_advance_distance {
            return invalid("archer_retreat_distance must be < archer_advance_distance".into());
        }

        if !(0.0..1.0).contains(&self.enemies.damping) {
            return invalid("enemy damping must be in [0, 1)".into());
        }

        if self.drops.gold_min > self.drops.gold_max {
            return invalid("gold_min must be <= gold_max".into());
        }

        if self.drops.pickup_range > self.drops.magnet_range {
            return invalid("pickup_range must be <= magnet_range".into());
        }

        if self.player.max_health <= 0.0 || self.player.speed <= 0.0 {
            return invalid("player health and speed must be positive".into());
        }

        if self.progression.xp_growth < 1.0 {
            return invalid("xp_growth must be >= 1".into());
        }

        if self.boss.level_interval == 0 {
            return invalid("boss level_interval must be positive".into());
        }

        if self.effects.decal_cap == 0 {
            return invalid("decal_cap must be positive".into());
        }

        Ok(())
    }
}
