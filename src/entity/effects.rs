//! Cosmetic entities: particles, decals, floating text, ghost trails
//!
//! None of these affect gameplay. Every collection is bounded; pushing
//! past capacity evicts the oldest entry.

use crate::core::config::EffectsConfig;
use crate::core::types::{Facing, Vec2};
use crate::render::colors::Color;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

/// FIFO collection that drops its oldest entry when full
#[derive(Debug, Clone)]
pub struct BoundedPool<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(256)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

/// Permanent ground mark left by a kill
#[derive(Debug, Clone, Serialize)]
pub struct Decal {
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingText {
    pub position: Vec2,
    pub text: String,
    pub color: Color,
    pub life: u32,
    /// Vertical drift per tick
    pub rise: f32,
}

/// Dash after-image
#[derive(Debug, Clone, Serialize)]
pub struct GhostTrail {
    pub position: Vec2,
    pub facing: Facing,
    pub frame: usize,
    pub life: u32,
}

/// All cosmetic collections
#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: BoundedPool<Particle>,
    pub decals: BoundedPool<Decal>,
    pub texts: BoundedPool<FloatingText>,
    pub ghosts: Vec<GhostTrail>,
    config: EffectsConfig,
}

impl Effects {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            particles: BoundedPool::new(config.particle_cap),
            decals: BoundedPool::new(config.decal_cap),
            texts: BoundedPool::new(config.floating_text_cap),
            ghosts: Vec::new(),
            config: config.clone(),
        }
    }

    /// Radial burst of `count` particles
    pub fn burst(&mut self, rng: &mut impl Rng, at: Vec2, color: Color, count: usize) {
        let speed = self.config.particle_speed;
        for _ in 0..count {
            let velocity = Vec2::new(
                (rng.gen::<f32>() - 0.5) * speed,
                (rng.gen::<f32>() - 0.5) * speed,
            );
            self.particles.push(Particle {
                position: at,
                velocity,
                life: self.config.particle_life_min + rng.gen::<f32>() * self.config.particle_life_span,
                color,
                size: 2.0 + rng.gen::<f32>() * 4.0,
            });
        }
    }

    /// Stationary short-lived particle left behind a projectile
    pub fn trail(&mut self, at: Vec2, color: Color, size: f32) {
        self.particles.push(Particle {
            position: at,
            velocity: Vec2::ZERO,
            life: 10.0,
            color,
            size,
        });
    }

    pub fn text(&mut self, at: Vec2, text: impl Into<String>, color: Color) {
        self.texts.push(FloatingText {
            position: at,
            text: text.into(),
            color,
            life: self.config.floating_text_life,
            rise: self.config.floating_text_rise,
        });
    }

    pub fn decal(&mut self, rng: &mut impl Rng, at: Vec2) {
        self.decals.push(Decal {
            position: at,
            opacity: 0.8,
            scale: 0.5 + rng.gen::<f32>() * 0.5,
        });
    }

    pub fn ghost(&mut self, at: Vec2, facing: Facing, frame: usize) {
        self.ghosts.push(GhostTrail {
            position: at,
            facing,
            frame,
            life: self.config.ghost_trail_life,
        });
    }

    /// Advance and expire particles, text and ghosts. Decals are permanent.
    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.position += p.velocity;
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);

        for t in self.texts.iter_mut() {
            t.position.y += t.rise;
            t.life = t.life.saturating_sub(1);
        }
        self.texts.retain(|t| t.life > 0);

        for g in self.ghosts.iter_mut() {
            g.life = g.life.saturating_sub(1);
        }
        self.ghosts.retain(|g| g.life > 0);
    }
}

/// Screen shake and hit-stop requests raised by combat
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Feedback {
    pub shake: f32,
    pub hit_stop: u32,
}

impl Feedback {
    /// Replace the current shake magnitude
    pub fn shake(&mut self, amount: f32) {
        self.shake = amount;
    }

    pub fn hit_stop(&mut self, frames: u32) {
        self.hit_stop = frames;
    }

    pub fn decay_shake(&mut self, decay: f32, floor: f32) {
        if self.shake > 0.0 {
            self.shake *= decay;
        }
        if self.shake < floor {
            self.shake = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pool_evicts_oldest() {
        let mut pool = BoundedPool::new(3);
        for i in 0..5 {
            pool.push(i);
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_decals_are_capped() {
        let config = EffectsConfig::default();
        let mut effects = Effects::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for i in 0..80 {
            effects.decal(&mut rng, Vec2::new(i as f32, 0.0));
        }
        assert_eq!(effects.decals.len(), config.decal_cap);
        // Oldest were evicted
        assert_eq!(effects.decals.iter().next().map(|d| d.position.x), Some(30.0));
    }

    #[test]
    fn test_update_expires_effects() {
        let mut effects = Effects::new(&EffectsConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        effects.burst(&mut rng, Vec2::ZERO, colors::WHITE, 10);
        effects.text(Vec2::ZERO, "hi", colors::WHITE);
        effects.ghost(Vec2::ZERO, Facing::Left, 0);

        for _ in 0..60 {
            effects.update();
        }
        assert!(effects.particles.is_empty());
        assert!(effects.texts.is_empty());
        assert!(effects.ghosts.is_empty());
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut feedback = Feedback::default();
        feedback.shake(5.0);
        for _ in 0..30 {
            feedback.decay_shake(0.9, 0.5);
        }
        assert_eq!(feedback.shake, 0.0);
    }
}
