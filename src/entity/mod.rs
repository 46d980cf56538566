//! Simulation entities and the store that owns them

pub mod drop;
pub mod effects;
pub mod enemy;
pub mod npc;
pub mod player;
pub mod projectile;
pub mod store;

pub use drop::{DropKind, LootDrop};
pub use effects::{BoundedPool, Decal, Effects, Feedback, FloatingText, GhostTrail, Particle};
pub use enemy::{DamageOutcome, Enemy, EnemyKind};
pub use npc::{Npc, NpcId, NpcRole};
pub use player::{AnimState, Drone, Player};
pub use projectile::{Projectile, ProjectileOwner};
pub use store::EntityStore;
