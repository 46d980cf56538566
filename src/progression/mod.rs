//! Player progression: xp and levels, ability gates, the merchant shop

pub mod abilities;
pub mod leveling;
pub mod shop;

pub use abilities::{
    dash_cooldown, fireball_cost, fireball_damage, try_cast, try_dash, update_drone,
    AbilityOutcome,
};
pub use leveling::{apply_xp, check_level_up};
pub use shop::{purchase, PurchaseOutcome, RejectReason, ShopItem};
