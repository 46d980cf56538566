//! Merchant shop
//!
//! Purchases validate gold before anything changes. A rejected purchase
//! leaves the player untouched apart from a floating feedback line.

use crate::core::config::ShopConfig;
use crate::core::types::Vec2;
use crate::progression::abilities::grant_drone;
use crate::progression::leveling::apply_xp;
use crate::render::colors;
use crate::simulation::state::GameState;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    /// Consumable heal
    Potion,
    /// Permanent max health
    Vitality,
    /// Permanent max mana
    Focus,
    /// Flat xp grant
    Insight,
    /// One-time companion unlock
    Drone,
}

impl ShopItem {
    pub const ALL: [ShopItem; 5] = [
        ShopItem::Potion,
        ShopItem::Vitality,
        ShopItem::Focus,
        ShopItem::Insight,
        ShopItem::Drone,
    ];

    pub fn price(self, config: &ShopConfig) -> u32 {
        match self {
            ShopItem::Potion => config.potion_price,
            ShopItem::Vitality => config.vitality_price,
            ShopItem::Focus => config.focus_price,
            ShopItem::Insight => config.insight_price,
            ShopItem::Drone => config.drone_price,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShopItem::Potion => "Health Potion",
            ShopItem::Vitality => "Vitality Elixir",
            ShopItem::Focus => "Focus Crystal",
            ShopItem::Insight => "Tome of Insight",
            ShopItem::Drone => "Companion Drone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    NotEnoughGold,
    AlreadyOwned,
    /// No merchant modal is open
    ShopClosed,
}

impl RejectReason {
    fn message(self) -> &'static str {
        match self {
            RejectReason::NotEnoughGold => "NOT ENOUGH GOLD",
            RejectReason::AlreadyOwned => "ALREADY OWNED",
            RejectReason::ShopClosed => "SHOP CLOSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PurchaseOutcome {
    Purchased(ShopItem),
    Rejected(RejectReason),
}

fn feedback_anchor(state: &GameState) -> Vec2 {
    state.player.position - Vec2::new(0.0, 40.0)
}

/// Show the rejection line and report it; nothing else changes
pub fn reject(state: &mut GameState, item: ShopItem, reason: RejectReason) -> PurchaseOutcome {
    let at = feedback_anchor(state);
    state.entities.effects.text(at, reason.message(), colors::HURT);
    debug!(?item, ?reason, gold = state.player.gold, "purchase rejected");
    PurchaseOutcome::Rejected(reason)
}

/// Buy `item` if the player can afford it and does not already own it
pub fn purchase(state: &mut GameState, item: ShopItem) -> PurchaseOutcome {
    let shop = state.config.shop.clone();
    let price = item.price(&shop);

    if state.player.gold < price {
        return reject(state, item, RejectReason::NotEnoughGold);
    }
    if item == ShopItem::Drone && state.player.has_drone() {
        return reject(state, item, RejectReason::AlreadyOwned);
    }
    if !state.player.try_spend(price) {
        return reject(state, item, RejectReason::NotEnoughGold);
    }
    state.feedback.shake(2.0);

    let at = feedback_anchor(state);
    let player = &mut state.player;
    match item {
        ShopItem::Potion => {
            player.heal(shop.potion_heal);
            let text = format!("+{} HP", shop.potion_heal);
            state.entities.effects.text(at, text, colors::HEAL);
        }
        ShopItem::Vitality => {
            player.max_health += shop.vitality_bonus;
            player.heal(shop.vitality_bonus);
            state.entities.effects.text(at, "MAX HP UP!", colors::HEAL);
        }
        ShopItem::Focus => {
            player.max_mana += shop.focus_bonus;
            player.mana = (player.mana + shop.focus_bonus).min(player.max_mana);
            state.entities.effects.text(at, "MAX MANA UP!", colors::MANA);
        }
        ShopItem::Insight => {
            let text = format!("+{} XP", shop.insight_xp);
            state.entities.effects.text(at, text, colors::XP);
            apply_xp(state, shop.insight_xp);
        }
        ShopItem::Drone => {
            grant_drone(state);
            state
                .entities
                .effects
                .text(at, "DRONE ACQUIRED!", colors::DRONE_BOLT);
        }
    }

    let origin = state.player.position;
    state
        .entities
        .effects
        .burst(&mut state.rng, origin, colors::GOLD, 15);

    debug!(?item, price, gold = state.player.gold, "purchase complete");
    PurchaseOutcome::Purchased(item)
}
