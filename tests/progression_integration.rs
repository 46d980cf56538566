//! Leveling, abilities and shop integration tests

use endless_wilds::core::config::GameConfig;
use endless_wilds::core::types::Vec2;
use endless_wilds::progression::abilities::{try_cast, try_dash, AbilityOutcome};
use endless_wilds::progression::leveling::apply_xp;
use endless_wilds::progression::shop::{purchase, PurchaseOutcome, RejectReason, ShopItem};
use endless_wilds::render::animation::FrameCounts;
use endless_wilds::simulation::GameState;

fn state() -> GameState {
    GameState::new(GameConfig::default(), FrameCounts::default(), 5150).unwrap()
}

#[test]
fn test_two_orbs_cross_first_level() {
    let mut state = state();
    assert_eq!(apply_xp(&mut state, 90), None);
    assert_eq!(apply_xp(&mut state, 20), Some(2));

    let player = &state.player;
    assert_eq!(player.level, 2);
    assert_eq!(player.xp, 10);
    assert_eq!(player.max_xp, 150);
    assert_eq!(player.max_health, 220.0);
    assert_eq!(player.health, 220.0);
    assert_eq!(player.max_mana, 110.0);
    assert_eq!(player.damage, 30.0);
}

#[test]
fn test_potion_rejected_without_gold() {
    let mut state = state();
    state.player.gold = 49;
    state.player.health = 100.0;

    let outcome = purchase(&mut state, ShopItem::Potion);
    assert_eq!(outcome, PurchaseOutcome::Rejected(RejectReason::NotEnoughGold));
    assert_eq!(state.player.gold, 49);
    assert_eq!(state.player.health, 100.0);
}

#[test]
fn test_potion_purchase_heals_and_charges() {
    let mut state = state();
    state.player.gold = 120;
    state.player.health = 100.0;

    let outcome = purchase(&mut state, ShopItem::Potion);
    assert_eq!(outcome, PurchaseOutcome::Purchased(ShopItem::Potion));
    assert_eq!(state.player.gold, 70);
    assert_eq!(state.player.health, 150.0);
}

#[test]
fn test_drone_bought_once() {
    let mut state = state();
    state.player.gold = 2500;

    assert_eq!(
        purchase(&mut state, ShopItem::Drone),
        PurchaseOutcome::Purchased(ShopItem::Drone)
    );
    assert!(state.player.has_drone());
    assert_eq!(state.player.gold, 1500);

    assert_eq!(
        purchase(&mut state, ShopItem::Drone),
        PurchaseOutcome::Rejected(RejectReason::AlreadyOwned)
    );
    assert_eq!(state.player.gold, 1500);
}

#[test]
fn test_abilities_unlock_with_levels() {
    let mut state = state();
    assert_eq!(try_cast(&mut state, Vec2::X), AbilityOutcome::Locked);
    assert_eq!(try_dash(&mut state), AbilityOutcome::Locked);
    assert!(state.entities.projectiles.is_empty());

    apply_xp(&mut state, 100);
    assert_eq!(try_cast(&mut state, Vec2::X), AbilityOutcome::Used);
    assert_eq!(state.entities.projectiles.len(), 1);
    assert_eq!(try_dash(&mut state), AbilityOutcome::Locked);

    state.player.level = 3;
    assert_eq!(try_dash(&mut state), AbilityOutcome::Used);
    assert!(state.player.is_dashing());
    assert_eq!(try_dash(&mut state), AbilityOutcome::NotReady);
}
