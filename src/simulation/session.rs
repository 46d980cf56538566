//! A running game session: simulation context, UI overlays, and dialogue
//!
//! The session is the only place that touches both the simulation and the
//! UI. Each frame it delivers finished dialogue replies, runs chunk
//! maintenance on its wall-clock timer, and then either advances the
//! simulation one tick or, while a modal is open, leaves it paused.

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::entity::drop::DropKind;
use crate::entity::npc::NpcRole;
use crate::llm::dialogue::{ChatMessage, DialogueDispatcher, DialogueReply, DialogueService};
use crate::llm::persona::{Persona, GUIDE_GREETING, MERCHANT_GREETING, MERCHANT_PITCH_PROMPT};
use crate::progression::shop::{self, PurchaseOutcome, RejectReason, ShopItem};
use crate::render::animation::FrameCounts;
use crate::render::snapshot::PresentationSnapshot;
use crate::simulation::state::GameState;
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};
use crate::ui::input::Intents;
use crate::ui::state::{GameUI, LogCategory, ModalKind, ModalState};
use crate::world::cache::SweepTimer;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{debug, info};

pub struct Session {
    state: GameState,
    ui: GameUI,
    dialogue: DialogueDispatcher,
    sweep: SweepTimer,
}

impl Session {
    /// `runtime` hosts the dialogue requests; the simulation itself never awaits
    pub fn new(
        config: GameConfig,
        frames: FrameCounts,
        seed: u64,
        service: Arc<dyn DialogueService>,
        runtime: Handle,
    ) -> Result<Self> {
        let sweep = SweepTimer::from_millis(config.world.sweep_interval_ms);
        let state = GameState::new(config, frames, seed)?;
        Ok(Self {
            state,
            ui: GameUI::new(),
            dialogue: DialogueDispatcher::new(service, runtime),
            sweep,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn ui(&self) -> &GameUI {
        &self.ui
    }

    pub fn is_paused(&self) -> bool {
        self.ui.is_modal_open()
    }

    /// One display frame.
    ///
    /// Returns the tick's events; empty while paused or after game over.
    pub fn frame(&mut self, intents: &Intents, now: Instant) -> Vec<SimulationEvent> {
        self.pump_dialogue();

        if self.sweep.poll(now) {
            self.state.sweep_chunks();
        }

        if self.is_paused() {
            return Vec::new();
        }

        if intents.interact && self.try_interact().is_some() {
            return Vec::new();
        }

        let events = run_simulation_tick(&mut self.state, intents);
        for event in &events {
            if let Some((message, category)) = describe(event) {
                self.ui.log(self.state.tick, message, category);
            }
        }
        events
    }

    /// Talk to the nearest NPC in range, opening its overlay.
    ///
    /// Merchants open the shop and are asked for a sales pitch in the
    /// background. Returns the kind of overlay opened.
    pub fn try_interact(&mut self) -> Option<ModalKind> {
        if self.ui.is_modal_open() || !self.state.player.is_alive() {
            return None;
        }
        let npc = self
            .state
            .entities
            .nearest_npc_in_range(self.state.player.position)?
            .clone();
        let persona = Persona::for_role(npc.role);

        let kind = match npc.role {
            NpcRole::Guide => {
                self.ui
                    .open(ModalState::dialogue(npc.id, persona, GUIDE_GREETING));
                ModalKind::Dialogue
            }
            NpcRole::Merchant => {
                let mut modal = ModalState::shop(npc.id, persona, MERCHANT_GREETING);
                let pending =
                    self.dialogue
                        .dispatch(Vec::new(), MERCHANT_PITCH_PROMPT.to_string(), persona);
                modal.await_reply(pending);
                self.ui.open(modal);
                ModalKind::Shop
            }
        };

        info!(npc = %npc.name, ?kind, "interaction opened");
        Some(kind)
    }

    /// Send a line to the NPC in the open dialogue.
    ///
    /// Returns false when no dialogue is open, the line is blank, or the NPC
    /// has not answered the previous line yet.
    pub fn submit_chat(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(modal) = self.ui.modal.as_mut() else {
            return false;
        };
        if modal.kind != ModalKind::Dialogue || modal.typing {
            return false;
        }

        let history: Vec<ChatMessage> = modal.history.iter().cloned().collect();
        modal.push_message(ChatMessage::player(text));
        let pending = self
            .dialogue
            .dispatch(history, text.to_string(), modal.persona);
        modal.await_reply(pending);
        true
    }

    /// Buy from the merchant whose shop is open
    pub fn buy(&mut self, item: ShopItem) -> PurchaseOutcome {
        let shop_open = matches!(&self.ui.modal, Some(m) if m.kind == ModalKind::Shop);
        if !shop_open {
            return shop::reject(&mut self.state, item, RejectReason::ShopClosed);
        }

        let outcome = shop::purchase(&mut self.state, item);
        if let PurchaseOutcome::Purchased(item) = outcome {
            self.ui.log(
                self.state.tick,
                format!("Bought {}", item.label()),
                LogCategory::Loot,
            );
        }
        outcome
    }

    /// Close the open overlay, abandoning any reply still in flight
    pub fn close_modal(&mut self) -> bool {
        self.ui.close()
    }

    /// Apply every reply that has arrived. Stale replies are dropped.
    ///
    /// Returns how many replies were applied.
    pub fn pump_dialogue(&mut self) -> usize {
        let mut applied = 0;
        while let Some(reply) = self.dialogue.try_recv() {
            if self.apply_reply(reply) {
                applied += 1;
            }
        }
        applied
    }

    /// Block on the next delivered reply; for drivers that own an async context
    pub async fn wait_for_reply(&mut self) -> bool {
        match self.dialogue.recv().await {
            Some(reply) => self.apply_reply(reply),
            None => false,
        }
    }

    fn apply_reply(&mut self, reply: DialogueReply) -> bool {
        let applied = self
            .ui
            .modal
            .as_mut()
            .map(|m| m.accept_reply(reply.clone()))
            .unwrap_or(false);
        if !applied {
            debug!(token = ?reply.token, "stale dialogue reply dropped");
        }
        applied
    }

    pub fn snapshot(&mut self) -> PresentationSnapshot {
        PresentationSnapshot::capture(&mut self.state, &self.ui)
    }

    /// New world, new seed; the event log survives
    pub fn restart(&mut self, seed: u64) {
        self.ui.close();
        self.state.restart(seed);
        self.ui
            .log(0, format!("New run, seed {}", seed), LogCategory::System);
    }
}

/// Event log line for an event, if it deserves one
fn describe(event: &SimulationEvent) -> Option<(String, LogCategory)> {
    let entry = match event {
        SimulationEvent::EnemyKilled { kind, score, .. } => (
            format!("{:?} slain (+{})", kind, score),
            LogCategory::Combat,
        ),
        SimulationEvent::CratesBroken { count } => {
            (format!("Smashed {} crate(s)", count), LogCategory::Loot)
        }
        SimulationEvent::PlayerDied { .. } => ("You died".to_string(), LogCategory::Combat),
        SimulationEvent::BossSpawned { level } => {
            (format!("A level {} boss approaches", level), LogCategory::Combat)
        }
        SimulationEvent::LevelUp { level } => {
            (format!("Reached level {}", level), LogCategory::Progression)
        }
        SimulationEvent::Pickup {
            kind: DropKind::Gold,
            value,
        } => (format!("Picked up {} gold", value), LogCategory::Loot),
        SimulationEvent::GameOver { score, level } => (
            format!("Game over at level {} with {} points", level, score),
            LogCategory::System,
        ),
        SimulationEvent::EnemyHit { .. }
        | SimulationEvent::PlayerHit { .. }
        | SimulationEvent::Pickup { .. } => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result as GameResult;
    use crate::core::types::Vec2;
    use crate::llm::dialogue::FALLBACK_LINE;
    use crate::llm::persona::OfflineDialogue;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl DialogueService for Echo {
        async fn generate(
            &self,
            _history: &[ChatMessage],
            message: &str,
            persona: Persona,
        ) -> GameResult<String> {
            Ok(format!("{:?} heard: {}", persona, message))
        }
    }

    fn session(service: Arc<dyn DialogueService>) -> Session {
        Session::new(
            GameConfig::default(),
            FrameCounts::default(),
            81,
            service,
            Handle::current(),
        )
        .unwrap()
    }

    fn walk_to_guide(session: &mut Session) {
        session.state_mut().player.position = Vec2::new(90.0, 80.0);
    }

    #[tokio::test]
    async fn test_guide_dialogue_round_trip() {
        let mut session = session(Arc::new(Echo));
        walk_to_guide(&mut session);
        assert_eq!(session.try_interact(), Some(ModalKind::Dialogue));
        assert!(session.submit_chat("where am I?"));
        assert!(session.wait_for_reply().await);

        let modal = session.ui().modal.as_ref().unwrap();
        assert_eq!(modal.history.len(), 3);
        assert_eq!(modal.history[2].text, "Guide heard: where am I?");
        assert!(!modal.typing);
    }

    #[tokio::test]
    async fn test_modal_pauses_simulation() {
        let mut session = session(Arc::new(Echo));
        let now = Instant::now();
        session.frame(&Intents::idle(), now);
        assert_eq!(session.state().tick, 1);

        walk_to_guide(&mut session);
        let mut talk = Intents::idle();
        talk.interact = true;
        session.frame(&talk, now);
        assert!(session.is_paused());
        for _ in 0..5 {
            session.frame(&Intents::idle(), now);
        }
        assert_eq!(session.state().tick, 1);

        session.close_modal();
        session.frame(&Intents::idle(), now);
        assert_eq!(session.state().tick, 2);
    }

    #[tokio::test]
    async fn test_offline_backend_falls_back() {
        let mut session = session(Arc::new(OfflineDialogue));
        walk_to_guide(&mut session);
        session.try_interact();
        session.submit_chat("hello");
        assert!(session.wait_for_reply().await);
        let modal = session.ui().modal.as_ref().unwrap();
        assert_eq!(modal.history.back().unwrap().text, FALLBACK_LINE);
    }

    #[tokio::test]
    async fn test_buying_needs_open_shop() {
        let mut session = session(Arc::new(Echo));
        session.state_mut().player.gold = 500;
        let outcome = session.buy(ShopItem::Potion);
        assert_eq!(outcome, PurchaseOutcome::Rejected(RejectReason::ShopClosed));
        assert_eq!(session.state().player.gold, 500);
    }

    #[tokio::test]
    async fn test_nothing_to_interact_with() {
        let mut session = session(Arc::new(Echo));
        session.state_mut().player.position = Vec2::new(5000.0, 5000.0);
        assert_eq!(session.try_interact(), None);
        assert!(!session.is_paused());
    }

    #[tokio::test]
    async fn test_restart_closes_overlay() {
        let mut session = session(Arc::new(Echo));
        walk_to_guide(&mut session);
        assert!(session.try_interact().is_some());
        session.restart(82);
        assert!(!session.is_paused());
        assert_eq!(session.state().seed, 82);
        assert_eq!(session.state().tick, 0);
    }
}
