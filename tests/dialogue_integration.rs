//! Dialogue delivery through a session

use async_trait::async_trait;
use endless_wilds::core::config::GameConfig;
use endless_wilds::core::error::Result;
use endless_wilds::core::types::Vec2;
use endless_wilds::entity::Npc;
use endless_wilds::llm::dialogue::{ChatMessage, DialogueService, EMPTY_REPLY};
use endless_wilds::llm::persona::{Persona, MERCHANT_GREETING};
use endless_wilds::render::animation::FrameCounts;
use endless_wilds::simulation::Session;
use endless_wilds::ui::state::ModalKind;
use endless_wilds::world::ChunkCoord;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

struct Scripted(&'static str);

#[async_trait]
impl DialogueService for Scripted {
    async fn generate(
        &self,
        _history: &[ChatMessage],
        message: &str,
        persona: Persona,
    ) -> Result<String> {
        if self.0.is_empty() {
            Ok(format!("{:?}: {}", persona, message))
        } else {
            Ok(self.0.to_string())
        }
    }
}

fn session(service: Scripted) -> Session {
    Session::new(
        GameConfig::default(),
        FrameCounts::default(),
        17,
        Arc::new(service),
        Handle::current(),
    )
    .unwrap()
}

async fn let_tasks_run() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn test_stale_reply_is_dropped() {
    let mut session = session(Scripted(""));
    session.state_mut().player.position = Vec2::new(90.0, 80.0);

    assert_eq!(session.try_interact(), Some(ModalKind::Dialogue));
    assert!(session.submit_chat("first"));
    let_tasks_run().await;

    // The reply is queued, but the conversation it belonged to is gone
    session.close_modal();
    assert_eq!(session.try_interact(), Some(ModalKind::Dialogue));
    assert_eq!(session.pump_dialogue(), 0);

    let modal = session.ui().modal.as_ref().unwrap();
    assert_eq!(modal.history.len(), 1);
    assert!(!modal.typing);
}

#[tokio::test]
async fn test_chat_waits_for_the_reply() {
    let mut session = session(Scripted(""));
    session.state_mut().player.position = Vec2::new(90.0, 80.0);
    session.try_interact();

    assert!(session.submit_chat("one"));
    assert!(!session.submit_chat("two"));
    {
        let modal = session.ui().modal.as_ref().unwrap();
        let lines: Vec<&str> = modal.history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "one");
        assert!(modal.typing);
    }

    assert!(session.wait_for_reply().await);
    let modal = session.ui().modal.as_ref().unwrap();
    assert_eq!(modal.history.len(), 3);
    assert_eq!(modal.history.back().unwrap().text, "Guide: one");
    assert!(!modal.typing);

    assert!(session.submit_chat("two"));
}

#[tokio::test]
async fn test_merchant_pitch_replaces_greeting() {
    let mut session = session(Scripted("Fine wares, cheap!"));
    let spot = Vec2::new(3000.0, 3000.0);
    session.state_mut().player.position = spot;
    session
        .state_mut()
        .entities
        .add_npc(Npc::merchant(ChunkCoord::from_world(spot), spot, 100.0));

    assert_eq!(session.try_interact(), Some(ModalKind::Shop));
    assert_eq!(
        session.ui().modal.as_ref().unwrap().npc_line,
        MERCHANT_GREETING
    );

    assert!(session.wait_for_reply().await);
    assert_eq!(
        session.ui().modal.as_ref().unwrap().npc_line,
        "Fine wares, cheap!"
    );
}

#[tokio::test]
async fn test_blank_generation_becomes_ellipsis() {
    let mut session = session(Scripted("   "));
    session.state_mut().player.position = Vec2::new(90.0, 80.0);
    session.try_interact();
    session.submit_chat("hello?");
    assert!(session.wait_for_reply().await);
    let modal = session.ui().modal.as_ref().unwrap();
    assert_eq!(modal.history.back().unwrap().text, EMPTY_REPLY);
}

#[tokio::test]
async fn test_blank_lines_are_not_sent() {
    let mut session = session(Scripted(""));
    session.state_mut().player.position = Vec2::new(90.0, 80.0);
    session.try_interact();
    assert!(!session.submit_chat("   "));
    assert!(!session.ui().modal.as_ref().unwrap().typing);
}
