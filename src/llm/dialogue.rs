//! Asynchronous NPC dialogue
//!
//! The simulation never awaits a reply. `DialogueDispatcher::dispatch` spawns
//! a task on the tokio runtime and returns a `PendingRequest`; the reply comes
//! back over a channel tagged with its `RequestToken`, and the session drops
//! any reply whose token no longer matches the open modal.

use crate::core::error::Result;
use crate::llm::persona::Persona;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Substituted for any failed generation
pub const FALLBACK_LINE: &str = "The spirits are silent today...";

/// Substituted for an empty but successful generation
pub const EMPTY_REPLY: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Player,
    Npc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }

    pub fn npc(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Npc,
            text: text.into(),
        }
    }
}

/// Remote text generation: `generate(history, new_message, persona) -> text`
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn generate(
        &self,
        history: &[ChatMessage],
        message: &str,
        persona: Persona,
    ) -> Result<String>;
}

/// Identifies one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

/// A finished request delivered back to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueReply {
    pub token: RequestToken,
    pub text: String,
}

/// Handle to an in-flight request
#[derive(Debug)]
pub struct PendingRequest {
    pub token: RequestToken,
    task: JoinHandle<()>,
}

impl PendingRequest {
    /// Abort the background task; any reply already queued is discarded later by token
    pub fn cancel(self) {
        self.task.abort();
    }
}

pub struct DialogueDispatcher {
    service: Arc<dyn DialogueService>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<DialogueReply>,
    rx: mpsc::UnboundedReceiver<DialogueReply>,
    next_token: u64,
}

impl DialogueDispatcher {
    pub fn new(service: Arc<dyn DialogueService>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            runtime,
            tx,
            rx,
            next_token: 0,
        }
    }

    /// Fire-and-forget generation request
    pub fn dispatch(
        &mut self,
        history: Vec<ChatMessage>,
        message: String,
        persona: Persona,
    ) -> PendingRequest {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();

        let task = self.runtime.spawn(async move {
            let text = match service.generate(&history, &message, persona).await {
                Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, ?persona, "dialogue generation failed, using fallback");
                    FALLBACK_LINE.to_string()
                }
            };
            // Receiver gone means the session ended
            let _ = tx.send(DialogueReply { token, text });
        });

        PendingRequest { token, task }
    }

    /// Next delivered reply, if any, without blocking
    pub fn try_recv(&mut self) -> Option<DialogueReply> {
        self.rx.try_recv().ok()
    }

    /// Await the next reply; for callers that own an async context
    pub async fn recv(&mut self) -> Option<DialogueReply> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;

    struct Echo;

    #[async_trait]
    impl DialogueService for Echo {
        async fn generate(
            &self,
            history: &[ChatMessage],
            message: &str,
            _persona: Persona,
        ) -> Result<String> {
            Ok(format!("{}:{}", history.len(), message))
        }
    }

    struct Broken;

    #[async_trait]
    impl DialogueService for Broken {
        async fn generate(&self, _: &[ChatMessage], _: &str, _: Persona) -> Result<String> {
            Err(GameError::LlmError("boom".into()))
        }
    }

    #[tokio::test]
    async fn test_reply_carries_token() {
        let mut dispatcher = DialogueDispatcher::new(Arc::new(Echo), Handle::current());
        let pending = dispatcher.dispatch(vec![ChatMessage::npc("hi")], "hello".into(), Persona::Guide);
        let reply = dispatcher.recv().await.expect("reply");
        assert_eq!(reply.token, pending.token);
        assert_eq!(reply.text, "1:hello");
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback() {
        let mut dispatcher = DialogueDispatcher::new(Arc::new(Broken), Handle::current());
        dispatcher.dispatch(Vec::new(), "hello".into(), Persona::Merchant);
        let reply = dispatcher.recv().await.expect("reply");
        assert_eq!(reply.text, FALLBACK_LINE);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let mut dispatcher = DialogueDispatcher::new(Arc::new(Echo), Handle::current());
        let a = dispatcher.dispatch(Vec::new(), "a".into(), Persona::Guide);
        let b = dispatcher.dispatch(Vec::new(), "b".into(), Persona::Guide);
        assert_ne!(a.token, b.token);
    }
}
