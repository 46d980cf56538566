//! UI-facing state: modal interactions and the event log
//!
//! Dialogue replies land here, never in the simulation context.

use crate::core::types::Tick;
use crate::entity::npc::NpcId;
use crate::llm::dialogue::{ChatMessage, DialogueReply, PendingRequest, RequestToken};
use crate::llm::persona::Persona;
use serde::Serialize;
use std::collections::VecDeque;

/// Maximum event log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Maximum chat lines kept per conversation
const MAX_CHAT_ENTRIES: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModalKind {
    Dialogue,
    Shop,
}

/// An open dialogue or shop overlay; the simulation is paused while one exists
#[derive(Debug)]
pub struct ModalState {
    pub kind: ModalKind,
    pub npc: NpcId,
    pub persona: Persona,
    /// Conversation lines (dialogue modal)
    pub history: VecDeque<ChatMessage>,
    /// Header line spoken by the merchant (shop modal)
    pub npc_line: String,
    /// A reply is outstanding
    pub typing: bool,
    pending: Option<PendingRequest>,
}

impl ModalState {
    pub fn dialogue(npc: NpcId, persona: Persona, greeting: &str) -> Self {
        let mut history = VecDeque::with_capacity(MAX_CHAT_ENTRIES);
        history.push_back(ChatMessage::npc(greeting));
        Self {
            kind: ModalKind::Dialogue,
            npc,
            persona,
            history,
            npc_line: greeting.to_string(),
            typing: false,
            pending: None,
        }
    }

    pub fn shop(npc: NpcId, persona: Persona, greeting: &str) -> Self {
        Self {
            kind: ModalKind::Shop,
            npc,
            persona,
            history: VecDeque::new(),
            npc_line: greeting.to_string(),
            typing: false,
            pending: None,
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        if self.history.len() >= MAX_CHAT_ENTRIES {
            self.history.pop_front();
        }
        self.history.push_back(message);
    }

    /// Track a new request, cancelling any older one
    pub fn await_reply(&mut self, pending: PendingRequest) {
        if let Some(previous) = self.pending.replace(pending) {
            previous.cancel();
        }
        self.typing = true;
    }

    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending.as_ref().map(|p| p.token)
    }

    /// Apply a reply if it answers the outstanding request.
    ///
    /// Returns false for stale replies, which are left unapplied.
    pub fn accept_reply(&mut self, reply: DialogueReply) -> bool {
        if self.pending_token() != Some(reply.token) {
            return false;
        }
        self.pending = None;
        self.typing = false;
        match self.kind {
            ModalKind::Dialogue => self.push_message(ChatMessage::npc(reply.text)),
            ModalKind::Shop => self.npc_line = reply.text,
        }
        true
    }

    /// Tear down the overlay, aborting any in-flight request
    pub fn close(mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

/// An entry in the event log
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogCategory {
    Combat,
    Loot,
    Progression,
    System,
}

/// Game UI state
#[derive(Debug, Default)]
pub struct GameUI {
    pub modal: Option<ModalState>,
    pub event_log: VecDeque<LogEntry>,
}

impl GameUI {
    pub fn new() -> Self {
        Self {
            modal: None,
            event_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Replace the open modal; the previous one is closed first
    pub fn open(&mut self, modal: ModalState) {
        self.close();
        self.modal = Some(modal);
    }

    pub fn close(&mut self) -> bool {
        match self.modal.take() {
            Some(modal) => {
                modal.close();
                true
            }
            None => false,
        }
    }

    /// Add an entry to the event log
    pub fn log(&mut self, tick: Tick, message: String, category: LogCategory) {
        if self.event_log.len() >= MAX_LOG_ENTRIES {
            self.event_log.pop_front();
        }
        self.event_log.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::persona::GUIDE_GREETING;

    #[test]
    fn test_dialogue_starts_with_greeting() {
        let modal = ModalState::dialogue(NpcId::Guide, Persona::Guide, GUIDE_GREETING);
        assert_eq!(modal.history.len(), 1);
        assert_eq!(modal.history[0], ChatMessage::npc(GUIDE_GREETING));
        assert!(!modal.typing);
        assert!(modal.pending_token().is_none());
    }

    #[test]
    fn test_chat_history_is_bounded() {
        let mut modal = ModalState::dialogue(NpcId::Guide, Persona::Guide, GUIDE_GREETING);
        for i in 0..100 {
            modal.push_message(ChatMessage::player(format!("line {}", i)));
        }
        assert_eq!(modal.history.len(), MAX_CHAT_ENTRIES);
        assert_eq!(modal.history.back().map(|m| m.text.as_str()), Some("line 99"));
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut ui = GameUI::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            ui.log(i as Tick, format!("event {}", i), LogCategory::System);
        }
        assert_eq!(ui.event_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(ui.event_log.front().map(|e| e.tick), Some(10));
    }

    #[test]
    fn test_close_without_modal() {
        let mut ui = GameUI::new();
        assert!(!ui.close());
        ui.open(ModalState::shop(NpcId::Guide, Persona::Merchant, "hi"));
        assert!(ui.is_modal_open());
        assert!(ui.close());
        assert!(!ui.is_modal_open());
    }
}
