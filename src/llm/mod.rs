//! NPC dialogue: service contract, dispatcher, personas and HTTP backend

pub mod client;
pub mod dialogue;
pub mod persona;

pub use client::LlmClient;
pub use dialogue::{
    ChatMessage, DialogueDispatcher, DialogueReply, DialogueService, PendingRequest, RequestToken,
    Speaker, FALLBACK_LINE,
};
pub use persona::{OfflineDialogue, Persona};
