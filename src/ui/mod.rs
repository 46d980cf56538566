//! UI-facing surfaces: logical input and modal interaction state

pub mod input;
pub mod state;

pub use input::{DirectionalInput, Intents};
pub use state::{GameUI, LogCategory, LogEntry, ModalKind, ModalState};
