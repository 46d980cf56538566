//! NPC personas and the offline dialogue backend

use crate::core::error::{GameError, Result};
use crate::entity::npc::NpcRole;
use crate::llm::dialogue::{ChatMessage, DialogueService};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Line shown when a guide conversation opens
pub const GUIDE_GREETING: &str = "Welcome to the Safe Zone. Rest here, for the night is dark.";

/// Line shown when a shop opens, before the merchant's pitch arrives
pub const MERCHANT_GREETING: &str = "Welcome, traveler! Buying or... buying?";

/// What the player implicitly asks a merchant when the shop opens
pub const MERCHANT_PITCH_PROMPT: &str = "Hello merchant, what do you have?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    Guide,
    Merchant,
}

impl Persona {
    pub fn for_role(role: NpcRole) -> Self {
        match role {
            NpcRole::Guide => Persona::Guide,
            NpcRole::Merchant => Persona::Merchant,
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Persona::Guide => {
                "You are the 'Old Knight', a retired pixel-art hero living in the safe zone \
                 of an infinite dungeon. You are weary but helpful. You speak in short, slightly \
                 archaic, but punchy sentences suitable for a fast-paced game. Keep responses \
                 under 30 words."
            }
            Persona::Merchant => {
                "You are a greedy but charming travelling merchant in a dangerous pixel dungeon. \
                 You sell potions and upgrades for gold. You speak quickly and enthusiastically. \
                 Keep responses very short (max 20 words). You want the player to buy something."
            }
        }
    }
}

/// Backend used when no API key is configured; every request fails so the
/// dispatcher substitutes its fallback line
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineDialogue;

#[async_trait]
impl DialogueService for OfflineDialogue {
    async fn generate(
        &self,
        _history: &[ChatMessage],
        _message: &str,
        _persona: Persona,
    ) -> Result<String> {
        Err(GameError::LlmError("no dialogue backend configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_for_role() {
        assert_eq!(Persona::for_role(NpcRole::Guide), Persona::Guide);
        assert_eq!(Persona::for_role(NpcRole::Merchant), Persona::Merchant);
        assert!(Persona::Merchant.system_prompt().contains("merchant"));
        assert!(Persona::Guide.system_prompt().contains("Old Knight"));
    }

    #[tokio::test]
    async fn test_offline_backend_fails() {
        let result = OfflineDialogue.generate(&[], "hello", Persona::Guide).await;
        assert!(matches!(result, Err(GameError::LlmError(_))));
    }
}
