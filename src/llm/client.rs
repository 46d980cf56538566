//! HTTP dialogue backend
//!
//! Model-agnostic client for chat-completion APIs. Supports both Anthropic
//! and OpenAI-compatible endpoints; the format is picked from the URL.

use crate::core::error::{GameError, Result};
use crate::llm::dialogue::{ChatMessage, DialogueService, Speaker};
use crate::llm::persona::Persona;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// NPC lines are a sentence or two
const MAX_TOKENS: u32 = 256;

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| GameError::LlmError("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    /// Send a multi-turn chat request and return the reply text
    pub async fn chat(&self, system: &str, turns: Vec<Message>) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.chat_anthropic(system, turns).await,
            ApiFormat::OpenAI => self.chat_openai(system, turns).await,
        }
    }

    async fn chat_anthropic(&self, system: &str, turns: Vec<Message>) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system: system.into(),
            messages: alternate_from_user(turns),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GameError::LlmError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| GameError::LlmError("Empty response".into()))
    }

    async fn chat_openai(&self, system: &str, turns: Vec<Message>) -> Result<String> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(Message::new("system", system));
        messages.extend(turns);

        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| GameError::LlmError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| GameError::LlmError("Empty response".into()))
    }
}

#[async_trait]
impl DialogueService for LlmClient {
    async fn generate(
        &self,
        history: &[ChatMessage],
        message: &str,
        persona: Persona,
    ) -> Result<String> {
        self.chat(persona.system_prompt(), to_turns(history, message))
            .await
    }
}

/// Chat history plus the new player line as API turns
pub fn to_turns(history: &[ChatMessage], message: &str) -> Vec<Message> {
    history
        .iter()
        .map(|m| {
            let role = match m.speaker {
                Speaker::Player => "user",
                Speaker::Npc => "assistant",
            };
            Message::new(role, &m.text)
        })
        .chain(std::iter::once(Message::new("user", message)))
        .collect()
}

/// Anthropic requires strictly alternating turns starting with the user.
/// Leading NPC lines are dropped and consecutive same-role turns merged.
fn alternate_from_user(turns: Vec<Message>) -> Vec<Message> {
    let mut out: Vec<Message> = Vec::with_capacity(turns.len());
    for turn in turns.into_iter().skip_while(|t| t.role != "user") {
        match out.last_mut() {
            Some(last) if last.role == turn.role => {
                last.content.push('\n');
                last.content.push_str(&turn.content);
            }
            _ => out.push(turn),
        }
    }
    out
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// One API chat turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    role: String,
    content: String,
}

impl Message {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}
