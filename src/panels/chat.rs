//! AI chat panel and its running conversation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::api::{self, ApiError, ApiRequest, Endpoint, Remote};
use crate::loader::{LoadError, Loader, Notice, Origin, Outcome, Panel, ValidationError};

pub const GREETING: &str = "Hello! I'm your NFT Intelligence AI assistant. Ask me anything about NFT analytics, market trends, or wallet analysis.";

/// Canned reply chosen by keyword, used when the backend is unreachable.
///
/// Keywords are checked in order; the first group that matches wins.
#[must_use]
pub fn demo_response(message: &str) -> &'static str {
    const REPLIES: [(&[&str], &str); 4] = [
        (
            &["wallet", "address"],
            "Based on wallet analysis, I can see transaction patterns indicating active NFT trading. The wallet shows diversified holdings across multiple collections with strong performance metrics.",
        ),
        (
            &["market", "trend"],
            "Current market analysis shows bullish trends for blue-chip NFT collections. Volume is up 15% this week, with increased activity in the art and gaming sectors.",
        ),
        (
            &["risk", "assessment"],
            "Risk assessment indicates moderate exposure with good diversification. Recommend monitoring liquidity levels and consider rebalancing if concentration exceeds 30% in any single collection.",
        ),
        (
            &["collection", "nft"],
            "Collection analysis reveals strong fundamentals with active community engagement. Floor price stability and consistent trading volume suggest healthy market dynamics.",
        ),
    ];

    let lower = message.to_lowercase();
    REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(*k)))
        .map_or(
            "I'm analyzing your request using current NFT market data. The insights suggest maintaining a balanced approach with focus on established collections while monitoring emerging opportunities.",
            |&(_, reply)| reply,
        )
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatPanel;

impl Panel for ChatPanel {
    type Input = ChatRequest;
    type Output = ChatReply;
    const NAME: &'static str = "chat";

    fn validate(&self, request: &ChatRequest) -> Result<(), ValidationError> {
        if request.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }

    fn fallback(&self, request: &ChatRequest) -> ChatReply {
        ChatReply { response: demo_response(&request.message).to_owned() }
    }

    fn demo_notice(&self) -> Notice {
        Notice::demo("AI assistant is offline - showing sample replies")
    }
}

impl Remote for ChatPanel {
    fn request(&self, request: &ChatRequest) -> ApiRequest {
        ApiRequest::post(Endpoint::Chat, json!({ "message": request.message, "userId": request.user_id }))
    }

    fn parse(&self, body: Value) -> Result<ChatReply, ApiError> {
        api::decode(body)
    }
}

// =============================================================================
// CONVERSATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: OffsetDateTime,
    /// Assistant reply generated locally rather than by the backend.
    pub demo: bool,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>, demo: bool) -> Self {
        Self { id: Uuid::new_v4(), role, content: content.into(), timestamp: OffsetDateTime::now_utc(), demo }
    }
}

/// Message history for one dashboard session. Starts with the greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    user_id: String,
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_id: format!("dashboard-user-{}", Uuid::new_v4()),
            messages: vec![ChatMessage::new(Role::Assistant, GREETING, false)],
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text` through `loader` and record both sides of the exchange.
    ///
    /// A send while the loader is busy is ignored and appends nothing. The
    /// user message is appended before the request goes out; the assistant
    /// reply (live or demo) follows once it resolves. A send cancelled in
    /// flight leaves the history as it was.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] for a blank message; nothing is
    /// appended and the error becomes the chat's inline error.
    pub async fn send(&mut self, loader: &Loader<ChatPanel>, text: &str) -> Result<Outcome, LoadError> {
        if loader.is_loading() {
            return Ok(Outcome::Ignored);
        }
        let request = ChatRequest { message: text.trim().to_owned(), user_id: self.user_id.clone() };
        loader.check(&request)?;

        self.messages.push(ChatMessage::new(Role::User, request.message.clone(), false));
        let outcome = loader.trigger(request).await?;

        match outcome {
            Outcome::Live | Outcome::Fallback => {
                if let Some(loaded) = loader.snapshot().current {
                    let demo = loaded.origin == Origin::Demo;
                    self.messages.push(ChatMessage::new(Role::Assistant, loaded.value.response, demo));
                }
            }
            // Lost a race with another sender, or cancelled before the
            // reply arrived. Either way no answer follows the message.
            Outcome::Ignored | Outcome::Discarded => {
                self.messages.pop();
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
