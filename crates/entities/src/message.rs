//! Chat message entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message exchanged about a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier.
    pub id: Uuid,
    /// Author.
    pub sender_id: Uuid,
    /// Recipient.
    pub receiver_id: Uuid,
    /// Conversation key.
    pub service_request_id: Uuid,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has seen it.
    pub read: bool,
}

/// Caller-supplied part of a [`ChatMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub service_request_id: Uuid,
    pub content: String,
    /// Ignored: stored messages always start unread.
    #[serde(default)]
    pub read: bool,
}

impl NewChatMessage {
    /// Stamps the draft as a new, unread message.
    pub fn into_message(self) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            service_request_id: self.service_request_id,
            content: self.content,
            timestamp: Utc::now(),
            read: false,
        }
    }
}
