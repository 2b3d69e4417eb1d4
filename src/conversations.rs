//! Message records for paired users.
//!
//! A conversation between two users lives under a deterministic id
//! derived from the pair, so either side computes the same path without
//! coordination. Delivery (push notifications) is outside this crate;
//! these are just the durable records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::DocumentStore;

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message id; the document key, not a stored field.
    #[serde(skip)]
    pub id: String,

    #[serde(rename = "senderUID")]
    pub sender_uid: String,

    #[serde(rename = "recipientUID")]
    pub recipient_uid: String,

    #[serde(rename = "messageText")]
    pub message_text: String,

    pub timestamp: DateTime<Utc>,
}

/// Deterministic conversation id for a user pair: the two ids joined in
/// lexicographic order, so both participants derive the same value.
pub fn conversation_id(user_a: &str, user_b: &str) -> String {
    if user_a < user_b {
        format!("{user_a}_{user_b}")
    } else {
        format!("{user_b}_{user_a}")
    }
}

fn messages_collection(user_a: &str, user_b: &str) -> String {
    format!("conversations/{}/messages", conversation_id(user_a, user_b))
}

/// Chat message service.
pub struct ConversationService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> ConversationService<S> {
    /// Create a service over a store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a message from `sender` to `recipient`.
    ///
    /// Text is trimmed; an empty message is dropped and `Ok(None)` is
    /// returned.
    pub async fn send(
        &self,
        sender: &str,
        recipient: &str,
        text: &str,
    ) -> Result<Option<Message>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_uid: sender.to_string(),
            recipient_uid: recipient.to_string(),
            message_text: trimmed.to_string(),
            timestamp: Utc::now(),
        };

        let doc = match serde_json::to_value(&message).map_err(crate::error::StoreError::from)? {
            serde_json::Value::Object(doc) => doc,
            _ => unreachable!("messages serialize to objects"),
        };
        self.store
            .set_document(
                &messages_collection(sender, recipient),
                &message.id,
                doc,
                false,
            )
            .await?;
        debug!(sender = %sender, recipient = %recipient, "message stored");
        Ok(Some(message))
    }

    /// All messages between two users, oldest first.
    pub async fn messages(&self, user_a: &str, user_b: &str) -> Result<Vec<Message>> {
        let docs = self
            .store
            .list_documents(&messages_collection(user_a, user_b))
            .await?;

        let mut messages: Vec<Message> = docs
            .into_iter()
            .filter_map(|(id, doc)| {
                let mut message: Message =
                    serde_json::from_value(serde_json::Value::Object(doc)).ok()?;
                message.id = id;
                Some(message)
            })
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}
