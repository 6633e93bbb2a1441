//! Chat and feed messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::block::BlockSequence;

/// Who produced a message and in which context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    /// A typed query
    UserText,
    /// A pasted article
    UserArticle,
    /// An analysis response
    System,
    /// A proactive trend suggestion
    Trend,
}

impl MessageOrigin {
    /// True for messages authored by the user
    pub fn is_user(&self) -> bool {
        matches!(self, MessageOrigin::UserText | MessageOrigin::UserArticle)
    }
}

/// One entry of a chat transcript or feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Producer
    pub origin: MessageOrigin,
    /// Raw text content
    #[serde(default)]
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Thread the message is about, when any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Structured content; empty for plain text messages
    #[serde(default, skip_serializing_if = "BlockSequence::is_empty")]
    pub blocks: BlockSequence,
    /// Placeholder awaiting a response
    #[serde(default)]
    pub is_loading: bool,
}

impl Message {
    fn with_origin(origin: MessageOrigin, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            origin,
            content,
            timestamp: Utc::now(),
            thread_id: None,
            blocks: BlockSequence::new(),
            is_loading: false,
        }
    }

    /// A typed user query
    pub fn user_text(content: impl Into<String>) -> Self {
        Self::with_origin(MessageOrigin::UserText, content.into())
    }

    /// A pasted user article
    pub fn user_article(content: impl Into<String>) -> Self {
        Self::with_origin(MessageOrigin::UserArticle, content.into())
    }

    /// A system response carrying blocks
    pub fn system(blocks: BlockSequence) -> Self {
        Self {
            blocks,
            ..Self::with_origin(MessageOrigin::System, String::new())
        }
    }

    /// A loading placeholder for a pending response
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::with_origin(MessageOrigin::System, String::new())
        }
    }

    /// A trend suggestion about `thread_id`
    pub fn trend(thread_id: impl Into<String>, blocks: BlockSequence) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            blocks,
            ..Self::with_origin(MessageOrigin::Trend, String::new())
        }
    }

    /// Identity used for feed deduplication: the thread id when present,
    /// otherwise the message id.
    pub fn dedup_key(&self) -> &str {
        self.thread_id.as_deref().unwrap_or(&self.id)
    }
}
