//! Chat transcript state
//!
//! Submitting appends the user's message and a loading placeholder. The
//! placeholder is later replaced wholesale by a system message carrying the
//! formatted blocks, or by an error message when the source failed.

use thiserror::Error;
use threadline_core::{BlockFormatter, BlockSequence, Message, MessageOrigin};
use tracing::{debug, warn};

use crate::source::{SourceError, ThreadSource};

/// Default number of retained messages
pub const DEFAULT_MAX_MESSAGES: usize = 200;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No pending message with id {0}")]
    UnknownPlaceholder(String),
    #[error("Only user messages can be submitted, got {0:?}")]
    NotUserMessage(MessageOrigin),
}

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    max_messages: usize,
    formatter: BlockFormatter,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl ChatState {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages: max_messages.max(2),
            formatter: BlockFormatter::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading).count()
    }

    /// Append a user message plus a loading placeholder; returns the
    /// placeholder id. Anything but a user message is rejected untouched.
    pub fn submit(&mut self, message: Message) -> ChatResult<String> {
        if !message.origin.is_user() {
            return Err(ChatError::NotUserMessage(message.origin));
        }
        let placeholder = Message::loading();
        let id = placeholder.id.clone();

        self.messages.push(message);
        self.messages.push(placeholder);
        self.trim();
        Ok(id)
    }

    /// Replace the placeholder with the outcome of its request.
    pub fn resolve(
        &mut self,
        placeholder_id: &str,
        outcome: Result<BlockSequence, SourceError>,
    ) -> ChatResult<&Message> {
        let index = self
            .messages
            .iter()
            .position(|m| m.is_loading && m.id == placeholder_id)
            .ok_or_else(|| ChatError::UnknownPlaceholder(placeholder_id.to_string()))?;

        let blocks = match outcome {
            Ok(blocks) => blocks,
            Err(err) => {
                warn!(error = %err, "request failed, showing error message");
                self.formatter.format_error_message(&err.to_string())
            }
        };

        self.messages[index] = Message::system(blocks);
        Ok(&self.messages[index])
    }

    /// Submit `query`, analyse it through `source` and resolve the
    /// placeholder with the formatted result.
    pub async fn ask(
        &mut self,
        source: &dyn ThreadSource,
        message: Message,
    ) -> ChatResult<&Message> {
        let query = message.content.clone();
        let placeholder = self.submit(message)?;

        let outcome = source
            .analyze(&query)
            .await
            .map(|result| self.formatter.format_analysis_result(&result));

        self.resolve(&placeholder, outcome)
    }

    fn trim(&mut self) {
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            debug!(excess, "dropping oldest chat messages");
            self.messages.drain(..excess);
        }
    }

    /// Messages authored by the user, oldest first
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| matches!(m.origin, MessageOrigin::UserText | MessageOrigin::UserArticle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadline_core::Block;

    #[test]
    fn submit_appends_message_and_placeholder() {
        let mut chat = ChatState::default();
        let id = chat.submit(Message::user_text("housing")).unwrap();

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].id, id);
        assert!(chat.messages()[1].is_loading);
        assert_eq!(chat.pending(), 1);
    }

    #[test]
    fn resolve_replaces_placeholder_wholesale() {
        let mut chat = ChatState::default();
        let id = chat.submit(Message::user_text("housing")).unwrap();

        let blocks: BlockSequence = vec![Block::header("Found")].into();
        let resolved = chat.resolve(&id, Ok(blocks.clone())).unwrap();
        assert!(!resolved.is_loading);
        assert_ne!(resolved.id, id);
        assert_eq!(resolved.blocks, blocks);
        assert_eq!(chat.pending(), 0);
    }

    #[test]
    fn resolve_error_formats_message() {
        let mut chat = ChatState::default();
        let id = chat.submit(Message::user_text("housing")).unwrap();

        let resolved = chat
            .resolve(&id, Err(SourceError::Unavailable("timeout".into())))
            .unwrap();
        assert_eq!(resolved.blocks.len(), 2);
        assert_eq!(resolved.blocks[0].kind(), "header");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let mut chat = ChatState::default();
        let id = chat.submit(Message::user_text("x")).unwrap();
        chat.resolve(&id, Ok(BlockSequence::new())).unwrap();

        let err = chat.resolve(&id, Ok(BlockSequence::new())).unwrap_err();
        assert!(matches!(err, ChatError::UnknownPlaceholder(_)));
    }

    #[test]
    fn submit_rejects_non_user_messages() {
        let mut chat = ChatState::default();
        let err = chat
            .submit(Message::system(vec![Block::header("x")].into()))
            .unwrap_err();

        assert!(matches!(err, ChatError::NotUserMessage(MessageOrigin::System)));
        assert!(chat.messages().is_empty());
        assert_eq!(chat.pending(), 0);
    }

    #[test]
    fn history_is_capped() {
        let mut chat = ChatState::new(4);
        for i in 0..3 {
            chat.submit(Message::user_text(format!("q{i}"))).unwrap();
        }
        assert_eq!(chat.messages().len(), 4);
        assert_eq!(chat.user_messages().next().map(|m| m.content.as_str()), Some("q1"));
    }
}
