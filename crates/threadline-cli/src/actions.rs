//! Owner-side action handling
//!
//! The renderer reports every click as `(action_id, value)`; this module is
//! where the chat and feed branch on the identifier.

use std::cell::RefCell;
use std::fmt;

use tracing::info;

use crate::blocks::ActionHandler;

/// What a click means to the owning view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadAction {
    ViewArticle(String),
    ViewThread(String),
    Feedback { thread_id: String, helpful: bool },
    SaveThread(String),
    PitchFeedback { pitch: String, helpful: bool },
    RegeneratePitch(String),
    Other { action_id: String, value: String },
}

impl ThreadAction {
    pub fn parse(action_id: &str, value: &str) -> Self {
        let value = value.to_string();
        match action_id {
            "view_article" => ThreadAction::ViewArticle(value),
            "view_thread" => ThreadAction::ViewThread(value),
            "feedback_positive" => ThreadAction::Feedback {
                thread_id: value,
                helpful: true,
            },
            "feedback_negative" => ThreadAction::Feedback {
                thread_id: value,
                helpful: false,
            },
            "save_thread" => ThreadAction::SaveThread(value),
            "pitch_helpful" => ThreadAction::PitchFeedback {
                pitch: value,
                helpful: true,
            },
            "pitch_not_helpful" => ThreadAction::PitchFeedback {
                pitch: value,
                helpful: false,
            },
            "regenerate_pitch" => ThreadAction::RegeneratePitch(value),
            other => ThreadAction::Other {
                action_id: other.to_string(),
                value,
            },
        }
    }
}

impl fmt::Display for ThreadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadAction::ViewArticle(id) => write!(f, "Opening article {id}"),
            ThreadAction::ViewThread(id) => write!(f, "Opening thread {id}"),
            ThreadAction::Feedback { thread_id, helpful: true } => {
                write!(f, "Marked thread {thread_id} as helpful")
            }
            ThreadAction::Feedback { thread_id, helpful: false } => {
                write!(f, "Marked thread {thread_id} as not helpful")
            }
            ThreadAction::SaveThread(id) => write!(f, "Saved thread {id}"),
            ThreadAction::PitchFeedback { pitch, helpful: true } => {
                write!(f, "Marked {pitch} as helpful")
            }
            ThreadAction::PitchFeedback { pitch, helpful: false } => {
                write!(f, "Marked {pitch} as not helpful")
            }
            ThreadAction::RegeneratePitch(value) => write!(f, "Regenerating {value}"),
            ThreadAction::Other { action_id, value } if value.is_empty() => {
                write!(f, "Action {action_id}")
            }
            ThreadAction::Other { action_id, value } => write!(f, "Action {action_id} ({value})"),
        }
    }
}

/// Records every action it receives.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: RefCell<Vec<ThreadAction>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ThreadAction> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ActionHandler for ActionLog {
    fn on_action(&self, action_id: &str, value: &str) {
        let action = ThreadAction::parse(action_id, value);
        info!(%action_id, %value, "{action}");
        self.entries.borrow_mut().push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("view_article", "a1", ThreadAction::ViewArticle("a1".into()) ; "view article")]
    #[test_case("feedback_negative", "t1", ThreadAction::Feedback { thread_id: "t1".into(), helpful: false } ; "negative feedback")]
    #[test_case("regenerate_pitch", "regenerate_X", ThreadAction::RegeneratePitch("regenerate_X".into()) ; "regenerate")]
    #[test_case("button", "", ThreadAction::Other { action_id: "button".into(), value: String::new() } ; "default id")]
    fn parse_action(id: &str, value: &str, expected: ThreadAction) {
        assert_eq!(ThreadAction::parse(id, value), expected);
    }

    #[test]
    fn display_describes_action() {
        assert_eq!(
            ThreadAction::parse("view_article", "a1").to_string(),
            "Opening article a1"
        );
        assert_eq!(ThreadAction::parse("button", "").to_string(), "Action button");
    }

    #[test]
    fn log_records_in_order() {
        let log = ActionLog::new();
        log.on_action("save_thread", "t1");
        log.on_action("view_thread", "t2");
        assert_eq!(
            log.entries(),
            vec![
                ThreadAction::SaveThread("t1".into()),
                ThreadAction::ViewThread("t2".into())
            ]
        );
    }
}
