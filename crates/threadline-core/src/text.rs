//! Text objects embedded in blocks

use serde::{Deserialize, Serialize};

/// How the text of a [`TextObject`] is interpreted at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Displayed verbatim
    PlainText,
    /// Inline emphasis (`*bold*`, `_italic_`, `` `code` ``, `> quote`) applies
    #[serde(alias = "markdown")]
    Mrkdwn,
}

/// A leaf text value. A bare JSON string deserializes as `mrkdwn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextObjectRepr")]
pub struct TextObject {
    /// Interpretation of `text`
    #[serde(rename = "type")]
    pub kind: TextKind,
    /// Stored text; never rewritten by rendering
    pub text: String,
    /// Whether emoji shortcodes are allowed (passed through untouched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextObjectRepr {
    Bare(String),
    Full {
        #[serde(rename = "type")]
        kind: TextKind,
        text: String,
        #[serde(default)]
        emoji: Option<bool>,
    },
}

impl From<TextObjectRepr> for TextObject {
    fn from(repr: TextObjectRepr) -> Self {
        match repr {
            TextObjectRepr::Bare(text) => TextObject::mrkdwn(text),
            TextObjectRepr::Full { kind, text, emoji } => TextObject { kind, text, emoji },
        }
    }
}

impl TextObject {
    /// Plain text, no emphasis interpretation
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: None,
        }
    }

    /// Plain text with emoji enabled
    pub fn plain_emoji(text: impl Into<String>) -> Self {
        Self {
            emoji: Some(true),
            ..Self::plain(text)
        }
    }

    /// Text with inline emphasis
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }

    /// True when render-time emphasis substitution applies
    pub fn is_markdown(&self) -> bool {
        self.kind == TextKind::Mrkdwn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_is_mrkdwn() {
        let t: TextObject = serde_json::from_value(json!("Interest: 85/100")).unwrap();
        assert_eq!(t, TextObject::mrkdwn("Interest: 85/100"));
    }

    #[test]
    fn markdown_alias_accepted() {
        let t: TextObject =
            serde_json::from_value(json!({"type": "markdown", "text": "*x*"})).unwrap();
        assert!(t.is_markdown());
    }

    #[test]
    fn emoji_flag_round_trips_and_is_omitted_when_unset() {
        let with = serde_json::to_value(TextObject::plain_emoji("🎯 Topic")).unwrap();
        assert_eq!(with, json!({"type": "plain_text", "text": "🎯 Topic", "emoji": true}));

        let without = serde_json::to_value(TextObject::plain("Topic")).unwrap();
        assert_eq!(without, json!({"type": "plain_text", "text": "Topic"}));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let res = serde_json::from_value::<TextObject>(json!({"type": "image", "text": "x"}));
        assert!(res.is_err());
    }
}
