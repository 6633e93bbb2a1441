//! Interactive and media elements embedded in blocks

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::text::TextObject;

/// Action identifier substituted when a button arrives without one.
pub const DEFAULT_ACTION_ID: &str = "button";

/// Requested visual treatment of a button. Unset means neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Prominent accent
    Primary,
    /// Warning accent
    Danger,
    /// Neutral; also used for any unrecognized style string
    #[serde(other)]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ButtonTag {
    #[default]
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ImageTag {
    #[default]
    Image,
}

/// A clickable affordance. It carries identifiers only; the handler lives
/// with whoever renders the block.
///
/// `action_id` and `value` are normalized exactly once, when the button is
/// accepted (deserialized or constructed): a missing, null or empty
/// `action_id` becomes [`DEFAULT_ACTION_ID`] and a missing `value` becomes
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonElement {
    #[serde(rename = "type", default)]
    tag: ButtonTag,
    /// Button label
    pub text: TextObject,
    /// Identifier handed to the action callback
    #[serde(
        default = "default_action_id",
        deserialize_with = "deserialize_action_id",
        alias = "actionId"
    )]
    pub action_id: String,
    /// Payload handed to the action callback
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: String,
    /// Requested treatment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
}

fn default_action_id() -> String {
    DEFAULT_ACTION_ID.to_string()
}

/// The single place action identifiers are defaulted.
pub fn normalize_action_id(action_id: Option<String>) -> String {
    action_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(default_action_id)
}

fn deserialize_action_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_action_id(Option::<String>::deserialize(
        deserializer,
    )?))
}

fn deserialize_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ButtonElement {
    /// Button with a plain-text label and default identifiers
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            tag: ButtonTag::Button,
            text: TextObject::plain(label),
            action_id: default_action_id(),
            value: String::new(),
            style: None,
        }
    }

    /// Set the action identifier and value
    pub fn with_action(mut self, action_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.action_id = normalize_action_id(Some(action_id.into()));
        self.value = value.into();
        self
    }

    /// Set the requested treatment
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Re-apply identifier defaults after direct field edits
    pub fn normalized(mut self) -> Self {
        self.action_id = normalize_action_id(Some(std::mem::take(&mut self.action_id)));
        self
    }

    /// Label text
    pub fn label(&self) -> &str {
        &self.text.text
    }
}

/// An image, rendered inertly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(rename = "type", default)]
    tag: ImageTag,
    /// Image location
    #[serde(alias = "url")]
    pub image_url: String,
    /// Description shown in place of the image
    #[serde(alias = "altText")]
    pub alt_text: String,
}

impl ImageElement {
    /// Image with url and alt text
    pub fn new(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            tag: ImageTag::Image,
            image_url: image_url.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Optional trailing element of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accessory {
    /// Interactive button
    Button(ButtonElement),
    /// Inert image
    Image(ImageElement),
    /// Any other element, kept as received so the rest of the section
    /// still renders
    Unsupported(Value),
}

impl Accessory {
    /// Wire tag of the element
    pub fn kind(&self) -> &str {
        match self {
            Accessory::Button(_) => "button",
            Accessory::Image(_) => "image",
            Accessory::Unsupported(raw) => raw_kind(raw),
        }
    }
}

/// One inline element of a context block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextElement {
    /// Text with emphasis substitution
    Text(TextObject),
    /// Small inline icon
    Image(ImageElement),
    /// Any other element, kept as received
    Unsupported(Value),
}

impl ContextElement {
    /// Wire tag of the element
    pub fn kind(&self) -> &str {
        match self {
            ContextElement::Text(t) if t.is_markdown() => "mrkdwn",
            ContextElement::Text(_) => "plain_text",
            ContextElement::Image(_) => "image",
            ContextElement::Unsupported(raw) => raw_kind(raw),
        }
    }
}

fn raw_kind(raw: &Value) -> &str {
    raw.get("type").and_then(Value::as_str).unwrap_or("unknown")
}

impl From<TextObject> for ContextElement {
    fn from(text: TextObject) -> Self {
        ContextElement::Text(text)
    }
}

impl From<ImageElement> for ContextElement {
    fn from(image: ImageElement) -> Self {
        ContextElement::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"text": {"type": "plain_text", "text": "Go"}}) ; "missing")]
    #[test_case(json!({"text": {"type": "plain_text", "text": "Go"}, "action_id": null}) ; "null")]
    #[test_case(json!({"text": {"type": "plain_text", "text": "Go"}, "action_id": ""}) ; "empty")]
    fn action_id_defaults_to_button(raw: serde_json::Value) {
        let b: ButtonElement = serde_json::from_value(raw).unwrap();
        assert_eq!(b.action_id, DEFAULT_ACTION_ID);
        assert_eq!(b.value, "");
    }

    #[test]
    fn explicit_identifiers_are_kept() {
        let b: ButtonElement = serde_json::from_value(json!({
            "type": "button",
            "text": {"type": "plain_text", "text": "View"},
            "action_id": "view_article",
            "value": "a1",
            "style": "primary"
        }))
        .unwrap();
        assert_eq!(b.action_id, "view_article");
        assert_eq!(b.value, "a1");
        assert_eq!(b.style, Some(ButtonStyle::Primary));
    }

    #[test]
    fn camel_case_action_id_accepted() {
        let b: ButtonElement = serde_json::from_value(json!({
            "text": {"type": "plain_text", "text": "View"},
            "actionId": "view_thread"
        }))
        .unwrap();
        assert_eq!(b.action_id, "view_thread");
    }

    #[test]
    fn unrecognized_style_is_neutral() {
        let b: ButtonElement = serde_json::from_value(json!({
            "text": {"type": "plain_text", "text": "x"},
            "style": "sparkly"
        }))
        .unwrap();
        assert_eq!(b.style, Some(ButtonStyle::Default));
    }

    #[test]
    fn button_serializes_with_type_tag() {
        let v = serde_json::to_value(ButtonElement::new("View").with_action("view_article", "a1"))
            .unwrap();
        assert_eq!(v["type"], "button");
        assert_eq!(v["action_id"], "view_article");
        assert!(v.get("style").is_none());
    }

    #[test]
    fn normalized_restores_default_after_edit() {
        let mut b = ButtonElement::new("x");
        b.action_id.clear();
        assert_eq!(b.normalized().action_id, DEFAULT_ACTION_ID);
    }

    #[test]
    fn accessory_distinguishes_button_and_image() {
        let img: Accessory = serde_json::from_value(json!({
            "type": "image", "image_url": "https://x/y.png", "alt_text": "chart"
        }))
        .unwrap();
        assert!(matches!(img, Accessory::Image(ref i) if i.alt_text == "chart"));

        let btn: Accessory = serde_json::from_value(json!({
            "type": "button", "text": {"type": "plain_text", "text": "View"}
        }))
        .unwrap();
        assert!(matches!(btn, Accessory::Button(_)));
    }

    #[test]
    fn other_accessories_are_kept_as_received() {
        let raw = json!({
            "type": "datepicker",
            "action_id": "pick",
            "placeholder": {"type": "plain_text", "text": "Select a date"}
        });
        let accessory: Accessory = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(accessory, Accessory::Unsupported(raw.clone()));
        assert_eq!(accessory.kind(), "datepicker");
        assert_eq!(serde_json::to_value(&accessory).unwrap(), raw);
    }

    #[test]
    fn context_keeps_valid_elements_next_to_unknown_ones() {
        let els: Vec<ContextElement> = serde_json::from_value(json!([
            {"type": "user", "user_id": "U1"},
            {"type": "mrkdwn", "text": "hello"}
        ]))
        .unwrap();
        assert_eq!(els[0].kind(), "user");
        assert!(matches!(els[1], ContextElement::Text(ref t) if t.text == "hello"));
    }

    #[test]
    fn context_element_accepts_text_and_image() {
        let els: Vec<ContextElement> = serde_json::from_value(json!([
            "bare",
            {"type": "mrkdwn", "text": "*Type:* Evergreen"},
            {"type": "image", "image_url": "https://x/i.png", "alt_text": "icon"}
        ]))
        .unwrap();
        assert!(matches!(els[0], ContextElement::Text(_)));
        assert!(matches!(els[1], ContextElement::Text(_)));
        assert!(matches!(els[2], ContextElement::Image(_)));
    }
}
