//! Block variants and ordered block sequences
//!
//! The wire format is the Block Kit JSON shape: every block is an object
//! with a `type` discriminator. Reading a block never fails. A record whose
//! tag is not one of the six known kinds, or whose shape does not match its
//! tag, is kept verbatim as [`Block::Unknown`] so that one bad block can
//! never take down the rest of a message.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::element::{Accessory, ButtonElement, ContextElement};
use crate::error::{BlockError, BlockResult};
use crate::text::TextObject;

/// Block Kit caps a single message at this many blocks.
pub const MAX_BLOCKS_TOTAL: usize = 50;

/// Most visually prominent line of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    /// Heading text, shown verbatim
    pub text: TextObject,
}

/// Body text, optional two-column fields and an optional accessory
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionBlock {
    /// Primary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextObject>,
    /// Grid cells, laid out two per row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<TextObject>,
    /// Trailing button or image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Accessory>,
}

/// Small, muted inline elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBlock {
    /// Elements in left-to-right order
    pub elements: Vec<ContextElement>,
}

/// A row of buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsBlock {
    /// Buttons in left-to-right order
    pub elements: Vec<ButtonElement>,
}

/// Horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DividerBlock {}

/// One dated point on a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Sort key
    pub year: i32,
    /// Full title; renderers may truncate for display only
    pub title: String,
    /// Archive item the event refers to
    #[serde(default, alias = "referenceId", alias = "article_id")]
    pub reference_id: String,
}

impl TimelineEvent {
    /// Event without a reference
    pub fn new(year: i32, title: impl Into<String>) -> Self {
        Self {
            year,
            title: title.into(),
            reference_id: String::new(),
        }
    }

    /// Attach the archive item the event refers to
    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = reference_id.into();
        self
    }
}

/// Events shown left-to-right by year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineBlock {
    /// Events in producer order; renderers sort them
    pub events: Vec<TimelineEvent>,
}

impl TimelineBlock {
    /// Events ordered by year ascending; equal years keep their input order.
    pub fn sorted_events(&self) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.year);
        events
    }
}

/// A record that did not match any known block shape
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    /// The record exactly as received
    pub raw: Value,
    /// Why it was not accepted
    pub reason: String,
}

impl UnknownBlock {
    /// The `type` tag, when the record carried a string one
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }
}

/// One renderable unit of a structured message
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// See [`HeaderBlock`]
    Header(HeaderBlock),
    /// See [`SectionBlock`]
    Section(SectionBlock),
    /// See [`ContextBlock`]
    Context(ContextBlock),
    /// See [`ActionsBlock`]
    Actions(ActionsBlock),
    /// See [`DividerBlock`]
    Divider(DividerBlock),
    /// See [`TimelineBlock`]
    Timeline(TimelineBlock),
    /// Anything else received over the wire
    Unknown(UnknownBlock),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Header(HeaderBlock),
    Section(SectionBlock),
    Context(ContextBlock),
    Actions(ActionsBlock),
    Divider(DividerBlock),
    Timeline(TimelineBlock),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlockRef<'a> {
    Header(&'a HeaderBlock),
    Section(&'a SectionBlock),
    Context(&'a ContextBlock),
    Actions(&'a ActionsBlock),
    Divider(&'a DividerBlock),
    Timeline(&'a TimelineBlock),
}

impl From<WireBlock> for Block {
    fn from(wire: WireBlock) -> Self {
        match wire {
            WireBlock::Header(b) => Block::Header(b),
            WireBlock::Section(b) => Block::Section(b),
            WireBlock::Context(b) => Block::Context(b),
            WireBlock::Actions(b) => Block::Actions(b),
            WireBlock::Divider(b) => Block::Divider(b),
            WireBlock::Timeline(b) => Block::Timeline(b),
        }
    }
}

impl Block {
    /// Accept one wire record. Never fails.
    pub fn from_value(raw: Value) -> Block {
        match serde_json::from_value::<WireBlock>(raw.clone()) {
            Ok(wire) => Block::from(wire),
            Err(err) => {
                let unknown = UnknownBlock {
                    raw,
                    reason: err.to_string(),
                };
                warn!(
                    kind = unknown.kind().unwrap_or("<missing>"),
                    reason = %unknown.reason,
                    "unrecognized block kept as placeholder"
                );
                Block::Unknown(unknown)
            }
        }
    }

    /// Header with plain text
    pub fn header(text: impl Into<String>) -> Block {
        Block::Header(HeaderBlock {
            text: TextObject::plain_emoji(text),
        })
    }

    /// Section with mrkdwn text only
    pub fn section(text: impl Into<String>) -> Block {
        Block::Section(SectionBlock {
            text: Some(TextObject::mrkdwn(text)),
            ..Default::default()
        })
    }

    /// Section with mrkdwn text and a button accessory
    pub fn section_with_button(text: impl Into<String>, button: ButtonElement) -> Block {
        Block::Section(SectionBlock {
            text: Some(TextObject::mrkdwn(text)),
            fields: Vec::new(),
            accessory: Some(Accessory::Button(button)),
        })
    }

    /// Context with one mrkdwn element
    pub fn context(text: impl Into<String>) -> Block {
        Block::Context(ContextBlock {
            elements: vec![ContextElement::Text(TextObject::mrkdwn(text))],
        })
    }

    /// Row of buttons
    pub fn actions(buttons: impl IntoIterator<Item = ButtonElement>) -> Block {
        Block::Actions(ActionsBlock {
            elements: buttons.into_iter().collect(),
        })
    }

    /// Horizontal rule
    pub fn divider() -> Block {
        Block::Divider(DividerBlock {})
    }

    /// Timeline of events
    pub fn timeline(events: impl IntoIterator<Item = TimelineEvent>) -> Block {
        Block::Timeline(TimelineBlock {
            events: events.into_iter().collect(),
        })
    }

    /// Wire tag of this block
    pub fn kind(&self) -> &str {
        match self {
            Block::Header(_) => "header",
            Block::Section(_) => "section",
            Block::Context(_) => "context",
            Block::Actions(_) => "actions",
            Block::Divider(_) => "divider",
            Block::Timeline(_) => "timeline",
            Block::Unknown(u) => u.kind().unwrap_or("unknown"),
        }
    }

    /// True for blocks that did not match a known shape
    pub fn is_unknown(&self) -> bool {
        matches!(self, Block::Unknown(_))
    }

    /// Apply button identifier defaults to every embedded button
    pub fn normalized(self) -> Block {
        match self {
            Block::Section(mut s) => {
                s.accessory = s.accessory.map(|accessory| match accessory {
                    Accessory::Button(b) => Accessory::Button(b.normalized()),
                    image => image,
                });
                Block::Section(s)
            }
            Block::Actions(a) => Block::Actions(ActionsBlock {
                elements: a.elements.into_iter().map(ButtonElement::normalized).collect(),
            }),
            other => other,
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Block::Header(b) => WireBlockRef::Header(b).serialize(serializer),
            Block::Section(b) => WireBlockRef::Section(b).serialize(serializer),
            Block::Context(b) => WireBlockRef::Context(b).serialize(serializer),
            Block::Actions(b) => WireBlockRef::Actions(b).serialize(serializer),
            Block::Divider(b) => WireBlockRef::Divider(b).serialize(serializer),
            Block::Timeline(b) => WireBlockRef::Timeline(b).serialize(serializer),
            Block::Unknown(u) => u.raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Block::from_value(Value::deserialize(deserializer)?))
    }
}

/// Ordered list of blocks. Array order is visual order, top to bottom.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockSequence(Vec<Block>);

impl BlockSequence {
    /// Empty sequence
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a document: either a JSON array of blocks or an object with a
    /// `blocks` array.
    pub fn from_json(json: &str) -> BlockResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_document(value)
    }

    /// Same as [`from_json`](Self::from_json) for an already parsed value
    pub fn from_document(value: Value) -> BlockResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("blocks") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(BlockError::invalid_document(format!(
                        "`blocks` must be an array, found {}",
                        json_kind(&other)
                    )))
                }
                None => {
                    return Err(BlockError::invalid_document(
                        "object has no `blocks` array",
                    ))
                }
            },
            other => {
                return Err(BlockError::invalid_document(format!(
                    "expected an array of blocks, found {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(items.into_iter().map(Block::from_value).collect())
    }

    /// Pretty JSON in wire format
    pub fn to_json_pretty(&self) -> BlockResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a block, normalizing its buttons
    pub fn push(&mut self, block: Block) {
        self.0.push(block.normalized());
    }

    /// Insert a block at `index`, normalizing its buttons
    pub fn insert(&mut self, index: usize, block: Block) {
        self.0.insert(index, block.normalized());
    }

    /// Append every block of `other`
    pub fn extend(&mut self, other: impl IntoIterator<Item = Block>) {
        for block in other {
            self.push(block);
        }
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no blocks
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Blocks in order
    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    /// Iterate blocks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    /// How many blocks fell back to placeholders
    pub fn unknown_count(&self) -> usize {
        self.0.iter().filter(|b| b.is_unknown()).count()
    }

    /// Keep at most `limit` blocks, dropping from the end.
    pub fn capped(mut self, limit: usize) -> Self {
        if self.0.len() > limit {
            warn!(
                total = self.0.len(),
                limit, "block sequence exceeds message limit, truncating"
            );
            self.0.truncate(limit);
        }
        self
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FromIterator<Block> for BlockSequence {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self(iter.into_iter().map(Block::normalized).collect())
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(blocks: Vec<Block>) -> Self {
        blocks.into_iter().collect()
    }
}

impl IntoIterator for BlockSequence {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Deref for BlockSequence {
    type Target = [Block];

    fn deref(&self) -> &[Block] {
        &self.0
    }
}
