//! Raw document model.
//!
//! Mirrors the raw JSON shape produced by Draft.js-style editors: a list of
//! blocks plus an entity map. All types deserialize directly from that JSON.
//!
//! # Offsets
//!
//! Every `offset`/`length` pair counts Unicode scalar values (`char`s) of the
//! block text, never bytes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validate::{self, ValidationError};

/// A rich-text document: ordered blocks plus the entities they reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Blocks in document order.
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Entities referenced by [`EntityRange::key`].
    #[serde(default)]
    pub entity_map: BTreeMap<EntityKey, Entity>,
}

impl Document {
    /// Look up an entity by key.
    #[must_use]
    pub fn entity(&self, key: &EntityKey) -> Option<&Entity> {
        self.entity_map.get(key)
    }

    /// Check every block against the document invariants.
    ///
    /// The serializer never requires this; it is the entry point for callers
    /// that prefer an error over lenient output. Entities of unknown type are
    /// accepted here, see [`DraftSerializer::validate`](crate::DraftSerializer::validate)
    /// for the stricter check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::document(self, true)
    }
}

/// Key of an entity in the entity map.
///
/// Raw documents use string keys in `entityMap` and integer keys in
/// `entityRanges`; both deserialize into the same normalized key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawEntityKey", into = "String")]
pub struct EntityKey(String);

impl EntityKey {
    /// Create a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The normalized key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntityKey {
    fn from(key: u64) -> Self {
        Self(key.to_string())
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<EntityKey> for String {
    fn from(key: EntityKey) -> Self {
        key.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityKey {
    Int(u64),
    Str(String),
}

impl From<RawEntityKey> for EntityKey {
    fn from(raw: RawEntityKey) -> Self {
        match raw {
            RawEntityKey::Int(n) => n.into(),
            RawEntityKey::Str(s) => Self(s),
        }
    }
}

/// One structural unit of the document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Editor-assigned block key (not used for rendering).
    #[serde(default)]
    pub key: String,
    /// Block type, selects the wrapping tag.
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    /// Block text.
    #[serde(default)]
    pub text: String,
    /// List nesting level, meaningful for list items only.
    #[serde(default)]
    pub depth: usize,
    /// Block-level CSS properties, rendered in insertion order.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Inline style ranges; may overlap each other.
    #[serde(default)]
    pub inline_style_ranges: Vec<InlineStyleRange>,
    /// Entity ranges; expected not to overlap each other.
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
}

impl Block {
    /// Create a block of the given type with plain text.
    #[must_use]
    pub fn new(block_type: BlockType, text: impl Into<String>) -> Self {
        Self {
            block_type,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the nesting depth.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Add an inline style range.
    #[must_use]
    pub fn with_style(mut self, offset: usize, length: usize, style: impl Into<String>) -> Self {
        self.inline_style_ranges.push(InlineStyleRange {
            offset,
            length,
            style: style.into(),
        });
        self
    }

    /// Add an entity range.
    #[must_use]
    pub fn with_entity(mut self, offset: usize, length: usize, key: impl Into<EntityKey>) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            key: key.into(),
        });
        self
    }

    /// Add a block-level data property.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Whether the block belongs in a list group.
    #[must_use]
    pub fn is_list_item(&self) -> bool {
        self.block_type.is_list_item()
    }
}

/// Block type as stored in the raw document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// Plain paragraph (`unstyled`).
    #[default]
    Unstyled,
    /// Explicit paragraph.
    Paragraph,
    /// Heading level 1 to 6.
    ///
    /// Levels outside that range are clamped: `0` renders as `h1` and
    /// anything above `6` as `h6`.
    Header(u8),
    /// Block quotation.
    Blockquote,
    /// Preformatted code block.
    Code,
    /// Bulleted list item.
    UnorderedListItem,
    /// Numbered list item.
    OrderedListItem,
    /// Block holding a single embedded entity.
    Atomic,
    /// Any other type; rendered without a wrapping tag.
    Other(String),
}

const HEADER_NAMES: [&str; 6] = [
    "header-one",
    "header-two",
    "header-three",
    "header-four",
    "header-five",
    "header-six",
];

/// Zero-based heading index for a level, clamped to `0..6`.
fn heading_index(level: u8) -> usize {
    usize::from(level.clamp(1, 6)) - 1
}

impl BlockType {
    /// Raw type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::Paragraph => "paragraph",
            Self::Header(level) => HEADER_NAMES[heading_index(*level)],
            Self::Blockquote => "blockquote",
            Self::Code => "code",
            Self::UnorderedListItem => "unordered-list-item",
            Self::OrderedListItem => "ordered-list-item",
            Self::Atomic => "atomic",
            Self::Other(name) => name,
        }
    }

    /// HTML tag for the block, `None` when the type has no wrapper.
    ///
    /// For list items this is the list container tag (`ul`/`ol`).
    #[must_use]
    pub fn html_tag(&self) -> Option<&'static str> {
        const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
        match self {
            Self::Unstyled | Self::Paragraph => Some("p"),
            Self::Header(level) => Some(HEADINGS[heading_index(*level)]),
            Self::Blockquote => Some("blockquote"),
            Self::Code => Some("pre"),
            Self::UnorderedListItem => Some("ul"),
            Self::OrderedListItem => Some("ol"),
            Self::Atomic | Self::Other(_) => None,
        }
    }

    /// Whether this is an ordered or unordered list item.
    #[must_use]
    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedListItem | Self::OrderedListItem)
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        if let Some(index) = HEADER_NAMES.iter().position(|h| *h == name) {
            // Index is below 6.
            #[allow(clippy::cast_possible_truncation)]
            return Self::Header(index as u8 + 1);
        }
        match name {
            "unstyled" => Self::Unstyled,
            "paragraph" => Self::Paragraph,
            "blockquote" => Self::Blockquote,
            "code" | "code-block" => Self::Code,
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "atomic" => Self::Atomic,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_owned()
    }
}

/// Character range carrying one inline style name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyleRange {
    /// First character offset.
    pub offset: usize,
    /// Number of characters.
    pub length: usize,
    /// Style name, e.g. `BOLD` or `color-red`.
    pub style: String,
}

/// Character range linked to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    /// First character offset.
    pub offset: usize,
    /// Number of characters.
    pub length: usize,
    /// Entity map key.
    pub key: EntityKey,
}

/// Non-text annotation referenced from entity ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity kind, selects the default markup.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Editor mutability flag (not used for rendering).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutability: Option<String>,
    /// Type-specific attributes (url, src, width, ...).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Entity {
    /// Create an entity with empty data.
    #[must_use]
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            mutability: None,
            data: Map::new(),
        }
    }

    /// Add a data attribute.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attribute value as text.
    ///
    /// Returns `None` for missing, `null` and empty-string values. Numbers and
    /// booleans are returned as their JSON text.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        value_text(self.data.get(name)?)
    }
}

/// Text of a scalar JSON value, `None` for null, empty strings and containers.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Entity kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Hyperlink around the entity text.
    Link,
    /// Image, usually in an atomic block.
    Image,
    /// Embedded frame.
    EmbeddedLink,
    /// Mention of a user or page.
    Mention,
    /// Custom type; only a custom transform renders it.
    Other(String),
}

impl EntityType {
    /// Raw type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Link => "LINK",
            Self::Image => "IMAGE",
            Self::EmbeddedLink => "EMBEDDED_LINK",
            Self::Mention => "MENTION",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        match name {
            "LINK" => Self::Link,
            "IMAGE" => Self::Image,
            "EMBEDDED_LINK" => Self::EmbeddedLink,
            "MENTION" => Self::Mention,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.as_str().to_owned()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
