//! Rich-text block documents to HTML.
//!
//! Converts a raw block document (blocks of text with inline style ranges,
//! entity ranges and a shared entity map) into an HTML fragment with one
//! newline-terminated element per block or list group.
//!
//! # Architecture
//!
//! Each block goes through the same pipeline:
//! - [`resolve_sections`]: partitions the text into plain, entity and
//!   annotation sections
//! - [`StyleVector`]: expands inline style ranges into per-char state
//! - [`encode_runs`]: collapses that state into maximal runs per section
//! - markup composition: wraps runs in `<span style>` and tag elements and
//!   sections in entity or annotation markup
//!
//! Consecutive list items are rebuilt into nested `<ul>`/`<ol>` markup from
//! their depth. Offsets are char offsets, not byte offsets.
//!
//! # Example
//!
//! ```
//! use draft_html::{Block, BlockType, Document, DraftSerializer};
//!
//! let doc: Document = serde_json::from_str(r#"{
//!     "blocks": [
//!         {"text": "Hello", "type": "unstyled", "inlineStyleRanges": [
//!             {"offset": 0, "length": 5, "style": "BOLD"}
//!         ]},
//!         {"text": "one", "type": "unordered-list-item"},
//!         {"text": "two", "type": "unordered-list-item", "depth": 1}
//!     ],
//!     "entityMap": {}
//! }"#).unwrap();
//!
//! let html = DraftSerializer::new().serialize(Some(&doc));
//! assert_eq!(
//!     html,
//!     "<p><strong>Hello</strong></p>\n<ul>\n<li>one\n<ul>\n<li>two</li>\n</ul>\n</li>\n</ul>\n"
//! );
//! ```

mod block;
mod context;
mod entity;
mod escape;
mod list;
mod markup;
mod model;
mod options;
mod runs;
mod sections;
mod serializer;
mod style;
mod validate;

pub use entity::{EntityTransform, default_markup};
pub use escape::{escape_text, is_blank};
pub use markup::PropertyOverride;
pub use model::{
    Block, BlockType, Document, Entity, EntityKey, EntityRange, EntityType, InlineStyleRange,
};
pub use options::{
    AnnotationConfig, AnnotationKind, DEFAULT_SEPARATOR, DEFAULT_TRIGGER, MentionSuggestion,
    SerializeOptions,
};
pub use runs::{StyleRun, encode_runs};
pub use sections::{Annotation, Section, SectionKind, resolve_sections};
pub use serializer::{DraftSerializer, draft_to_html};
pub use style::{ActiveStyles, PropertyStyle, StyleName, StyleVector, TagStyle};
pub use validate::ValidationError;
