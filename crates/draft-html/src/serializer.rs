//! Document serializer.

use crate::block::render_block;
use crate::context::RenderContext;
use crate::entity::EntityTransform;
use crate::list::build_list;
use crate::markup::PropertyOverride;
use crate::model::Document;
use crate::options::{AnnotationConfig, SerializeOptions};
use crate::validate::{self, ValidationError};

/// Serializes raw documents to HTML.
///
/// Output is one newline-terminated element per block or list group, in
/// document order, with no surrounding document wrapper.
///
/// # Example
///
/// ```
/// use draft_html::{Block, BlockType, Document, DraftSerializer};
///
/// let doc = Document {
///     blocks: vec![
///         Block::new(BlockType::Header(1), "Title"),
///         Block::new(BlockType::Unstyled, "Some #rust text").with_style(0, 4, "BOLD"),
///     ],
///     ..Document::default()
/// };
/// let html = DraftSerializer::new().with_hashtags().serialize(Some(&doc));
/// assert_eq!(
///     html,
///     "<h1>Title</h1>\n<p><strong>Some</strong> <a href=\"#rust\" class=\"wysiwyg-hashtag\">#rust</a> text</p>\n"
/// );
/// ```
#[derive(Default)]
pub struct DraftSerializer {
    options: SerializeOptions,
    entity_transform: Option<Box<dyn EntityTransform>>,
    property_override: Option<Box<dyn PropertyOverride>>,
}

impl DraftSerializer {
    /// Create a serializer with annotations, direction and hooks disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer from plain-data options.
    #[must_use]
    pub fn from_options(options: SerializeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Enable trigger-based annotation detection.
    #[must_use]
    pub fn with_annotations(mut self, config: AnnotationConfig) -> Self {
        self.options.annotations = Some(config);
        self
    }

    /// Enable hashtag detection with the default `#` trigger and space separator.
    #[must_use]
    pub fn with_hashtags(self) -> Self {
        self.with_annotations(AnnotationConfig::hashtag())
    }

    /// Emit `dir="auto"` on block and list item tags.
    #[must_use]
    pub fn with_directional(mut self, enabled: bool) -> Self {
        self.options.directional = enabled;
        self
    }

    /// Set a custom entity rendering hook.
    ///
    /// See [`EntityTransform`] for the fallback rules.
    #[must_use]
    pub fn with_entity_transform<T: EntityTransform + 'static>(mut self, transform: T) -> Self {
        self.entity_transform = Some(Box::new(transform));
        self
    }

    /// Set a custom property value hook.
    #[must_use]
    pub fn with_property_override<P: PropertyOverride + 'static>(mut self, hook: P) -> Self {
        self.property_override = Some(Box::new(hook));
        self
    }

    /// Current plain-data options.
    #[must_use]
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Render a document. An absent document renders as an empty string.
    ///
    /// Malformed ranges are rendered leniently, see
    /// [`resolve_sections`](crate::resolve_sections).
    #[must_use]
    pub fn serialize(&self, document: Option<&Document>) -> String {
        let Some(document) = document else {
            return String::new();
        };
        let ctx = self.context(document);

        let mut html = String::new();
        let mut list_start: Option<usize> = None;
        let mut lists = 0usize;
        for (index, block) in document.blocks.iter().enumerate() {
            if block.is_list_item() {
                list_start.get_or_insert(index);
                continue;
            }
            if let Some(start) = list_start.take() {
                html.push_str(&build_list(&document.blocks[start..index], &ctx));
                lists += 1;
            }
            html.push_str(&render_block(block, &ctx));
        }
        if let Some(start) = list_start {
            html.push_str(&build_list(&document.blocks[start..], &ctx));
            lists += 1;
        }

        tracing::trace!(
            blocks = document.blocks.len(),
            lists,
            bytes = html.len(),
            "Serialized document"
        );
        html
    }

    /// Validate a document, then render it.
    pub fn serialize_strict(&self, document: &Document) -> Result<String, ValidationError> {
        self.validate(document)?;
        Ok(self.serialize(Some(document)))
    }

    /// Check a document against the invariants rendering relies on.
    ///
    /// Entities of unrecognized type are accepted only when an entity
    /// transform is set.
    pub fn validate(&self, document: &Document) -> Result<(), ValidationError> {
        validate::document(document, self.entity_transform.is_some())
    }

    fn context<'a>(&'a self, document: &'a Document) -> RenderContext<'a> {
        RenderContext {
            annotations: self.options.annotations.as_ref(),
            directional: self.options.directional,
            entity_transform: self.entity_transform.as_deref(),
            property_override: self.property_override.as_deref(),
            ..RenderContext::new(document)
        }
    }
}

impl std::fmt::Debug for DraftSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftSerializer")
            .field("options", &self.options)
            .field("entity_transform", &self.entity_transform.is_some())
            .field("property_override", &self.property_override.is_some())
            .finish()
    }
}

/// Render a document with default options.
///
/// ```
/// use draft_html::{Block, BlockType, Document, draft_to_html};
///
/// let doc = Document {
///     blocks: vec![Block::new(BlockType::Unstyled, "hello")],
///     ..Document::default()
/// };
/// assert_eq!(draft_to_html(Some(&doc)), "<p>hello</p>\n");
/// assert_eq!(draft_to_html(None), "");
/// ```
#[must_use]
pub fn draft_to_html(document: Option<&Document>) -> String {
    DraftSerializer::new().serialize(document)
}
