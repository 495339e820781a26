//! Markup composition for sections and style runs.
//!
//! A section is rendered in two passes over its style vector: property runs
//! (color, background, font) first, then tag runs (bold, italic, ...) inside
//! each property run. The `<span>` carrying CSS properties therefore always
//! wraps the tag elements:
//!
//! ```text
//! <span style="color: red;"><strong><em>text</em></strong></span>
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use crate::context::RenderContext;
use crate::entity::render_entity;
use crate::escape::{escape_attr, escape_literal_attr, push_escaped};
use crate::runs::encode_runs;
use crate::sections::{Annotation, Section, SectionKind};
use crate::style::{ActiveStyles, PropertyStyle, StyleName, StyleVector};

/// Custom property value hook.
///
/// Called for every property style value before it is written into a
/// `style` attribute. Returning `None` keeps the original value.
///
/// ```
/// use draft_html::{DraftSerializer, PropertyStyle};
///
/// let serializer = DraftSerializer::new().with_property_override(
///     |property: PropertyStyle, value: &str| {
///         (property == PropertyStyle::Color && value == "brand").then(|| "#ff6600".to_owned())
///     },
/// );
/// ```
pub trait PropertyOverride {
    /// Replacement value, if any.
    fn override_value(&self, property: PropertyStyle, value: &str) -> Option<String>;
}

impl<F> PropertyOverride for F
where
    F: Fn(PropertyStyle, &str) -> Option<String>,
{
    fn override_value(&self, property: PropertyStyle, value: &str) -> Option<String> {
        self(property, value)
    }
}

/// Render one section of a block.
pub(crate) fn section_markup(
    text: &[char],
    vector: &StyleVector<'_>,
    section: &Section<'_>,
    ctx: &RenderContext<'_>,
) -> String {
    let mut inner = String::new();
    for property_run in encode_runs(vector, &StyleName::PROPERTIES, section.start, section.end) {
        let mut tagged = String::new();
        for tag_run in encode_runs(vector, &StyleName::TAGS, property_run.start, property_run.end)
        {
            let mut escaped = String::new();
            push_escaped(&mut escaped, text[tag_run.start..tag_run.end].iter().copied());
            wrap_tags(&mut tagged, &tag_run.styles, &escaped);
        }
        wrap_properties(&mut inner, &property_run.styles, &tagged, ctx);
    }

    match &section.kind {
        SectionKind::Plain => inner,
        SectionKind::Entity(key) => match ctx.entity(key) {
            Some(entity) => render_entity(entity, &inner, ctx.entity_transform),
            None => {
                tracing::warn!(key = %key, "Entity key not found in entity map");
                inner
            }
        },
        SectionKind::Annotation(annotation) => {
            let literal: String = text[section.start..section.end].iter().collect();
            annotation_markup(annotation, &literal, &inner)
        }
    }
}

/// Append `content` wrapped in the active tag styles, outermost first.
pub(crate) fn wrap_tags(out: &mut String, styles: &ActiveStyles<'_>, content: &str) {
    let tags: Vec<&str> = styles.tags().map(|t| t.tag()).collect();
    for tag in &tags {
        write!(out, "<{tag}>").unwrap();
    }
    out.push_str(content);
    for tag in tags.iter().rev() {
        write!(out, "</{tag}>").unwrap();
    }
}

/// Append `content` wrapped in a `<span>` listing the active property styles.
///
/// Appends `content` unchanged when no property style is active.
pub(crate) fn wrap_properties(
    out: &mut String,
    styles: &ActiveStyles<'_>,
    content: &str,
    ctx: &RenderContext<'_>,
) {
    if !styles.has_properties() {
        out.push_str(content);
        return;
    }
    let mut css = String::new();
    for (property, value) in styles.properties() {
        let value = ctx
            .property_override
            .and_then(|o| o.override_value(property, value))
            .map_or(Cow::Borrowed(value), Cow::Owned);
        let unit = if property == PropertyStyle::FontSize && is_digits(&value) {
            "px"
        } else {
            ""
        };
        write!(css, "{}: {value}{unit};", property.css_property()).unwrap();
    }
    write!(out, r#"<span style="{}">{content}</span>"#, escape_attr(&css)).unwrap();
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Anchor for a detected annotation token.
///
/// The token literal is escaped like text content; a suggestion URL only has
/// its quotes escaped.
pub(crate) fn annotation_markup(annotation: &Annotation<'_>, literal: &str, inner: &str) -> String {
    match annotation {
        Annotation::Hashtag => format!(
            r#"<a href="{}" class="wysiwyg-hashtag">{inner}</a>"#,
            escape_literal_attr(literal)
        ),
        Annotation::Mention(suggestion) => {
            let href = suggestion
                .url
                .as_deref()
                .map_or_else(|| escape_literal_attr(literal), escape_attr);
            format!(r#"<a href="{href}" class="wysiwyg-mention">{inner}</a>"#)
        }
    }
}
