//! Block-level markup.

use std::borrow::Cow;
use std::fmt::Write;
use std::num::FpCategory;

use serde_json::{Map, Value};

use crate::context::RenderContext;
use crate::entity::render_entity;
use crate::escape::{escape_attr, is_blank, nbsp_leading, nbsp_trailing};
use crate::markup::section_markup;
use crate::model::{Block, BlockType};
use crate::sections::resolve_sections;
use crate::style::StyleVector;

/// Render a non-list block, including its trailing newline.
///
/// Atomic entity blocks render as bare entity markup. Blocks whose type has
/// no HTML tag render their inner markup without a wrapper.
pub(crate) fn render_block(block: &Block, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    if is_atomic_entity_block(block) {
        out.push_str(&atomic_markup(block, ctx));
    } else if let Some(tag) = block.block_type.html_tag() {
        open_tag(&mut out, tag, &block.data, ctx.directional);
        out.push_str(&inner_markup(block, ctx));
        write!(out, "</{tag}>").unwrap();
    } else {
        tracing::debug!(
            block_type = block.block_type.as_str(),
            key = %block.key,
            "Block type has no tag"
        );
        out.push_str(&inner_markup(block, ctx));
    }
    out.push('\n');
    out
}

/// Whether a block renders as its first entity alone.
fn is_atomic_entity_block(block: &Block) -> bool {
    !block.entity_ranges.is_empty()
        && (is_blank(&block.text) || block.block_type == BlockType::Atomic)
}

fn atomic_markup(block: &Block, ctx: &RenderContext<'_>) -> String {
    let Some(range) = block.entity_ranges.first() else {
        return String::new();
    };
    match ctx.entity(&range.key) {
        Some(entity) => render_entity(entity, "", ctx.entity_transform),
        None => {
            tracing::warn!(
                key = %range.key,
                block = %block.key,
                "Entity key not found in entity map"
            );
            String::new()
        }
    }
}

/// Write `<tag style=".." dir="auto">`, omitting empty attributes.
pub(crate) fn open_tag(out: &mut String, tag: &str, data: &Map<String, Value>, directional: bool) {
    write!(out, "<{tag}").unwrap();
    let style = block_style(data);
    if !style.is_empty() {
        write!(out, r#" style="{}""#, escape_attr(&style)).unwrap();
    }
    if directional {
        out.push_str(r#" dir="auto""#);
    }
    out.push('>');
}

/// Inline CSS from block data: `key:value;` per truthy entry, in map order.
pub(crate) fn block_style(data: &Map<String, Value>) -> String {
    let mut style = String::new();
    for (key, value) in data {
        let text = match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            value if is_falsy(value) => continue,
            value => Cow::Owned(value.to_string()),
        };
        if !text.is_empty() {
            write!(style, "{key}:{text};").unwrap();
        }
    }
    style
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| matches!(f.classify(), FpCategory::Zero | FpCategory::Nan)),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Markup of a block's text, with spaces at the outer edges kept as `&nbsp;`.
pub(crate) fn inner_markup(block: &Block, ctx: &RenderContext<'_>) -> String {
    let text: Vec<char> = block.text.chars().collect();
    let vector = StyleVector::build(text.len(), &block.inline_style_ranges);
    let sections = resolve_sections(&text, &block.entity_ranges, ctx.annotations);
    let last = sections.len().saturating_sub(1);

    let mut out = String::new();
    for (index, section) in sections.iter().enumerate() {
        let mut markup = section_markup(&text, &vector, section, ctx);
        if index == 0 {
            markup = nbsp_leading(&markup);
        }
        if index == last {
            markup = nbsp_trailing(&markup);
        }
        out.push_str(&markup);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Entity, EntityKey, EntityType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(block: &Block, doc: &Document) -> String {
        render_block(block, &RenderContext::new(doc))
    }

    #[test]
    fn test_paragraph() {
        let block = Block::new(BlockType::Unstyled, "hello");
        assert_eq!(render(&block, &Document::default()), "<p>hello</p>\n");
    }

    #[test]
    fn test_headings_and_code() {
        let doc = Document::default();
        assert_eq!(render(&Block::new(BlockType::Header(2), "t"), &doc), "<h2>t</h2>\n");
        assert_eq!(render(&Block::new(BlockType::Code, "a<b"), &doc), "<pre>a&lt;b</pre>\n");
        assert_eq!(
            render(&Block::new(BlockType::Blockquote, "q"), &doc),
            "<blockquote>q</blockquote>\n"
        );
    }

    #[test]
    fn test_unknown_type_renders_text_without_wrapper() {
        let block = Block::new(BlockType::Other("figure".to_owned()), "caption text")
            .with_style(0, 7, "BOLD");
        assert_eq!(render(&block, &Document::default()), "<strong>caption</strong> text\n");
        let plain = Block::new(BlockType::Other("figure".to_owned()), " caption ");
        assert_eq!(render(&plain, &Document::default()), "&nbsp;caption&nbsp;\n");
    }

    #[test]
    fn test_block_style_and_direction() {
        let doc = Document::default();
        let mut ctx = RenderContext::new(&doc);
        ctx.directional = true;
        let block = Block::new(BlockType::Unstyled, "x")
            .with_data("text-align", "center")
            .with_data("margin", json!(null))
            .with_data("indent", 0);
        assert_eq!(
            render_block(&block, &ctx),
            r#"<p style="text-align:center;" dir="auto">x</p>"#.to_owned() + "\n"
        );
    }

    #[test]
    fn test_block_style_skips_falsy() {
        let data = json!({
            "a": "1",
            "b": "",
            "c": false,
            "d": 0,
            "e": 2,
            "f": true,
            "g": null,
            "h": 0.0,
        });
        let Value::Object(data) = data else {
            unreachable!()
        };
        assert_eq!(block_style(&data), "a:1;e:2;f:true;");
    }

    #[test]
    fn test_leading_and_trailing_spaces() {
        let block = Block::new(BlockType::Unstyled, "  hi  there ");
        assert_eq!(
            render(&block, &Document::default()),
            "<p>&nbsp;&nbsp;hi  there&nbsp;</p>\n"
        );
    }

    #[test]
    fn test_middle_sections_keep_spaces() {
        let mut doc = Document::default();
        doc.entity_map.insert(
            "0".into(),
            Entity::new(EntityType::Link).with_data("url", "/x"),
        );
        let block = Block::new(BlockType::Unstyled, "a  link  b").with_entity(3, 4, "0");
        assert_eq!(
            render(&block, &doc),
            "<p>a  <a href=\"/x\" target=\"_self\">link</a>  b</p>\n"
        );
    }

    #[test]
    fn test_atomic_image_block() {
        let mut doc = Document::default();
        doc.entity_map.insert(
            EntityKey::from(0_u64),
            Entity::new(EntityType::Image)
                .with_data("src", "a.png")
                .with_data("height", "auto")
                .with_data("width", "100%"),
        );
        let block = Block::new(BlockType::Atomic, " ").with_entity(0, 1, 0_u64);
        assert_eq!(
            render(&block, &doc),
            "<img src=\"a.png\" alt=\"\" style=\"height: auto;width: 100%\"/>\n"
        );
    }

    #[test]
    fn test_blank_text_with_entity_is_atomic() {
        let mut doc = Document::default();
        doc.entity_map.insert(
            "e".into(),
            Entity::new(EntityType::EmbeddedLink)
                .with_data("src", "https://v")
                .with_data("width", "1")
                .with_data("height", "2"),
        );
        let block = Block::new(BlockType::Unstyled, "").with_entity(0, 0, "e");
        assert_eq!(
            render(&block, &doc),
            "<iframe width=\"1\" height=\"2\" src=\"https://v\" frameBorder=\"0\"></iframe>\n"
        );
    }

    #[test]
    fn test_atomic_missing_entity() {
        let block = Block::new(BlockType::Atomic, " ").with_entity(0, 1, "nope");
        assert_eq!(render(&block, &Document::default()), "\n");
    }

    #[test]
    fn test_empty_paragraph() {
        let block = Block::new(BlockType::Unstyled, "");
        assert_eq!(render(&block, &Document::default()), "<p></p>\n");
    }

    #[test]
    fn test_multiline_text() {
        let block = Block::new(BlockType::Unstyled, "a\nb");
        assert_eq!(render(&block, &Document::default()), "<p>a<br>\nb</p>\n");
    }
}
