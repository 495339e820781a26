//! Entity markup.
//!
//! Entities are rendered by a custom [`EntityTransform`] when one is set and
//! returns an override, otherwise by type-based default markup.

use std::fmt::Write;

use crate::escape::escape_attr;
use crate::model::{Entity, EntityType};

/// Custom entity rendering hook.
///
/// Receives the entity and the already-rendered markup of the text it covers.
/// Returning `None` (or an empty string) falls through to the default markup.
///
/// Closures of the matching signature implement this trait:
///
/// ```
/// use draft_html::{DraftSerializer, Entity, EntityType};
///
/// let serializer = DraftSerializer::new().with_entity_transform(
///     |entity: &Entity, inner: &str| match &entity.entity_type {
///         EntityType::Other(name) if name == "KBD" => Some(format!("<kbd>{inner}</kbd>")),
///         _ => None,
///     },
/// );
/// ```
pub trait EntityTransform {
    /// Markup replacing the default rendering, if any.
    fn transform(&self, entity: &Entity, inner_html: &str) -> Option<String>;
}

impl<F> EntityTransform for F
where
    F: Fn(&Entity, &str) -> Option<String>,
{
    fn transform(&self, entity: &Entity, inner_html: &str) -> Option<String> {
        self(entity, inner_html)
    }
}

/// Render an entity around `inner_html`.
pub(crate) fn render_entity(
    entity: &Entity,
    inner_html: &str,
    transform: Option<&dyn EntityTransform>,
) -> String {
    if let Some(html) = transform
        .and_then(|t| t.transform(entity, inner_html))
        .filter(|html| !html.is_empty())
    {
        return html;
    }
    default_markup(entity, inner_html)
}

/// Type-based entity markup. Unknown types return `inner_html` unchanged.
#[must_use]
pub fn default_markup(entity: &Entity, inner_html: &str) -> String {
    let attr = |name: &str| entity.attr(name).map(|v| escape_attr(&v));
    let mut out = String::new();
    match &entity.entity_type {
        EntityType::Link => {
            let target = attr("targetOption")
                .or_else(|| attr("target"))
                .unwrap_or_else(|| "_self".to_owned());
            write!(
                out,
                r#"<a href="{}" target="{target}">{inner_html}</a>"#,
                attr("url").unwrap_or_default()
            )
            .unwrap();
        }
        EntityType::Mention => {
            write!(
                out,
                r#"<a href="{}" class="wysiwyg-mention" data-mention data-value="{}">{inner_html}</a>"#,
                attr("url").unwrap_or_default(),
                attr("value").unwrap_or_default()
            )
            .unwrap();
        }
        EntityType::Image => {
            let img = format!(
                r#"<img src="{}" alt="{}" style="height: {};width: {}"/>"#,
                attr("src").unwrap_or_default(),
                attr("alt").unwrap_or_default(),
                attr("height").unwrap_or_else(|| "auto".to_owned()),
                attr("width").unwrap_or_else(|| "auto".to_owned())
            );
            match attr("alignment") {
                Some(alignment) => {
                    write!(out, r#"<div style="text-align:{alignment};">{img}</div>"#).unwrap();
                }
                None => out.push_str(&img),
            }
        }
        EntityType::EmbeddedLink => {
            write!(
                out,
                r#"<iframe width="{}" height="{}" src="{}" frameBorder="0"></iframe>"#,
                attr("width").unwrap_or_default(),
                attr("height").unwrap_or_default(),
                attr("src").unwrap_or_default()
            )
            .unwrap();
        }
        EntityType::Other(_) => out.push_str(inner_html),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link() {
        let entity = Entity::new(EntityType::Link)
            .with_data("url", "http://x")
            .with_data("target", "_blank");
        assert_eq!(
            default_markup(&entity, "x"),
            r#"<a href="http://x" target="_blank">x</a>"#
        );
    }

    #[test]
    fn test_link_target_option_and_default() {
        let entity = Entity::new(EntityType::Link)
            .with_data("url", "/a?b=1&c=2")
            .with_data("targetOption", "_parent");
        assert_eq!(
            default_markup(&entity, "a"),
            r#"<a href="/a?b=1&c=2" target="_parent">a</a>"#
        );

        let entity = Entity::new(EntityType::Link).with_data("url", "/a");
        assert_eq!(
            default_markup(&entity, "a"),
            r#"<a href="/a" target="_self">a</a>"#
        );
    }

    #[test]
    fn test_link_attribute_quote_escaped() {
        let entity = Entity::new(EntityType::Link).with_data("url", r#"x" onclick="y"#);
        assert_eq!(
            default_markup(&entity, "a"),
            r#"<a href="x&quot; onclick=&quot;y" target="_self">a</a>"#
        );
    }

    #[test]
    fn test_mention() {
        let entity = Entity::new(EntityType::Mention)
            .with_data("url", "/u/ann")
            .with_data("value", "ann");
        assert_eq!(
            default_markup(&entity, "@ann"),
            r#"<a href="/u/ann" class="wysiwyg-mention" data-mention data-value="ann">@ann</a>"#
        );
    }

    #[test]
    fn test_image() {
        let entity = Entity::new(EntityType::Image)
            .with_data("src", "a.png")
            .with_data("alt", "A")
            .with_data("height", "10px")
            .with_data("width", "20px");
        assert_eq!(
            default_markup(&entity, ""),
            r#"<img src="a.png" alt="A" style="height: 10px;width: 20px"/>"#
        );
    }

    #[test]
    fn test_image_aligned_with_defaults() {
        let entity = Entity::new(EntityType::Image)
            .with_data("src", "a.png")
            .with_data("alignment", "left");
        assert_eq!(
            default_markup(&entity, ""),
            r#"<div style="text-align:left;"><img src="a.png" alt="" style="height: auto;width: auto"/></div>"#
        );
    }

    #[test]
    fn test_embedded_link() {
        let entity = Entity::new(EntityType::EmbeddedLink)
            .with_data("src", "https://v/1")
            .with_data("width", 300)
            .with_data("height", 200);
        assert_eq!(
            default_markup(&entity, ""),
            r#"<iframe width="300" height="200" src="https://v/1" frameBorder="0"></iframe>"#
        );
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let entity = Entity::new(EntityType::Other("CARD".to_owned()));
        assert_eq!(default_markup(&entity, "<em>x</em>"), "<em>x</em>");
    }

    #[test]
    fn test_transform_overrides() {
        let transform = |entity: &Entity, inner: &str| {
            (entity.entity_type == EntityType::Link).then(|| format!("[{inner}]"))
        };
        let link = Entity::new(EntityType::Link).with_data("url", "/a");
        assert_eq!(render_entity(&link, "a", Some(&transform)), "[a]");

        let image = Entity::new(EntityType::Image).with_data("src", "i.png");
        assert!(render_entity(&image, "", Some(&transform)).starts_with("<img"));
    }

    #[test]
    fn test_empty_transform_result_falls_through() {
        let transform = |_: &Entity, _: &str| Some(String::new());
        let link = Entity::new(EntityType::Link).with_data("url", "/a");
        assert_eq!(
            render_entity(&link, "a", Some(&transform)),
            r#"<a href="/a" target="_self">a</a>"#
        );
    }
}
