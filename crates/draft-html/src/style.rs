//! Per-character inline style vectors.
//!
//! A block's inline style ranges are expanded once into a [`StyleVector`]:
//! one boolean column per [`TagStyle`] and one optional value column per
//! [`PropertyStyle`], each indexed by char offset.

/// Boolean inline style rendered as a wrapping element.
///
/// Declaration order is the nesting order: [`TagStyle::Bold`] is outermost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagStyle {
    /// `BOLD` → `<strong>`
    Bold,
    /// `ITALIC` → `<em>`
    Italic,
    /// `UNDERLINE` → `<ins>`
    Underline,
    /// `STRIKETHROUGH` → `<del>`
    Strikethrough,
    /// `CODE` → `<code>`
    Code,
    /// `SUPERSCRIPT` → `<sup>`
    Superscript,
    /// `SUBSCRIPT` → `<sub>`
    Subscript,
}

impl TagStyle {
    /// All tag styles, outermost first.
    pub const ALL: [Self; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
        Self::Code,
        Self::Superscript,
        Self::Subscript,
    ];

    /// Style name as used in inline style ranges.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::Code => "CODE",
            Self::Superscript => "SUPERSCRIPT",
            Self::Subscript => "SUBSCRIPT",
        }
    }

    /// HTML element name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Underline => "ins",
            Self::Strikethrough => "del",
            Self::Code => "code",
            Self::Superscript => "sup",
            Self::Subscript => "sub",
        }
    }

    /// Look up a style by exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Valued inline style rendered as a CSS property on a `<span>`.
///
/// Declaration order is the order of properties inside the `style` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyStyle {
    /// `color-<v>` → `color`
    Color,
    /// `bgcolor-<v>` → `background-color`
    BgColor,
    /// `fontsize-<v>` → `font-size`
    FontSize,
    /// `fontfamily-<v>` → `font-family`
    FontFamily,
}

impl PropertyStyle {
    /// All property styles in CSS output order.
    pub const ALL: [Self; 4] = [Self::Color, Self::BgColor, Self::FontSize, Self::FontFamily];

    /// Prefix of the style name carrying the value.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Color => "color-",
            Self::BgColor => "bgcolor-",
            Self::FontSize => "fontsize-",
            Self::FontFamily => "fontfamily-",
        }
    }

    /// CSS property name.
    #[must_use]
    pub fn css_property(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BgColor => "background-color",
            Self::FontSize => "font-size",
            Self::FontFamily => "font-family",
        }
    }

    /// Split a style name into property and value.
    #[must_use]
    pub fn parse(name: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|p| name.strip_prefix(p.prefix()).map(|value| (p, value)))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Any inline style column of a [`StyleVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleName {
    /// Boolean element style.
    Tag(TagStyle),
    /// Valued CSS property style.
    Property(PropertyStyle),
}

impl StyleName {
    /// Columns compared when splitting tag runs.
    pub const TAGS: [Self; 7] = [
        Self::Tag(TagStyle::Bold),
        Self::Tag(TagStyle::Italic),
        Self::Tag(TagStyle::Underline),
        Self::Tag(TagStyle::Strikethrough),
        Self::Tag(TagStyle::Code),
        Self::Tag(TagStyle::Superscript),
        Self::Tag(TagStyle::Subscript),
    ];

    /// Columns compared when splitting property runs.
    pub const PROPERTIES: [Self; 4] = [
        Self::Property(PropertyStyle::Color),
        Self::Property(PropertyStyle::BgColor),
        Self::Property(PropertyStyle::FontSize),
        Self::Property(PropertyStyle::FontFamily),
    ];
}

/// Style state of a single character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveStyles<'a> {
    tags: [bool; 7],
    properties: [Option<&'a str>; 4],
}

impl<'a> ActiveStyles<'a> {
    /// Whether a tag style is set.
    #[must_use]
    pub fn has_tag(&self, style: TagStyle) -> bool {
        self.tags[style.index()]
    }

    /// Value of a property style, if set.
    #[must_use]
    pub fn property(&self, style: PropertyStyle) -> Option<&'a str> {
        self.properties[style.index()]
    }

    /// Active tag styles, outermost first.
    pub fn tags(&self) -> impl Iterator<Item = TagStyle> + '_ {
        TagStyle::ALL.into_iter().filter(|s| self.has_tag(*s))
    }

    /// Active property styles with non-empty values, in CSS order.
    pub fn properties(&self) -> impl Iterator<Item = (PropertyStyle, &'a str)> + '_ {
        PropertyStyle::ALL
            .into_iter()
            .filter_map(|p| self.property(p).map(|v| (p, v)))
            .filter(|(_, v)| !v.is_empty())
    }

    /// Whether any property style has a non-empty value.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.properties().next().is_some()
    }
}

/// Inline style state per char offset of one block.
///
/// Values borrow from the block's style range names.
#[derive(Clone, Debug)]
pub struct StyleVector<'a> {
    len: usize,
    tags: [Vec<bool>; 7],
    properties: [Vec<Option<&'a str>>; 4],
}

impl<'a> StyleVector<'a> {
    /// Expand inline style ranges over a text of `len` chars.
    ///
    /// Later ranges overwrite earlier ones where they overlap. Unknown style
    /// names are ignored; range ends past `len` are clamped.
    pub fn build<I>(len: usize, ranges: I) -> Self
    where
        I: IntoIterator<Item = &'a crate::model::InlineStyleRange>,
    {
        let mut vector = Self {
            len,
            tags: std::array::from_fn(|_| vec![false; len]),
            properties: std::array::from_fn(|_| vec![None; len]),
        };
        for range in ranges {
            let start = range.offset.min(len);
            let end = range.offset.saturating_add(range.length).min(len);
            if let Some((property, value)) = PropertyStyle::parse(&range.style) {
                vector.properties[property.index()][start..end].fill(Some(value));
            } else if let Some(tag) = TagStyle::from_name(&range.style) {
                vector.tags[tag.index()][start..end].fill(true);
            }
        }
        vector
    }

    /// Number of chars covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector covers no chars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Full style state at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not below [`len`](Self::len).
    #[must_use]
    pub fn at(&self, offset: usize) -> ActiveStyles<'a> {
        ActiveStyles {
            tags: std::array::from_fn(|i| self.tags[i][offset]),
            properties: std::array::from_fn(|i| self.properties[i][offset]),
        }
    }

    /// Whether every style in `names` has the same state at `offset` and
    /// `offset - 1`. Always false at offset 0 and past the end.
    #[must_use]
    pub fn same_as_previous(&self, names: &[StyleName], offset: usize) -> bool {
        if offset == 0 || offset >= self.len {
            return false;
        }
        names.iter().all(|name| match *name {
            StyleName::Tag(t) => {
                let column = &self.tags[t.index()];
                column[offset] == column[offset - 1]
            }
            StyleName::Property(p) => {
                let column = &self.properties[p.index()];
                column[offset] == column[offset - 1]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InlineStyleRange;

    fn style(offset: usize, length: usize, name: &str) -> InlineStyleRange {
        InlineStyleRange {
            offset,
            length,
            style: name.to_owned(),
        }
    }

    #[test]
    fn test_tag_lookup() {
        assert_eq!(TagStyle::from_name("BOLD"), Some(TagStyle::Bold));
        assert_eq!(TagStyle::from_name("SUBSCRIPT"), Some(TagStyle::Subscript));
        assert_eq!(TagStyle::from_name("bold"), None);
        assert_eq!(TagStyle::Strikethrough.tag(), "del");
    }

    #[test]
    fn test_property_parse() {
        assert_eq!(
            PropertyStyle::parse("color-rgb(1,2,3)"),
            Some((PropertyStyle::Color, "rgb(1,2,3)"))
        );
        assert_eq!(
            PropertyStyle::parse("bgcolor-red"),
            Some((PropertyStyle::BgColor, "red"))
        );
        assert_eq!(
            PropertyStyle::parse("fontfamily-Arial"),
            Some((PropertyStyle::FontFamily, "Arial"))
        );
        assert_eq!(PropertyStyle::parse("BOLD"), None);
    }

    #[test]
    fn test_build_sets_ranges() {
        let ranges = [style(0, 2, "BOLD"), style(1, 2, "color-red")];
        let vector = StyleVector::build(4, &ranges);

        let first = vector.at(0);
        assert!(first.has_tag(TagStyle::Bold));
        assert_eq!(first.property(PropertyStyle::Color), None);

        let second = vector.at(1);
        assert!(second.has_tag(TagStyle::Bold));
        assert_eq!(second.property(PropertyStyle::Color), Some("red"));

        let last = vector.at(3);
        assert_eq!(last, ActiveStyles::default());
    }

    #[test]
    fn test_later_range_wins() {
        let ranges = [style(0, 4, "color-red"), style(2, 2, "color-blue")];
        let vector = StyleVector::build(4, &ranges);
        assert_eq!(vector.at(1).property(PropertyStyle::Color), Some("red"));
        assert_eq!(vector.at(2).property(PropertyStyle::Color), Some("blue"));
    }

    #[test]
    fn test_unknown_and_out_of_range_ignored() {
        let ranges = [style(0, 2, "SPARKLE"), style(3, 10, "ITALIC"), style(9, 1, "BOLD")];
        let vector = StyleVector::build(4, &ranges);
        assert!(!vector.at(0).has_tag(TagStyle::Bold));
        assert!(vector.at(3).has_tag(TagStyle::Italic));
        assert_eq!(vector.len(), 4);
    }

    #[test]
    fn test_same_as_previous() {
        let ranges = [style(0, 2, "BOLD"), style(1, 2, "color-red")];
        let vector = StyleVector::build(3, &ranges);
        assert!(!vector.same_as_previous(&StyleName::TAGS, 0));
        assert!(vector.same_as_previous(&StyleName::TAGS, 1));
        assert!(!vector.same_as_previous(&StyleName::PROPERTIES, 1));
        assert!(vector.same_as_previous(&StyleName::PROPERTIES, 2));
        assert!(!vector.same_as_previous(&StyleName::TAGS, 2));
        assert!(!vector.same_as_previous(&StyleName::TAGS, 3));
    }

    #[test]
    fn test_active_styles_order() {
        let ranges = [
            style(0, 1, "SUBSCRIPT"),
            style(0, 1, "BOLD"),
            style(0, 1, "fontsize-12"),
            style(0, 1, "color-red"),
        ];
        let vector = StyleVector::build(1, &ranges);
        let active = vector.at(0);
        assert_eq!(
            active.tags().collect::<Vec<_>>(),
            vec![TagStyle::Bold, TagStyle::Subscript]
        );
        assert_eq!(
            active.properties().collect::<Vec<_>>(),
            vec![(PropertyStyle::Color, "red"), (PropertyStyle::FontSize, "12")]
        );
    }
}
