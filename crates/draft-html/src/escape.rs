//! Text escaping helpers.

/// Escape block text for HTML content.
///
/// Newlines become `<br>` followed by a newline; `&`, `<` and `>` become
/// entities. Everything else passes through.
///
/// # Examples
///
/// ```
/// use draft_html::escape_text;
///
/// assert_eq!(escape_text("a < b\nc"), "a &lt; b<br>\nc");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text.chars());
    out
}

/// Append escaped characters to `out`.
pub(crate) fn push_escaped(out: &mut String, chars: impl IntoIterator<Item = char>) {
    for ch in chars {
        match ch {
            '\n' => out.push_str("<br>\n"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a value placed inside a double-quoted attribute.
///
/// Only `"` is replaced, so URLs keep their `&` query separators.
pub(crate) fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Escape literal text placed inside a double-quoted attribute.
///
/// Same as [`escape_text`] for `&`, `<` and `>`, plus `"`. Newlines are kept.
pub(crate) fn escape_literal_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// True for strings with no visible content (empty or all whitespace).
///
/// # Examples
///
/// ```
/// use draft_html::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank(" \t\n"));
/// assert!(!is_blank(" a "));
/// ```
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Replace leading spaces with `&nbsp;`, one for one.
pub(crate) fn nbsp_leading(markup: &str) -> String {
    let rest = markup.trim_start_matches(' ');
    let count = markup.len() - rest.len();
    if count == 0 {
        return markup.to_owned();
    }
    let mut out = "&nbsp;".repeat(count);
    out.push_str(rest);
    out
}

/// Replace trailing spaces with `&nbsp;`, one for one.
pub(crate) fn nbsp_trailing(markup: &str) -> String {
    let rest = markup.trim_end_matches(' ');
    let count = markup.len() - rest.len();
    if count == 0 {
        return markup.to_owned();
    }
    let mut out = String::with_capacity(rest.len() + count * 6);
    out.push_str(rest);
    out.push_str(&"&nbsp;".repeat(count));
    out
}
