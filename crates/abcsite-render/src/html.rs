//! HTML escaping and body fragments.
//!
//! [`Fragment`] is the only way page content enters a document. Markup
//! fragments keep their inline HTML but cannot open or close the document
//! itself: `<html>`, `<head>`, `<body>` and `<!DOCTYPE>` tags are neutralized
//! so the layout's structure survives any body content.

use std::borrow::Cow;

/// Tags that belong to the layout, never to page content.
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a value for a quoted JavaScript string literal inside `<script>`.
///
/// Angle brackets and `&` become `\u` escapes so the value can't close the
/// script element.
pub(crate) fn escape_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '<' => result.push_str("\\u003C"),
            '>' => result.push_str("\\u003E"),
            '&' => result.push_str("\\u0026"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            _ => result.push(c),
        }
    }
    result
}

/// A piece of page body content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Inline markup. Document-structural tags are escaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use abcsite_render::Fragment;
    ///
    /// let fragment = Fragment::markup("<p>ok</p></html>");
    /// assert_eq!(fragment.as_str(), "<p>ok</p>&lt;/html>");
    /// ```
    #[must_use]
    pub fn markup(html: impl Into<String>) -> Self {
        let html = html.into();
        match neutralize_structure(&html) {
            Cow::Borrowed(_) => Self(html),
            Cow::Owned(fixed) => Self(fixed),
        }
    }

    /// The fragment's HTML.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Escape the `<` of every structural tag in `markup`.
pub(crate) fn neutralize_structure(markup: &str) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    let mut copied = 0;

    for (i, _) in markup.match_indices('<') {
        if is_structural_tag(&markup[i + 1..]) {
            let buf = out.get_or_insert_with(|| String::with_capacity(markup.len() + 8));
            buf.push_str(&markup[copied..i]);
            buf.push_str("&lt;");
            copied = i + 1;
        }
    }

    match out {
        None => Cow::Borrowed(markup),
        Some(mut buf) => {
            buf.push_str(&markup[copied..]);
            Cow::Owned(buf)
        }
    }
}

/// Check whether the text following a `<` opens or closes a structural tag.
fn is_structural_tag(rest: &str) -> bool {
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if starts_with_ignore_case(rest, "!doctype") {
        return true;
    }
    STRUCTURAL_TAGS.iter().any(|tag| {
        starts_with_ignore_case(rest, tag)
            && rest[tag.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '-')
    })
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
