//! Shared utility functions for HTML output.

use std::borrow::Cow;

/// Escape text for use in HTML content and double-quoted attribute values.
///
/// # Examples
///
/// ```
/// use imgdir_html::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<a href="x">Tom & Jerry</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
/// );
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
