//! Directive tokens recognized inside annotation segments.
//!
//! A directive is either a `key=value` pair (`size=80x40`, `align=center`,
//! `pos=above`, `style=bold`) or a bare caption suppression keyword
//! (`notitle`).

/// Bare keywords that suppress the visible caption.
pub const SUPPRESS_KEYWORDS: [&str; 4] = ["notitle", "no-title", "nocaption", "no_caption"];

/// Substrings that make a segment look like an attempted directive.
///
/// Directive keys plus the emphasis values of `style=`.
const DIRECTIVE_HINTS: [&str; 7] = [
    "size", "align", "pos", "style", "bold", "italic", "underline",
];

/// A single recognized directive token.
///
/// Values are trimmed but otherwise kept verbatim; interpreting them is the
/// job of the individual resolvers.
///
/// # Example
///
/// ```
/// use imgdir_core::Directive;
///
/// assert_eq!(Directive::parse(" SIZE = 80x40 "), Some(Directive::Size("80x40".to_owned())));
/// assert_eq!(Directive::parse("no-title"), Some(Directive::Suppress));
/// assert_eq!(Directive::parse("sizeXX=80"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `size=VALUE`
    Size(String),
    /// `align=VALUE`
    Align(String),
    /// `pos=VALUE` or `position=VALUE`
    Position(String),
    /// `style=VALUE`
    Style(String),
    /// One of [`SUPPRESS_KEYWORDS`].
    Suppress,
}

impl Directive {
    /// Parse one separator-delimited segment.
    ///
    /// Returns `None` if the segment is not a recognized directive.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        let segment = segment.trim();

        if is_suppress_keyword(segment) {
            return Some(Self::Suppress);
        }

        let (key, value) = segment.split_once('=')?;
        let value = value.trim().to_owned();

        match key.trim().to_ascii_lowercase().as_str() {
            "size" => Some(Self::Size(value)),
            "align" => Some(Self::Align(value)),
            "pos" | "position" => Some(Self::Position(value)),
            "style" => Some(Self::Style(value)),
            _ => None,
        }
    }

    /// Canonical key name, used in log output.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Size(_) => "size",
            Self::Align(_) => "align",
            Self::Position(_) => "pos",
            Self::Style(_) => "style",
            Self::Suppress => "notitle",
        }
    }
}

/// Check whether `text` is exactly one of the suppression keywords (case-insensitive).
#[must_use]
pub fn is_suppress_keyword(text: &str) -> bool {
    SUPPRESS_KEYWORDS
        .iter()
        .any(|keyword| text.eq_ignore_ascii_case(keyword))
}

/// Check whether `text` mentions any directive keyword.
pub(crate) fn mentions_directive(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    DIRECTIVE_HINTS.iter().any(|hint| lower.contains(hint))
}
