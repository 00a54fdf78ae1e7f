//! Annotation tokenizer.
//!
//! Splits label or tooltip text on the reserved separator into base text and
//! recognized directives.

use crate::directive::{Directive, mentions_directive};

/// Default reserved separator.
pub const DEFAULT_SEPARATOR: char = '|';

/// How segments after the separator are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenizePolicy {
    /// Segment 0 is the base text, every later segment is a candidate
    /// directive. Unrecognized segments are dropped.
    Forward,
    /// Only the trailing run of recognized directives is consumed. The first
    /// unrecognized segment (scanning from the end) and everything before it
    /// stays in the base text, separators included.
    #[default]
    Trailing,
}

/// Result of tokenizing an annotation string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Text with directive segments removed.
    ///
    /// Identical to the input when no directive was recognized.
    pub base: String,
    /// Recognized directives in source order.
    pub directives: Vec<Directive>,
    /// Separator and directive keywords present, but nothing parsed.
    pub unparseable: bool,
}

impl Tokenized {
    fn unchanged(text: &str) -> Self {
        Self {
            base: text.to_owned(),
            ..Self::default()
        }
    }

    /// Whether any directive was recognized.
    #[must_use]
    pub fn has_directives(&self) -> bool {
        !self.directives.is_empty()
    }

    /// Value of the rightmost `size` directive.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.last(|d| match d {
            Directive::Size(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// Value of the rightmost `align` directive.
    #[must_use]
    pub fn align(&self) -> Option<&str> {
        self.last(|d| match d {
            Directive::Align(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// Value of the rightmost `pos`/`position` directive.
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.last(|d| match d {
            Directive::Position(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// Value of the rightmost `style` directive.
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.last(|d| match d {
            Directive::Style(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// Whether a suppression keyword appeared among the directives.
    #[must_use]
    pub fn suppressed(&self) -> bool {
        self.directives.contains(&Directive::Suppress)
    }

    fn last<'a>(&'a self, pick: impl Fn(&'a Directive) -> Option<&'a str>) -> Option<&'a str> {
        self.directives.iter().rev().find_map(pick)
    }
}

/// Annotation tokenizer.
///
/// # Example
///
/// ```
/// use imgdir_core::{TokenizePolicy, Tokenizer};
///
/// let tokenizer = Tokenizer::new(TokenizePolicy::Trailing, '|');
/// let tokens = tokenizer.tokenize("Input | Output | size=80");
/// assert_eq!(tokens.base, "Input | Output");
/// assert_eq!(tokens.size(), Some("80"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    policy: TokenizePolicy,
    separator: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizePolicy::default(), DEFAULT_SEPARATOR)
    }
}

impl Tokenizer {
    /// Create a tokenizer with the given policy and separator.
    #[must_use]
    pub fn new(policy: TokenizePolicy, separator: char) -> Self {
        Self { policy, separator }
    }

    /// Tokenizing policy in use.
    #[must_use]
    pub fn policy(&self) -> TokenizePolicy {
        self.policy
    }

    /// Split `text` into base text and directives.
    ///
    /// Without a separator the text is returned unchanged with no directives.
    /// When directives are found the base text is trimmed.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Tokenized {
        if !text.contains(self.separator) {
            return Tokenized::unchanged(text);
        }

        let segments: Vec<&str> = text.split(self.separator).collect();
        let (base, directives) = match self.policy {
            TokenizePolicy::Forward => split_forward(&segments),
            TokenizePolicy::Trailing => self.split_trailing(&segments),
        };

        if directives.is_empty() {
            return Tokenized {
                unparseable: mentions_directive(text),
                ..Tokenized::unchanged(text)
            };
        }

        Tokenized {
            base: base.trim().to_owned(),
            directives,
            unparseable: false,
        }
    }

    fn split_trailing(&self, segments: &[&str]) -> (String, Vec<Directive>) {
        let mut directives = Vec::new();
        let mut end = segments.len();

        // Segment 0 always belongs to the base text.
        while end > 1 {
            match Directive::parse(segments[end - 1]) {
                Some(directive) => {
                    directives.push(directive);
                    end -= 1;
                }
                None => break,
            }
        }
        directives.reverse();

        let mut buf = [0u8; 4];
        let separator: &str = self.separator.encode_utf8(&mut buf);
        (segments[..end].join(separator), directives)
    }
}

fn split_forward(segments: &[&str]) -> (String, Vec<Directive>) {
    let directives = segments[1..]
        .iter()
        .filter_map(|segment| Directive::parse(segment))
        .collect();
    (segments[0].to_owned(), directives)
}
