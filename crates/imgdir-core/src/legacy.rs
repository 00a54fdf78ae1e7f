//! Legacy `:size=`/`:align=` tokens embedded in tooltip text.
//!
//! Older documents put layout tokens into the title:
//!
//! ```text
//! ![Chart](chart.png "Quarterly numbers :size=300x100 :align=center")
//! ```
//!
//! Each token runs up to the next whitespace. Tokens are removed from the
//! tooltip wherever they appear.

use std::sync::LazyLock;

use regex::Regex;

static SIZE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":size=(\S+)").unwrap());
static ALIGN_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":align=(\S+)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Layout tokens extracted from a tooltip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyTitle {
    /// First `:size=` value.
    pub size: Option<String>,
    /// First `:align=` value.
    pub align: Option<String>,
    /// Tooltip with every token removed and whitespace collapsed.
    pub cleaned: String,
}

impl LegacyTitle {
    /// Extract legacy tokens from `title`.
    ///
    /// Returns `None` if the title carries neither token.
    ///
    /// # Example
    ///
    /// ```
    /// use imgdir_core::LegacyTitle;
    ///
    /// let legacy = LegacyTitle::extract("Quarterly  numbers :size=300x100 :align=center");
    /// let legacy = legacy.unwrap();
    /// assert_eq!(legacy.size.as_deref(), Some("300x100"));
    /// assert_eq!(legacy.align.as_deref(), Some("center"));
    /// assert_eq!(legacy.cleaned, "Quarterly numbers");
    /// ```
    #[must_use]
    pub fn extract(title: &str) -> Option<Self> {
        let size = first_capture(&SIZE_TOKEN_RE, title);
        let align = first_capture(&ALIGN_TOKEN_RE, title);
        if size.is_none() && align.is_none() {
            return None;
        }

        let stripped = SIZE_TOKEN_RE.replace_all(title, "");
        let stripped = ALIGN_TOKEN_RE.replace_all(&stripped, "");
        let cleaned = WHITESPACE_RE.replace_all(&stripped, " ").trim().to_owned();

        Some(Self {
            size,
            align,
            cleaned,
        })
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| caps[1].to_owned())
}
