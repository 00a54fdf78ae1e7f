//! Caption resolution from tooltip text.
//!
//! Tooltip grammar:
//! `CAPTION_TEXT[|pos=above|below][|style=normal|italic|bold|underline][|notitle]`

use crate::align::Alignment;
use crate::directive::is_suppress_keyword;
use crate::tokenizer::Tokenizer;

/// Default CSS class of rendered caption elements.
pub const DEFAULT_CAPTION_CLASS: &str = "imgdir-caption";

/// Where the caption is placed relative to the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptionPosition {
    Above,
    #[default]
    Below,
}

impl CaptionPosition {
    /// Parse a `pos` value. Unrecognized values fall back to [`CaptionPosition::Below`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("above" | "top") => Self::Above,
            _ => Self::Below,
        }
    }
}

/// Horizontal alignment of caption text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Caption text emphasis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    #[default]
    Italic,
    Bold,
    Underline,
}

impl Emphasis {
    /// Parse a `style` value. `underlined` normalizes to [`Emphasis::Underline`];
    /// unrecognized values fall back to [`Emphasis::Italic`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("normal") => Self::Normal,
            Some("bold") => Self::Bold,
            Some("underline" | "underlined") => Self::Underline,
            _ => Self::Italic,
        }
    }

    /// CSS property and value expressing this emphasis.
    #[must_use]
    pub fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Normal => ("font-style", "normal"),
            Self::Italic => ("font-style", "italic"),
            Self::Bold => ("font-weight", "bold"),
            Self::Underline => ("text-decoration", "underline"),
        }
    }
}

/// Resolved caption settings for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSpec {
    /// Tooltip text with directive segments stripped.
    pub visible_text: String,
    pub position: CaptionPosition,
    pub text_align: TextAlign,
    pub emphasis: Emphasis,
    /// Keep the tooltip but render no caption element.
    pub suppressed: bool,
}

impl CaptionSpec {
    /// Whether a visible caption element should be created.
    #[must_use]
    pub fn shows_caption(&self) -> bool {
        !self.suppressed && !self.visible_text.is_empty()
    }

    /// Style properties for the caption element.
    #[must_use]
    pub fn styles(&self) -> [(&'static str, &'static str); 2] {
        [("text-align", self.text_align.as_str()), self.emphasis.style()]
    }
}

/// What to do with an image's tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionOutcome {
    /// Leave the tooltip alone.
    Untouched {
        /// Directive keywords were present but nothing could be parsed.
        unparseable: bool,
    },
    /// Remove the tooltip entirely; no caption.
    Cleared,
    /// Apply the resolved caption.
    Caption(CaptionSpec),
}

/// Resolves tooltip text into a [`CaptionOutcome`].
#[derive(Debug, Clone)]
pub struct CaptionResolver {
    tokenizer: Tokenizer,
    default_align: TextAlign,
    from_plain_titles: bool,
}

impl CaptionResolver {
    /// Create a resolver.
    ///
    /// `default_align` applies when the image has no alignment of its own.
    #[must_use]
    pub fn new(tokenizer: Tokenizer, default_align: TextAlign) -> Self {
        Self {
            tokenizer,
            default_align,
            from_plain_titles: false,
        }
    }

    /// Render tooltips without any directive as captions too.
    #[must_use]
    pub fn with_plain_titles(mut self, enabled: bool) -> Self {
        self.from_plain_titles = enabled;
        self
    }

    /// Resolve the tooltip of an image aligned with `image_align`.
    ///
    /// # Example
    ///
    /// ```
    /// use imgdir_core::{
    ///     Alignment, CaptionOutcome, CaptionPosition, CaptionResolver, Emphasis, TextAlign,
    ///     Tokenizer,
    /// };
    ///
    /// let resolver = CaptionResolver::new(Tokenizer::default(), TextAlign::Left);
    /// let CaptionOutcome::Caption(spec) =
    ///     resolver.resolve(Some("Figure 1|pos=above|style=bold"), Alignment::Center)
    /// else {
    ///     panic!("expected a caption");
    /// };
    /// assert_eq!(spec.visible_text, "Figure 1");
    /// assert_eq!(spec.position, CaptionPosition::Above);
    /// assert_eq!(spec.emphasis, Emphasis::Bold);
    /// assert_eq!(spec.text_align, TextAlign::Center);
    /// ```
    #[must_use]
    pub fn resolve(&self, tooltip: Option<&str>, image_align: Alignment) -> CaptionOutcome {
        let Some(tooltip) = tooltip.filter(|t| !t.trim().is_empty()) else {
            return CaptionOutcome::Untouched { unparseable: false };
        };

        if is_suppress_keyword(tooltip.trim()) {
            return CaptionOutcome::Cleared;
        }

        let text_align = image_align.caption_align().unwrap_or(self.default_align);
        let tokens = self.tokenizer.tokenize(tooltip);

        if !tokens.has_directives() {
            if tokens.unparseable || !self.from_plain_titles {
                return CaptionOutcome::Untouched {
                    unparseable: tokens.unparseable,
                };
            }
            return CaptionOutcome::Caption(CaptionSpec {
                visible_text: tooltip.trim().to_owned(),
                position: CaptionPosition::default(),
                text_align,
                emphasis: Emphasis::default(),
                suppressed: false,
            });
        }

        CaptionOutcome::Caption(CaptionSpec {
            position: CaptionPosition::parse(tokens.position()),
            emphasis: Emphasis::parse(tokens.style()),
            suppressed: tokens.suppressed(),
            text_align,
            visible_text: tokens.base,
        })
    }
}
