//! Alignment resolution.

use crate::caption::TextAlign;

/// Layout policy for an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    /// No alignment directive, or an unrecognized value. Never changes layout.
    #[default]
    Unspecified,
}

impl Alignment {
    /// Resolve an `align` directive value.
    ///
    /// `middle` is an alias for `center`. Absent or unrecognized values
    /// resolve to [`Alignment::Unspecified`].
    ///
    /// # Example
    ///
    /// ```
    /// use imgdir_core::Alignment;
    ///
    /// assert_eq!(Alignment::resolve(Some("Middle")), Alignment::Center);
    /// assert_eq!(Alignment::resolve(Some("justify")), Alignment::Unspecified);
    /// assert_eq!(Alignment::resolve(None), Alignment::Unspecified);
    /// ```
    #[must_use]
    pub fn resolve(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::Unspecified;
        };
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "center" | "middle" => Self::Center,
            "right" => Self::Right,
            _ => Self::Unspecified,
        }
    }

    /// Value recorded in the element's alignment marker.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Unspecified => "unspecified",
        }
    }

    /// Whether this alignment changes layout.
    #[must_use]
    pub fn is_specified(self) -> bool {
        self != Self::Unspecified
    }

    /// Block display and margins for this alignment.
    ///
    /// `None` for [`Alignment::Unspecified`]: the host's display mode stays.
    #[must_use]
    pub fn styles(self) -> Option<[(&'static str, &'static str); 3]> {
        let (left, right) = match self {
            Self::Left => ("0", "auto"),
            Self::Center => ("auto", "auto"),
            Self::Right => ("auto", "0"),
            Self::Unspecified => return None,
        };
        Some([
            ("display", "block"),
            ("margin-left", left),
            ("margin-right", right),
        ])
    }

    /// Caption text alignment that follows this image alignment.
    #[must_use]
    pub fn caption_align(self) -> Option<TextAlign> {
        match self {
            Self::Left => Some(TextAlign::Left),
            Self::Center => Some(TextAlign::Center),
            Self::Right => Some(TextAlign::Right),
            Self::Unspecified => None,
        }
    }
}
