//! Size resolution.
//!
//! Supported `size` values:
//!
//! | value    | width   | height |
//! |----------|---------|--------|
//! | `50%`    | `50%`   | `auto` |
//! | `300`    | `300px` | `auto` |
//! | `300px`  | `300px` | `auto` |
//! | `300x100`| `300px` | `100px`|
//! | `300x`   | `300px` | `auto` |
//! | `x100`   | `auto`  | `100px`|
//! | `auto`   | `auto`  | `auto` |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)%$").unwrap());

static PIXELS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// One resolved dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Pixel count, rendered as `Npx`.
    Px(u32),
    /// Percentage of the container, rendered as `N%`.
    Percent(f64),
    /// Natural size.
    Auto,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// Resolved width/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    pub width: Dimension,
    pub height: Dimension,
}

impl SizeSpec {
    /// Resolve a `size` directive value.
    ///
    /// Returns `None` when the value matches no supported form, meaning no
    /// size styles should be applied.
    ///
    /// # Example
    ///
    /// ```
    /// use imgdir_core::{Dimension, SizeSpec};
    ///
    /// let size = SizeSpec::resolve("x40").unwrap();
    /// assert_eq!(size.width, Dimension::Auto);
    /// assert_eq!(size.height, Dimension::Px(40));
    /// assert!(SizeSpec::resolve("huge").is_none());
    /// ```
    #[must_use]
    pub fn resolve(token: &str) -> Option<Self> {
        let token = token.trim();

        if token.contains('%') {
            let caps = PERCENT_RE.captures(token)?;
            let pct = caps[1].parse::<f64>().ok()?;
            return Some(Self::width_only(Dimension::Percent(pct)));
        }

        if let Some(px) = parse_pixels(token) {
            return Some(Self::width_only(Dimension::Px(px)));
        }

        if token.eq_ignore_ascii_case("auto") {
            return Some(Self {
                width: Dimension::Auto,
                height: Dimension::Auto,
            });
        }

        let (raw_width, raw_height) = token.split_once(['x', 'X'])?;
        match (parse_side(raw_width), parse_side(raw_height)) {
            (None, None) => None,
            (width, height) => Some(Self {
                width: width.unwrap_or(Dimension::Auto),
                height: height.unwrap_or(Dimension::Auto),
            }),
        }
    }

    fn width_only(width: Dimension) -> Self {
        Self {
            width,
            height: Dimension::Auto,
        }
    }

    /// Style properties to set on the image, in application order.
    #[must_use]
    pub fn styles(&self) -> [(&'static str, String); 2] {
        [
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
        ]
    }
}

/// Parse `N` or `Npx` into a pixel count.
fn parse_pixels(raw: &str) -> Option<u32> {
    let digits = strip_px(raw.trim());
    if PIXELS_RE.is_match(digits) {
        digits.parse().ok()
    } else {
        None
    }
}

fn strip_px(raw: &str) -> &str {
    let split = raw.len().saturating_sub(2);
    match raw.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case("px") => &raw[..split],
        _ => raw,
    }
}

/// Parse one side of `WxH`. Empty or invalid sides yield `None`.
fn parse_side(raw: &str) -> Option<Dimension> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("auto") {
        Some(Dimension::Auto)
    } else {
        parse_pixels(raw).map(Dimension::Px)
    }
}
