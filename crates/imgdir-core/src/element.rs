//! Element handle abstraction.
//!
//! The applier never touches a concrete document tree. Hosts expose their
//! rendered images through [`ImageElement`] and the region that contains them
//! through [`Region`].

use crate::caption::CaptionSpec;

/// Attribute holding the label text (alt text).
pub const LABEL_ATTRIBUTE: &str = "alt";
/// Attribute holding the tooltip text.
pub const TOOLTIP_ATTRIBUTE: &str = "title";
/// Legacy presentation attributes removed whenever a size directive is present.
pub const LEGACY_DIMENSIONS: [&str; 2] = ["width", "height"];
/// Default namespace for private marker attributes.
pub const DEFAULT_MARKER_PREFIX: &str = "data-imgdir";

/// A rendered image the applier can inspect and mutate.
pub trait ImageElement {
    /// Current value of an attribute.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove an attribute. Removing a missing attribute is a no-op.
    fn remove_attribute(&mut self, name: &str);

    /// Set one inline style property.
    fn set_style(&mut self, property: &str, value: &str);

    /// Insert a caption element next to the image.
    ///
    /// [`CaptionSpec::position`] selects before or after the image.
    fn insert_caption(&mut self, caption: &CaptionSpec);
}

/// The rendered region scanned on every pass.
pub trait Region {
    /// Every image in the region, in document order.
    fn images_mut(&mut self) -> Vec<&mut dyn ImageElement>;
}

/// Names of the private per-element marker attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    align: String,
    caption: String,
    processed: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_MARKER_PREFIX)
    }
}

impl Markers {
    /// Build marker names under `prefix`, e.g. `data-imgdir-align`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            align: format!("{prefix}-align"),
            caption: format!("{prefix}-caption"),
            processed: format!("{prefix}-processed"),
        }
    }

    /// Recorded image alignment.
    #[must_use]
    pub fn align(&self) -> &str {
        &self.align
    }

    /// Set once a caption element has been inserted.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Set once the element has been fully processed.
    #[must_use]
    pub fn processed(&self) -> &str {
        &self.processed
    }
}
