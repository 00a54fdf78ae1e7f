//! In-memory elements for testing.
//!
//! Provides [`MockImage`] and [`MockRegion`] for exercising the applier
//! without a rendering host.

use std::collections::BTreeMap;

use crate::caption::CaptionSpec;
use crate::element::{ImageElement, Region};

/// Image element backed by plain maps.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "mock")]
/// # {
/// use imgdir_core::{DirectiveApplier, ImageElement, MockImage};
///
/// let mut image = MockImage::new()
///     .with_attribute("alt", "Chart|size=80x40")
///     .with_attribute("width", "600");
///
/// DirectiveApplier::default().apply(&mut image);
///
/// assert_eq!(image.attribute("alt"), Some("Chart"));
/// assert_eq!(image.attribute("width"), None);
/// assert_eq!(image.style("width"), Some("80px"));
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockImage {
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    captions: Vec<CaptionSpec>,
}

impl MockImage {
    /// Create an image with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Add an inline style property.
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_owned(), value.to_owned());
        self
    }

    /// Current value of a style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Captions inserted so far.
    #[must_use]
    pub fn captions(&self) -> &[CaptionSpec] {
        &self.captions
    }
}

impl ImageElement for MockImage {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(property);
        } else {
            self.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn insert_caption(&mut self, caption: &CaptionSpec) {
        self.captions.push(caption.clone());
    }
}

/// Region holding a list of [`MockImage`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockRegion {
    pub images: Vec<MockImage>,
}

impl MockRegion {
    /// Create a region from images.
    #[must_use]
    pub fn new(images: Vec<MockImage>) -> Self {
        Self { images }
    }
}

impl Region for MockRegion {
    fn images_mut(&mut self) -> Vec<&mut dyn ImageElement> {
        self.images
            .iter_mut()
            .map(|image| image as &mut dyn ImageElement)
            .collect()
    }
}
