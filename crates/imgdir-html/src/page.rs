//! Rendered page: HTML fragments interleaved with image elements.

use imgdir_core::{ImageElement, Region};

use crate::image::HtmlImage;

/// Delimiter around image placeholders in the intermediate HTML.
///
/// NUL never survives Markdown rendering, so it cannot collide with content.
pub(crate) const PLACEHOLDER_DELIMITER: char = '\0';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Html(String),
    Image(usize),
}

/// A rendered page whose images can still be mutated.
///
/// `Page` is the [`Region`] handed to the directive applier. Call
/// [`to_html`](Self::to_html) once the pass is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    segments: Vec<Segment>,
    images: Vec<HtmlImage>,
    caption_class: String,
}

impl Page {
    /// Build a page from HTML containing `\0{index}\0` image placeholders.
    pub(crate) fn from_placeholders(
        html: &str,
        images: Vec<HtmlImage>,
        caption_class: &str,
    ) -> Self {
        let mut segments = Vec::new();

        // Even parts are HTML, odd parts are placeholder indexes.
        for (i, part) in html.split(PLACEHOLDER_DELIMITER).enumerate() {
            if i % 2 == 1
                && let Ok(index) = part.parse::<usize>()
                && index < images.len()
            {
                segments.push(Segment::Image(index));
            } else if !part.is_empty() {
                segments.push(Segment::Html(part.to_owned()));
            }
        }

        Self {
            segments,
            images,
            caption_class: caption_class.to_owned(),
        }
    }

    /// Images in document order.
    #[must_use]
    pub fn images(&self) -> &[HtmlImage] {
        &self.images
    }

    /// Serialize the page.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(
            self.segments
                .iter()
                .map(|s| match s {
                    Segment::Html(html) => html.len(),
                    Segment::Image(_) => 128,
                })
                .sum(),
        );

        for segment in &self.segments {
            match segment {
                Segment::Html(html) => out.push_str(html),
                Segment::Image(index) => {
                    self.images[*index].write_html(&self.caption_class, &mut out);
                }
            }
        }

        out
    }
}

impl Region for Page {
    fn images_mut(&mut self) -> Vec<&mut dyn ImageElement> {
        self.images
            .iter_mut()
            .map(|image| image as &mut dyn ImageElement)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_placeholders() {
        let images = vec![
            HtmlImage::new("a.png", "A", ""),
            HtmlImage::new("b.png", "B", ""),
        ];
        let page = Page::from_placeholders("<p>\01\0 and \00\0</p>\n", images, "cap");

        assert_eq!(
            page.to_html(),
            "<p><img src=\"b.png\" alt=\"B\"> and <img src=\"a.png\" alt=\"A\"></p>\n"
        );
    }

    #[test]
    fn test_page_without_images() {
        let page = Page::from_placeholders("<h1>Title</h1>\n", Vec::new(), "cap");
        assert!(page.images().is_empty());
        assert_eq!(page.to_html(), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_region_yields_all_images() {
        let images = vec![
            HtmlImage::new("a.png", "A", ""),
            HtmlImage::new("b.png", "B", ""),
        ];
        let mut page = Page::from_placeholders("\00\0\01\0", images, "cap");

        let elements = page.images_mut();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].attribute("src"), Some("b.png"));
    }
}
