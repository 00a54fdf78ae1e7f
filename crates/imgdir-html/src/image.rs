//! Rendered image element.

use std::fmt::Write;

use imgdir_core::{CaptionPosition, CaptionSpec, ImageElement};

use crate::util::escape_html;

/// An `<img>` element of a rendered page.
///
/// Attributes and style properties keep their insertion order so that the
/// serialized HTML is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlImage {
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    captions: Vec<CaptionSpec>,
}

impl HtmlImage {
    /// Create an image as the Markdown renderer produced it.
    ///
    /// An empty `title` produces no `title` attribute.
    #[must_use]
    pub fn new(src: &str, alt: &str, title: &str) -> Self {
        let mut image = Self::default();
        image.set_attribute("src", src);
        image.set_attribute("alt", alt);
        if !title.is_empty() {
            image.set_attribute("title", title);
        }
        image
    }

    /// Current value of a style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        lookup(&self.styles, property)
    }

    /// Captions attached to this image.
    #[must_use]
    pub fn captions(&self) -> &[CaptionSpec] {
        &self.captions
    }

    /// Serialize the image with its captions.
    pub(crate) fn write_html(&self, caption_class: &str, out: &mut String) {
        for caption in self.captions_at(CaptionPosition::Above) {
            write_caption(caption, caption_class, out);
        }

        out.push_str("<img");
        for (name, value) in &self.attributes {
            write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            write!(out, r#" style="{}""#, escape_html(&style)).unwrap();
        }
        out.push('>');

        for caption in self.captions_at(CaptionPosition::Below) {
            write_caption(caption, caption_class, out);
        }
    }

    fn captions_at(&self, position: CaptionPosition) -> impl Iterator<Item = &CaptionSpec> {
        self.captions.iter().filter(move |c| c.position == position)
    }
}

impl ImageElement for HtmlImage {
    fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        upsert(&mut self.attributes, name, value);
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.styles.retain(|(p, _)| p != property);
        } else {
            upsert(&mut self.styles, property, value);
        }
    }

    fn insert_caption(&mut self, caption: &CaptionSpec) {
        self.captions.push(caption.clone());
    }
}

fn write_caption(caption: &CaptionSpec, class: &str, out: &mut String) {
    let style = caption
        .styles()
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    write!(
        out,
        r#"<div class="{}" style="{style}">{}</div>"#,
        escape_html(class),
        escape_html(&caption.visible_text)
    )
    .unwrap();
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => value.clone_into(existing),
        None => pairs.push((key.to_owned(), value.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgdir_core::{Emphasis, TextAlign};
    use pretty_assertions::assert_eq;

    fn html(image: &HtmlImage) -> String {
        let mut out = String::new();
        image.write_html("imgdir-caption", &mut out);
        out
    }

    fn caption(text: &str, position: CaptionPosition) -> CaptionSpec {
        CaptionSpec {
            visible_text: text.to_owned(),
            position,
            text_align: TextAlign::Center,
            emphasis: Emphasis::Bold,
            suppressed: false,
        }
    }

    #[test]
    fn test_new_without_title() {
        let image = HtmlImage::new("a.png", "Alt", "");
        assert_eq!(image.attribute("title"), None);
        assert_eq!(html(&image), r#"<img src="a.png" alt="Alt">"#);
    }

    #[test]
    fn test_attributes_escaped() {
        let image = HtmlImage::new("a.png?x=1&y=2", r#"A "quoted" <alt>"#, "T");
        assert_eq!(
            html(&image),
            r#"<img src="a.png?x=1&amp;y=2" alt="A &quot;quoted&quot; &lt;alt&gt;" title="T">"#
        );
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut image = HtmlImage::new("a.png", "Alt|size=10", "T");
        image.set_attribute("alt", "Alt");
        assert_eq!(html(&image), r#"<img src="a.png" alt="Alt" title="T">"#);
    }

    #[test]
    fn test_styles_serialized_in_order() {
        let mut image = HtmlImage::new("a.png", "A", "");
        image.set_style("width", "80px");
        image.set_style("height", "auto");
        image.set_style("width", "90px");
        assert_eq!(image.style("width"), Some("90px"));
        assert_eq!(
            html(&image),
            r#"<img src="a.png" alt="A" style="width: 90px; height: auto">"#
        );
    }

    #[test]
    fn test_empty_style_value_removes_property() {
        let mut image = HtmlImage::new("a.png", "A", "");
        image.set_style("display", "block");
        image.set_style("display", "");
        assert_eq!(image.style("display"), None);
        assert_eq!(html(&image), r#"<img src="a.png" alt="A">"#);
    }

    #[test]
    fn test_captions_placed_by_position() {
        let mut image = HtmlImage::new("a.png", "A", "");
        image.insert_caption(&caption("Below", CaptionPosition::Below));
        image.insert_caption(&caption("Above", CaptionPosition::Above));
        assert_eq!(
            html(&image),
            concat!(
                r#"<div class="imgdir-caption" "#,
                r#"style="text-align: center; font-weight: bold">Above</div>"#,
                r#"<img src="a.png" alt="A">"#,
                r#"<div class="imgdir-caption" "#,
                r#"style="text-align: center; font-weight: bold">Below</div>"#,
            )
        );
    }

    #[test]
    fn test_caption_text_escaped() {
        let mut image = HtmlImage::new("a.png", "A", "");
        image.insert_caption(&caption("<b>x</b>", CaptionPosition::Below));
        assert!(html(&image).contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
