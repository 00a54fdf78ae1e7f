//! Markdown to [`Page`] rendering.

use imgdir_core::{DEFAULT_CAPTION_CLASS, DirectiveApplier, PassReport, Region};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::image::HtmlImage;
use crate::page::{PLACEHOLDER_DELIMITER, Page};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered page, after the directive pass (if enabled).
    pub page: Page,
    /// Summary of the directive pass. Empty when the applier is disabled.
    pub report: PassReport,
}

/// Renders Markdown into a [`Page`] and fires the directive pass on it.
///
/// # Example
///
/// ```
/// use imgdir_html::PageRenderer;
///
/// let result = PageRenderer::new().render("![Chart|size=80](chart.png)");
///
/// assert_eq!(
///     result.page.to_html(),
///     "<p><img src=\"chart.png\" alt=\"Chart\" data-imgdir-processed=\"true\" \
///      style=\"width: 80px; height: auto\"></p>\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PageRenderer {
    applier: Option<DirectiveApplier>,
    gfm: bool,
    caption_class: String,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Create a renderer with GFM and the default applier enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            applier: Some(DirectiveApplier::default()),
            gfm: true,
            caption_class: DEFAULT_CAPTION_CLASS.to_owned(),
        }
    }

    /// Use a configured applier.
    #[must_use]
    pub fn with_applier(mut self, applier: DirectiveApplier) -> Self {
        self.applier = Some(applier);
        self
    }

    /// Render without a directive pass.
    ///
    /// The page keeps raw annotations; the caller may run an applier itself.
    #[must_use]
    pub fn without_applier(mut self) -> Self {
        self.applier = None;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Set the CSS class of caption elements.
    #[must_use]
    pub fn with_caption_class(mut self, class: impl Into<String>) -> Self {
        self.caption_class = class.into();
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown and run the directive pass.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        // Placeholders use NUL, so it must not reach the parser.
        let markdown = markdown.replace(PLACEHOLDER_DELIMITER, "\u{FFFD}");

        let mut extractor = ImageExtractor::new(Parser::new_ext(&markdown, self.parser_options()));
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, extractor.by_ref());

        let mut page = Page::from_placeholders(&output, extractor.images, &self.caption_class);
        tracing::debug!(images = page.images().len(), "Rendered page");

        let report = match &self.applier {
            Some(applier) => applier.on_render_complete(Some(&mut page as &mut dyn Region)),
            None => PassReport::default(),
        };

        RenderResult { page, report }
    }
}

/// Replaces image events with placeholders and collects the images.
struct ImageExtractor<I> {
    events: I,
    images: Vec<HtmlImage>,
}

impl<'a, I: Iterator<Item = Event<'a>>> ImageExtractor<I> {
    fn new(events: I) -> Self {
        Self {
            events,
            images: Vec::new(),
        }
    }

    /// Consume events up to the matching image end, returning the alt text.
    ///
    /// Nested images contribute their text to the outer alt.
    fn collect_alt(&mut self) -> String {
        let mut alt = String::new();
        let mut depth = 1usize;

        for event in self.events.by_ref() {
            match event {
                Event::Start(Tag::Image { .. }) => depth += 1,
                Event::End(TagEnd::Image) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                Event::SoftBreak | Event::HardBreak => alt.push(' '),
                _ => {}
            }
        }

        alt
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for ImageExtractor<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.events.next()? {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let alt = self.collect_alt();
                let index = self.images.len();
                self.images.push(HtmlImage::new(&dest_url, &alt, &title));
                let placeholder =
                    format!("{PLACEHOLDER_DELIMITER}{index}{PLACEHOLDER_DELIMITER}");
                Some(Event::InlineHtml(CowStr::from(placeholder)))
            }
            event => Some(event),
        }
    }
}
