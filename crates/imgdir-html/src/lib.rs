//! HTML rendering host for image directives.
//!
//! Renders Markdown with `pulldown-cmark` into a [`Page`]: HTML fragments
//! interleaved with mutable [`HtmlImage`] elements. The page implements
//! [`imgdir_core::Region`], so the directive applier runs on it directly,
//! and [`Page::to_html`] serializes the result.
//!
//! # Example
//!
//! ```
//! use imgdir_html::PageRenderer;
//!
//! let markdown = r#"![Diagram|align=center](d.png "Figure 1|style=bold")"#;
//! let result = PageRenderer::new().render(markdown);
//!
//! let html = result.page.to_html();
//! assert!(html.contains(r#"alt="Diagram""#));
//! assert!(html.contains(r#"style="text-align: center; font-weight: bold">Figure 1</div>"#));
//! ```

mod image;
mod page;
mod renderer;
mod util;

pub use image::HtmlImage;
pub use page::Page;
pub use renderer::{PageRenderer, RenderResult};
pub use util::escape_html;
