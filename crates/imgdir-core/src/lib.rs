//! Directive parser and style applier for rendered Markdown images.
//!
//! Images carry compact directives in their label (alt) and tooltip (title)
//! text:
//!
//! ```text
//! ![Kafka Diagram|size=50%|align=center](img.png "Figure 1|pos=above|style=bold")
//! ```
//!
//! # Architecture
//!
//! Parsing is pure and independent of any document tree:
//! - [`Tokenizer`]: splits annotation text into base text and [`Directive`]s
//! - [`SizeSpec`]: resolves `size=` values to width/height
//! - [`Alignment`]: resolves `align=` values to a layout policy
//! - [`CaptionResolver`]: resolves tooltip directives to a [`CaptionSpec`]
//!
//! [`DirectiveApplier`] drives the resolvers against host elements exposed
//! through the [`ImageElement`] and [`Region`] traits. The host calls
//! [`DirectiveApplier::on_render_complete`] once per rendered page; private
//! marker attributes make repeated passes no-ops.
//!
//! # Example
//!
//! ```
//! use imgdir_core::{Alignment, SizeSpec, Tokenizer};
//!
//! let tokens = Tokenizer::default().tokenize("Kafka Diagram|size=50%|align=center");
//! assert_eq!(tokens.base, "Kafka Diagram");
//!
//! let size = SizeSpec::resolve(tokens.size().unwrap()).unwrap();
//! assert_eq!(size.width.to_string(), "50%");
//! assert_eq!(Alignment::resolve(tokens.align()), Alignment::Center);
//! ```

mod align;
mod applier;
mod caption;
mod diagnostic;
mod directive;
mod element;
mod legacy;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod size;
mod tokenizer;

pub use align::Alignment;
pub use applier::{ApplierConfig, DirectiveApplier, PassReport};
pub use caption::{
    CaptionOutcome, CaptionPosition, CaptionResolver, CaptionSpec, DEFAULT_CAPTION_CLASS,
    Emphasis, TextAlign,
};
pub use diagnostic::{AnnotationField, Diagnostic};
pub use directive::{Directive, SUPPRESS_KEYWORDS, is_suppress_keyword};
pub use element::{
    DEFAULT_MARKER_PREFIX, ImageElement, LABEL_ATTRIBUTE, LEGACY_DIMENSIONS, Markers, Region,
    TOOLTIP_ATTRIBUTE,
};
pub use legacy::LegacyTitle;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockImage, MockRegion};
pub use size::{Dimension, SizeSpec};
pub use tokenizer::{DEFAULT_SEPARATOR, TokenizePolicy, Tokenized, Tokenizer};
