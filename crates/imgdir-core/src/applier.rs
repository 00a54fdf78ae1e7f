//! Directive applier.
//!
//! Runs the resolvers for each image in a region and mutates the element's
//! presentation exactly once.

use crate::align::Alignment;
use crate::caption::{CaptionOutcome, CaptionResolver, CaptionSpec, TextAlign};
use crate::diagnostic::{AnnotationField, Diagnostic};
use crate::element::{
    DEFAULT_MARKER_PREFIX, ImageElement, LABEL_ATTRIBUTE, LEGACY_DIMENSIONS, Markers, Region,
    TOOLTIP_ATTRIBUTE,
};
use crate::legacy::LegacyTitle;
use crate::size::SizeSpec;
use crate::tokenizer::{DEFAULT_SEPARATOR, TokenizePolicy, Tokenizer};

/// Configuration for the directive applier.
#[derive(Debug, Clone)]
pub struct ApplierConfig {
    /// How segments after the separator are interpreted.
    ///
    /// Default: [`TokenizePolicy::Trailing`]
    pub policy: TokenizePolicy,
    /// Reserved separator between text and directives.
    ///
    /// Default: `|`
    pub separator: char,
    /// Caption text alignment for images without an alignment directive.
    ///
    /// Default: [`TextAlign::Left`]
    pub caption_align: TextAlign,
    /// Render tooltips without directives as captions.
    ///
    /// Default: `false`
    pub captions_from_plain_titles: bool,
    /// Namespace for private marker attributes.
    ///
    /// Default: `data-imgdir`
    pub marker_prefix: String,
    /// Also read `:size=`/`:align=` tokens from the tooltip.
    ///
    /// Default: `false`
    pub legacy_title_syntax: bool,
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplierConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: TokenizePolicy::default(),
            separator: DEFAULT_SEPARATOR,
            caption_align: TextAlign::default(),
            captions_from_plain_titles: false,
            marker_prefix: DEFAULT_MARKER_PREFIX.to_owned(),
            legacy_title_syntax: false,
        }
    }

    /// Set the tokenizing policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TokenizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the reserved separator.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the fallback caption alignment.
    #[must_use]
    pub fn with_caption_align(mut self, align: TextAlign) -> Self {
        self.caption_align = align;
        self
    }

    /// Enable or disable captions for tooltips without directives.
    #[must_use]
    pub fn with_plain_title_captions(mut self, enabled: bool) -> Self {
        self.captions_from_plain_titles = enabled;
        self
    }

    /// Set the marker attribute namespace.
    #[must_use]
    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    /// Enable or disable `:size=`/`:align=` tokens in tooltips.
    #[must_use]
    pub fn with_legacy_title_syntax(mut self, enabled: bool) -> Self {
        self.legacy_title_syntax = enabled;
        self
    }
}

/// Summary of one directive pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Elements processed during this pass.
    pub processed: usize,
    /// Elements skipped because an earlier pass already processed them.
    pub skipped: usize,
    /// Diagnostics emitted for unparseable annotations.
    pub diagnostics: Vec<Diagnostic>,
}

impl PassReport {
    fn merge(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Applies image directives to rendered elements.
///
/// The host calls [`on_render_complete`](Self::on_render_complete) once per
/// rendered page. Elements carry a processed marker afterwards, so repeated
/// passes over the same region are no-ops.
///
/// # Example
///
/// ```
/// use imgdir_core::{ApplierConfig, DirectiveApplier, TokenizePolicy};
///
/// let config = ApplierConfig::new().with_policy(TokenizePolicy::Forward);
/// let applier = DirectiveApplier::new(&config);
///
/// // No region rendered: an empty pass.
/// let report = applier.on_render_complete(None);
/// assert_eq!(report.processed, 0);
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveApplier {
    tokenizer: Tokenizer,
    captions: CaptionResolver,
    markers: Markers,
    legacy_title_syntax: bool,
}

impl Default for DirectiveApplier {
    fn default() -> Self {
        Self::new(&ApplierConfig::default())
    }
}

impl DirectiveApplier {
    /// Create an applier from configuration.
    #[must_use]
    pub fn new(config: &ApplierConfig) -> Self {
        let tokenizer = Tokenizer::new(config.policy, config.separator);
        Self {
            tokenizer,
            captions: CaptionResolver::new(tokenizer, config.caption_align)
                .with_plain_titles(config.captions_from_plain_titles),
            markers: Markers::with_prefix(&config.marker_prefix),
            legacy_title_syntax: config.legacy_title_syntax,
        }
    }

    /// Marker attribute names used by this applier.
    #[must_use]
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Process every image in a freshly rendered region.
    ///
    /// A missing region is an empty pass.
    pub fn on_render_complete(&self, region: Option<&mut dyn Region>) -> PassReport {
        let Some(region) = region else {
            tracing::debug!("No region rendered, skipping directive pass");
            return PassReport::default();
        };

        let mut report = PassReport::default();
        for image in region.images_mut() {
            report.merge(self.apply(image));
        }

        tracing::debug!(
            processed = report.processed,
            skipped = report.skipped,
            diagnostics = report.diagnostics.len(),
            "Directive pass completed"
        );
        report
    }

    /// Process a single image.
    pub fn apply(&self, element: &mut dyn ImageElement) -> PassReport {
        let mut report = PassReport::default();

        if element.attribute(self.markers.processed()).is_some() {
            tracing::debug!("Image already processed, skipping");
            report.skipped = 1;
            return report;
        }

        let legacy_alignment = if self.legacy_title_syntax {
            apply_legacy_title(element)
        } else {
            Alignment::Unspecified
        };

        // Label directives take precedence over legacy tooltip tokens.
        let alignment = match self.apply_label(element, &mut report) {
            Alignment::Unspecified => legacy_alignment,
            alignment => alignment,
        };
        self.record_alignment(element, alignment);
        self.apply_tooltip(element, &mut report);

        element.set_attribute(self.markers.processed(), "true");
        report.processed = 1;
        report
    }

    /// Resolve and apply label directives. Returns the resolved alignment.
    fn apply_label(&self, element: &mut dyn ImageElement, report: &mut PassReport) -> Alignment {
        let Some(label) = element.attribute(LABEL_ATTRIBUTE).map(str::to_owned) else {
            return Alignment::Unspecified;
        };

        let tokens = self.tokenizer.tokenize(&label);
        if tokens.unparseable {
            report_unparseable(report, AnnotationField::Label, label);
            return Alignment::Unspecified;
        }
        if !tokens.has_directives() {
            return Alignment::Unspecified;
        }

        element.set_attribute(LABEL_ATTRIBUTE, &tokens.base);

        if let Some(token) = tokens.size() {
            apply_size(element, token);
        }

        apply_alignment(element, tokens.align())
    }

    fn record_alignment(&self, element: &mut dyn ImageElement, alignment: Alignment) {
        if alignment.is_specified() {
            element.set_attribute(self.markers.align(), alignment.as_str());
        } else {
            element.remove_attribute(self.markers.align());
        }
    }

    fn apply_tooltip(&self, element: &mut dyn ImageElement, report: &mut PassReport) {
        let tooltip = element.attribute(TOOLTIP_ATTRIBUTE).map(str::to_owned);
        let image_align = Alignment::resolve(element.attribute(self.markers.align()));

        match self.captions.resolve(tooltip.as_deref(), image_align) {
            CaptionOutcome::Untouched { unparseable } => {
                if unparseable && let Some(text) = tooltip {
                    report_unparseable(report, AnnotationField::Tooltip, text);
                }
            }
            CaptionOutcome::Cleared => element.remove_attribute(TOOLTIP_ATTRIBUTE),
            CaptionOutcome::Caption(spec) => self.apply_caption(element, &spec),
        }
    }

    fn apply_caption(&self, element: &mut dyn ImageElement, spec: &CaptionSpec) {
        if spec.visible_text.is_empty() {
            element.remove_attribute(TOOLTIP_ATTRIBUTE);
        } else {
            element.set_attribute(TOOLTIP_ATTRIBUTE, &spec.visible_text);
        }

        if !spec.shows_caption() {
            return;
        }
        if element.attribute(self.markers.caption()).is_some() {
            tracing::debug!("Caption already present, not inserting another");
            return;
        }

        element.insert_caption(spec);
        element.set_attribute(self.markers.caption(), "true");
    }
}

/// Remove host dimensions, then apply the resolved size (if any).
fn apply_size(element: &mut dyn ImageElement, token: &str) {
    for attribute in LEGACY_DIMENSIONS {
        element.remove_attribute(attribute);
    }

    match SizeSpec::resolve(token) {
        Some(size) => {
            for (property, value) in size.styles() {
                element.set_style(property, &value);
            }
        }
        None => tracing::debug!(value = token, "Ignoring invalid size"),
    }
}

/// Resolve an alignment token and apply its layout styles.
fn apply_alignment(element: &mut dyn ImageElement, token: Option<&str>) -> Alignment {
    let alignment = Alignment::resolve(token);
    if let Some(token) = token
        && !alignment.is_specified()
    {
        tracing::debug!(value = token, "Ignoring unknown alignment");
    }
    if let Some(styles) = alignment.styles() {
        for (property, value) in styles {
            element.set_style(property, value);
        }
    }
    alignment
}

/// Apply `:size=`/`:align=` tokens from the tooltip and strip them from it.
fn apply_legacy_title(element: &mut dyn ImageElement) -> Alignment {
    let Some(legacy) = element
        .attribute(TOOLTIP_ATTRIBUTE)
        .and_then(LegacyTitle::extract)
    else {
        return Alignment::Unspecified;
    };

    if legacy.cleaned.is_empty() {
        element.remove_attribute(TOOLTIP_ATTRIBUTE);
    } else {
        element.set_attribute(TOOLTIP_ATTRIBUTE, &legacy.cleaned);
    }

    if let Some(token) = &legacy.size {
        apply_size(element, token);
    }
    apply_alignment(element, legacy.align.as_deref())
}

fn report_unparseable(report: &mut PassReport, field: AnnotationField, text: String) {
    let diagnostic = Diagnostic::Unparseable { field, text };
    tracing::warn!("{diagnostic}");
    report.diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::{CaptionPosition, Emphasis};
    use crate::mock::{MockImage, MockRegion};
    use pretty_assertions::assert_eq;

    fn image(alt: &str, title: Option<&str>) -> MockImage {
        let image = MockImage::new().with_attribute("alt", alt);
        match title {
            Some(title) => image.with_attribute("title", title),
            None => image,
        }
    }

    fn apply(mut image: MockImage) -> (MockImage, PassReport) {
        let report = DirectiveApplier::default().apply(&mut image);
        (image, report)
    }

    #[test]
    fn test_end_to_end() {
        let (image, report) = apply(image(
            "Kafka Diagram|size=50%|align=center",
            Some("Figure 1|pos=above|style=bold"),
        ));

        assert_eq!(report.processed, 1);
        assert!(report.diagnostics.is_empty());
        assert_eq!(image.attribute("alt"), Some("Kafka Diagram"));
        assert_eq!(image.attribute("title"), Some("Figure 1"));
        assert_eq!(image.style("width"), Some("50%"));
        assert_eq!(image.style("height"), Some("auto"));
        assert_eq!(image.style("display"), Some("block"));
        assert_eq!(image.style("margin-left"), Some("auto"));
        assert_eq!(image.style("margin-right"), Some("auto"));
        assert_eq!(
            image.captions(),
            [CaptionSpec {
                visible_text: "Figure 1".to_owned(),
                position: CaptionPosition::Above,
                text_align: TextAlign::Center,
                emphasis: Emphasis::Bold,
                suppressed: false,
            }]
        );
        assert_eq!(image.attribute("data-imgdir-align"), Some("center"));
        assert_eq!(image.attribute("data-imgdir-caption"), Some("true"));
        assert_eq!(image.attribute("data-imgdir-processed"), Some("true"));
    }

    #[test]
    fn test_size_without_align_keeps_display() {
        let (image, _) = apply(image("Chart|size=300", None));
        assert_eq!(image.style("width"), Some("300px"));
        assert_eq!(image.style("display"), None);
        assert_eq!(image.style("margin-left"), None);
        assert_eq!(image.attribute("data-imgdir-align"), None);
    }

    #[test]
    fn test_size_table() {
        let cases = [
            ("80x40", "80px", "40px"),
            ("x40", "auto", "40px"),
            ("50%", "50%", "auto"),
            ("300px", "300px", "auto"),
            ("80xauto", "80px", "auto"),
        ];
        for (token, width, height) in cases {
            let (image, _) = apply(image(&format!("A|size={token}"), None));
            assert_eq!(image.style("width"), Some(width), "{token}");
            assert_eq!(image.style("height"), Some(height), "{token}");
        }
    }

    #[test]
    fn test_legacy_dimensions_removed_even_for_invalid_size() {
        let source = image("A|size=huge|align=right", None)
            .with_attribute("width", "640")
            .with_attribute("height", "480");
        let (image, report) = apply(source);

        assert_eq!(image.attribute("width"), None);
        assert_eq!(image.attribute("height"), None);
        assert_eq!(image.style("width"), None);
        // Alignment still applies when the size axis is invalid.
        assert_eq!(image.style("margin-right"), Some("0"));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_legacy_dimensions_kept_without_size_directive() {
        let source = image("A|align=left", None).with_attribute("width", "640");
        let (image, _) = apply(source);
        assert_eq!(image.attribute("width"), Some("640"));
        assert_eq!(image.style("margin-left"), Some("0"));
    }

    #[test]
    fn test_unknown_alignment_changes_nothing() {
        let source = image("A|align=justify", None).with_style("display", "inline");
        let (image, _) = apply(source);
        assert_eq!(image.attribute("alt"), Some("A"));
        assert_eq!(image.style("display"), Some("inline"));
        assert_eq!(image.attribute("data-imgdir-align"), None);
    }

    #[test]
    fn test_trailing_scan_preserves_pipes() {
        let (image, _) = apply(image("Input | Output | size=80", None));
        assert_eq!(image.attribute("alt"), Some("Input | Output"));
        assert_eq!(image.style("width"), Some("80px"));
    }

    #[test]
    fn test_malformed_label_diagnostic() {
        let (image, report) = apply(image("Photo|sizeXX=80", None));

        assert_eq!(image.attribute("alt"), Some("Photo|sizeXX=80"));
        assert_eq!(image.style("width"), None);
        assert_eq!(image.style("display"), None);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::Unparseable {
                field: AnnotationField::Label,
                text: "Photo|sizeXX=80".to_owned(),
            }]
        );
        // The element is still processed.
        assert_eq!(report.processed, 1);
    }

    #[test]
    fn test_malformed_tooltip_diagnostic() {
        let (image, report) = apply(image("A|size=10", Some("Caption|styel=bold")));
        assert_eq!(image.style("width"), Some("10px"));
        assert_eq!(image.attribute("title"), Some("Caption|styel=bold"));
        assert!(image.captions().is_empty());
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_notitle_clears_tooltip() {
        let (image, _) = apply(image("A", Some("notitle")));
        assert_eq!(image.attribute("title"), None);
        assert!(image.captions().is_empty());
    }

    #[test]
    fn test_suppressed_keeps_tooltip() {
        let (image, _) = apply(image("A", Some("Tooltip only|notitle")));
        assert_eq!(image.attribute("title"), Some("Tooltip only"));
        assert!(image.captions().is_empty());
        assert_eq!(image.attribute("data-imgdir-caption"), None);
    }

    #[test]
    fn test_plain_tooltip_untouched() {
        let (image, _) = apply(image("A", Some("Hover text")));
        assert_eq!(image.attribute("title"), Some("Hover text"));
        assert!(image.captions().is_empty());
    }

    #[test]
    fn test_caption_uses_default_align_without_image_align() {
        let (image, _) = apply(image("A|size=10", Some("Cap|style=italic")));
        assert_eq!(image.captions()[0].text_align, TextAlign::Left);
        assert_eq!(image.captions()[0].position, CaptionPosition::Below);
    }

    #[test]
    fn test_caption_inherits_middle_as_center() {
        let (image, _) = apply(image("A|align=middle", Some("Cap|pos=below")));
        assert_eq!(image.captions()[0].text_align, TextAlign::Center);
    }

    #[test]
    fn test_stale_align_marker_is_cleared() {
        // A marker left behind by something else must not leak into the caption.
        let source =
            image("A", Some("Cap|style=bold")).with_attribute("data-imgdir-align", "right");
        let (image, _) = apply(source);
        assert_eq!(image.attribute("data-imgdir-align"), None);
        assert_eq!(image.captions()[0].text_align, TextAlign::Left);
    }

    #[test]
    fn test_existing_caption_marker_prevents_insert() {
        let source =
            image("A", Some("Cap|pos=above")).with_attribute("data-imgdir-caption", "true");
        let (image, _) = apply(source);
        assert_eq!(image.attribute("title"), Some("Cap"));
        assert!(image.captions().is_empty());
    }

    #[test]
    fn test_idempotent_region() {
        let applier = DirectiveApplier::default();
        let mut region = MockRegion::new(vec![
            image("One|size=50%|align=center", Some("First|pos=above")),
            image("Two|size=x40", Some("Second|style=underline")),
            image("Three", None),
        ]);

        let first = applier.on_render_complete(Some(&mut region as &mut dyn Region));
        let after_first = region.clone();
        let second = applier.on_render_complete(Some(&mut region as &mut dyn Region));

        assert_eq!(first.processed, 3);
        assert_eq!(second.processed, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(region, after_first);
        assert!(region.images.iter().all(|i| i.captions().len() <= 1));
    }

    #[test]
    fn test_missing_region_is_empty_pass() {
        let report = DirectiveApplier::default().on_render_complete(None);
        assert_eq!(report, PassReport::default());
    }

    #[test]
    fn test_image_without_annotations() {
        let (image, report) = apply(MockImage::new());
        assert_eq!(report.processed, 1);
        assert_eq!(image.attribute("alt"), None);
        assert_eq!(image.attribute("data-imgdir-processed"), Some("true"));
    }

    #[test]
    fn test_forward_policy_and_custom_prefix() {
        let config = ApplierConfig::new()
            .with_policy(TokenizePolicy::Forward)
            .with_marker_prefix("data-docs");
        let applier = DirectiveApplier::new(&config);
        let mut image = image("Chart|junk|align=right", None);

        applier.apply(&mut image);

        assert_eq!(image.attribute("alt"), Some("Chart"));
        assert_eq!(image.attribute("data-docs-align"), Some("right"));
        assert_eq!(image.attribute("data-docs-processed"), Some("true"));
    }

    #[test]
    fn test_plain_title_captions() {
        let config = ApplierConfig::new()
            .with_plain_title_captions(true)
            .with_caption_align(TextAlign::Center);
        let mut image = image("A", Some("Hover text"));

        DirectiveApplier::new(&config).apply(&mut image);

        assert_eq!(image.captions().len(), 1);
        assert_eq!(image.captions()[0].visible_text, "Hover text");
        assert_eq!(image.captions()[0].text_align, TextAlign::Center);
    }

    fn legacy_applier() -> DirectiveApplier {
        DirectiveApplier::new(&ApplierConfig::new().with_legacy_title_syntax(true))
    }

    #[test]
    fn test_legacy_title_tokens() {
        let mut image = image("Chart", Some("Quarterly  numbers :size=300x100 :align=middle"))
            .with_attribute("width", "600");

        let report = legacy_applier().apply(&mut image);

        assert_eq!(image.attribute("title"), Some("Quarterly numbers"));
        assert_eq!(image.attribute("width"), None);
        assert_eq!(image.style("width"), Some("300px"));
        assert_eq!(image.style("height"), Some("100px"));
        assert_eq!(image.style("margin-left"), Some("auto"));
        assert_eq!(image.attribute("data-imgdir-align"), Some("center"));
        assert!(image.captions().is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_legacy_title_emptied_is_removed() {
        let mut image = image("Chart", Some(":size=50%"));

        legacy_applier().apply(&mut image);

        assert_eq!(image.attribute("title"), None);
        assert_eq!(image.style("width"), Some("50%"));
        assert_eq!(image.style("height"), Some("auto"));
    }

    #[test]
    fn test_legacy_title_ignored_by_default() {
        let (image, _) = apply(image("Chart", Some("Numbers :size=300")));
        assert_eq!(image.attribute("title"), Some("Numbers :size=300"));
        assert_eq!(image.style("width"), None);
    }

    #[test]
    fn test_label_directives_override_legacy_title() {
        let mut image = image(
            "Chart|size=80|align=left",
            Some("Cap|pos=above :size=300 :align=right"),
        );

        legacy_applier().apply(&mut image);

        assert_eq!(image.style("width"), Some("80px"));
        assert_eq!(image.style("margin-left"), Some("0"));
        assert_eq!(image.attribute("data-imgdir-align"), Some("left"));
        // The cleaned tooltip still goes through caption resolution.
        assert_eq!(image.attribute("title"), Some("Cap"));
        assert_eq!(image.captions()[0].position, CaptionPosition::Above);
        assert_eq!(image.captions()[0].text_align, TextAlign::Left);
    }
}
