//! Non-fatal diagnostics reported during a pass.

use std::fmt;

/// Which annotation a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationField {
    /// Label text (alt text).
    Label,
    /// Tooltip text (title).
    Tooltip,
}

impl fmt::Display for AnnotationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => f.write_str("label"),
            Self::Tooltip => f.write_str("tooltip"),
        }
    }
}

/// A problem found while reading directives.
///
/// Diagnostics never stop a pass: the affected annotation is left unchanged
/// and processing continues with the next axis or element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// A separator and directive keywords are present but no segment parsed.
    #[error("{field} {text:?} looks like it contains directives, but none could be parsed")]
    Unparseable {
        field: AnnotationField,
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::Unparseable {
            field: AnnotationField::Label,
            text: "Photo|sizeXX=80".to_owned(),
        };
        assert_eq!(
            diagnostic.to_string(),
            r#"label "Photo|sizeXX=80" looks like it contains directives, but none could be parsed"#
        );
    }
}
