//! Spans with a message, drawn under the source snippet of a diagnostic.

use crate::span::Span;

/// How a label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// The offending text. Every syntax error has exactly one.
    Primary,
    /// Nearby context, such as where a closing `)` or `}` was expected.
    Secondary,
}

#[derive(Debug, Clone)]
pub struct Label {
    style: LabelStyle,
    span: Span,
    message: String,
}

impl Label {
    pub fn new(style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        Self {
            style,
            span,
            message: message.into(),
        }
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_accessors() {
        let label = Label::new(LabelStyle::Primary, Span::new(10..20), "never closed");

        assert_eq!(label.span(), Span::new(10..20));
        assert_eq!(label.message(), "never closed");
        assert!(label.is_primary());
    }

    #[test]
    fn test_secondary_style() {
        let label = Label::new(LabelStyle::Secondary, Span::at(4), "expected `)`");

        assert_eq!(label.style(), LabelStyle::Secondary);
        assert!(!label.is_primary());
    }
}
