//! The ParseError type returned by [`parse`](crate::parse).

use std::fmt;

use crate::error::Diagnostic;

/// Error type for a failed parse.
///
/// Wraps one or more diagnostics; the first one is the error the parser
/// stopped at.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Byte offset at which parsing failed.
    pub fn position(&self) -> Option<usize> {
        self.diagnostics
            .first()
            .and_then(Diagnostic::primary_span)
            .map(|span| span.start())
    }

    /// Downgrade every diagnostic to a warning.
    pub fn into_warnings(self) -> Vec<Diagnostic> {
        self.diagnostics
            .into_iter()
            .map(Diagnostic::into_warning)
            .collect()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ErrorCode, Severity},
        span::Span,
    };

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E100);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }

    #[test]
    fn test_parse_error_position() {
        let err: ParseError = Diagnostic::error("unexpected character")
            .with_label(Span::new(4..5), "here")
            .into();

        assert_eq!(err.position(), Some(4));
        assert_eq!(ParseError::new(Vec::new()).position(), None);
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let err: ParseError = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first error (+1 more)");
    }

    #[test]
    fn test_into_warnings() {
        let err: ParseError = Diagnostic::error("oops").into();
        let warnings = err.into_warnings();

        assert_eq!(warnings[0].severity(), Severity::Warning);
    }
}
