//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Syntax errors are always [`Severity::Error`]. Callers that choose to
/// continue past a syntax error (for example by passing the source through
/// verbatim) downgrade the diagnostic to [`Severity::Warning`] before
/// reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The document could not be parsed.
    Error,

    /// The problem was reported but processing continued.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
