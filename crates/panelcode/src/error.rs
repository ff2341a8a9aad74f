//! Error types for Panelcode operations.
//!
//! This module provides the main error type [`PanelcodeError`] which wraps
//! the error conditions that can occur while turning notation into markup.

use std::io;

use thiserror::Error;

use panelcode_parser::error::ParseError;

/// The main error type for Panelcode operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render them with source snippets.
#[derive(Debug, Error)]
pub enum PanelcodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for PanelcodeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl PanelcodeError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// The byte offset of a syntax error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { err, .. } => err.position(),
            _ => None,
        }
    }
}
