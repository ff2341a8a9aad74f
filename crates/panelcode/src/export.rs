//! Export functionality for rendered Panelcode documents.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! serializing rendered blocks. It is the final stage in the Panelcode
//! processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Document
//!     ↓ render
//! Blocks
//!     ↓ export (this module)
//! Markup
//! ```
//!
//! # Available Backends
//!
//! - [`html`] - nested CSS grid `<div>` markup via [`html::HtmlExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering serialization failures and
//! I/O errors. [`Error`] converts into [`PanelcodeError::Export`] at the crate
//! boundary.
//!
//! [`PanelcodeError::Export`]: crate::PanelcodeError::Export

/// HTML export backend.
pub mod html;

use crate::render::Block;

/// Abstraction for block export backends.
pub trait Exporter {
    /// Exports the rendered galleries of a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the blocks cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_blocks(&mut self, blocks: &[Block]) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A serialization failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
