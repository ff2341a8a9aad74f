//! # Panelcode Parser
//!
//! Parser for the Panelcode comic layout notation. It turns a notation
//! string such as `2c2,3_1x+2 {: autolabel }` into the typed document tree
//! of [`panelcode_core::model`].
//!
//! ## Usage
//!
//! ```
//! # use panelcode_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let document = parse("2c2,3 | 1+1_3 {: label='Splash' }")?;
//!
//!     let summary = document.summary();
//!     assert_eq!(summary.layouts, 2);
//!     assert_eq!(summary.units, 5);
//!     Ok(())
//! }
//! ```

mod comments;
pub mod error;
mod parser;
mod span;

pub use comments::strip_comments;
pub use error::ParseError;
pub use span::Span;

use log::{debug, trace};

use panelcode_core::model::Document;

/// Parse comment-free Panelcode source into a document tree.
///
/// # Arguments
///
/// * `source` - The notation to parse. Comments must already be removed,
///   for example with [`strip_comments`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error. Its
/// [`position`](ParseError::position) is the byte offset of the offending
/// input.
///
/// # Example
///
/// ```
/// # use panelcode_parser::parse;
/// let err = parse("1+").unwrap_err();
/// assert_eq!(err.position(), Some(2));
/// ```
pub fn parse(source: &str) -> Result<Document, ParseError> {
    debug!(bytes = source.len(); "Parsing panelcode source");

    let document = parser::parse_document(source).inspect_err(|err| {
        debug!(err:%; "Panelcode source rejected");
    })?;

    trace!(summary:? = document.summary(); "Parsed document");
    Ok(document)
}
