//! Error and diagnostic system for the Panelcode parser.
//!
//! A syntax error is reported as a [`Diagnostic`]: a message, an
//! [`ErrorCode`], labeled source spans and optional help text. The parser
//! stops at the first error it cannot recover from, so a [`ParseError`]
//! usually wraps exactly one diagnostic.
//!
//! # Example
//!
//! ```
//! # use panelcode_parser::error::{Diagnostic, ErrorCode};
//! # use panelcode_parser::Span;
//! let diag = Diagnostic::error("unterminated option block")
//!     .with_code(ErrorCode::E103)
//!     .with_label(Span::new(4..9), "option block opened here")
//!     .with_help("add a closing `}`");
//!
//! assert_eq!(diag.to_string(), "error[E103]: unterminated option block");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelStyle};
pub use parse_error::ParseError;
pub use severity::Severity;
