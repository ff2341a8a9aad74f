//! Error codes for Panelcode syntax errors.
//!
//! All parser errors live in the `E1xx` range.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unexpected character.
    ///
    /// Input remained after the last complete construct, or a character
    /// appeared where no rule accepts it.
    E100,

    /// Unexpected end of input.
    ///
    /// The input ended where a panel unit was still required, e.g. after a
    /// trailing delimiter.
    E101,

    /// Expected panel unit.
    ///
    /// A unit needs a panel count, at least one attribute, or both.
    E102,

    /// Unterminated option block.
    ///
    /// An option block was opened with `{` but never closed with `}`.
    E103,

    /// Unclosed parenthesis.
    ///
    /// A parenthesized panel group is missing its `)`.
    E104,

    /// Panel count out of range.
    ///
    /// The count does not fit in an unsigned 32-bit integer.
    E105,

    /// Unterminated quoted value.
    ///
    /// A `'` opened a quoted attribute value but no closing `'` followed.
    E106,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected character",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "expected panel unit",
            ErrorCode::E103 => "unterminated option block",
            ErrorCode::E104 => "unclosed parenthesis",
            ErrorCode::E105 => "panel count out of range",
            ErrorCode::E106 => "unterminated quoted value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
