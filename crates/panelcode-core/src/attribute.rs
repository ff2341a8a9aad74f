//! Raw attribute tokens as they appear in Panelcode source.
//!
//! Attributes show up in two places: after a unit's panel count (`2.c2`,
//! `r2`, `1x`) and inside option blocks (`{: label='Page 1' autolabel }`).
//! The parser produces one [`Attribute`] per token without interpreting it;
//! interpretation happens in [`OptionSet::resolve`](crate::options::OptionSet::resolve)
//! and in the span helpers on [`Unit`](crate::model::Unit).

use std::fmt;

/// A single attribute token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// A bare word such as `x`, `u`, `autolabel` or `big-panel`.
    Word(String),

    /// Letters immediately followed by digits, e.g. `c2`, `r3`, `w12`.
    ///
    /// `digits` is kept as written so that malformed values can fall back
    /// to defaults at the point of use.
    Shorthand { key: String, digits: String },

    /// An explicit `key=value` or `key='quoted value'` pair.
    Pair { key: String, value: String },
}

impl Attribute {
    /// Create a bare word attribute.
    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    /// Create a shorthand attribute from its letter and digit parts.
    pub fn shorthand(key: impl Into<String>, digits: impl Into<String>) -> Self {
        Self::Shorthand {
            key: key.into(),
            digits: digits.into(),
        }
    }

    /// Create an explicit key/value attribute.
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this attribute is the bare word `word`.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Self::Word(w) if w == word)
    }

    /// Returns the numeric value if this is a shorthand with the given key.
    ///
    /// Digit strings that do not fit in a `u32` yield `None`, which callers
    /// treat the same as an absent attribute.
    pub fn numeric(&self, key: &str) -> Option<u32> {
        match self {
            Self::Shorthand { key: k, digits } if k == key => digits.parse().ok(),
            _ => None,
        }
    }

    /// Returns `true` if this attribute uses `key` either as a bare word or
    /// as a shorthand prefix (`u` and `u3` both use key `u`).
    pub fn uses_key(&self, key: &str) -> bool {
        match self {
            Self::Word(w) => w == key,
            Self::Shorthand { key: k, .. } => k == key,
            Self::Pair { .. } => false,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => write!(f, "{word}"),
            Self::Shorthand { key, digits } => write!(f, "{key}{digits}"),
            Self::Pair { key, value } => write!(f, "{key}='{value}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_matches_key() {
        let attr = Attribute::shorthand("c", "3");
        assert_eq!(attr.numeric("c"), Some(3));
        assert_eq!(attr.numeric("r"), None);
    }

    #[test]
    fn test_numeric_overflow_is_absent() {
        let attr = Attribute::shorthand("c", "99999999999999999999");
        assert_eq!(attr.numeric("c"), None);
    }

    #[test]
    fn test_uses_key() {
        assert!(Attribute::word("u").uses_key("u"));
        assert!(Attribute::shorthand("u", "3").uses_key("u"));
        assert!(!Attribute::word("ux").uses_key("u"));
        assert!(!Attribute::pair("u", "3").uses_key("u"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Attribute::word("x").to_string(), "x");
        assert_eq!(Attribute::shorthand("r", "2").to_string(), "r2");
        assert_eq!(Attribute::pair("img", "a.png").to_string(), "img='a.png'");
    }
}
