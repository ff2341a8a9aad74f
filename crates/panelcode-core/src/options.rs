//! Resolved option sets.
//!
//! Every node of a Panelcode document may carry an option block such as
//! `{: autolabel w4 img='page1.png' }`. The raw [`Attribute`] tokens of a block
//! are classified once into an [`OptionSet`]:
//!
//! - **attribute words**: bare words (`autolabel`, `x`), kept as a set;
//! - **shorthand words**: a single letter bound to digits (`w4`, `c2`);
//! - **expressions**: everything else, most notably `key=value` pairs.
//!
//! Repeated words are idempotent; repeated keys keep the last value written.

use indexmap::{IndexMap, IndexSet};

use crate::attribute::Attribute;

/// The resolved options of a single document node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    attr_words: IndexSet<String>,
    kv_words: IndexMap<char, String>,
    kv_exprs: IndexMap<String, String>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify raw attribute tokens into an option set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use panelcode_core::{attribute::Attribute, options::OptionSet};
    /// let options = OptionSet::resolve(&[
    ///     Attribute::word("autolabel"),
    ///     Attribute::shorthand("w", "4"),
    ///     Attribute::pair("label", "Page 1"),
    /// ]);
    ///
    /// assert!(options.has_word("autolabel"));
    /// assert_eq!(options.width(), Some(4));
    /// assert_eq!(options.expr("label"), Some("Page 1"));
    /// ```
    pub fn resolve<'a>(attributes: impl IntoIterator<Item = &'a Attribute>) -> Self {
        let mut options = Self::new();
        for attribute in attributes {
            options.insert(attribute);
        }
        options
    }

    /// Classify and insert a single attribute.
    pub fn insert(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::Word(word) => {
                self.attr_words.insert(word.clone());
            }
            Attribute::Shorthand { key, digits } if digits.is_empty() => {
                self.attr_words.insert(key.clone());
            }
            Attribute::Shorthand { key, digits } => match single_letter(key) {
                Some(letter) if digits.bytes().all(|b| b.is_ascii_digit()) => {
                    self.kv_words.insert(letter, digits.clone());
                }
                None if digits.bytes().all(|b| b.is_ascii_digit()) => {
                    self.attr_words.insert(format!("{key}{digits}"));
                }
                _ => {
                    self.kv_exprs.insert(key.clone(), digits.clone());
                }
            },
            Attribute::Pair { key, value } => {
                self.kv_exprs.insert(key.clone(), value.clone());
            }
        }
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.attr_words.is_empty() && self.kv_words.is_empty() && self.kv_exprs.is_empty()
    }

    /// Returns `true` if the bare word is present.
    pub fn has_word(&self, word: &str) -> bool {
        self.attr_words.contains(word)
    }

    /// Returns the raw digits bound to a shorthand letter.
    pub fn shorthand(&self, letter: char) -> Option<&str> {
        self.kv_words.get(&letter).map(String::as_str)
    }

    /// Returns the numeric value bound to a shorthand letter.
    ///
    /// Values that do not fit in a `u32` are treated as absent.
    pub fn numeric(&self, letter: char) -> Option<u32> {
        self.shorthand(letter).and_then(|digits| digits.parse().ok())
    }

    /// Returns the value of a `key=value` expression.
    pub fn expr(&self, key: &str) -> Option<&str> {
        self.kv_exprs.get(key).map(String::as_str)
    }

    /// Returns the explicit panel group width (`w<N>`), if positive.
    pub fn width(&self) -> Option<u32> {
        self.numeric('w').filter(|w| *w > 0).or_else(|| {
            self.attr_words
                .iter()
                .filter_map(|word| word.strip_prefix('w'))
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .find_map(|digits| digits.parse().ok().filter(|w: &u32| *w > 0))
        })
    }

    /// Add a bare word.
    pub fn add_word(&mut self, word: impl Into<String>) {
        self.attr_words.insert(word.into());
    }

    /// Bind a shorthand letter to a number, replacing any previous value.
    pub fn set_shorthand(&mut self, letter: char, value: u32) {
        self.kv_words.insert(letter, value.to_string());
    }

    /// Iterate over bare words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.attr_words.iter().map(String::as_str)
    }

    /// Iterate over shorthand bindings in insertion order.
    pub fn shorthands(&self) -> impl Iterator<Item = (char, &str)> {
        self.kv_words
            .iter()
            .map(|(letter, digits)| (*letter, digits.as_str()))
    }

    /// Iterate over expressions in insertion order.
    pub fn exprs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.kv_exprs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The class names of this option set: bare words followed by shorthand
    /// words written back as `<letter><digits>`.
    ///
    /// Expressions are not class names and are left out.
    pub fn class_names(&self) -> Vec<String> {
        self.attr_words
            .iter()
            .cloned()
            .chain(
                self.kv_words
                    .iter()
                    .map(|(letter, digits)| format!("{letter}{digits}")),
            )
            .collect()
    }

    /// Layer `top` over `base`: words are united, keyed entries of `top` win.
    pub fn layered(base: &OptionSet, top: &OptionSet) -> Self {
        let mut merged = base.clone();
        merged.attr_words.extend(top.attr_words.iter().cloned());
        merged
            .kv_words
            .extend(top.kv_words.iter().map(|(k, v)| (*k, v.clone())));
        merged
            .kv_exprs
            .extend(top.kv_exprs.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Returns the key as a `char` if it is a single ASCII letter.
fn single_letter(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(attributes: &[Attribute]) -> OptionSet {
        OptionSet::resolve(attributes)
    }

    #[test]
    fn test_classify_words() {
        let options = resolve(&[Attribute::word("autolabel"), Attribute::word("x")]);

        assert!(options.has_word("autolabel"));
        assert!(options.has_word("x"));
        assert_eq!(options.shorthands().count(), 0);
        assert_eq!(options.exprs().count(), 0);
    }

    #[test]
    fn test_classify_shorthand_single_letter() {
        let options = resolve(&[Attribute::shorthand("c", "2"), Attribute::shorthand("w", "12")]);

        assert_eq!(options.shorthand('c'), Some("2"));
        assert_eq!(options.numeric('w'), Some(12));
        assert!(options.words().next().is_none());
    }

    #[test]
    fn test_classify_shorthand_without_digits_is_word() {
        let options = resolve(&[Attribute::shorthand("imgpath", "")]);

        assert!(options.has_word("imgpath"));
    }

    #[test]
    fn test_classify_multi_letter_shorthand_is_word() {
        let options = resolve(&[Attribute::shorthand("micro", "2")]);

        assert!(options.has_word("micro2"));
        assert!(options.expr("micro").is_none());
        assert_eq!(options.class_names(), vec!["micro2"]);
    }

    #[test]
    fn test_classify_pairs() {
        let options = resolve(&[
            Attribute::pair("img", "a.png"),
            Attribute::pair("label", "Splash page"),
        ]);

        assert_eq!(options.expr("img"), Some("a.png"));
        assert_eq!(options.expr("label"), Some("Splash page"));
    }

    #[test]
    fn test_words_are_idempotent() {
        let options = resolve(&[Attribute::word("x"), Attribute::word("x")]);

        assert_eq!(options.words().count(), 1);
        assert_eq!(options, resolve(&[Attribute::word("x")]));
    }

    #[test]
    fn test_repeated_keys_keep_last_value() {
        let options = resolve(&[
            Attribute::pair("label", "first"),
            Attribute::pair("label", "second"),
            Attribute::shorthand("w", "3"),
            Attribute::shorthand("w", "5"),
        ]);

        assert_eq!(options.expr("label"), Some("second"));
        assert_eq!(options.width(), Some(5));
    }

    #[test]
    fn test_width_ignores_zero_and_malformed() {
        assert_eq!(resolve(&[Attribute::shorthand("w", "0")]).width(), None);
        assert_eq!(
            resolve(&[Attribute::shorthand("w", "99999999999999")]).width(),
            None
        );
        assert_eq!(resolve(&[Attribute::word("wide")]).width(), None);
    }

    #[test]
    fn test_width_from_word_form() {
        let mut options = OptionSet::new();
        options.add_word("w6");

        assert_eq!(options.width(), Some(6));
    }

    #[test]
    fn test_class_names_order() {
        let options = resolve(&[
            Attribute::shorthand("r", "2"),
            Attribute::word("x"),
            Attribute::pair("img", "a.png"),
        ]);

        assert_eq!(options.class_names(), vec!["x", "r2"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = resolve(&[Attribute::word("x"), Attribute::shorthand("c", "2")]);
        let b = resolve(&[Attribute::shorthand("c", "2"), Attribute::word("x")]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_layered_top_wins() {
        let base = resolve(&[Attribute::word("small"), Attribute::pair("imgpath", "base/")]);
        let top = resolve(&[Attribute::word("dark"), Attribute::pair("imgpath", "top/")]);

        let merged = OptionSet::layered(&base, &top);

        assert!(merged.has_word("small"));
        assert!(merged.has_word("dark"));
        assert_eq!(merged.expr("imgpath"), Some("top/"));
    }

    #[test]
    fn test_set_shorthand_replaces() {
        let mut options = resolve(&[Attribute::shorthand("w", "2")]);
        options.set_shorthand('w', 7);

        assert_eq!(options.width(), Some(7));
        assert_eq!(options.class_names(), vec!["w7"]);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        // ===================
        // Strategies
        // ===================

        /// Strategy for a single attribute of any kind.
        fn attribute_strategy() -> impl Strategy<Value = Attribute> {
            prop_oneof![
                "[a-z][a-z-]{0,6}".prop_map(Attribute::word),
                ("[a-z]", "[0-9]{1,3}").prop_map(|(key, digits)| Attribute::shorthand(key, digits)),
                ("[a-z]{2,6}", "[a-z0-9./]{1,8}").prop_map(|(key, value)| Attribute::pair(key, value)),
            ]
        }

        fn option_set_strategy() -> impl Strategy<Value = OptionSet> {
            prop::collection::vec(attribute_strategy(), 0..8)
                .prop_map(|attributes| OptionSet::resolve(&attributes))
        }

        // ===================
        // Property Test Functions
        // ===================

        /// Layering keeps every word and lets the top set win on keys.
        fn check_layered_top_wins(base: &OptionSet, top: &OptionSet) -> Result<(), TestCaseError> {
            let merged = OptionSet::layered(base, top);

            for word in base.words().chain(top.words()) {
                prop_assert!(merged.has_word(word));
            }
            for (letter, digits) in top.shorthands() {
                prop_assert_eq!(merged.shorthand(letter), Some(digits));
            }
            for (key, value) in top.exprs() {
                prop_assert_eq!(merged.expr(key), Some(value));
            }
            Ok(())
        }

        /// Resolving the same attributes twice is idempotent.
        fn check_resolve_idempotent(attributes: &[Attribute]) -> Result<(), TestCaseError> {
            let once = OptionSet::resolve(attributes);
            let twice = OptionSet::resolve(attributes.iter().chain(attributes));

            prop_assert_eq!(once, twice);
            Ok(())
        }

        // ===================
        // Proptest Wrappers
        // ===================

        proptest! {
            #[test]
            fn layered_top_wins(base in option_set_strategy(), top in option_set_strategy()) {
                check_layered_top_wins(&base, &top)?;
            }

            #[test]
            fn resolve_idempotent(attributes in prop::collection::vec(attribute_strategy(), 0..8)) {
                check_resolve_idempotent(&attributes)?;
            }
        }
    }
}
