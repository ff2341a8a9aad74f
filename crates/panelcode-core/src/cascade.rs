//! Level-cascading option lookup.
//!
//! Inherited options (`w`, `imgpath`, `autolabel`, ...) are looked up from
//! the most specific node in scope to the least specific one. The first level
//! that defines the option wins; values from different levels never merge.

use crate::{level::Level, options::OptionSet};

/// The option sets in scope at one point of a document traversal.
///
/// A cascade starts at the document and is narrowed with [`Cascade::descend`]
/// as the traversal enters galleries, spreads, layouts and panel groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cascade<'a> {
    levels: [Option<&'a OptionSet>; Level::COUNT],
}

impl<'a> Cascade<'a> {
    /// Create a cascade holding only document-level options.
    pub fn new(document: &'a OptionSet) -> Self {
        Self::default().descend(Level::Document, document)
    }

    /// Return a copy of this cascade with `options` in scope at `level`.
    pub fn descend(mut self, level: Level, options: &'a OptionSet) -> Self {
        self.levels[level.depth()] = Some(options);
        self
    }

    /// The option set in scope at `level`, if any.
    pub fn at(&self, level: Level) -> Option<&'a OptionSet> {
        self.levels[level.depth()]
    }

    /// Iterate over the option sets in scope, most specific first.
    pub fn iter(&self) -> impl Iterator<Item = &'a OptionSet> + '_ {
        self.levels.iter().filter_map(|options| *options)
    }

    /// First value found for `key` along the cascade.
    pub fn expr(&self, key: &str) -> Option<&'a str> {
        self.iter().find_map(|options| options.expr(key))
    }

    /// Returns `true` if any level in scope sets the bare word.
    pub fn has_word(&self, word: &str) -> bool {
        self.iter().any(|options| options.has_word(word))
    }

    /// First explicit panel group width found along the cascade.
    pub fn width(&self) -> Option<u32> {
        self.iter().find_map(OptionSet::width)
    }
}
