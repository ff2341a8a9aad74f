//! The five structural levels of a Panelcode document.

use std::fmt;

/// A structural level, ordered from most specific to least specific.
///
/// The depth of a level is the number of colons in its option marker:
/// `{` for panel groups up to `{::::` for the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    PanelGroup,
    Layout,
    Spread,
    Gallery,
    Document,
}

impl Level {
    /// Number of levels.
    pub const COUNT: usize = 5;

    /// All levels, most specific first.
    pub const ALL: [Level; Self::COUNT] = [
        Level::PanelGroup,
        Level::Layout,
        Level::Spread,
        Level::Gallery,
        Level::Document,
    ];

    /// Colon depth of this level's option marker.
    pub fn depth(self) -> usize {
        match self {
            Level::PanelGroup => 0,
            Level::Layout => 1,
            Level::Spread => 2,
            Level::Gallery => 3,
            Level::Document => 4,
        }
    }

    /// Level for a colon depth.
    pub fn from_depth(depth: usize) -> Option<Level> {
        Self::ALL.get(depth).copied()
    }

    /// Alternate single-character option marker that may follow `{`.
    pub fn alternate_marker(self) -> char {
        match self {
            Level::PanelGroup => '+',
            Level::Layout => '|',
            Level::Spread => ';',
            Level::Gallery => '@',
            Level::Document => '!',
        }
    }

    /// Level selected by an alternate marker.
    pub fn from_alternate_marker(marker: char) -> Option<Level> {
        Self::ALL
            .into_iter()
            .find(|level| level.alternate_marker() == marker)
    }

    /// Delimiters separating this level's children.
    ///
    /// Panel groups are the only level with two: `+` continues a row and `,`
    /// starts a new one.
    pub fn child_delimiters(self) -> &'static [char] {
        match self {
            Level::PanelGroup => &['+', ','],
            Level::Layout => &['_'],
            Level::Spread => &['|'],
            Level::Gallery => &[';'],
            Level::Document => &['@'],
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::PanelGroup => "panel group",
            Level::Layout => "layout",
            Level::Spread => "spread",
            Level::Gallery => "gallery",
            Level::Document => "document",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_depth(level.depth()), Some(level));
        }
        assert_eq!(Level::from_depth(5), None);
    }

    #[test]
    fn test_alternate_markers() {
        assert_eq!(Level::from_alternate_marker('+'), Some(Level::PanelGroup));
        assert_eq!(Level::from_alternate_marker('!'), Some(Level::Document));
        assert_eq!(Level::from_alternate_marker(':'), None);
    }

    #[test]
    fn test_child_delimiters() {
        assert_eq!(Level::PanelGroup.child_delimiters(), &['+', ',']);
        assert_eq!(Level::Spread.child_delimiters(), &['|']);
    }

    #[test]
    fn test_ordering_is_most_specific_first() {
        assert!(Level::PanelGroup < Level::Layout);
        assert!(Level::Gallery < Level::Document);
    }
}
