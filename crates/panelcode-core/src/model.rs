//! The Panelcode document tree.
//!
//! A document is a strict five-level hierarchy. Each level is a typed node
//! holding its children and the [`OptionSet`] of its trailing option block:
//!
//! ```text
//! Document   galleries separated by `@`      options `{:::: }`
//! Gallery    spreads separated by `;`        options `{::: }`
//! Spread     layouts separated by `|`        options `{:: }`
//! Layout     panel groups separated by `_`   options `{: }`
//! PanelGroup units separated by `+` and `,`  options `{ }`
//! ```
//!
//! The tree is immutable once built.

use crate::{attribute::Attribute, options::OptionSet};

/// Root of a parsed Panelcode document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    galleries: Vec<Gallery>,
    options: OptionSet,
}

impl Document {
    pub fn new(galleries: Vec<Gallery>, options: OptionSet) -> Self {
        Self { galleries, options }
    }

    pub fn galleries(&self) -> &[Gallery] {
        &self.galleries
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Count the nodes of every level in this document.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            galleries: self.galleries.len(),
            ..Summary::default()
        };
        for gallery in &self.galleries {
            summary.spreads += gallery.spreads.len();
            for spread in &gallery.spreads {
                summary.layouts += spread.layouts.len();
                for layout in &spread.layouts {
                    summary.panel_groups += layout.panel_groups.len();
                    for group in &layout.panel_groups {
                        summary.units += group.units().count();
                    }
                }
            }
        }
        summary
    }
}

/// A gallery: an ordered sequence of spreads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    spreads: Vec<Spread>,
    options: OptionSet,
}

impl Gallery {
    pub fn new(spreads: Vec<Spread>, options: OptionSet) -> Self {
        Self { spreads, options }
    }

    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }
}

/// A spread: an ordered sequence of layouts, typically facing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    layouts: Vec<Layout>,
    options: OptionSet,
}

impl Spread {
    pub fn new(layouts: Vec<Layout>, options: OptionSet) -> Self {
        Self { layouts, options }
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }
}

/// A layout: an ordered sequence of panel groups, typically one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    panel_groups: Vec<PanelGroup>,
    options: OptionSet,
}

impl Layout {
    pub fn new(panel_groups: Vec<PanelGroup>, options: OptionSet) -> Self {
        Self {
            panel_groups,
            options,
        }
    }

    pub fn panel_groups(&self) -> &[PanelGroup] {
        &self.panel_groups
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }
}

/// One element of a panel group's term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Unit(Unit),
    /// `+`: the next unit continues the current row.
    NextColumn,
    /// `,`: the next unit starts a new row.
    NextRow,
}

/// A panel group: a grid of units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGroup {
    terms: Vec<Term>,
    options: OptionSet,
}

impl PanelGroup {
    pub fn new(terms: Vec<Term>, options: OptionSet) -> Self {
        Self { terms, options }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Iterate over the units of this group in document order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.terms.iter().filter_map(|term| match term {
            Term::Unit(unit) => Some(unit),
            _ => None,
        })
    }

    /// Group the units into rows, splitting on `,` and ignoring `+`.
    ///
    /// There is always at least one row.
    pub fn rows(&self) -> Vec<Vec<&Unit>> {
        let mut rows = vec![Vec::new()];
        for term in &self.terms {
            match term {
                Term::Unit(unit) => {
                    if let Some(row) = rows.last_mut() {
                        row.push(unit);
                    }
                }
                Term::NextRow => rows.push(Vec::new()),
                Term::NextColumn => {}
            }
        }
        rows
    }
}

/// Largest panel count a single unit may carry.
pub const MAX_PANEL_COUNT: u32 = 999;

/// A unit: one or more panels sharing the same attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    count: u32,
    attributes: Vec<Attribute>,
}

impl Unit {
    /// Create a unit. A missing count means one panel.
    pub fn new(count: Option<u32>, attributes: Vec<Attribute>) -> Self {
        Self {
            count: count.unwrap_or(1),
            attributes,
        }
    }

    /// The count as written, with the default of `1` applied.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns `true` if the count was a literal `0`.
    ///
    /// A zero count stands for a single spacer panel, never for no panels.
    pub fn is_spacer_count(&self) -> bool {
        self.count == 0
    }

    /// Number of grid slots this unit expands to, at most [`MAX_PANEL_COUNT`].
    pub fn panel_count(&self) -> u32 {
        self.count.clamp(1, MAX_PANEL_COUNT)
    }

    /// Returns `true` if the unit renders as blank panels (`0`, `x` or `z`).
    pub fn is_blank(&self) -> bool {
        self.is_spacer_count()
            || self
                .attributes
                .iter()
                .any(|attr| attr.is_word("x") || attr.is_word("z"))
    }

    /// Returns `true` if the unit is an unencoded merge (`u` or `u<N>`).
    pub fn is_merged(&self) -> bool {
        self.attributes.iter().any(|attr| attr.uses_key("u"))
    }

    /// Number of logical panels merged into each rendered panel.
    ///
    /// The largest `u<N>` wins; a bare `u` counts as one.
    pub fn merge_count(&self) -> u32 {
        self.max_numeric("u").unwrap_or(1)
    }

    /// Column span (`c<N>`), default 1.
    pub fn column_span(&self) -> u32 {
        self.max_numeric("c").unwrap_or(1)
    }

    /// Row span (`r<N>`), default 1.
    pub fn row_span(&self) -> u32 {
        self.max_numeric("r").unwrap_or(1)
    }

    /// Columns this unit occupies within its row.
    pub fn width(&self) -> u32 {
        self.panel_count().saturating_mul(self.column_span())
    }

    fn max_numeric(&self, key: &str) -> Option<u32> {
        self.attributes
            .iter()
            .filter_map(|attr| attr.numeric(key))
            .max()
    }
}

/// Node counts of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub galleries: usize,
    pub spreads: usize,
    pub layouts: usize,
    pub panel_groups: usize,
    pub units: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(count: Option<u32>, attributes: Vec<Attribute>) -> Term {
        Term::Unit(Unit::new(count, attributes))
    }

    #[test]
    fn test_unit_default_count() {
        let unit = Unit::new(None, vec![Attribute::shorthand("r", "2")]);

        assert_eq!(unit.count(), 1);
        assert_eq!(unit.row_span(), 2);
    }

    #[test]
    fn test_panel_count_is_capped() {
        let unit = Unit::new(Some(u32::MAX), Vec::new());

        assert_eq!(unit.count(), u32::MAX);
        assert_eq!(unit.panel_count(), MAX_PANEL_COUNT);
    }

    #[test]
    fn test_zero_count_is_one_blank() {
        let unit = Unit::new(Some(0), Vec::new());

        assert!(unit.is_spacer_count());
        assert!(unit.is_blank());
        assert_eq!(unit.panel_count(), 1);
    }

    #[test]
    fn test_blank_flags() {
        assert!(Unit::new(Some(2), vec![Attribute::word("x")]).is_blank());
        assert!(Unit::new(Some(2), vec![Attribute::word("z")]).is_blank());
        assert!(!Unit::new(Some(2), vec![Attribute::word("xz")]).is_blank());
    }

    #[test]
    fn test_merge_count_takes_maximum() {
        let doubled = Unit::new(
            None,
            vec![Attribute::word("u"), Attribute::shorthand("u", "3")],
        );
        assert!(doubled.is_merged());
        assert_eq!(doubled.merge_count(), 3);

        let bare = Unit::new(None, vec![Attribute::word("u")]);
        assert_eq!(bare.merge_count(), 1);
    }

    #[test]
    fn test_column_span_malformed_falls_back() {
        let unit = Unit::new(Some(2), vec![Attribute::shorthand("c", "123456789012")]);

        assert_eq!(unit.column_span(), 1);
        assert_eq!(unit.width(), 2);
    }

    #[test]
    fn test_rows_split_on_comma() {
        let group = PanelGroup::new(
            vec![
                unit(Some(2), vec![Attribute::shorthand("c", "2")]),
                Term::NextColumn,
                unit(Some(1), Vec::new()),
                Term::NextRow,
                unit(Some(3), Vec::new()),
            ],
            OptionSet::new(),
        );

        let rows = group.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][0].count(), 3);
        assert_eq!(group.units().count(), 3);
    }

    #[test]
    fn test_summary_counts_levels() {
        let group = |n| PanelGroup::new(vec![unit(Some(n), Vec::new())], OptionSet::new());
        let layout = Layout::new(vec![group(1), group(2)], OptionSet::new());
        let spread = Spread::new(vec![layout.clone(), layout], OptionSet::new());
        let gallery = Gallery::new(vec![spread], OptionSet::new());
        let document = Document::new(vec![gallery], OptionSet::new());

        assert_eq!(
            document.summary(),
            Summary {
                galleries: 1,
                spreads: 1,
                layouts: 2,
                panel_groups: 4,
                units: 4,
            }
        );
    }
}
