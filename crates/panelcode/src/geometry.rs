//! Panel group width calculation.

use panelcode_core::{cascade::Cascade, level::Level, model::PanelGroup};

/// Resolve the grid width of a panel group.
///
/// An explicit `w<N>` found through the cascade (the panel group itself
/// first) wins. Otherwise the width is measured from the units.
pub fn resolve_width(group: &PanelGroup, cascade: &Cascade<'_>) -> u32 {
    cascade
        .descend(Level::PanelGroup, group.options())
        .width()
        .unwrap_or_else(|| measured_width(group))
}

/// The widest row of a panel group, counting each unit as
/// `panel count × column span`. Never less than one.
pub fn measured_width(group: &PanelGroup) -> u32 {
    group
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .fold(0u32, |sum, unit| sum.saturating_add(unit.width()))
        })
        .max()
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use panelcode_core::{
        attribute::Attribute,
        model::{Term, Unit},
        options::OptionSet,
    };

    use super::*;

    fn unit(count: u32, attributes: Vec<Attribute>) -> Term {
        Term::Unit(Unit::new(Some(count), attributes))
    }

    #[test]
    fn test_widest_row_wins() {
        // 2c2,3
        let group = PanelGroup::new(
            vec![
                unit(2, vec![Attribute::shorthand("c", "2")]),
                Term::NextRow,
                unit(3, Vec::new()),
            ],
            OptionSet::new(),
        );

        assert_eq!(measured_width(&group), 4);
    }

    #[test]
    fn test_columns_sum_within_row() {
        // 1+2+0
        let group = PanelGroup::new(
            vec![
                unit(1, Vec::new()),
                Term::NextColumn,
                unit(2, Vec::new()),
                Term::NextColumn,
                unit(0, Vec::new()),
            ],
            OptionSet::new(),
        );

        assert_eq!(measured_width(&group), 4);
    }

    #[test]
    fn test_largest_column_span_counts() {
        let group = PanelGroup::new(
            vec![unit(
                1,
                vec![Attribute::shorthand("c", "2"), Attribute::shorthand("c", "3")],
            )],
            OptionSet::new(),
        );

        assert_eq!(measured_width(&group), 3);
    }

    #[test]
    fn test_explicit_width_cascades() {
        let group = PanelGroup::new(vec![unit(5, Vec::new())], OptionSet::new());
        let document = OptionSet::resolve(&[Attribute::shorthand("w", "6")]);
        let layout = OptionSet::resolve(&[Attribute::shorthand("w", "2")]);

        let cascade = Cascade::new(&document);
        assert_eq!(resolve_width(&group, &cascade), 6);

        let cascade = cascade.descend(Level::Layout, &layout);
        assert_eq!(resolve_width(&group, &cascade), 2);
    }

    #[test]
    fn test_zero_width_is_ignored() {
        let group = PanelGroup::new(
            vec![unit(3, Vec::new())],
            OptionSet::resolve(&[Attribute::shorthand("w", "0")]),
        );
        let document = OptionSet::new();

        assert_eq!(resolve_width(&group, &Cascade::new(&document)), 3);
    }

    #[test]
    fn test_overflow_saturates() {
        let group = PanelGroup::new(
            vec![
                unit(u32::MAX, Vec::new()),
                Term::NextColumn,
                unit(u32::MAX, vec![Attribute::shorthand("c", "2")]),
            ],
            OptionSet::new(),
        );

        assert_eq!(measured_width(&group), u32::MAX);
    }
}
