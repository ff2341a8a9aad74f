//! Grid rendering.
//!
//! [`render`] walks a parsed [`Document`] in document order and produces a
//! tree of [`Block`]s mirroring the nested CSS grid markup: galleries hold
//! spreads, spreads hold layouts, layouts hold panel groups, and panel groups
//! hold numbered panels.
//!
//! Panel numbering restarts in every layout. Blank panels (`x`, `z` or a
//! literal `0`) consume a slot without consuming a number, and merged panels
//! (`u<N>`) consume `N` numbers in one slot:
//!
//! ```
//! # use panelcode::{config::RenderConfig, render::{render, BlockKind}};
//! let document = panelcode_parser::parse("1x+2|1u3+1").unwrap();
//! let blocks = render(&document, &RenderConfig::default());
//!
//! assert_eq!(blocks[0].panel_labels(), vec!["*", "1", "2", "1-3", "4"]);
//! assert_eq!(blocks[0].count(BlockKind::Layout), 2);
//! ```

use std::{fmt, path::Path};

use log::{debug, trace};

use panelcode_core::{
    cascade::Cascade,
    level::Level,
    model::{Document, Gallery, Layout, PanelGroup, Spread, Unit},
    options::OptionSet,
};

use crate::{config::RenderConfig, geometry};

/// The kind of element a [`Block`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Gallery,
    Spread,
    Layout,
    PanelGroup,
    Panel,
    /// The image layer of a layout.
    Figure,
}

impl BlockKind {
    /// The CSS class every block of this kind carries.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Spread => "spread",
            Self::Layout => "layout",
            Self::PanelGroup => "panelgroup",
            Self::Panel => "panel",
            Self::Figure => "img",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    classes: OptionSet,
    label: Option<String>,
    link: Option<String>,
    images: Vec<String>,
    children: Vec<Block>,
}

impl Block {
    fn new(kind: BlockKind, classes: OptionSet) -> Self {
        Self {
            kind,
            classes,
            label: None,
            link: None,
            images: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// The options written as classes (and, optionally, data attributes).
    pub fn classes(&self) -> &OptionSet {
        &self.classes
    }

    /// Panel number, layout caption or image caption.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Link target of a layout.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Image sources of a figure.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    /// Count the blocks of `kind` in this subtree, this block included.
    pub fn count(&self, kind: BlockKind) -> usize {
        let own = usize::from(self.kind == kind);
        own + self
            .children
            .iter()
            .map(|child| child.count(kind))
            .sum::<usize>()
    }

    /// Labels of all panels in this subtree, in document order.
    pub fn panel_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.collect_panel_labels(&mut labels);
        labels
    }

    fn collect_panel_labels<'a>(&'a self, labels: &mut Vec<&'a str>) {
        if self.kind == BlockKind::Panel {
            labels.push(self.label.as_deref().unwrap_or_default());
        }
        for child in &self.children {
            child.collect_panel_labels(labels);
        }
    }
}

/// Render a document into one block per gallery.
pub fn render(document: &Document, config: &RenderConfig) -> Vec<Block> {
    let renderer = Renderer { config };
    let cascade = Cascade::new(document.options());

    let galleries: Vec<Block> = document
        .galleries()
        .iter()
        .map(|gallery| renderer.gallery(document.options(), gallery, cascade))
        .collect();

    debug!(
        galleries = galleries.len(),
        panels = galleries.iter().map(|g| g.count(BlockKind::Panel)).sum::<usize>();
        "Document rendered"
    );
    galleries
}

/// Running panel numbers of one layout.
#[derive(Debug, Default)]
struct Numbering {
    counter: u32,
    skip: u32,
}

impl Numbering {
    /// A blank slot: takes a position but no number.
    fn blank(&mut self) {
        self.counter = self.counter.saturating_add(1);
        self.skip = self.skip.saturating_add(1);
    }

    fn next(&mut self) -> String {
        self.counter = self.counter.saturating_add(1);
        self.counter.saturating_sub(self.skip).to_string()
    }

    /// A merged slot covering `span` numbers.
    fn range(&mut self, span: u32) -> String {
        let start = self.counter.saturating_add(1).saturating_sub(self.skip);
        let end = self.counter.saturating_add(span).saturating_sub(self.skip);
        self.counter = self.counter.saturating_add(span);
        format!("{start}-{end}")
    }
}

struct Renderer<'c> {
    config: &'c RenderConfig,
}

impl Renderer<'_> {
    fn gallery(&self, document: &OptionSet, gallery: &Gallery, cascade: Cascade<'_>) -> Block {
        let cascade = cascade.descend(Level::Gallery, gallery.options());
        let mut ordinal = 0;

        let spreads = gallery
            .spreads()
            .iter()
            .map(|spread| self.spread(spread, cascade, &mut ordinal))
            .collect();

        Block::new(
            BlockKind::Gallery,
            OptionSet::layered(document, gallery.options()),
        )
        .with_children(spreads)
    }

    fn spread(&self, spread: &Spread, cascade: Cascade<'_>, ordinal: &mut usize) -> Block {
        let cascade = cascade.descend(Level::Spread, spread.options());

        let mut layouts = Vec::new();
        for layout in spread.layouts() {
            *ordinal += 1;
            layouts.extend(self.layout(layout, cascade, *ordinal));
        }

        Block::new(BlockKind::Spread, spread.options().clone()).with_children(layouts)
    }

    /// Render a layout together with any detached image layers.
    fn layout(&self, layout: &Layout, cascade: Cascade<'_>, ordinal: usize) -> Vec<Block> {
        let cascade = cascade.descend(Level::Layout, layout.options());
        let options = layout.options();

        let mut numbering = Numbering::default();
        let mut children: Vec<Block> = layout
            .panel_groups()
            .iter()
            .map(|group| self.panel_group(group, cascade, &mut numbering))
            .collect();

        let images = self.images(options, &cascade);
        let figure = (!images.is_empty()).then(|| {
            let caption = options.expr("ilabel").map(str::to_string).or_else(|| {
                cascade
                    .has_word("autoilabel")
                    .then(|| images.first().and_then(|image| file_stem(image)))
                    .flatten()
            });
            Block {
                images: images.clone(),
                ..Block::new(BlockKind::Figure, OptionSet::new())
            }
            .with_label(caption)
        });

        let caption = options.expr("label").map(str::to_string).or_else(|| {
            cascade.has_word("autolabel").then(|| {
                images
                    .first()
                    .and_then(|image| file_stem(image))
                    .unwrap_or_else(|| ordinal.to_string())
            })
        });
        let link = options.expr("url").map(|url| self.link(url));

        let before = cascade.has_word("ibefore");
        let after = cascade.has_word("iafter");
        let detached = figure.as_ref().filter(|_| before || after);
        if detached.is_none() {
            children.extend(figure.clone());
        }

        trace!(
            ordinal = ordinal,
            panels = numbering.counter,
            images = images.len();
            "Layout rendered"
        );

        let main = Block {
            link,
            ..Block::new(BlockKind::Layout, options.clone())
        }
        .with_label(caption)
        .with_children(children);

        let image_layer = |figure: &Block| {
            Block::new(BlockKind::Layout, options.clone()).with_children(vec![figure.clone()])
        };

        let mut blocks = Vec::new();
        if let Some(figure) = detached.filter(|_| before) {
            blocks.push(image_layer(figure));
        }
        blocks.push(main);
        if let Some(figure) = detached.filter(|_| after) {
            blocks.push(image_layer(figure));
        }
        blocks
    }

    fn panel_group(
        &self,
        group: &PanelGroup,
        cascade: Cascade<'_>,
        numbering: &mut Numbering,
    ) -> Block {
        let mut classes = group.options().clone();
        classes.set_shorthand('w', geometry::resolve_width(group, &cascade));

        let mut panels = Vec::new();
        for unit in group.units() {
            self.unit(unit, numbering, &mut panels);
        }

        Block::new(BlockKind::PanelGroup, classes).with_children(panels)
    }

    /// Expand a unit into its panels.
    fn unit(&self, unit: &Unit, numbering: &mut Numbering, panels: &mut Vec<Block>) {
        let classes = panel_classes(unit);

        for _ in 0..unit.panel_count() {
            let label = if unit.is_blank() {
                None
            } else if unit.is_merged() {
                match unit.merge_count() {
                    0 => None,
                    1 => Some(numbering.next()),
                    span => Some(numbering.range(span)),
                }
            } else {
                Some(numbering.next())
            };

            let label = label.unwrap_or_else(|| {
                numbering.blank();
                self.config.blank_label().to_string()
            });
            panels.push(Block::new(BlockKind::Panel, classes.clone()).with_label(Some(label)));
        }
    }

    /// Image sources of a layout, each prefixed with the image path in scope.
    fn images(&self, options: &OptionSet, cascade: &Cascade<'_>) -> Vec<String> {
        let prefix = cascade
            .expr("imgpath")
            .unwrap_or_else(|| self.config.image_path());

        options
            .expr("img")
            .map(|value| {
                value
                    .split(':')
                    .map(str::trim)
                    .filter(|image| !image.is_empty())
                    .map(|image| format!("{prefix}{image}"))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn link(&self, url: &str) -> String {
        if url.contains("://") {
            url.to_string()
        } else {
            format!("{}{url}", self.config.link_scheme())
        }
    }
}

/// Classes of each panel rendered from `unit`.
///
/// A literal `0` count is marked blank; merged units always carry both the
/// bare `u` and the `u<N>` class.
fn panel_classes(unit: &Unit) -> OptionSet {
    let mut classes = OptionSet::resolve(unit.attributes());
    if unit.is_spacer_count() {
        classes.add_word("x");
    }
    if unit.is_merged() {
        classes.add_word("u");
        classes.set_shorthand('u', unit.merge_count());
    }
    classes
}

fn file_stem(image: &str) -> Option<String> {
    Path::new(image)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_source(source: &str) -> Vec<Block> {
        let document = panelcode_parser::parse(source).unwrap();
        render(&document, &RenderConfig::default())
    }

    fn labels(source: &str) -> Vec<String> {
        render_source(source)
            .iter()
            .flat_map(|block| block.panel_labels())
            .map(str::to_string)
            .collect()
    }

    /// The blocks of the first spread.
    fn layouts(source: &str) -> Vec<Block> {
        render_source(source)[0].children()[0].children().to_vec()
    }

    #[test]
    fn test_running_numbers() {
        assert_eq!(labels("3"), vec!["1", "2", "3"]);
        assert_eq!(labels("1+2,1"), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_blank_panels_skip_numbers() {
        assert_eq!(labels("1x+2"), vec!["*", "1", "2"]);
        assert_eq!(labels("1+2z+1"), vec!["1", "*", "*", "2"]);
        assert_eq!(labels("0+1"), vec!["*", "1"]);
    }

    #[test]
    fn test_merged_panels() {
        assert_eq!(labels("1u3+1"), vec!["1-3", "4"]);
        assert_eq!(labels("2u2+1"), vec!["1-2", "3-4", "5"]);
        assert_eq!(labels("1x+u3"), vec!["*", "1-3"]);
        assert_eq!(labels("u+1"), vec!["1", "2"]);
        assert_eq!(labels("u0+1"), vec!["*", "1"]);
        assert_eq!(labels("u.u3"), vec!["1-3"]);
    }

    #[test]
    fn test_numbering_restarts_per_layout() {
        assert_eq!(labels("2_2|1"), vec!["1", "2", "3", "4", "1"]);
    }

    #[test]
    fn test_panel_classes() {
        let blocks = layouts("0+u+1u3+1c2");
        let panels = blocks[0].children()[0].children();

        assert!(panels[0].classes().has_word("x"));
        assert!(panels[1].classes().has_word("u"));
        assert_eq!(panels[1].classes().numeric('u'), Some(1));
        assert!(panels[2].classes().has_word("u"));
        assert_eq!(panels[2].classes().numeric('u'), Some(3));
        assert_eq!(panels[3].classes().class_names(), vec!["c2"]);
    }

    #[test]
    fn test_panel_group_width_class() {
        let blocks = layouts("2c2,3 _ 1 {w6}");
        let groups = blocks[0].children();

        assert_eq!(groups[0].classes().numeric('w'), Some(4));
        assert_eq!(groups[1].classes().numeric('w'), Some(6));
    }

    #[test]
    fn test_gallery_classes_include_document_options() {
        let blocks = render_source("1 {::: dark} @ 1 {:::: a4}");

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].classes().has_word("dark"));
        assert!(blocks[0].classes().has_word("a4"));
        assert!(!blocks[1].classes().has_word("dark"));
        assert!(blocks[1].classes().has_word("a4"));
    }

    #[test]
    fn test_layout_label_and_link() {
        let blocks = layouts("1 {: label='Splash page' url=example.com/1}");

        assert_eq!(blocks[0].label(), Some("Splash page"));
        assert_eq!(blocks[0].link(), Some("http://example.com/1"));

        let blocks = layouts("1 {: url='https://example.com'}");
        assert_eq!(blocks[0].link(), Some("https://example.com"));
    }

    #[test]
    fn test_autolabel_uses_ordinal_per_gallery() {
        let blocks = render_source("1|1|1 {:: autolabel} @ 1 {:::: autolabel}");
        let first: Vec<Option<&str>> = blocks[0]
            .children()
            .iter()
            .flat_map(|spread| spread.children())
            .map(Block::label)
            .collect();

        assert_eq!(first, vec![Some("1"), Some("2"), Some("3")]);
        assert_eq!(blocks[1].children()[0].children()[0].label(), Some("1"));
    }

    #[test]
    fn test_explicit_label_beats_autolabel() {
        let blocks = layouts("1 {: label=Cover} {:::: autolabel}");

        assert_eq!(blocks[0].label(), Some("Cover"));
    }

    #[test]
    fn test_figure_inside_layout() {
        let blocks = layouts("1 {: img='p1.png : p2.png' autolabel autoilabel} {:::: imgpath=scans/}");
        let layout = &blocks[0];
        let figure = layout.children().last().unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(figure.kind(), BlockKind::Figure);
        assert_eq!(figure.images(), &["scans/p1.png", "scans/p2.png"]);
        assert_eq!(figure.label(), Some("p1"));
        assert_eq!(layout.label(), Some("p1"));
    }

    #[test]
    fn test_image_path_fallback() {
        let document = panelcode_parser::parse("1 {: img=p1.png ilabel=Ref}").unwrap();
        let config = RenderConfig::default().with_image_path("assets/");
        let blocks = render(&document, &config);
        let figure = blocks[0].children()[0].children()[0].children().last().unwrap();

        assert_eq!(figure.images(), &["assets/p1.png"]);
        assert_eq!(figure.label(), Some("Ref"));
    }

    #[test]
    fn test_detached_image_layers() {
        let blocks = layouts("2 {: img=ref.png ibefore iafter}");

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].children()[0].kind(), BlockKind::Figure);
        assert_eq!(blocks[1].count(BlockKind::Figure), 0);
        assert_eq!(blocks[1].count(BlockKind::Panel), 2);
        assert_eq!(blocks[2].children()[0].kind(), BlockKind::Figure);
    }

    #[test]
    fn test_image_layers_do_not_change_numbering() {
        assert_eq!(labels("2 {: img=ref.png ibefore}"), labels("2"));
    }

    #[test]
    fn test_custom_blank_label() {
        let document = panelcode_parser::parse("1x+1").unwrap();
        let config = RenderConfig::default().with_blank_label("-");
        let blocks = render(&document, &config);

        assert_eq!(blocks[0].panel_labels(), vec!["-", "1"]);
    }

    #[test]
    fn test_block_counts() {
        let blocks = render_source("1+2_3|1;1");

        assert_eq!(blocks[0].count(BlockKind::Gallery), 1);
        assert_eq!(blocks[0].count(BlockKind::Spread), 2);
        assert_eq!(blocks[0].count(BlockKind::Layout), 3);
        assert_eq!(blocks[0].count(BlockKind::PanelGroup), 4);
        assert_eq!(blocks[0].count(BlockKind::Panel), 8);
    }
}
