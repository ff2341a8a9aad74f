//! HTML serialization of rendered blocks.
//!
//! Every block becomes a `<div>` whose `class` attribute starts with the
//! block kind followed by the block's option classes:
//!
//! ```text
//! <div class="gallery">
//!   <div class="spread">
//!     <div class="layout">
//!       <div class="panelgroup w2">
//!         <div class="panel">1</div>
//!         <div class="panel">2</div>
//!       </div>
//!     </div>
//!   </div>
//! </div>
//! ```

use std::{borrow::Cow, io::Write};

use log::debug;

use crate::{
    config::HtmlConfig,
    export::{Error, Exporter},
    render::{Block, BlockKind},
};

/// Writes blocks as indented HTML lines.
#[derive(Debug)]
pub struct HtmlExporter<'c, W> {
    writer: W,
    config: &'c HtmlConfig,
}

impl<'c, W: Write> HtmlExporter<'c, W> {
    pub fn new(writer: W, config: &'c HtmlConfig) -> Self {
        Self { writer, config }
    }

    /// Consume the exporter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, depth: usize, text: &str) -> Result<(), Error> {
        let indent = depth * self.config.indent();
        writeln!(self.writer, "{:indent$}{text}", "")?;
        Ok(())
    }

    fn open_tag(&self, block: &Block) -> String {
        let mut class = block.kind().class_name().to_string();
        for name in block.classes().class_names() {
            class.push(' ');
            class.push_str(&name);
        }

        let mut tag = format!("<div class=\"{}\"", escape(&class));
        if self.config.data_attributes() {
            for (key, value) in block.classes().exprs() {
                tag.push_str(&format!(" data-{}=\"{}\"", escape(key), escape(value)));
            }
        }
        tag.push('>');
        tag
    }

    fn block(&mut self, block: &Block, depth: usize) -> Result<(), Error> {
        match block.kind() {
            BlockKind::Panel => {
                let text = format!(
                    "{}{}</div>",
                    self.open_tag(block),
                    escape(block.label().unwrap_or_default())
                );
                self.line(depth, &text)
            }
            BlockKind::Figure => self.figure(block, depth),
            _ => {
                let link = block.link();
                if let Some(href) = link {
                    self.line(depth, &format!("<a href=\"{}\">", escape(href)))?;
                }

                let tag = self.open_tag(block);
                self.line(depth, &tag)?;
                for child in block.children() {
                    self.block(child, depth + 1)?;
                }
                if let Some(caption) = block.label() {
                    self.caption(caption, depth + 1)?;
                }
                self.line(depth, "</div>")?;

                if link.is_some() {
                    self.line(depth, "</a>")?;
                }
                Ok(())
            }
        }
    }

    fn figure(&mut self, block: &Block, depth: usize) -> Result<(), Error> {
        let tag = self.open_tag(block);
        self.line(depth, &tag)?;
        for image in block.images() {
            self.line(depth + 1, &format!("<img src=\"{}\"/>", escape(image)))?;
        }
        self.line(depth, "</div>")?;

        if let Some(caption) = block.label() {
            self.caption(caption, depth)?;
        }
        Ok(())
    }

    fn caption(&mut self, caption: &str, depth: usize) -> Result<(), Error> {
        self.line(
            depth,
            &format!("<div class=\"label bottom\">{}</div>", escape(caption)),
        )
    }
}

impl<W: Write> Exporter for HtmlExporter<'_, W> {
    fn export_blocks(&mut self, blocks: &[Block]) -> Result<(), Error> {
        debug!(galleries = blocks.len(); "Writing HTML");
        for block in blocks {
            self.block(block, 0)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Wrap raw source in `<pre><code>` for display in place of a render.
pub fn preformatted(source: &str) -> String {
    format!("<pre><code>{}</code></pre>\n", escape(source))
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, render::render};

    fn to_html(source: &str, config: &HtmlConfig) -> String {
        let document = panelcode_parser::parse(source).unwrap();
        let blocks = render(&document, &RenderConfig::default());

        let mut exporter = HtmlExporter::new(Vec::new(), config);
        exporter.export_blocks(&blocks).unwrap();
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn test_nested_divs() {
        let html = to_html("1x+1", &HtmlConfig::default());

        assert_eq!(
            html,
            "<div class=\"gallery\">\n\
             \x20 <div class=\"spread\">\n\
             \x20   <div class=\"layout\">\n\
             \x20     <div class=\"panelgroup w2\">\n\
             \x20       <div class=\"panel x\">*</div>\n\
             \x20       <div class=\"panel\">1</div>\n\
             \x20     </div>\n\
             \x20   </div>\n\
             \x20 </div>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_zero_indent() {
        let html = to_html("1", &HtmlConfig::new(0, false));

        assert!(html.lines().all(|line| !line.starts_with(' ')));
    }

    #[test]
    fn test_link_caption_and_figure() {
        let html = to_html(
            "1 {: url=example.com label='Tom & Jerry' img=a.png ilabel=Ref}",
            &HtmlConfig::new(0, false),
        );
        let lines: Vec<&str> = html.lines().collect();

        assert_eq!(lines[2], "<a href=\"http://example.com\">");
        assert_eq!(lines[3], "<div class=\"layout\">");
        assert!(lines.contains(&"<div class=\"img\">"));
        assert!(lines.contains(&"<img src=\"a.png\"/>"));
        assert!(lines.contains(&"<div class=\"label bottom\">Ref</div>"));
        assert!(lines.contains(&"<div class=\"label bottom\">Tom &amp; Jerry</div>"));
        assert!(lines.contains(&"</a>"));
    }

    #[test]
    fn test_data_attributes() {
        let html = to_html("1 {: label=Cover}", &HtmlConfig::new(2, true));

        assert!(html.contains("<div class=\"layout\" data-label=\"Cover\">"));

        let html = to_html("1 {: label=Cover}", &HtmlConfig::default());
        assert!(!html.contains("data-label"));
    }

    #[test]
    fn test_preformatted() {
        assert_eq!(
            preformatted("1 {: label=\"<b>\"}"),
            "<pre><code>1 {: label=&quot;&lt;b&gt;&quot;}</code></pre>\n"
        );
    }

    #[test]
    fn test_escape() {
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
        assert_eq!(
            escape("<a href='x'>&\"</a>"),
            "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;"
        );
    }
}
