//! Panelcode - a notation for comic page layouts.
//!
//! Parsing and rendering for the Panelcode notation. A string such as
//! `2c2,3 | 1+1_3` describes galleries, spreads, layouts, panel groups and
//! panels; this crate turns it into nested CSS grid markup.

pub mod config;
pub mod export;
pub mod geometry;
pub mod render;

mod error;

pub use panelcode_core::{attribute, cascade, level, model, options};

pub use error::PanelcodeError;
pub use render::{Block, BlockKind, render};

use log::{debug, info, trace, warn};

use config::AppConfig;
use export::{Exporter, html::HtmlExporter};
use model::Document;

/// Builder for parsing and rendering Panelcode documents.
///
/// This provides an API for processing Panelcode notation through parsing,
/// rendering, and HTML export stages.
///
/// # Examples
///
/// ```rust
/// use panelcode::{PanelcodeBuilder, config::AppConfig};
///
/// let source = "1x+2 | 3 {: autolabel }";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = PanelcodeBuilder::new(config);
///
/// // Parse source to a document
/// let document = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the document to HTML
/// let html = builder.render_html(&document)
///     .expect("Failed to render");
/// assert!(html.contains("<div class=\"panel x\">*</div>"));
///
/// // Or use default config
/// let builder = PanelcodeBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct PanelcodeBuilder {
    config: AppConfig,
}

impl PanelcodeBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including render and HTML settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse comment-free source into a document.
    ///
    /// # Arguments
    ///
    /// * `source` - Panelcode notation as a string
    ///
    /// # Errors
    ///
    /// Returns [`PanelcodeError::Parse`] carrying the source for syntax errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelcode::PanelcodeBuilder;
    ///
    /// let builder = PanelcodeBuilder::default();
    /// let document = builder.parse("2c2,3")
    ///     .expect("Failed to parse document");
    /// assert_eq!(document.summary().units, 2);
    ///
    /// let err = builder.parse("2c2,").unwrap_err();
    /// assert_eq!(err.position(), Some(4));
    /// ```
    pub fn parse(&self, source: &str) -> Result<Document, PanelcodeError> {
        info!("Parsing document");

        let document = panelcode_parser::parse(source)
            .map_err(|err| PanelcodeError::new_parse_error(err, source))?;

        debug!("Document parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Render a document into blocks.
    pub fn render(&self, document: &Document) -> Vec<Block> {
        render::render(document, self.config.render())
    }

    /// Render a document to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`PanelcodeError::Export`] if serialization fails.
    pub fn render_html(&self, document: &Document) -> Result<String, PanelcodeError> {
        info!(galleries = document.galleries().len(); "Rendering document");
        let blocks = self.render(document);

        let mut exporter = HtmlExporter::new(Vec::new(), self.config.html());
        exporter.export_blocks(&blocks)?;

        let html = String::from_utf8(exporter.into_inner())
            .map_err(|err| export::Error::Render(err.to_string()))?;

        info!(bytes = html.len(); "HTML rendered successfully");
        Ok(html)
    }

    /// Parse and render in one step, degrading to the escaped source on a
    /// syntax error.
    ///
    /// The fallback is the source wrapped in `<pre><code>`, so a page with a
    /// malformed layout still shows what was written.
    ///
    /// # Errors
    ///
    /// Syntax errors never fail; only [`PanelcodeError::Export`] is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelcode::PanelcodeBuilder;
    ///
    /// let builder = PanelcodeBuilder::default();
    /// let html = builder.render_html_lenient("1 + <2").unwrap();
    /// assert_eq!(html, "<pre><code>1 + &lt;2</code></pre>\n");
    /// ```
    pub fn render_html_lenient(&self, source: &str) -> Result<String, PanelcodeError> {
        match self.parse(source) {
            Ok(document) => self.render_html(&document),
            Err(PanelcodeError::Parse { err, .. }) => {
                warn!(err:%; "Passing source through unrendered");
                Ok(export::html::preformatted(source))
            }
            Err(err) => Err(err),
        }
    }
}
