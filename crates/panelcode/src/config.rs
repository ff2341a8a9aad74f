//! Configuration types for Panelcode rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so a partial file (or none at all)
//! is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and HTML settings.
//! - [`RenderConfig`] - Fallbacks used while building the block tree.
//! - [`HtmlConfig`] - Formatting of the HTML serialization.
//!
//! # Example
//!
//! ```
//! # use panelcode::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().blank_label(), "*");
//! assert_eq!(config.html().indent(), 2);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// HTML configuration section.
    #[serde(default)]
    html: HtmlConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, html: HtmlConfig) -> Self {
        Self { render, html }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the HTML configuration.
    pub fn html(&self) -> &HtmlConfig {
        &self.html
    }
}

/// Fallback values used by the grid renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix for layout images when no `imgpath` option is in scope.
    image_path: String,

    /// Label written on blank panels.
    blank_label: String,

    /// Scheme prepended to `url` values that have none.
    link_scheme: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            blank_label: "*".to_string(),
            link_scheme: "http://".to_string(),
        }
    }
}

impl RenderConfig {
    /// Set the fallback image prefix.
    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    /// Set the label written on blank panels.
    pub fn with_blank_label(mut self, blank_label: impl Into<String>) -> Self {
        self.blank_label = blank_label.into();
        self
    }

    /// Set the scheme prepended to bare `url` values.
    pub fn with_link_scheme(mut self, link_scheme: impl Into<String>) -> Self {
        self.link_scheme = link_scheme.into();
        self
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn blank_label(&self) -> &str {
        &self.blank_label
    }

    pub fn link_scheme(&self) -> &str {
        &self.link_scheme
    }
}

/// Formatting options for [`export::html`](crate::export::html).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Spaces per nesting level.
    indent: usize,

    /// Serialize `key=value` options as `data-key="value"` attributes.
    data_attributes: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            data_attributes: false,
        }
    }
}

impl HtmlConfig {
    /// Creates a new [`HtmlConfig`].
    ///
    /// # Arguments
    ///
    /// * `indent` - Spaces per nesting level; `0` writes every line flush left.
    /// * `data_attributes` - Whether to emit `data-*` attributes for expressions.
    pub fn new(indent: usize, data_attributes: bool) -> Self {
        Self {
            indent,
            data_attributes,
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn data_attributes(&self) -> bool {
        self.data_attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [render]
            image_path = "scans/"

            [html]
            data_attributes = true
            "#,
        )
        .unwrap();

        assert_eq!(config.render().image_path(), "scans/");
        assert_eq!(config.render().blank_label(), "*");
        assert_eq!(config.render().link_scheme(), "http://");
        assert_eq!(config.html().indent(), 2);
        assert!(config.html().data_attributes());
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let config: Result<AppConfig, _> = toml::from_str("[render]\nfoo = 1\n");

        assert!(config.is_ok());
    }

    #[test]
    fn test_render_builder_methods() {
        let render = RenderConfig::default()
            .with_image_path("img/")
            .with_blank_label("-")
            .with_link_scheme("https://");

        assert_eq!(render.image_path(), "img/");
        assert_eq!(render.blank_label(), "-");
        assert_eq!(render.link_scheme(), "https://");
    }
}
