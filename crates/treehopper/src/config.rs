//! Configuration types for Treehopper.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from
//! TOML. Every field is optional and falls back to the renderer defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining extraction and style settings.
//! - [`ExtractConfig`] - Controls how component records are read.
//! - [`StyleConfig`] - Controls colors, label size, pivot markers and margin.
//!
//! # Example
//!
//! ```
//! # use treehopper::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().show_pivot());
//! assert!(config.style().fill_color().is_ok());
//! ```

use serde::Deserialize;

use treehopper_core::color::Color;

pub use treehopper_parser::{ExtractConfig, OutputRule};

const DEFAULT_FILL_COLOR: &str = "lightblue";
const DEFAULT_STROKE_COLOR: &str = "black";
const DEFAULT_EDGE_COLOR: &str = "black";
const DEFAULT_FONT_SIZE: u16 = 12;
const DEFAULT_MARGIN: f32 = 20.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extract: ExtractConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(extract: ExtractConfig, style: StyleConfig) -> Self {
        Self { extract, style }
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings and parsed when the diagram is rendered, so
/// an invalid color surfaces as a render error rather than a load error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    fill_color: String,
    stroke_color: String,
    edge_color: String,
    font_size: u16,
    show_pivot: bool,
    margin: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            edge_color: DEFAULT_EDGE_COLOR.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            show_pivot: true,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Fill of the component rectangles.
    pub fn fill_color(&self) -> Result<Color, String> {
        parse_color("fill", &self.fill_color)
    }

    /// Outline of the component rectangles.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color("stroke", &self.stroke_color)
    }

    /// Color of connection lines and their arrowheads.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge", &self.edge_color)
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn show_pivot(&self) -> bool {
        self.show_pivot
    }

    /// Space added around the content on every side.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn set_background_color(&mut self, color: Option<&str>) {
        self.background_color = color.map(str::to_string);
    }

    pub fn set_fill_color(&mut self, color: &str) {
        self.fill_color = color.to_string();
    }

    pub fn set_edge_color(&mut self, color: &str) {
        self.edge_color = color.to_string();
    }

    pub fn set_show_pivot(&mut self, show: bool) {
        self.show_pivot = show;
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} color in config: {err}"))
}
