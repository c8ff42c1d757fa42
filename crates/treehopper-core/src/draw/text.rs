//! Text rendering definitions for component labels and pivot captions.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable, measurable text element
//!
//! Labels are rendered as SVG `<text>` elements with one `<tspan>` per line,
//! centered on the position they are drawn at. Sizes are measured with
//! `cosmic-text` so the canvas bounds account for label overflow.
//!
//! ```
//! # use treehopper_core::draw::{Text, TextDefinition};
//! let style = TextDefinition::new();
//! let label = Text::new(&style, "Guid: a1\nName: Add");
//! assert_eq!(label.line_count(), 2);
//! ```

use std::sync::{Mutex, MutexGuard, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Font and spacing shared by every label drawn with it.
///
/// Starts out as 12pt Arial with no fill override and no padding.
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Glyph fill; `None` keeps the SVG default of black.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Font size converted from points to pixels.
    fn pixel_size(&self) -> f32 {
        f32::from(self.font_size) * PX_PER_PT
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("Arial"),
            font_size: 12,
            color: None,
            padding: Insets::default(),
        }
    }
}

/// A piece of text bound to the style it is drawn with.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Measured extent of the glyphs plus the definition's padding.
    pub fn calculate_size(&self) -> Size {
        self.glyph_extent().padded(self.definition.padding())
    }

    fn glyph_extent(&self) -> Size {
        measure(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let extent = self.glyph_extent();
        let line_height = match self.line_count() {
            0 => 0.0,
            lines => extent.height() / lines as f32,
        };
        // Each tspan moves down by `dy` before drawing, so the baseline of
        // the first line starts one line above the top of the block.
        let top = position.y() - (extent.height() + line_height) / 2.0;

        let mut element = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", top)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            element = element
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        let element = self.content.lines().fold(element, |element, line| {
            element.add(
                svg_element::TSpan::new("")
                    .set("x", position.x())
                    .set("dy", line_height)
                    .add(SvgText::new(line)),
            )
        });

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(element));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

const PX_PER_PT: f32 = 1.33;
const LINE_SPACING: f32 = 1.15;
/// Average glyph advance relative to the pixel size, used without fonts.
const FALLBACK_ADVANCE: f32 = 0.55;

static FONTS: OnceLock<Mutex<FontSystem>> = OnceLock::new();

fn fonts() -> MutexGuard<'static, FontSystem> {
    let fonts = FONTS.get_or_init(|| {
        info!("Loading system fonts for text measurement");
        Mutex::new(FontSystem::new())
    });
    fonts.lock().unwrap_or_else(|poisoned| {
        warn!("Font system lock was poisoned, continuing with its state");
        poisoned.into_inner()
    })
}

/// Shapes `text` with cosmic-text and returns its pixel extent.
fn measure(text: &str, definition: &TextDefinition) -> Size {
    if text.is_empty() {
        return Size::default();
    }

    let px = definition.pixel_size();
    let metrics = Metrics::new(px, px * LINE_SPACING);

    let mut fonts = fonts();
    let mut buffer = Buffer::new(&mut fonts, metrics);
    let mut buffer = buffer.borrow_with(&mut fonts);
    buffer.set_size(None, None);
    buffer.set_text(
        text,
        &Attrs::new().family(Family::Name(definition.font_family())),
        Shaping::Advanced,
        None,
    );
    buffer.shape_until_scroll(true);

    let (width, runs) = buffer
        .layout_runs()
        .fold((None::<f32>, 0usize), |(width, runs), run| {
            let right = run.glyphs.last().map(|glyph| glyph.x + glyph.w);
            let width = match (width, right) {
                (Some(w), Some(r)) => Some(w.max(r)),
                (w, r) => w.or(r),
            };
            (width, runs + 1)
        });

    match width {
        Some(width) => Size::new(width, runs as f32 * metrics.line_height),
        None => estimate(text, px, metrics.line_height),
    }
}

/// Size guess for hosts where no font produced any glyphs.
fn estimate(text: &str, px: f32, line_height: f32) -> Size {
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    Size::new(
        widest as f32 * px * FALLBACK_ADVANCE,
        lines as f32 * line_height,
    )
}
