//! SVG rendering of a component graph.
//!
//! Components are drawn where the definition placed them; there is no
//! layout step. The document's `viewBox` is the union of everything drawn
//! (rectangles, labels, pivot markers) padded by the configured margin.

mod component;

use std::{fmt, rc::Rc};

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use treehopper_core::{
    color::Color,
    draw::{
        ArrowDefinition, ArrowDrawer, LayeredOutput, PivotDefinition, RectangleDefinition,
        RenderLayer, StrokeDefinition, TextDefinition,
    },
    geometry::{Bounds, Insets, Point},
    semantic::Component,
};

use super::Error;
use crate::{config::StyleConfig, structure::ComponentGraph};

/// A connection as it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEdge {
    source: String,
    target: String,
    start: Point,
    end: Point,
}

impl RenderedEdge {
    /// Guid of the producing component.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Guid of the consuming component.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// A rendered SVG document and the edges drawn on it.
#[derive(Debug)]
pub struct Canvas {
    document: Document,
    edges: Vec<RenderedEdge>,
    bounds: Bounds,
}

impl Canvas {
    pub fn edges(&self) -> &[RenderedEdge] {
        &self.edges
    }

    /// Area covered by the `viewBox`, margin included.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

/// Draws components and their connections onto a [`Canvas`].
#[derive(Debug)]
pub struct SvgRenderer {
    background: Option<Color>,
    rectangle: RectangleDefinition,
    label: TextDefinition,
    pivot: Option<PivotDefinition>,
    arrow: Rc<ArrowDefinition>,
    arrow_drawer: ArrowDrawer,
    margin: f32,
}

impl SvgRenderer {
    /// Resolves every style option up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        let background = style.background_color().map_err(Error::Render)?;
        let fill = style.fill_color().map_err(Error::Render)?;
        let stroke = style.stroke_color().map_err(Error::Render)?;
        let edge = style.edge_color().map_err(Error::Render)?;

        let rectangle = RectangleDefinition::new(fill, StrokeDefinition::solid(stroke, 1.0));

        let mut label = TextDefinition::new();
        label.set_font_size(style.font_size());

        let pivot = style.show_pivot().then(PivotDefinition::default);
        let arrow = Rc::new(ArrowDefinition::new(StrokeDefinition::solid(edge, 1.0)));

        Ok(Self {
            background,
            rectangle,
            label,
            pivot,
            arrow,
            arrow_drawer: ArrowDrawer::new(),
            margin: style.margin(),
        })
    }

    /// Renders every component of `graph` and one arrow per connection.
    ///
    /// # Errors
    ///
    /// Fails only if the graph is inconsistent.
    pub fn render(mut self, graph: &ComponentGraph<'_>) -> Result<Canvas, crate::TreehopperError> {
        info!(
            components = graph.component_count(),
            connections = graph.connection_count();
            "Rendering SVG"
        );

        let mut output = LayeredOutput::new();
        let mut content: Option<Bounds> = None;

        for component in graph.components() {
            let (layers, bounds) = self.render_component(component);
            output.merge(layers);
            content = Some(content.map_or(bounds, |acc| acc.union(&bounds)));
        }

        let mut edges = Vec::with_capacity(graph.connection_count());
        for (source, target) in graph.connections()? {
            let (layers, edge) = self.render_connection(source, target);
            output.merge(layers);
            edges.push(edge);
        }

        let bounds = content
            .unwrap_or_default()
            .expand(Insets::uniform(self.margin));
        debug!(
            min_x = bounds.min_x(),
            min_y = bounds.min_y(),
            width = bounds.width(),
            height = bounds.height();
            "Canvas bounds"
        );

        if let Some(background) = self.background {
            output.add_to_layer(RenderLayer::Background, Self::background_node(bounds, background));
        }

        Ok(Canvas {
            document: self.build_document(output, bounds),
            edges,
            bounds,
        })
    }

    fn build_document(&self, output: LayeredOutput, bounds: Bounds) -> Document {
        let mut document = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if self.arrow_drawer.marker_count() > 0 {
            document = document.add(self.arrow_drawer.draw_marker_definitions());
        }

        for node in output.render() {
            document = document.add(node);
        }

        document
    }

    fn background_node(bounds: Bounds, color: Color) -> Box<dyn svg::Node> {
        Box::new(
            svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        )
    }
}

/// Renders `components` with `style`, inferring the connections between them.
///
/// # Errors
///
/// Returns an error if a configured color is invalid.
pub fn render(components: &[Component], style: &StyleConfig) -> Result<Canvas, crate::TreehopperError> {
    let graph = ComponentGraph::new(components);
    SvgRenderer::new(style)?.render(&graph)
}
