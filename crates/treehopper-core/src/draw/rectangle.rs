//! Filled rectangle used as the body of a component.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Fill and outline shared by all component rectangles.
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    fill_color: Color,
    stroke: StrokeDefinition,
}

impl RectangleDefinition {
    pub fn new(fill_color: Color, stroke: StrokeDefinition) -> Self {
        Self { fill_color, stroke }
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self {
            fill_color: Color::new("lightblue").expect("'lightblue' is a valid CSS color"),
            stroke: StrokeDefinition::default(),
        }
    }
}

/// A rectangle of a fixed size.
///
/// ```
/// # use treehopper_core::draw::{Drawable, Rectangle, RectangleDefinition};
/// # use treehopper_core::geometry::{Point, Size};
/// let definition = RectangleDefinition::default();
/// let rect = Rectangle::new(&definition, Size::new(100.0, 50.0));
///
/// let bounds = rect.bounds_at(Point::new(50.0, 25.0));
/// assert_eq!(bounds.min_x(), 0.0);
/// assert_eq!(bounds.max_y(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct Rectangle<'a> {
    definition: &'a RectangleDefinition,
    size: Size,
}

impl<'a> Rectangle<'a> {
    pub fn new(definition: &'a RectangleDefinition, size: Size) -> Self {
        Self { definition, size }
    }
}

impl Drawable for Rectangle<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let top_left = self.bounds_at(position).top_left();
        let fill = self.definition.fill_color();

        let rect = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());
        let rect = self.definition.stroke().paint(rect);

        output.add_to_layer(RenderLayer::Content, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lightblue_with_black_outline() {
        let definition = RectangleDefinition::default();
        assert_eq!(definition.fill_color().to_string(), "lightblue");
        assert_eq!(definition.stroke().color().to_string(), "black");
        assert_eq!(definition.stroke().width(), 1.0);
    }

    #[test]
    fn renders_top_left_from_center() {
        let definition = RectangleDefinition::default();
        let rect = Rectangle::new(&definition, Size::new(100.0, 50.0));

        let nodes = rect.render_to_layers(Point::new(250.0, 25.0)).render();
        assert_eq!(nodes.len(), 1);

        let svg = nodes[0].to_string();
        assert!(svg.contains(r#"data-layer="content""#));
        assert!(svg.contains(r#"x="200""#));
        assert!(svg.contains(r#"y="0""#));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"fill="lightblue""#));
        assert!(svg.contains(r#"stroke="black""#));
    }

    #[test]
    fn custom_fill_is_used() {
        let mut definition = RectangleDefinition::default();
        definition.set_fill_color(Color::new("orange").unwrap());
        let rect = Rectangle::new(&definition, Size::new(10.0, 10.0));

        let svg = rect.render_to_layers(Point::default()).render()[0].to_string();
        assert!(svg.contains(r#"fill="orange""#));
    }
}
