//! Outline styling shared by component boxes, edges and pivot crosses.

use svg::Node;

use crate::color::Color;

/// Color and width of a solid outline.
///
/// ```
/// use svg::node::element::Line;
/// use treehopper_core::{color::Color, draw::StrokeDefinition};
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = stroke.paint(Line::new());
/// assert!(line.to_string().contains(r#"stroke-width="2""#));
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Writes the `stroke*` presentation attributes onto `node`.
    pub fn paint<N: Node>(&self, mut node: N) -> N {
        node.assign("stroke", self.color.to_string());
        node.assign("stroke-opacity", self.color.alpha());
        node.assign("stroke-width", self.width);
        node
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn default_is_thin_black_line() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
    }

    #[test]
    fn solid_paint_has_no_dasharray() {
        let stroke = StrokeDefinition::solid(Color::new("blue").unwrap(), 3.0);
        let rendered = stroke.paint(Rectangle::new()).to_string();

        assert!(rendered.contains(r#"stroke="blue""#));
        assert!(rendered.contains(r#"stroke-width="3""#));
        assert!(!rendered.contains("stroke-dasharray"));
    }
}
