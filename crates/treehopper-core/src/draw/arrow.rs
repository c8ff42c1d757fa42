//! Connection edges with arrowheads.
//!
//! An edge is a straight `<path>` ending in a `marker-end` arrowhead. Every
//! edge color needs its own `<marker>` because the head is filled with the
//! edge's color, so [`ArrowDrawer`] remembers the colors it has drawn and
//! emits their markers once, in a single `<defs>` block.

use std::{collections::BTreeMap, rc::Rc};

use svg::node::element::{Definitions, Marker, Path};

use crate::{color::Color, draw::StrokeDefinition, geometry::Point};

/// Stroke shared by every edge of a diagram.
#[derive(Debug, Clone, Default)]
pub struct ArrowDefinition {
    stroke: StrokeDefinition,
}

impl ArrowDefinition {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self { stroke }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// One edge; cheap to create since the definition is shared.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
}

impl Arrow {
    pub fn new(definition: Rc<ArrowDefinition>) -> Self {
        Self { definition }
    }

    fn color(&self) -> Color {
        self.definition.stroke().color()
    }

    /// Path data of a straight segment, `M x1 y1 L x2 y2`.
    pub fn path_data(start: Point, end: Point) -> String {
        format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
    }
}

fn marker_id(color: Color) -> String {
    format!("arrow-right-{}", color.to_id_safe_string())
}

/// Filled triangle pointing along +x in a 10x10 box, tip on the path end.
fn arrowhead(color: Color) -> Marker {
    let head = Path::new()
        .set("d", "M 0 0 L 10 5 L 0 10 z")
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha());

    [
        ("viewBox", "0 0 10 10"),
        ("refX", "9"),
        ("refY", "5"),
        ("markerWidth", "6"),
        ("markerHeight", "6"),
        ("orient", "auto"),
    ]
    .into_iter()
    .fold(Marker::new().set("id", marker_id(color)), |marker, (name, value)| {
        marker.set(name, value)
    })
    .add(head)
}

/// Draws edges and keeps the arrowheads they point at.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    /// Keyed by marker id so `<defs>` come out in a stable order.
    heads: BTreeMap<String, Color>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_arrow(&mut self, arrow: &Arrow, from: Point, to: Point) -> Box<dyn svg::Node> {
        let color = arrow.color();
        let id = marker_id(color);

        let path = Path::new()
            .set("d", Arrow::path_data(from, to))
            .set("fill", "none");
        let path = arrow
            .definition
            .stroke()
            .paint(path)
            .set("marker-end", format!("url(#{id})"));

        self.heads.entry(id).or_insert(color);
        Box::new(path)
    }

    /// `<defs>` holding one arrowhead per color drawn so far.
    pub fn draw_marker_definitions(&self) -> Box<dyn svg::Node> {
        let defs = self
            .heads
            .values()
            .fold(Definitions::new(), |defs, color| defs.add(arrowhead(*color)));
        Box::new(defs)
    }

    pub fn marker_count(&self) -> usize {
        self.heads.len()
    }
}
