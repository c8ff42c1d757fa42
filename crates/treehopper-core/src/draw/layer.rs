//! Z-ordering for SVG output.
//!
//! Drawables never write into the document themselves. They hand back a
//! [`LayeredOutput`] and the renderer flattens it into one
//! `<g data-layer="...">` per [`RenderLayer`], so a label added before a
//! rectangle still paints on top of it:
//!
//! ```
//! # use treehopper_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Guid: a")));
//! output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
//!
//! assert_eq!(output.layers(), vec![RenderLayer::Content, RenderLayer::Text]);
//! assert_eq!(output.render().len(), 2);
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

pub type SvgNode = Box<dyn svg::Node>;

/// Paint order of the diagram, first variant at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    /// Component rectangles.
    Content,
    /// Connection edges.
    Arrow,
    Pivot,
    /// Labels and pivot captions.
    Text,
}

impl RenderLayer {
    /// Value of the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Pivot => "pivot",
            Self::Text => "text",
        }
    }
}

/// Nodes waiting to be painted, bucketed by layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    buckets: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.buckets.entry(layer).or_default().push(node);
    }

    /// Appends `other`'s nodes after this output's nodes, layer by layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.buckets {
            self.buckets.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Layers holding at least one node, bottom first.
    pub fn layers(&self) -> Vec<RenderLayer> {
        self.buckets.keys().copied().collect()
    }

    /// One `<g data-layer="...">` per non-empty layer, bottom first.
    pub fn render(self) -> Vec<SvgNode> {
        self.buckets
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes
                    .into_iter()
                    .fold(Group::new().set("data-layer", layer.name()), Group::add);
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
