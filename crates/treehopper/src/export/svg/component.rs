//! SVG rendering for single components and connections.

use std::rc::Rc;

use treehopper_core::{
    draw::{Arrow, Drawable, LayeredOutput, PivotMarker, Rectangle, RenderLayer, Text},
    geometry::{Bounds, Size},
    semantic::Component,
};

use super::{RenderedEdge, SvgRenderer};

impl SvgRenderer {
    /// Draws the rectangle, the label and (if enabled) the pivot marker.
    ///
    /// Returns the layers together with the area they cover.
    pub(super) fn render_component(&self, component: &Component) -> (LayeredOutput, Bounds) {
        let rect_bounds = component.bounds();
        let center = rect_bounds.center();

        let rectangle = Rectangle::new(
            &self.rectangle,
            Size::new(rect_bounds.width(), rect_bounds.height()),
        );
        let mut output = rectangle.render_to_layers(center);

        let label = component.label();
        let text = Text::new(&self.label, &label);
        output.merge(text.render_to_layers(center));

        let mut bounds = rect_bounds.union(&text.bounds_at(center));

        if let Some(definition) = &self.pivot {
            let marker = PivotMarker::new(definition);
            let pivot = component.pivot_point();
            output.merge(marker.render_to_layers(pivot));
            bounds = bounds.union(&marker.bounds_at(pivot));
        }

        (output, bounds)
    }

    /// Draws a straight arrow from the source's right edge to the target's left edge.
    pub(super) fn render_connection(
        &mut self,
        source: &Component,
        target: &Component,
    ) -> (LayeredOutput, RenderedEdge) {
        let start = source.bounds().right_center();
        let end = target.bounds().left_center();

        let arrow = Arrow::new(Rc::clone(&self.arrow));
        let node = self.arrow_drawer.draw_arrow(&arrow, start, end);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, node);

        let edge = RenderedEdge {
            source: source.guid().to_string(),
            target: target.guid().to_string(),
            start,
            end,
        };
        (output, edge)
    }
}
