//! Pivot marker: a small cross at a component's anchor point with a caption.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Point, Size},
};

/// Styling of pivot markers.
#[derive(Debug, Clone)]
pub struct PivotDefinition {
    stroke: StrokeDefinition,
    arm_length: f32,
    caption: TextDefinition,
}

impl PivotDefinition {
    /// Creates a pivot style drawing both the cross and the caption in `color`.
    pub fn new(color: Color) -> Self {
        let mut caption = TextDefinition::new();
        caption.set_color(Some(color));
        Self {
            stroke: StrokeDefinition::solid(color, 1.5),
            arm_length: 4.0,
            caption,
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Half the width of the cross.
    pub fn arm_length(&self) -> f32 {
        self.arm_length
    }

    pub fn caption(&self) -> &TextDefinition {
        &self.caption
    }

    pub fn set_arm_length(&mut self, arm_length: f32) {
        self.arm_length = arm_length;
    }
}

impl Default for PivotDefinition {
    fn default() -> Self {
        Self::new(Color::new("red").expect("'red' is a valid CSS color"))
    }
}

/// A cross on the [`RenderLayer::Pivot`] layer plus a `"Pivot"` caption on
/// the [`RenderLayer::Text`] layer, both centered on the pivot.
#[derive(Debug, Clone)]
pub struct PivotMarker<'a> {
    definition: &'a PivotDefinition,
}

impl<'a> PivotMarker<'a> {
    pub const CAPTION: &'static str = "Pivot";

    pub fn new(definition: &'a PivotDefinition) -> Self {
        Self { definition }
    }

    fn caption(&self) -> Text<'a> {
        Text::new(self.definition.caption(), Self::CAPTION)
    }
}

impl Drawable for PivotMarker<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let arm = self.definition.arm_length();

        let cross = svg_element::Path::new().set(
            "d",
            format!(
                "M {} {} L {} {} M {} {} L {} {}",
                position.x() - arm,
                position.y() - arm,
                position.x() + arm,
                position.y() + arm,
                position.x() - arm,
                position.y() + arm,
                position.x() + arm,
                position.y() - arm,
            ),
        );
        let cross = self.definition.stroke().paint(cross);
        output.add_to_layer(RenderLayer::Pivot, Box::new(cross));

        output.merge(self.caption().render_to_layers(position));
        output
    }

    fn size(&self) -> Size {
        let cross = 2.0 * self.definition.arm_length();
        self.caption().size().max(Size::new(cross, cross))
    }
}
