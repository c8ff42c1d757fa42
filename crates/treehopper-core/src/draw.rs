//! Drawable Components for Diagram Rendering
//!
//! This module provides the drawable abstractions used to paint a component
//! diagram. All drawable components implement the [`Drawable`] trait, which
//! provides a consistent interface for rendering to layered SVG output and
//! calculating size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically ordered
//! during final SVG generation: component boxes sit below connection edges,
//! pivot markers sit above edges, and all text is drawn last.
mod arrow;
mod layer;
mod pivot;
mod rectangle;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDrawer};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use pivot::{PivotDefinition, PivotMarker};
pub use rectangle::{Rectangle, RectangleDefinition};
pub use stroke::StrokeDefinition;
pub use text::{Text, TextDefinition};

use crate::geometry::{Bounds, Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable centered on `position`.
    ///
    /// Implementations create SVG nodes and add them to the appropriate
    /// layers of the returned [`LayeredOutput`]. Simple drawables emit to a
    /// single layer while composite ones (such as the pivot marker) emit to
    /// several.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;

    /// Returns the area covered when rendered centered on `position`.
    fn bounds_at(&self, position: Point) -> Bounds {
        position.centered_bounds(self.size())
    }
}
