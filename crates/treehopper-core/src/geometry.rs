//! Canvas geometry.
//!
//! Grasshopper stores component positions in the same orientation SVG uses:
//! the origin is the top-left corner, `x` grows to the right and `y` grows
//! downwards. A component's `Bounds` marker holds its top-left corner plus a
//! width and height, which is why [`Bounds::new_from_top_left`] is the
//! constructor used by the extractor. Drawables, on the other hand, are
//! positioned by their center.
//!
//! [`Point`] supports `+` and `-` so offsets read like arithmetic:
//!
//! ```
//! # use treehopper_core::geometry::Point;
//! let slider = Point::new(10.0, 20.0);
//! let offset = Point::new(5.0, 5.0);
//! assert_eq!(slider + offset, Point::new(15.0, 25.0));
//! assert_eq!((slider + offset) - offset, slider);
//! ```

use std::ops::{Add, Sub};

/// A position on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// The bounds of a box of `size` whose center is this point.
    pub fn centered_bounds(self, size: Size) -> Bounds {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Bounds::from_corners(self - half, self + half)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a drawable or a component box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// This size grown by `insets` on every side.
    pub fn padded(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.horizontal_sum(),
            self.height + insets.vertical_sum(),
        )
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned box stored as its two extreme corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    fn from_corners(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// A box whose top-left corner is `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::from_corners(top_left, top_left + Point::new(size.width, size.height))
    }

    pub fn min_x(self) -> f32 {
        self.min.x
    }

    pub fn min_y(self) -> f32 {
        self.min.y
    }

    pub fn max_x(self) -> f32 {
        self.max.x
    }

    pub fn max_y(self) -> f32 {
        self.max.y
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn top_left(self) -> Point {
        self.min
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Where an outgoing connection leaves the box.
    pub fn right_center(self) -> Point {
        Point::new(self.max.x, self.center().y)
    }

    /// Where an incoming connection enters the box.
    pub fn left_center(self) -> Point {
        Point::new(self.min.x, self.center().y)
    }

    /// The smallest box covering both `self` and `other`.
    ///
    /// ```
    /// # use treehopper_core::geometry::{Bounds, Point, Size};
    /// let add = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
    /// let panel = Bounds::new_from_top_left(Point::new(200.0, 10.0), Size::new(100.0, 50.0));
    ///
    /// let both = add.union(&panel);
    /// assert_eq!(both.width(), 300.0);
    /// assert_eq!(both.height(), 60.0);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// Pushes every edge outward by the matching inset.
    pub fn expand(&self, insets: Insets) -> Self {
        Self::from_corners(
            self.min - Point::new(insets.left, insets.top),
            self.max + Point::new(insets.right, insets.bottom),
        )
    }
}

/// Per-side spacing, listed top, right, bottom, left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn any_point() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn any_bounds() -> impl Strategy<Value = Bounds> {
        (any_point(), 1.0f32..500.0, 1.0f32..500.0)
            .prop_map(|(corner, w, h)| Bounds::new_from_top_left(corner, Size::new(w, h)))
    }

    fn covers(outer: Bounds, inner: Bounds) -> bool {
        const SLACK: f32 = 0.001;
        outer.min_x() <= inner.min_x() + SLACK
            && outer.min_y() <= inner.min_y() + SLACK
            && outer.max_x() >= inner.max_x() - SLACK
            && outer.max_y() >= inner.max_y() - SLACK
    }

    proptest! {
        #[test]
        fn union_is_symmetric(a in any_bounds(), b in any_bounds()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn union_covers_inputs(a in any_bounds(), b in any_bounds()) {
            let both = a.union(&b);
            prop_assert!(covers(both, a));
            prop_assert!(covers(both, b));
        }

        #[test]
        fn anchors_sit_on_side_midpoints(bounds in any_bounds()) {
            let (left, right) = (bounds.left_center(), bounds.right_center());
            prop_assert_eq!(left.x(), bounds.min_x());
            prop_assert_eq!(right.x(), bounds.max_x());
            prop_assert_eq!(left.y(), right.y());
            prop_assert!(approx_eq!(f32, right.y(), (bounds.min_y() + bounds.max_y()) / 2.0, epsilon = 0.001));
        }

        #[test]
        fn offset_round_trip(p in any_point(), offset in any_point()) {
            let back = (p + offset) - offset;
            prop_assert!(approx_eq!(f32, back.x(), p.x(), epsilon = 0.001));
            prop_assert!(approx_eq!(f32, back.y(), p.y(), epsilon = 0.001));
        }
    }
}
