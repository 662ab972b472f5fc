//! Geometric primitives for shape placement on a canvas page.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page units
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by its minimum and maximum corners
//!
//! Coordinates are `f64` page units, exactly as they appear in the JSON input.
//! The engine never converts units; whatever the canvas treats as a unit is
//! what `x`, `y`, `width` and `height` mean.

use serde::{Deserialize, Serialize};

/// A 2D point in page coordinate space.
///
/// # Examples
///
/// ```
/// # use drafter_core::geometry::Point;
/// let p1 = Point::new(1.0, 2.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 2.0);
/// assert_eq!(mid.y(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Creates bounds of the given size whose minimum corner is this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::from_corners(
            self,
            Point::new(self.x + size.width(), self.y + size.height()),
        )
    }
}

/// Width and height of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size with the specified width and height
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned rectangle.
///
/// The minimum corner is always less than or equal to the maximum corner;
/// [`Bounds::from_corners`] normalizes whichever two opposite corners it is
/// given.
///
/// # Examples
///
/// ```
/// # use drafter_core::geometry::{Bounds, Point};
/// let bounds = Bounds::from_corners(Point::new(3.0, 1.0), Point::new(1.0, 2.0));
/// assert_eq!(bounds.min_x(), 1.0);
/// assert_eq!(bounds.max_x(), 3.0);
/// assert_eq!(bounds.center(), Point::new(2.0, 1.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds spanning two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates bounds of the given size centered on a point.
    pub fn from_center(center: Point, size: Size) -> Self {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Returns the minimum corner.
    pub fn min_point(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the maximum corner.
    pub fn max_point(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the geometric center of the bounds.
    pub fn center(&self) -> Point {
        self.min_point().midpoint(self.max_point())
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns these bounds moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns true if `point` lies inside or on the edge of the bounds.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (point_strategy(), point_strategy()).prop_map(|(a, b)| Bounds::from_corners(a, b))
    }

    proptest! {
        #[test]
        fn prop_from_corners_is_order_independent(a in point_strategy(), b in point_strategy()) {
            prop_assert_eq!(Bounds::from_corners(a, b), Bounds::from_corners(b, a));
        }

        #[test]
        fn prop_from_corners_is_normalized(a in point_strategy(), b in point_strategy()) {
            let bounds = Bounds::from_corners(a, b);
            prop_assert!(bounds.min_x() <= bounds.max_x());
            prop_assert!(bounds.min_y() <= bounds.max_y());
            prop_assert!(bounds.contains(a));
            prop_assert!(bounds.contains(b));
        }

        #[test]
        fn prop_merge_is_commutative(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            let merged1 = b1.merge(&b2);
            let merged2 = b2.merge(&b1);
            prop_assert!(approx_eq!(f64, merged1.min_x(), merged2.min_x()));
            prop_assert!(approx_eq!(f64, merged1.min_y(), merged2.min_y()));
            prop_assert!(approx_eq!(f64, merged1.max_x(), merged2.max_x()));
            prop_assert!(approx_eq!(f64, merged1.max_y(), merged2.max_y()));
        }

        #[test]
        fn prop_center_stays_inside(bounds in bounds_strategy()) {
            prop_assert!(bounds.contains(bounds.center()));
        }
    }
}
