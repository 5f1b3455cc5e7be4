//! Geometric primitives for layout computation.
//!
//! This module provides the small set of geometric types the layout engines
//! work with.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions of a canvas or region
//!
//! # Coordinate System
//!
//! Mandala uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! A consequence worth keeping in mind: an angle of `-π/2` passed to
//! [`Point::from_polar`] points *up* on screen.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in canvas coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
///
/// # Examples
///
/// ```
/// # use mandala_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both coordinates are finite (neither NaN nor infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance between this point and another point
    pub fn distance_to(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Creates the point at `radius` from `center` along `radians`.
    ///
    /// This is the plain polar-to-Cartesian transform: angle `0` points along
    /// +X and angles grow clockwise on screen because Y points down. Callers
    /// that want angle `0` to point up apply their own offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mandala_core::geometry::Point;
    /// let center = Point::new(100.0, 100.0);
    /// let east = Point::from_polar(center, 10.0, 0.0);
    /// assert_eq!(east.x(), 110.0);
    /// assert_eq!(east.y(), 100.0);
    /// ```
    pub fn from_polar(center: Point, radius: f32, radians: f32) -> Self {
        Self {
            x: center.x + radius * radians.cos(),
            y: center.y + radius * radians.sin(),
        }
    }
}

/// Represents the dimensions of a canvas or a region of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the smaller of width and height
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// Returns the center point of a region of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_midpoint() {
        let midpoint = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(midpoint, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_point_from_polar_axes() {
        let center = Point::new(50.0, 50.0);

        let right = Point::from_polar(center, 10.0, 0.0);
        assert_approx_eq!(f32, right.x(), 60.0);
        assert_approx_eq!(f32, right.y(), 50.0);

        // Y grows downward, so +π/2 lands below the center
        let below = Point::from_polar(center, 10.0, FRAC_PI_2);
        assert_approx_eq!(f32, below.x(), 50.0, epsilon = 1e-4);
        assert_approx_eq!(f32, below.y(), 60.0, epsilon = 1e-4);

        let left = Point::from_polar(center, 10.0, PI);
        assert_approx_eq!(f32, left.x(), 40.0, epsilon = 1e-4);
        assert_approx_eq!(f32, left.y(), 50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_point_from_polar_zero_radius() {
        let center = Point::new(12.0, -3.0);
        assert_eq!(Point::from_polar(center, 0.0, 1.234), center);
    }

    #[test]
    fn test_size_accessors() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(size.width(), 800.0);
        assert_eq!(size.height(), 600.0);
        assert_eq!(size.min_side(), 600.0);
        assert_eq!(size.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_size_is_drawable() {
        assert!(Size::new(1.0, 1.0).is_drawable());
        assert!(!Size::new(0.0, 1.0).is_drawable());
        assert!(!Size::new(10.0, -1.0).is_drawable());
        assert!(!Size::new(f32::NAN, 10.0).is_drawable());
        assert!(!Size::new(10.0, f32::INFINITY).is_drawable());
        assert!(!Size::default().is_drawable());
    }

    #[test]
    fn test_point_serde_shape() {
        let point: Point = serde_json::from_str(r#"{"x": 1.5, "y": -2.0}"#).unwrap();
        assert_eq!(point, Point::new(1.5, -2.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn radius_strategy() -> impl Strategy<Value = f32> {
        0.0f32..500.0
    }

    fn angle_strategy() -> impl Strategy<Value = f32> {
        -10.0f32..10.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A polar point always lies at `radius` from its center.
    fn check_polar_distance_matches_radius(
        center: Point,
        radius: f32,
        radians: f32,
    ) -> Result<(), TestCaseError> {
        let point = Point::from_polar(center, radius, radians);
        let distance = point.distance_to(center);
        prop_assert!(
            approx_eq!(f32, distance, radius, epsilon = 0.05),
            "distance {distance} differs from radius {radius}"
        );
        Ok(())
    }

    /// The midpoint is equidistant from both endpoints.
    fn check_midpoint_is_equidistant(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let mid = p1.midpoint(p2);
        let d1 = mid.distance_to(p1);
        let d2 = mid.distance_to(p2);
        prop_assert!(
            approx_eq!(f32, d1, d2, epsilon = 0.01),
            "midpoint {mid:?} is {d1} from {p1:?} but {d2} from {p2:?}"
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn polar_distance_matches_radius(
            center in point_strategy(),
            radius in radius_strategy(),
            radians in angle_strategy(),
        ) {
            check_polar_distance_matches_radius(center, radius, radians)?;
        }

        #[test]
        fn midpoint_is_equidistant(p1 in point_strategy(), p2 in point_strategy()) {
            check_midpoint_is_equidistant(p1, p2)?;
        }
    }
}
