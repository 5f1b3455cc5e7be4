//! Curve smoothing for ordered point lists.
//!
//! [`smooth_path`] turns a polyline into a piecewise quadratic curve: every
//! interior point becomes a control point and the curve passes through the
//! midpoints between neighbours. The result is a smoothed line, not an
//! interpolating spline; interior points are generally not on the curve.

use std::fmt;

use svg::node::{Value, element::path::Data};

use mandala_core::geometry::Point;

/// One drawing command of a [`SmoothPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    QuadTo { control: Point, end: Point },
    LineTo(Point),
}

/// Drawable curve description.
///
/// Renders as SVG path data through [`fmt::Display`]; an empty path renders
/// as the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothPath {
    segments: Vec<PathSegment>,
}

impl SmoothPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Converts the segments to SVG path data.
    pub fn to_data(&self) -> Data {
        self.segments
            .iter()
            .fold(Data::new(), |data, segment| match *segment {
                PathSegment::MoveTo(p) => data.move_to((p.x(), p.y())),
                PathSegment::QuadTo { control, end } => {
                    data.quadratic_curve_to((control.x(), control.y(), end.x(), end.y()))
                }
                PathSegment::LineTo(p) => data.line_to((p.x(), p.y())),
            })
    }
}

impl fmt::Display for SmoothPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}", Value::from(self.to_data()))
    }
}

/// Smooths `points` into a quadratic curve.
///
/// The path moves to the first point, emits one quadratic segment per
/// interior point (control at the point, end at the midpoint to the next
/// one) and finishes with a straight line to the last point. Fewer than two
/// points yield an empty path.
///
/// # Examples
///
/// ```
/// use mandala::smooth::smooth_path;
/// use mandala_core::geometry::Point;
///
/// assert_eq!(smooth_path(&[Point::new(1.0, 1.0)]).to_string(), "");
///
/// let path = smooth_path(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
/// assert_eq!(path.segments().len(), 2);
/// ```
pub fn smooth_path(points: &[Point]) -> SmoothPath {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return SmoothPath::default();
    };
    if points.len() < 2 {
        return SmoothPath::default();
    }

    let mut segments = Vec::with_capacity(points.len());
    segments.push(PathSegment::MoveTo(*first));
    for window in points[1..].windows(2) {
        let (current, next) = (window[0], window[1]);
        segments.push(PathSegment::QuadTo {
            control: current,
            end: current.midpoint(next),
        });
    }
    segments.push(PathSegment::LineTo(*last));

    SmoothPath { segments }
}
