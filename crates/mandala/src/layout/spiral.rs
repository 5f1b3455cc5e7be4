//! Directional spiral layout engine
//!
//! Each quadrant of a [`QuadrantTable`] draws its slice of the ordinal
//! sequence as a spiral that starts on the outside and winds inward, rotated
//! toward the quadrant's compass direction. The per-quadrant point lists are
//! then stitched into a single path ordered by ordinal.

use std::{collections::HashMap, f32::consts::TAU};

use log::{debug, trace};
use serde::Serialize;

use mandala_core::{
    geometry::{Point, Size},
    graph::Node,
    identifier::NodeId,
    quadrant::{Quadrant, QuadrantTable},
};

/// One point of the spiral path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPoint {
    x: f32,
    y: f32,
    /// Final angle in radians, quadrant rotation included.
    angle: f32,
    distance_from_center: f32,
    source_ordinal: u32,
    /// Index of the owning quadrant in the table.
    quadrant: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_id: Option<NodeId>,
}

impl PathPoint {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Distance from the owning quadrant's local center.
    pub fn distance_from_center(&self) -> f32 {
        self.distance_from_center
    }

    pub fn source_ordinal(&self) -> u32 {
        self.source_ordinal
    }

    pub fn quadrant(&self) -> usize {
        self.quadrant
    }

    /// Node placed at this ordinal, when laid out from nodes.
    pub fn node_id(&self) -> Option<&NodeId> {
        self.node_id.as_ref()
    }
}

/// Spiral layout engine over a validated quadrant table.
///
/// For the k-th of M ordinals of a quadrant, `t = k / (M - 1)` (0 when
/// M = 1). The spiral angle is `t * turns * 2π` and the radius shrinks
/// linearly from the outer to the inner radius as `t` goes from 0 to 1. The
/// quadrant's direction offset is added to the angle and the result goes
/// straight through the polar transform, with no extra −90° correction.
#[derive(Debug, Clone)]
pub struct DirectionalSpiralLayout {
    table: QuadrantTable,
    turns: f32,
    outer_radius_factor: f32,
    inner_radius_factor: f32,
}

impl DirectionalSpiralLayout {
    /// Create a new spiral layout engine over `table`
    pub fn new(table: QuadrantTable) -> Self {
        Self {
            table,
            turns: 2.0,
            outer_radius_factor: 0.5,
            inner_radius_factor: 0.1,
        }
    }

    /// Set how many full turns each quadrant's spiral makes
    pub fn set_turns(&mut self, turns: f32) -> &mut Self {
        self.turns = turns;
        self
    }

    /// Set the outer and inner radius as fractions of a quadrant's extent
    ///
    /// The extent is the smaller side of the quadrant's region on the canvas.
    pub fn set_radius_factors(&mut self, outer: f32, inner: f32) -> &mut Self {
        self.outer_radius_factor = outer;
        self.inner_radius_factor = inner;
        self
    }

    pub fn table(&self) -> &QuadrantTable {
        &self.table
    }

    /// One point per ordinal `1..=N`, sorted by ordinal.
    pub fn calculate(&self, canvas: Size) -> Vec<PathPoint> {
        let mut points: Vec<PathPoint> = Vec::with_capacity(self.table.ordinal_count() as usize);

        for (quadrant_index, quadrant) in self.table.quadrants().iter().enumerate() {
            points.extend(self.quadrant_points(quadrant_index, quadrant, canvas));
        }

        points.sort_by_key(PathPoint::source_ordinal);

        debug!(
            quadrants = self.table.len(),
            points = points.len();
            "Spiral layout calculated"
        );
        trace!(points:?; "Spiral path points");
        points
    }

    /// Points for the ordinals carried by `nodes`, sorted by ordinal.
    ///
    /// Nodes without an ordinal or with one outside the table are skipped.
    /// When several nodes share an ordinal the first one wins. Positions do
    /// not depend on which ordinals are present.
    pub fn calculate_for_nodes(&self, nodes: &[Node], canvas: Size) -> Vec<PathPoint> {
        let mut by_ordinal: HashMap<u32, &NodeId> = HashMap::new();
        for node in nodes {
            if let Some(ordinal) = node.ordinal_index() {
                by_ordinal.entry(ordinal).or_insert(node.id());
            }
        }

        self.calculate(canvas)
            .into_iter()
            .filter_map(|mut point| {
                let id = by_ordinal.get(&point.source_ordinal)?;
                point.node_id = Some((*id).clone());
                Some(point)
            })
            .collect()
    }

    fn quadrant_points(&self, quadrant_index: usize, quadrant: &Quadrant, canvas: Size) -> Vec<PathPoint> {
        let (lo, _) = quadrant.index_range();
        let count = quadrant.len();

        let center_fraction = quadrant.center_fraction();
        let center = Point::new(
            center_fraction.x() * canvas.width(),
            center_fraction.y() * canvas.height(),
        );
        let size_fraction = quadrant.size_fraction();
        let extent = (size_fraction.width() * canvas.width())
            .min(size_fraction.height() * canvas.height());
        let max_radius = extent * self.outer_radius_factor;
        let min_radius = extent * self.inner_radius_factor;
        let offset = quadrant.direction().offset_radians();

        (0..count)
            .map(|k| {
                let t = if count > 1 {
                    k as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                let angle = t * self.turns * TAU + offset;
                let radius = max_radius + (min_radius - max_radius) * t;
                let position = Point::from_polar(center, radius, angle);
                PathPoint {
                    x: position.x(),
                    y: position.y(),
                    angle,
                    distance_from_center: radius,
                    source_ordinal: lo + k as u32,
                    quadrant: quadrant_index,
                    node_id: None,
                }
            })
            .collect()
    }
}

impl Default for DirectionalSpiralLayout {
    fn default() -> Self {
        Self::new(QuadrantTable::reference())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use mandala_core::quadrant::Direction;

    use super::*;

    fn canvas() -> Size {
        Size::new(1000.0, 1000.0)
    }

    #[test]
    fn test_reference_table_yields_27_points() {
        let layout = DirectionalSpiralLayout::default();
        let points = layout.calculate(canvas());
        assert_eq!(points.len(), 27);

        let ordinals: Vec<u32> = points.iter().map(PathPoint::source_ordinal).collect();
        assert_eq!(ordinals, (1..=27).collect::<Vec<_>>());

        for point in &points {
            let (lo, hi) = layout.table().quadrants()[point.quadrant()].index_range();
            assert!((lo..=hi).contains(&point.source_ordinal()));
        }
        let expected_quadrants = [(0, 5), (1, 5), (2, 5), (3, 5), (4, 7)];
        for (quadrant, size) in expected_quadrants {
            assert_eq!(points.iter().filter(|p| p.quadrant() == quadrant).count(), size);
        }
    }

    #[test]
    fn test_spiral_moves_inward() {
        let layout = DirectionalSpiralLayout::default();
        let points = layout.calculate(canvas());
        let north: Vec<_> = points.iter().filter(|p| p.quadrant() == 0).collect();
        // extent = 300, so radii run from 150 down to 30
        assert_approx_eq!(f32, north[0].distance_from_center(), 150.0);
        assert_approx_eq!(f32, north[4].distance_from_center(), 30.0, epsilon = 1e-4);
        for pair in north.windows(2) {
            assert!(pair[0].distance_from_center() > pair[1].distance_from_center());
        }
    }

    #[test]
    fn test_north_quadrant_starts_pointing_up() {
        let layout = DirectionalSpiralLayout::default();
        let first = &layout.calculate(canvas())[0];
        // North center at (500, 200); offset −90° with t = 0 points straight up
        assert_approx_eq!(f32, first.x(), 500.0, epsilon = 1e-3);
        assert_approx_eq!(f32, first.y(), 50.0, epsilon = 1e-3);
        assert_approx_eq!(f32, first.angle(), -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_east_quadrant_is_unrotated() {
        let layout = DirectionalSpiralLayout::default();
        let points = layout.calculate(canvas());
        let east_first = &points[5];
        assert_eq!(east_first.source_ordinal(), 6);
        // East center at (800, 500), angle 0 points along +X
        assert_approx_eq!(f32, east_first.x(), 950.0, epsilon = 1e-3);
        assert_approx_eq!(f32, east_first.y(), 500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_single_ordinal_quadrant() {
        let table = QuadrantTable::new(vec![Quadrant::new("solo", Direction::South, 1, 1)]).unwrap();
        let points = DirectionalSpiralLayout::new(table).calculate(Size::new(100.0, 100.0));
        assert_eq!(points.len(), 1);
        let point = &points[0];
        assert!(point.position().is_finite());
        // t = 0: outer radius at +90°, straight below the center (50, 80)
        assert_approx_eq!(f32, point.distance_from_center(), 15.0);
        assert_approx_eq!(f32, point.x(), 50.0, epsilon = 1e-3);
        assert_approx_eq!(f32, point.y(), 95.0, epsilon = 1e-3);
    }

    #[test]
    fn test_ends_after_whole_turns() {
        let table = QuadrantTable::new(vec![Quadrant::new("q", Direction::East, 1, 3)]).unwrap();
        let mut layout = DirectionalSpiralLayout::new(table);
        layout.set_turns(1.0).set_radius_factors(0.5, 0.25);
        let points = layout.calculate(Size::new(100.0, 100.0));
        let last = &points[2];
        assert_approx_eq!(f32, last.angle(), TAU);
        // center (80, 50), extent 30, inner radius 7.5 along +X after one turn
        assert_approx_eq!(f32, last.x(), 87.5, epsilon = 1e-3);
        assert_approx_eq!(f32, last.y(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_calculate_for_nodes() {
        let nodes = vec![
            Node::new("a", "Season", "Spring").with_ordinal(3),
            Node::new("b", "Season", "Summer").with_ordinal(1),
            Node::new("c", "Season", "Autumn").with_ordinal(3),
            Node::new("d", "Season", "Winter").with_ordinal(99),
            Node::new("e", "Season", "None"),
        ];
        let layout = DirectionalSpiralLayout::default();
        let full = layout.calculate(canvas());
        let points = layout.calculate_for_nodes(&nodes, canvas());

        let ids: Vec<_> = points.iter().map(|p| p.node_id().unwrap().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(points[1].source_ordinal(), 3);
        assert_eq!(points[1].position(), full[2].position());
    }

    #[test]
    fn test_fresh_per_canvas() {
        let layout = DirectionalSpiralLayout::default();
        let small = layout.calculate(Size::new(100.0, 100.0));
        let large = layout.calculate(Size::new(200.0, 200.0));
        assert_approx_eq!(f32, large[0].x(), small[0].x() * 2.0, epsilon = 1e-3);
        assert_approx_eq!(f32, large[0].y(), small[0].y() * 2.0, epsilon = 1e-3);
    }
}
