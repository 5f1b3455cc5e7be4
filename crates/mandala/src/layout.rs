//! Layout engines
//!
//! Two independent engines turn nodes into coordinates:
//!
//! - [`RadialRingLayout`] places one hub node at the canvas center and every
//!   other category on its own concentric ring.
//! - [`DirectionalSpiralLayout`] walks an ordinal sequence through a
//!   [`QuadrantTable`](mandala_core::quadrant::QuadrantTable), drawing each
//!   quadrant as an inward spiral turned toward its compass direction.
//!
//! The two engines use different angle conventions on purpose: the ring
//! layout rotates by −90° so that angle 0 points up, the spiral layout feeds
//! its angles to the polar transform unrotated.

mod radial;
mod spiral;

pub use radial::{HubGeometry, RadialRingLayout, Ring, RingLayoutResult};
pub use spiral::{DirectionalSpiralLayout, PathPoint};

use serde::Serialize;

use mandala_core::{
    geometry::Point,
    identifier::{Category, NodeId},
};

/// Final position of one node in a ring layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPoint {
    node_id: NodeId,
    x: f32,
    y: f32,
    radius: f32,
    category: Category,
}

impl LayoutPoint {
    fn new(node_id: NodeId, category: Category, position: Point, radius: f32) -> Self {
        Self {
            node_id,
            x: position.x(),
            y: position.y(),
            radius,
            category,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Visual radius of the node marker.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
