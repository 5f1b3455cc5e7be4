//! Hub-and-rings layout engine
//!
//! This module places a single hub node at the canvas center and distributes
//! every other category onto its own concentric ring.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::Serialize;

use mandala_core::{
    category::CategorySet,
    geometry::{Point, Size},
    graph::{Edge, Node},
    identifier::{Category, NodeId},
};

use super::LayoutPoint;

/// Position and size of the hub slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubGeometry {
    x: f32,
    y: f32,
    radius: f32,
    /// Node occupying the hub slot, if the input had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    node_id: Option<NodeId>,
}

impl HubGeometry {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        self.node_id.as_ref()
    }
}

/// One concentric ring holding every node of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    category: Category,
    radius: f32,
    /// Indices into [`RingLayoutResult::points`].
    members: Vec<usize>,
}

impl Ring {
    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Output of [`RadialRingLayout::calculate`].
///
/// Points live in a single arena; rings refer to them by index and a
/// `NodeId → index` table answers lookups. Everything is rebuilt per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingLayoutResult {
    points: Vec<LayoutPoint>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
    hub: HubGeometry,
    rings: Vec<Ring>,
}

impl RingLayoutResult {
    /// Every placed point: the hub node first (if any), then ring by ring.
    pub fn points(&self) -> &[LayoutPoint] {
        &self.points
    }

    pub fn hub(&self) -> &HubGeometry {
        &self.hub
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Position of a node, or `None` if the node was not placed.
    pub fn position(&self, id: &NodeId) -> Option<&LayoutPoint> {
        self.index.get(id).map(|&i| &self.points[i])
    }

    /// Points of one ring in angular order.
    pub fn ring_points<'a>(&'a self, ring: &'a Ring) -> impl Iterator<Item = &'a LayoutPoint> + 'a {
        ring.members.iter().filter_map(|&i| self.points.get(i))
    }

    /// Endpoints of an edge, or `None` when either end was not placed.
    ///
    /// Edges that reference missing nodes are expected; renderers should
    /// skip them.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let source = self.position(edge.source_id())?;
        let target = self.position(edge.target_id())?;
        Some((source.position(), target.position()))
    }

    fn push(&mut self, point: LayoutPoint) -> usize {
        let index = self.points.len();
        if self.index.contains_key(point.node_id()) {
            warn!(node_id = point.node_id().as_str(); "Duplicate node id, keeping first position");
        } else {
            self.index.insert(point.node_id().clone(), index);
        }
        self.points.push(point);
        index
    }
}

/// Radial ring layout engine
///
/// The canvas center holds the hub category; every other populated category
/// gets a ring. Rings are evenly spaced out to `min(width, height) *
/// radius_fraction`, independent of how many nodes they hold, and nodes on a
/// ring are evenly spaced starting from the top.
#[derive(Debug, Clone)]
pub struct RadialRingLayout {
    hub_category: Category,
    ring_order: CategorySet,
    radius_fraction: f32,
    hub_radius: f32,
    node_radius: f32,
}

impl RadialRingLayout {
    /// Create a new ring layout engine
    ///
    /// `ring_order` is the priority order of ring categories; the hub
    /// category is skipped if it appears in it.
    pub fn new(hub_category: Category, ring_order: CategorySet) -> Self {
        Self {
            hub_category,
            ring_order,
            radius_fraction: 0.4,
            hub_radius: 40.0,
            node_radius: 16.0,
        }
    }

    /// Set the outermost ring radius as a fraction of the shorter canvas side
    pub fn set_radius_fraction(&mut self, fraction: f32) -> &mut Self {
        self.radius_fraction = fraction;
        self
    }

    /// Set the visual radius of the hub
    pub fn set_hub_radius(&mut self, radius: f32) -> &mut Self {
        self.hub_radius = radius;
        self
    }

    /// Set the visual radius of ring nodes
    pub fn set_node_radius(&mut self, radius: f32) -> &mut Self {
        self.node_radius = radius;
        self
    }

    pub fn hub_category(&self) -> &Category {
        &self.hub_category
    }

    /// Lay out `nodes` on a canvas of the given size.
    pub fn calculate(&self, nodes: &[Node], canvas: Size) -> RingLayoutResult {
        let center = canvas.center();
        let max_radius = canvas.min_side() * self.radius_fraction;

        let mut groups: IndexMap<&Category, Vec<&Node>> = IndexMap::new();
        for node in nodes {
            groups.entry(node.category()).or_default().push(node);
        }

        let mut result = RingLayoutResult {
            points: Vec::with_capacity(nodes.len()),
            index: HashMap::with_capacity(nodes.len()),
            hub: HubGeometry {
                x: center.x(),
                y: center.y(),
                radius: self.hub_radius,
                node_id: None,
            },
            rings: Vec::new(),
        };

        if let Some(hub_nodes) = groups.get(&self.hub_category) {
            if let Some(hub) = hub_nodes.first() {
                result.push(LayoutPoint::new(
                    hub.id().clone(),
                    hub.category().clone(),
                    center,
                    self.hub_radius,
                ));
                result.hub.node_id = Some(hub.id().clone());
            }
            if hub_nodes.len() > 1 {
                warn!(
                    category = self.hub_category.as_str(),
                    dropped = hub_nodes.len() - 1;
                    "Multiple hub nodes, only the first is placed"
                );
            }
        }

        let ring_categories = self.ring_categories(&groups);
        let ring_count = ring_categories.len();
        debug!(
            nodes = nodes.len(),
            rings = ring_count,
            max_radius = max_radius;
            "Calculating ring layout"
        );

        for (ring_index, category) in ring_categories.into_iter().enumerate() {
            let radius = (max_radius / ring_count as f32) * (ring_index + 1) as f32;
            let ring_nodes = &groups[category];
            let step = if ring_nodes.is_empty() {
                0.0
            } else {
                360.0 / ring_nodes.len() as f32
            };

            let members = ring_nodes
                .iter()
                .enumerate()
                .map(|(k, node)| {
                    let theta = step * k as f32;
                    let position = Point::from_polar(center, radius, (theta - 90.0).to_radians());
                    result.push(LayoutPoint::new(
                        node.id().clone(),
                        node.category().clone(),
                        position,
                        self.node_radius,
                    ))
                })
                .collect();

            result.rings.push(Ring {
                category: category.clone(),
                radius,
                members,
            });
        }

        trace!(result:?; "Ring layout calculated");
        result
    }

    /// Populated ring categories in priority order, followed by categories
    /// unknown to the priority list in order of first appearance.
    fn ring_categories<'a>(&self, groups: &IndexMap<&'a Category, Vec<&Node>>) -> Vec<&'a Category> {
        let is_ring = |category: &Category| {
            *category != self.hub_category
                && groups.get(category).is_some_and(|nodes| !nodes.is_empty())
        };

        let known = self
            .ring_order
            .iter()
            .filter_map(|category| groups.get_key_value(category).map(|(key, _)| *key))
            .filter(|category| is_ring(category));
        let unknown = groups
            .keys()
            .copied()
            .filter(|category| !self.ring_order.contains(category.as_str()))
            .filter(|category| is_ring(category));

        known.chain(unknown).collect()
    }
}

impl Default for RadialRingLayout {
    fn default() -> Self {
        Self::new(Category::new("Hub"), CategorySet::default())
    }
}
