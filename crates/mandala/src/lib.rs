//! Mandala - Symbolic relation graphs laid out as rings and spirals.
//!
//! The pipeline fills a partial graph up to complete category coverage,
//! infers typed relations from four heuristics and computes coordinates with
//! either of two radial layout engines. Every stage is a pure function of its
//! inputs and the [`AppConfig`](config::AppConfig) it was built from.

pub mod config;
pub mod infer;
pub mod layout;
pub mod normalize;
pub mod smooth;

mod error;

pub use mandala_core::{category, color, geometry, graph, identifier, quadrant};

pub use error::MandalaError;

use log::{debug, info, trace, warn};

use mandala_core::{
    geometry::{Point, Size},
    graph::Graph,
    quadrant::QuadrantTable,
};

use config::AppConfig;
use infer::{Inference, PatternInferenceEngine, RuleFlags};
use layout::{DirectionalSpiralLayout, PathPoint, RadialRingLayout, RingLayoutResult};
use normalize::GraphNormalizer;
use smooth::{SmoothPath, smooth_path};

/// Spiral path points together with their smoothed curve.
#[derive(Debug, Clone)]
pub struct SpiralPath {
    points: Vec<PathPoint>,
    curve: SmoothPath,
}

impl SpiralPath {
    fn new(points: Vec<PathPoint>) -> Self {
        let positions: Vec<Point> = points.iter().map(PathPoint::position).collect();
        let curve = smooth_path(&positions);
        Self { points, curve }
    }

    /// Path points ordered by source ordinal.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn curve(&self) -> &SmoothPath {
        &self.curve
    }

    pub fn into_parts(self) -> (Vec<PathPoint>, SmoothPath) {
        (self.points, self.curve)
    }
}

/// Entry point running the synthesis and layout stages.
///
/// All engines are configured once at construction; the quadrant table is
/// validated there as well, so layout calls only fail on bad canvases.
///
/// # Examples
///
/// ```
/// use mandala::{Mandala, geometry::Size, graph::{Graph, Node}};
///
/// let mandala = Mandala::default();
/// let graph = Graph::new(vec![Node::new("h", "Hub", "Center")], vec![]);
///
/// let complete = mandala.synthesize(&graph);
/// assert_eq!(complete.nodes().len(), 9);
///
/// let layout = mandala.ring_layout(&complete, Size::new(800.0, 800.0)).unwrap();
/// assert_eq!(layout.rings().len(), 8);
/// ```
pub struct Mandala {
    normalizer: GraphNormalizer,
    inference: PatternInferenceEngine,
    ring: RadialRingLayout,
    spiral: DirectionalSpiralLayout,
}

impl Mandala {
    /// Builds every engine from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MandalaError::Config`] for out-of-range numeric settings and
    /// [`MandalaError::Quadrant`] when the quadrant table does not partition
    /// the ordinals.
    pub fn new(config: AppConfig) -> Result<Self, MandalaError> {
        config.validate()?;

        let categories = config.categories();
        let mut normalizer = GraphNormalizer::new(categories.order().clone());
        normalizer.set_marker(categories.placeholder_marker());

        let rules = config.inference();
        let mut inference = PatternInferenceEngine::new();
        let (a, b) = rules.pairing_categories();
        let (c, d) = rules.affinity_categories();
        // Placeholder labels must read as variants of their category name.
        let mut markers = rules.label_markers().to_vec();
        if !markers.contains(&categories.placeholder_marker()) {
            markers.push(categories.placeholder_marker());
        }
        inference
            .set_flags(rules.rules())
            .set_repeated_label_category(rules.repeated_label_category().clone())
            .set_pairing_categories(a.clone(), b.clone())
            .set_affinity_categories(c.clone(), d.clone())
            .set_label_markers(markers)
            .set_cluster_threshold(rules.cluster_threshold());

        let mut ring = RadialRingLayout::new(categories.hub().clone(), categories.order().clone());
        ring.set_radius_fraction(config.ring().radius_fraction())
            .set_hub_radius(config.ring().hub_radius())
            .set_node_radius(config.ring().node_radius());

        let table = QuadrantTable::new(config.spiral().quadrants().to_vec())?;
        let mut spiral = DirectionalSpiralLayout::new(table);
        spiral
            .set_turns(config.spiral().turns())
            .set_radius_factors(
                config.spiral().outer_radius_factor(),
                config.spiral().inner_radius_factor(),
            );

        debug!(
            categories = categories.order().len(),
            quadrants = spiral.table().len(),
            rules:? = rules.rules();
            "Engines configured"
        );

        Ok(Self {
            normalizer,
            inference,
            ring,
            spiral,
        })
    }

    /// Fills missing categories with placeholders, then appends inferred
    /// edges.
    pub fn synthesize(&self, graph: &Graph) -> Graph {
        self.synthesize_with(&self.inference, graph)
    }

    /// Like [`synthesize`](Self::synthesize) with a different rule selection.
    pub fn synthesize_with_rules(&self, graph: &Graph, rules: RuleFlags) -> Graph {
        let mut inference = self.inference.clone();
        inference.set_flags(rules);
        self.synthesize_with(&inference, graph)
    }

    fn synthesize_with(&self, inference: &PatternInferenceEngine, graph: &Graph) -> Graph {
        info!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len();
            "Synthesizing graph"
        );
        self.check_integrity(graph);

        let normalized = self.normalizer.normalize_graph(graph);
        debug!(
            placeholders = normalized.nodes().len() - graph.nodes().len();
            "Graph normalized"
        );

        let complete = inference.apply(&normalized);
        debug!(
            inferred = complete.edges().len() - normalized.edges().len();
            "Relations inferred"
        );
        trace!(graph:? = complete; "Synthesized graph");

        complete
    }

    /// Runs inference only, keeping the per-heuristic pattern sets.
    pub fn infer(&self, graph: &Graph) -> Inference {
        info!(nodes = graph.nodes().len(); "Inferring relations");
        self.inference.infer(graph)
    }

    /// Places the nodes of `graph` on concentric category rings.
    ///
    /// # Errors
    ///
    /// Returns [`MandalaError::InvalidCanvas`] if `canvas` has a zero,
    /// negative or non-finite dimension.
    pub fn ring_layout(&self, graph: &Graph, canvas: Size) -> Result<RingLayoutResult, MandalaError> {
        validate_canvas(canvas)?;
        info!(nodes = graph.nodes().len(), canvas:? = canvas; "Calculating ring layout");

        let result = self.ring.calculate(graph.nodes(), canvas);
        debug!(rings = result.rings().len(), points = result.points().len(); "Ring layout done");
        Ok(result)
    }

    /// Walks the full ordinal range of the quadrant table.
    ///
    /// # Errors
    ///
    /// Returns [`MandalaError::InvalidCanvas`] for an undrawable canvas.
    pub fn spiral_layout(&self, canvas: Size) -> Result<SpiralPath, MandalaError> {
        validate_canvas(canvas)?;
        info!(
            ordinals = self.spiral.table().ordinal_count(),
            canvas:? = canvas;
            "Calculating spiral layout"
        );
        Ok(SpiralPath::new(self.spiral.calculate(canvas)))
    }

    /// Places the ordinal-indexed nodes of `graph` on the spiral path.
    ///
    /// Nodes without an ordinal, or with one outside the table, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MandalaError::InvalidCanvas`] for an undrawable canvas.
    pub fn spiral_layout_for_nodes(
        &self,
        graph: &Graph,
        canvas: Size,
    ) -> Result<SpiralPath, MandalaError> {
        validate_canvas(canvas)?;
        info!(nodes = graph.nodes().len(), canvas:? = canvas; "Calculating spiral node layout");

        let points = self.spiral.calculate_for_nodes(graph.nodes(), canvas);
        debug!(points = points.len(); "Spiral layout done");
        Ok(SpiralPath::new(points))
    }

    fn check_integrity(&self, graph: &Graph) {
        for id in graph.duplicate_node_ids() {
            warn!(node_id:% = id; "Duplicate node id, first occurrence wins");
        }
        for edge in graph.dangling_edges() {
            warn!(
                source:% = edge.source_id(),
                target:% = edge.target_id();
                "Edge references an unknown node"
            );
        }
    }
}

impl Default for Mandala {
    fn default() -> Self {
        Self {
            normalizer: GraphNormalizer::default(),
            inference: PatternInferenceEngine::default(),
            ring: RadialRingLayout::default(),
            spiral: DirectionalSpiralLayout::default(),
        }
    }
}

fn validate_canvas(canvas: Size) -> Result<(), MandalaError> {
    if canvas.is_drawable() {
        Ok(())
    } else {
        Err(MandalaError::InvalidCanvas {
            width: canvas.width(),
            height: canvas.height(),
        })
    }
}
