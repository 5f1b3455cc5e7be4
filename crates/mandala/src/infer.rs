//! Relation inference from node attributes.
//!
//! The [`PatternInferenceEngine`] runs four independent heuristics over one
//! node snapshot. Each heuristic yields a [`PatternSet`], the ids of the nodes
//! it flags, and every pattern set is turned into a chain of edges linking its
//! members in insertion order. The chain is a visual highlight, not a
//! semantic ordering.
//!
//! All heuristics read node attributes only. Edges inferred by one heuristic
//! never feed another, and re-running inference over its own output flags the
//! same nodes again.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use mandala_core::{
    graph::{Edge, EdgeKind, Element, Graph, Node},
    identifier::{Category, NodeId},
};

/// The four inference heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Nodes of one category whose labels match once trailing markers are stripped.
    RepeatedLabels,
    /// Nodes of category A paired with the first node of category B sharing an
    /// element or an ordinal.
    CrossPairing,
    /// All nodes of any element held by at least three nodes.
    ElementalClusters,
    /// Nodes of category C paired with the first node of category D whose label
    /// shares a three-character prefix.
    LabelAffinity,
}

impl Heuristic {
    /// Every heuristic, in the order inference runs them.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::RepeatedLabels,
        Heuristic::CrossPairing,
        Heuristic::ElementalClusters,
        Heuristic::LabelAffinity,
    ];

    /// Kind given to the edges this heuristic produces.
    pub fn edge_kind(self) -> EdgeKind {
        match self {
            Heuristic::RepeatedLabels => EdgeKind::Sequential,
            Heuristic::CrossPairing => EdgeKind::Paired,
            Heuristic::ElementalClusters => EdgeKind::Default,
            Heuristic::LabelAffinity => EdgeKind::Axis,
        }
    }
}

/// Which heuristics contribute edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFlags {
    pub repeated_labels: bool,
    pub cross_pairing: bool,
    pub elemental_clusters: bool,
    pub label_affinity: bool,
}

impl RuleFlags {
    /// Flags with every heuristic disabled.
    pub fn none() -> Self {
        Self {
            repeated_labels: false,
            cross_pairing: false,
            elemental_clusters: false,
            label_affinity: false,
        }
    }

    /// Flags with only `heuristic` enabled.
    pub fn only(heuristic: Heuristic) -> Self {
        Self::none().with(heuristic, true)
    }

    /// Returns a copy with `heuristic` switched to `enabled`.
    pub fn with(mut self, heuristic: Heuristic, enabled: bool) -> Self {
        match heuristic {
            Heuristic::RepeatedLabels => self.repeated_labels = enabled,
            Heuristic::CrossPairing => self.cross_pairing = enabled,
            Heuristic::ElementalClusters => self.elemental_clusters = enabled,
            Heuristic::LabelAffinity => self.label_affinity = enabled,
        }
        self
    }

    pub fn is_enabled(&self, heuristic: Heuristic) -> bool {
        match heuristic {
            Heuristic::RepeatedLabels => self.repeated_labels,
            Heuristic::CrossPairing => self.cross_pairing,
            Heuristic::ElementalClusters => self.elemental_clusters,
            Heuristic::LabelAffinity => self.label_affinity,
        }
    }
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self {
            repeated_labels: true,
            cross_pairing: true,
            elemental_clusters: true,
            label_affinity: true,
        }
    }
}

/// Insertion-ordered set of node ids flagged by one heuristic.
///
/// A pattern set is built once per heuristic call and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatternSet {
    members: IndexSet<NodeId>,
}

impl PatternSet {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.members.iter()
    }

    /// Edges linking consecutive members, without ids.
    pub fn edge_chain(&self, kind: EdgeKind) -> Vec<Edge> {
        let members: Vec<&NodeId> = self.members.iter().collect();
        members
            .windows(2)
            .map(|pair| Edge::new(pair[0].clone(), pair[1].clone()).with_kind(kind))
            .collect()
    }
}

impl<'a> FromIterator<&'a NodeId> for PatternSet {
    fn from_iter<T: IntoIterator<Item = &'a NodeId>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().cloned().collect(),
        }
    }
}

/// Result of running inference over a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inference {
    patterns: Vec<(Heuristic, PatternSet)>,
    edges: Vec<Edge>,
}

impl Inference {
    /// Pattern sets of the enabled heuristics, in [`Heuristic::ALL`] order.
    pub fn patterns(&self) -> &[(Heuristic, PatternSet)] {
        &self.patterns
    }

    /// The pattern set produced by `heuristic`, if it was enabled.
    pub fn pattern(&self, heuristic: Heuristic) -> Option<&PatternSet> {
        self.patterns
            .iter()
            .find(|(h, _)| *h == heuristic)
            .map(|(_, set)| set)
    }

    /// Inferred edges with assigned ids.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

/// Infers additional relations from node attributes.
///
/// The pairing heuristics keep only the *first* qualifying partner of each
/// node; other equally valid partners are ignored.
#[derive(Debug, Clone)]
pub struct PatternInferenceEngine {
    flags: RuleFlags,
    repeated_label_category: Category,
    pairing_categories: (Category, Category),
    affinity_categories: (Category, Category),
    label_markers: Vec<char>,
    cluster_threshold: usize,
    affinity_prefix_len: usize,
}

impl PatternInferenceEngine {
    /// Create an engine with the reference-domain categories and all rules on
    pub fn new() -> Self {
        Self {
            flags: RuleFlags::default(),
            repeated_label_category: Category::new("Tribe"),
            pairing_categories: (Category::new("Archetype"), Category::new("Totem")),
            affinity_categories: (Category::new("Clan"), Category::new("Lineage")),
            label_markers: vec!['*'],
            cluster_threshold: 3,
            affinity_prefix_len: 3,
        }
    }

    /// Set which heuristics contribute edges
    pub fn set_flags(&mut self, flags: RuleFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Set the category scanned for repeated labels
    pub fn set_repeated_label_category(&mut self, category: Category) -> &mut Self {
        self.repeated_label_category = category;
        self
    }

    /// Set the (A, B) categories of the cross-category pairing
    pub fn set_pairing_categories(&mut self, a: Category, b: Category) -> &mut Self {
        self.pairing_categories = (a, b);
        self
    }

    /// Set the (C, D) categories of the label-affinity crossing
    pub fn set_affinity_categories(&mut self, c: Category, d: Category) -> &mut Self {
        self.affinity_categories = (c, d);
        self
    }

    /// Set the trailing characters stripped before labels are compared
    pub fn set_label_markers(&mut self, markers: Vec<char>) -> &mut Self {
        self.label_markers = markers;
        self
    }

    /// Set the minimum number of nodes sharing an element to form a cluster
    pub fn set_cluster_threshold(&mut self, threshold: usize) -> &mut Self {
        self.cluster_threshold = threshold;
        self
    }

    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    /// Runs one heuristic over `nodes`.
    pub fn pattern(&self, heuristic: Heuristic, nodes: &[Node]) -> PatternSet {
        match heuristic {
            Heuristic::RepeatedLabels => self.repeated_labels(nodes),
            Heuristic::CrossPairing => self.cross_pairing(nodes),
            Heuristic::ElementalClusters => self.elemental_clusters(nodes),
            Heuristic::LabelAffinity => self.label_affinity(nodes),
        }
    }

    /// Groups nodes of the designated category by marker-stripped label.
    ///
    /// Every group with at least two members joins the pattern.
    pub fn repeated_labels(&self, nodes: &[Node]) -> PatternSet {
        let mut groups: IndexMap<&str, Vec<&NodeId>> = IndexMap::new();
        for node in nodes
            .iter()
            .filter(|node| node.category() == &self.repeated_label_category)
        {
            let key = node.label().trim_end_matches(self.label_markers.as_slice());
            groups.entry(key).or_default().push(node.id());
        }

        groups
            .into_values()
            .filter(|members| members.len() >= 2)
            .flatten()
            .collect()
    }

    /// Pairs each A node with the first B node sharing its element or ordinal.
    pub fn cross_pairing(&self, nodes: &[Node]) -> PatternSet {
        let (a, b) = &self.pairing_categories;
        let partners: Vec<&Node> = nodes.iter().filter(|n| n.category() == b).collect();

        nodes
            .iter()
            .filter(|n| n.category() == a)
            .filter_map(|node| {
                partners
                    .iter()
                    .find(|partner| shares_element_or_ordinal(node, partner))
                    .map(|partner| [node.id(), partner.id()])
            })
            .flatten()
            .collect()
    }

    /// Collects every node of each element held by at least the threshold
    /// number of nodes, regardless of category.
    pub fn elemental_clusters(&self, nodes: &[Node]) -> PatternSet {
        Element::ALL
            .into_iter()
            .flat_map(|element| {
                let members: Vec<&NodeId> = nodes
                    .iter()
                    .filter(|n| n.element() == Some(element))
                    .map(Node::id)
                    .collect();
                if members.len() >= self.cluster_threshold {
                    members
                } else {
                    Vec::new()
                }
            })
            .collect()
    }

    /// Pairs each C node with the first D node whose label shares a prefix.
    ///
    /// A match needs the leading characters of either label to occur
    /// anywhere in the other, compared case-insensitively. Labels shorter
    /// than the prefix length never match.
    pub fn label_affinity(&self, nodes: &[Node]) -> PatternSet {
        let (c, d) = &self.affinity_categories;
        let partners: Vec<&Node> = nodes.iter().filter(|n| n.category() == d).collect();

        nodes
            .iter()
            .filter(|n| n.category() == c)
            .filter_map(|node| {
                partners
                    .iter()
                    .find(|partner| {
                        labels_share_prefix(node.label(), partner.label(), self.affinity_prefix_len)
                    })
                    .map(|partner| [node.id(), partner.id()])
            })
            .flatten()
            .collect()
    }

    /// Runs every enabled heuristic over the nodes of `graph`.
    ///
    /// Edge ids are `"inferred-{n}"` with `n` counting up from 0 across all
    /// inferred edges, skipping ids already taken by edges of `graph`.
    pub fn infer(&self, graph: &Graph) -> Inference {
        let nodes = graph.nodes();
        let patterns: Vec<(Heuristic, PatternSet)> = Heuristic::ALL
            .into_iter()
            .filter(|h| self.flags.is_enabled(*h))
            .map(|h| (h, self.pattern(h, nodes)))
            .collect();

        let taken: HashSet<&str> = graph.edges().iter().filter_map(Edge::id).collect();
        let mut ids = InferredIds::new(taken);
        let edges: Vec<Edge> = patterns
            .iter()
            .flat_map(|(heuristic, set)| set.edge_chain(heuristic.edge_kind()))
            .map(|edge| edge.with_id(ids.next_id()))
            .collect();

        for (heuristic, set) in &patterns {
            debug!(heuristic:? = heuristic, members = set.len(); "Pattern computed");
        }
        trace!(edges:? = edges; "Inferred edges");

        Inference { patterns, edges }
    }

    /// Returns a copy of `graph` with the inferred edges appended.
    pub fn apply(&self, graph: &Graph) -> Graph {
        graph.with_additional_edges(self.infer(graph).into_edges())
    }
}

impl Default for PatternInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential `inferred-{n}` ids avoiding a set of taken ids.
struct InferredIds<'a> {
    taken: HashSet<&'a str>,
    next: usize,
}

impl<'a> InferredIds<'a> {
    fn new(taken: HashSet<&'a str>) -> Self {
        Self { taken, next: 0 }
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = format!("inferred-{}", self.next);
            self.next += 1;
            if !self.taken.contains(id.as_str()) {
                return id;
            }
        }
    }
}

fn shares_element_or_ordinal(a: &Node, b: &Node) -> bool {
    let same_element = a.element().is_some() && a.element() == b.element();
    let same_ordinal = a.ordinal_index().is_some() && a.ordinal_index() == b.ordinal_index();
    same_element || same_ordinal
}

fn labels_share_prefix(a: &str, b: &str, prefix_len: usize) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let prefix_in = |source: &str, target: &str| -> bool {
        if source.chars().count() < prefix_len {
            return false;
        }
        let prefix: String = source.chars().take(prefix_len).collect();
        target.contains(prefix.as_str())
    };
    prefix_in(&a, &b) || prefix_in(&b, &a)
}
