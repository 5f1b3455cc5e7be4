//! Graph data model consumed and produced by the engine.
//!
//! A [`Graph`] is a plain value: a list of [`Node`]s and a list of [`Edge`]s.
//! Nothing here enforces referential integrity. Edges that point at missing
//! nodes are legal and are tolerated downstream; use [`Graph::dangling_edges`]
//! to find them.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::Point,
    identifier::{Category, NodeId},
};

/// One of the five elemental affinities a node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Aether,
}

impl Element {
    /// Every element, in canonical order.
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Aether,
    ];
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Aether => "Aether",
        };
        f.write_str(name)
    }
}

/// A labeled node of some category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: NodeId,
    category: Category,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ordinal_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Point>,
}

impl Node {
    /// Creates a node with no element, ordinal or position.
    pub fn new(id: impl Into<NodeId>, category: impl Into<Category>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            label: label.into(),
            element: None,
            ordinal_index: None,
            position: None,
        }
    }

    /// Sets the elemental affinity of this node
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Sets the ordinal index of this node
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal_index = Some(ordinal);
        self
    }

    /// Sets a caller supplied position hint
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn element(&self) -> Option<Element> {
        self.element
    }

    pub fn ordinal_index(&self) -> Option<u32> {
        self.ordinal_index
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

/// Visual flavor of a relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Default,
    Sequential,
    Paired,
    Axis,
}

/// A directed relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    source_id: NodeId,
    target_id: NodeId,
    #[serde(default)]
    kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f32>,
}

impl Edge {
    /// Creates an edge of [`EdgeKind::Default`] without id or weight.
    pub fn new(source_id: impl Into<NodeId>, target_id: impl Into<NodeId>) -> Self {
        Self {
            id: None,
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: EdgeKind::Default,
            weight: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn source_id(&self) -> &NodeId {
        &self.source_id
    }

    pub fn target_id(&self) -> &NodeId {
        &self.target_id
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn weight(&self) -> Option<f32> {
        self.weight
    }
}

/// A snapshot of nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns a copy of this graph with `edges` appended.
    pub fn with_additional_edges(&self, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = self.clone();
        graph.edges.extend(edges);
        graph
    }

    /// Finds the first node with the given id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Edges whose source or target is not a node of this graph.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        let ids: HashSet<&NodeId> = self.nodes.iter().map(Node::id).collect();
        self.edges.iter().filter(move |edge| {
            !ids.contains(edge.source_id()) || !ids.contains(edge.target_id())
        })
    }

    /// Node ids that occur more than once, in order of their second occurrence.
    pub fn duplicate_node_ids(&self) -> Vec<&NodeId> {
        let mut seen: HashMap<&NodeId, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for node in &self.nodes {
            let count = seen.entry(node.id()).or_default();
            *count += 1;
            if *count == 2 {
                duplicates.push(node.id());
            }
        }
        duplicates
    }
}
