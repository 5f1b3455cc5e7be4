//! Category coverage for incoming node sets.
//!
//! [`GraphNormalizer`] guarantees that every category of its [`CategorySet`]
//! is represented by at least one node, synthesizing placeholder nodes for
//! the categories the input omits.

use std::collections::HashSet;

use log::{debug, trace, warn};

use mandala_core::{
    category::CategorySet,
    graph::{Element, Graph, Node},
    identifier::{Category, NodeId},
};

/// Default character appended to placeholder labels.
pub const DEFAULT_PLACEHOLDER_MARKER: char = '*';

/// Fills category gaps with placeholder nodes.
///
/// Placeholders get deterministic ids of the form
/// `"{category}-placeholder-{index}"`, where `category` is the lowercased
/// category name and `index` its zero-based position in the category set.
/// Their label is the category name followed by the marker character, and
/// their element alternates between two configured elements by that index.
/// Ids therefore depend on the category set; they must not be persisted
/// across category-set versions. When an input node already holds that id,
/// the first free `"-{n}"` suffix (starting at 2) is appended instead.
#[derive(Debug, Clone)]
pub struct GraphNormalizer {
    categories: CategorySet,
    marker: char,
    placeholder_elements: [Element; 2],
}

impl GraphNormalizer {
    /// Create a normalizer over `categories` with the default marker and elements
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            marker: DEFAULT_PLACEHOLDER_MARKER,
            placeholder_elements: [Element::Fire, Element::Water],
        }
    }

    /// Set the character appended to placeholder labels
    pub fn set_marker(&mut self, marker: char) -> &mut Self {
        self.marker = marker;
        self
    }

    /// Set the elements assigned to even and odd placeholders
    pub fn set_placeholder_elements(&mut self, even: Element, odd: Element) -> &mut Self {
        self.placeholder_elements = [even, odd];
        self
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Returns `nodes` followed by one placeholder per missing category.
    ///
    /// Nodes of categories outside the set are passed through unchanged. When
    /// every category is already present the output equals the input.
    pub fn normalize(&self, nodes: &[Node]) -> Vec<Node> {
        let present: HashSet<&Category> = nodes.iter().map(Node::category).collect();
        let taken: HashSet<&str> = nodes.iter().map(|n| n.id().as_str()).collect();

        let placeholders: Vec<Node> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, category)| !present.contains(category))
            .map(|(index, category)| self.placeholder(index, category, &taken))
            .collect();

        debug!(
            input_nodes = nodes.len(),
            placeholders = placeholders.len();
            "Normalized category coverage"
        );
        for placeholder in &placeholders {
            trace!(id = placeholder.id().as_str(); "Synthesized placeholder");
        }

        let mut normalized = Vec::with_capacity(nodes.len() + placeholders.len());
        normalized.extend_from_slice(nodes);
        normalized.extend(placeholders);
        normalized
    }

    /// Normalizes the nodes of `graph`, keeping its edges.
    pub fn normalize_graph(&self, graph: &Graph) -> Graph {
        Graph::new(self.normalize(graph.nodes()), graph.edges().to_vec())
    }

    fn placeholder(&self, index: usize, category: &Category, taken: &HashSet<&str>) -> Node {
        let base = format!("{}-placeholder-{index}", category.as_str().to_lowercase());
        let id = if taken.contains(base.as_str()) {
            let mut suffix = 2;
            let mut unique = format!("{base}-{suffix}");
            while taken.contains(unique.as_str()) {
                suffix += 1;
                unique = format!("{base}-{suffix}");
            }
            warn!(
                node_id = base.as_str(),
                category:% = category,
                placeholder_id = unique.as_str();
                "Placeholder id collides with an input node"
            );
            NodeId::new(unique)
        } else {
            NodeId::new(base)
        };
        let label = format!("{category}{}", self.marker);
        let element = self.placeholder_elements[index % 2];
        Node::new(id, category.clone(), label).with_element(element)
    }
}

impl Default for GraphNormalizer {
    fn default() -> Self {
        Self::new(CategorySet::default())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use mandala_core::category::REFERENCE_CATEGORIES;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
        prop::collection::vec(
            (
                prop::sample::select(REFERENCE_CATEGORIES.to_vec()),
                "[a-z]{1,6}",
            ),
            0..20,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (category, label))| Node::new(format!("n{i}"), category, label))
                .collect()
        })
    }

    /// Hub nodes whose ids mimic placeholder ids of other categories.
    fn clashing_nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
        prop::collection::vec((1usize..9, prop::option::of(2u32..5)), 0..6).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(index, suffix)| {
                    let category = REFERENCE_CATEGORIES[index].to_lowercase();
                    let id = match suffix {
                        Some(n) => format!("{category}-placeholder-{index}-{n}"),
                        None => format!("{category}-placeholder-{index}"),
                    };
                    Node::new(id, "Hub", "Self")
                })
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Output covers every category, keeps the input as a prefix, and adds one node per gap.
    fn check_normalization_completeness(nodes: Vec<Node>) -> Result<(), TestCaseError> {
        let normalizer = GraphNormalizer::default();
        let normalized = normalizer.normalize(&nodes);

        prop_assert_eq!(&normalized[..nodes.len()], &nodes[..]);
        for category in normalizer.categories().iter() {
            let count = normalized.iter().filter(|n| n.category() == category).count();
            prop_assert!(count >= 1, "category {} missing", category);
        }

        let present: HashSet<&Category> = nodes.iter().map(Node::category).collect();
        let missing = normalizer
            .categories()
            .iter()
            .filter(|c| !present.contains(c))
            .count();
        prop_assert_eq!(normalized.len(), nodes.len() + missing);
        Ok(())
    }

    /// Normalizing twice changes nothing the second time.
    fn check_normalization_is_idempotent(nodes: Vec<Node>) -> Result<(), TestCaseError> {
        let normalizer = GraphNormalizer::default();
        let once = normalizer.normalize(&nodes);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(once, twice);
        Ok(())
    }

    /// Placeholders never reuse an input id, even when inputs claim placeholder ids.
    fn check_placeholder_ids_are_fresh(nodes: Vec<Node>) -> Result<(), TestCaseError> {
        let normalized = GraphNormalizer::default().normalize(&nodes);
        let taken: HashSet<&NodeId> = nodes.iter().map(Node::id).collect();
        for placeholder in &normalized[nodes.len()..] {
            prop_assert!(
                !taken.contains(placeholder.id()),
                "placeholder reused {}",
                placeholder.id()
            );
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn normalization_completeness(nodes in nodes_strategy()) {
            check_normalization_completeness(nodes)?;
        }

        #[test]
        fn normalization_is_idempotent(nodes in nodes_strategy()) {
            check_normalization_is_idempotent(nodes)?;
        }

        #[test]
        fn placeholder_ids_are_fresh(nodes in clashing_nodes_strategy()) {
            check_placeholder_ids_are_fresh(nodes)?;
        }
    }
}
