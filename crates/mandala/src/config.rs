//! Configuration types for Mandala graph synthesis and layout.
//!
//! This module provides configuration structures that control category
//! coverage, relation inference and both layout engines. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources, and
//! every section falls back to the reference domain when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`CategoryConfig`] - Known categories, hub category and placeholder marker.
//! - [`InferenceConfig`] - Rule flags and designated categories of each heuristic.
//! - [`RingConfig`] - Radii of the hub-and-rings layout.
//! - [`SpiralConfig`] - Spiral shape and the quadrant table.
//!
//! # Example
//!
//! ```
//! # use mandala::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [inference.rules]
//!     label_affinity = false
//!
//!     [ring]
//!     hub_radius = 24.0
//! "#).unwrap();
//! assert!(!config.inference().rules().label_affinity);
//! assert_eq!(config.ring().hub_radius(), 24.0);
//! assert_eq!(config.spiral().quadrants().len(), 5);
//! ```

use serde::Deserialize;

use mandala_core::{
    category::CategorySet,
    identifier::Category,
    quadrant::{Quadrant, reference_quadrants},
};

use crate::{MandalaError, infer::RuleFlags};

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Category configuration section.
    #[serde(default)]
    categories: CategoryConfig,

    /// Inference configuration section.
    #[serde(default)]
    inference: InferenceConfig,

    /// Ring layout configuration section.
    #[serde(default)]
    ring: RingConfig,

    /// Spiral layout configuration section.
    #[serde(default)]
    spiral: SpiralConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        categories: CategoryConfig,
        inference: InferenceConfig,
        ring: RingConfig,
        spiral: SpiralConfig,
    ) -> Self {
        Self {
            categories,
            inference,
            ring,
            spiral,
        }
    }

    pub fn categories(&self) -> &CategoryConfig {
        &self.categories
    }

    pub fn inference(&self) -> &InferenceConfig {
        &self.inference
    }

    pub fn ring(&self) -> &RingConfig {
        &self.ring
    }

    pub fn spiral(&self) -> &SpiralConfig {
        &self.spiral
    }

    /// Returns a copy with the inference rule flags replaced.
    pub fn with_rules(mut self, rules: RuleFlags) -> Self {
        self.inference.rules = rules;
        self
    }

    /// Checks the numeric settings.
    ///
    /// The quadrant table is validated separately when the spiral engine is
    /// built.
    ///
    /// # Errors
    ///
    /// Returns [`MandalaError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), MandalaError> {
        let ring = &self.ring;
        let spiral = &self.spiral;
        let checks = [
            (
                "ring.radius_fraction",
                ring.radius_fraction.is_finite() && ring.radius_fraction > 0.0,
            ),
            (
                "ring.hub_radius",
                ring.hub_radius.is_finite() && ring.hub_radius >= 0.0,
            ),
            (
                "ring.node_radius",
                ring.node_radius.is_finite() && ring.node_radius >= 0.0,
            ),
            ("spiral.turns", spiral.turns.is_finite()),
            (
                "spiral.outer_radius_factor",
                spiral.outer_radius_factor.is_finite() && spiral.outer_radius_factor > 0.0,
            ),
            (
                "spiral.inner_radius_factor",
                spiral.inner_radius_factor.is_finite()
                    && spiral.inner_radius_factor >= 0.0
                    && spiral.inner_radius_factor <= spiral.outer_radius_factor,
            ),
            ("categories.order", !self.categories.order.is_empty()),
        ];

        match checks.into_iter().find(|(_, ok)| !ok) {
            Some((setting, _)) => Err(MandalaError::Config(format!("invalid value for `{setting}`"))),
            None => Ok(()),
        }
    }
}

/// Known categories and placeholder settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Ordered list of known categories; also the ring priority.
    order: CategorySet,

    /// Category placed at the center of the ring layout.
    hub: Category,

    /// Character appended to placeholder labels.
    placeholder_marker: char,
}

impl CategoryConfig {
    pub fn new(order: CategorySet, hub: Category, placeholder_marker: char) -> Self {
        Self {
            order,
            hub,
            placeholder_marker,
        }
    }

    pub fn order(&self) -> &CategorySet {
        &self.order
    }

    pub fn hub(&self) -> &Category {
        &self.hub
    }

    pub fn placeholder_marker(&self) -> char {
        self.placeholder_marker
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            order: CategorySet::default(),
            hub: Category::new("Hub"),
            placeholder_marker: '*',
        }
    }
}

/// Rule flags and designated categories of the inference heuristics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    rules: RuleFlags,
    repeated_label_category: Category,
    pairing_categories: (Category, Category),
    affinity_categories: (Category, Category),
    label_markers: Vec<char>,
    cluster_threshold: usize,
}

impl InferenceConfig {
    pub fn rules(&self) -> RuleFlags {
        self.rules
    }

    pub fn repeated_label_category(&self) -> &Category {
        &self.repeated_label_category
    }

    pub fn pairing_categories(&self) -> (&Category, &Category) {
        (&self.pairing_categories.0, &self.pairing_categories.1)
    }

    pub fn affinity_categories(&self) -> (&Category, &Category) {
        (&self.affinity_categories.0, &self.affinity_categories.1)
    }

    /// Suffix characters stripped before labels are compared.
    ///
    /// The placeholder marker of [`CategoryConfig`] is always stripped as
    /// well, whether or not it is listed here.
    pub fn label_markers(&self) -> &[char] {
        &self.label_markers
    }

    pub fn cluster_threshold(&self) -> usize {
        self.cluster_threshold
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            rules: RuleFlags::default(),
            repeated_label_category: Category::new("Tribe"),
            pairing_categories: (Category::new("Archetype"), Category::new("Totem")),
            affinity_categories: (Category::new("Clan"), Category::new("Lineage")),
            label_markers: vec!['*'],
            cluster_threshold: 3,
        }
    }
}

/// Radii of the hub-and-rings layout.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Outermost ring radius as a fraction of the shorter canvas side.
    radius_fraction: f32,
    hub_radius: f32,
    node_radius: f32,
}

impl RingConfig {
    pub fn radius_fraction(&self) -> f32 {
        self.radius_fraction
    }

    pub fn hub_radius(&self) -> f32 {
        self.hub_radius
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.4,
            hub_radius: 40.0,
            node_radius: 16.0,
        }
    }
}

/// Spiral shape and quadrant table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    turns: f32,
    outer_radius_factor: f32,
    inner_radius_factor: f32,
    quadrants: Vec<Quadrant>,
}

impl SpiralConfig {
    pub fn turns(&self) -> f32 {
        self.turns
    }

    pub fn outer_radius_factor(&self) -> f32 {
        self.outer_radius_factor
    }

    pub fn inner_radius_factor(&self) -> f32 {
        self.inner_radius_factor
    }

    /// Unvalidated quadrant definitions.
    pub fn quadrants(&self) -> &[Quadrant] {
        &self.quadrants
    }
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            turns: 2.0,
            outer_radius_factor: 0.5,
            inner_radius_factor: 0.1,
            quadrants: reference_quadrants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mandala_core::quadrant::Direction;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories().order().len(), 9);
        assert_eq!(config.categories().hub().as_str(), "Hub");
        assert_eq!(config.inference().cluster_threshold(), 3);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.ring().radius_fraction(), 0.4);
        assert_eq!(config.spiral().turns(), 2.0);
        assert_eq!(config.categories().placeholder_marker(), '*');
    }

    #[test]
    fn test_full_toml() {
        let source = r##"
            [categories]
            order = ["Sun", "Planet", "Moon"]
            hub = "Sun"
            placeholder_marker = "?"

            [inference]
            repeated_label_category = "Moon"
            pairing_categories = ["Planet", "Moon"]
            label_markers = ["?", "*"]
            cluster_threshold = 4

            [inference.rules]
            cross_pairing = false

            [spiral]
            turns = 3.0

            [[spiral.quadrants]]
            name = "Inner"
            direction = "center"
            index_range = [1, 4]
            color = "#112233"
            theme = "core"

            [[spiral.quadrants]]
            name = "Outer"
            direction = "west"
            index_range = [5, 9]
            center_fraction = { x = 0.25, y = 0.5 }
            size_fraction = { width = 0.2, height = 0.4 }
        "##;
        let config: AppConfig = toml::from_str(source).unwrap();
        assert_eq!(config.categories().hub().as_str(), "Sun");
        assert_eq!(config.categories().placeholder_marker(), '?');
        assert_eq!(config.inference().repeated_label_category().as_str(), "Moon");
        assert_eq!(config.inference().pairing_categories().1.as_str(), "Moon");
        assert_eq!(config.inference().label_markers(), ['?', '*']);
        assert!(!config.inference().rules().cross_pairing);
        assert!(config.inference().rules().repeated_labels);
        assert_eq!(config.spiral().turns(), 3.0);
        let quadrants = config.spiral().quadrants();
        assert_eq!(quadrants.len(), 2);
        assert_eq!(quadrants[1].direction(), Direction::West);
        assert_eq!(quadrants[1].size_fraction().height(), 0.4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ring_fraction() {
        let config: AppConfig = toml::from_str("[ring]\nradius_fraction = 0.0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ring.radius_fraction"));
    }

    #[test]
    fn test_inner_radius_above_outer() {
        let config: AppConfig =
            toml::from_str("[spiral]\nouter_radius_factor = 0.2\ninner_radius_factor = 0.3").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spiral.inner_radius_factor"));
    }

    #[test]
    fn test_with_rules() {
        let config = AppConfig::default().with_rules(RuleFlags::none());
        assert!(!config.inference().rules().elemental_clusters);
    }
}
