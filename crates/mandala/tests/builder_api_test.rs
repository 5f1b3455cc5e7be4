//! Integration tests for the Mandala facade
//!
//! These tests drive the full pipeline through the public API only.

use mandala::{
    Mandala, MandalaError,
    config::AppConfig,
    geometry::Size,
    graph::{Edge, EdgeKind, Element, Graph, Node},
    infer::{Heuristic, RuleFlags},
    quadrant::QuadrantError,
};

fn sample_graph() -> Graph {
    Graph::new(
        vec![
            Node::new("sun", "Hub", "Sun"),
            Node::new("t1", "Tribe", "Wolf*").with_element(Element::Fire),
            Node::new("t2", "Tribe", "Wolf").with_element(Element::Fire),
            Node::new("a1", "Archetype", "Sage").with_element(Element::Air),
            Node::new("k1", "Totem", "Owl").with_element(Element::Air),
            Node::new("c1", "Clan", "Riverfolk").with_element(Element::Fire),
            Node::new("l1", "Lineage", "Riverborn"),
        ],
        vec![Edge::new("sun", "t1").with_id("inferred-0")],
    )
}

#[test]
fn test_default_facade_exists() {
    let _mandala = Mandala::default();
}

#[test]
fn test_new_with_default_config() {
    assert!(Mandala::new(AppConfig::default()).is_ok());
}

#[test]
fn test_synthesize_completes_and_infers() {
    let mandala = Mandala::default();
    let graph = mandala.synthesize(&sample_graph());

    // 7 input nodes cover 6 categories: 3 placeholders are added.
    assert_eq!(graph.nodes().len(), 10);
    for category in ["Season", "Direction", "Ancestor"] {
        assert!(
            graph.nodes().iter().any(|n| n.category() == category),
            "missing {category}"
        );
    }

    let inferred: Vec<&Edge> = graph.edges()[1..].iter().collect();
    assert!(!inferred.is_empty());
    assert!(inferred.iter().all(|e| e.id().is_some()));
    // The input already uses `inferred-0`.
    assert!(inferred.iter().all(|e| e.id() != Some("inferred-0")));
    assert!(inferred.iter().any(|e| e.kind() == EdgeKind::Sequential));
    assert!(inferred.iter().any(|e| e.kind() == EdgeKind::Paired));
    assert!(inferred.iter().any(|e| e.kind() == EdgeKind::Axis));
}

#[test]
fn test_synthesize_without_rules_only_normalizes() {
    let mandala = Mandala::default();
    let input = sample_graph();
    let graph = mandala.synthesize_with_rules(&input, RuleFlags::none());
    assert_eq!(graph.edges(), input.edges());
    assert_eq!(graph.nodes().len(), 10);
}

#[test]
fn test_infer_reports_patterns() {
    let mandala = Mandala::default();
    let inference = mandala.infer(&sample_graph());
    let pairs = inference.pattern(Heuristic::CrossPairing).unwrap();
    assert_eq!(pairs.len(), 2);
    let fire = inference.pattern(Heuristic::ElementalClusters).unwrap();
    assert_eq!(fire.len(), 3);
}

#[test]
fn test_ring_layout_of_synthesized_graph() {
    let mandala = Mandala::default();
    let graph = mandala.synthesize(&sample_graph());
    let layout = mandala
        .ring_layout(&graph, Size::new(1000.0, 800.0))
        .expect("valid canvas");

    assert_eq!(layout.hub().node_id().map(|id| id.as_str()), Some("sun"));
    assert_eq!(layout.rings().len(), 8);
    assert_eq!(layout.points().len(), graph.nodes().len());
    for edge in graph.edges() {
        assert!(layout.edge_endpoints(edge).is_some());
    }
}

#[test]
fn test_spiral_layout_full_path() {
    let mandala = Mandala::default();
    let spiral = mandala
        .spiral_layout(Size::new(900.0, 900.0))
        .expect("valid canvas");
    assert_eq!(spiral.points().len(), 27);
    let ordinals: Vec<u32> = spiral.points().iter().map(|p| p.source_ordinal()).collect();
    assert_eq!(ordinals, (1..=27).collect::<Vec<_>>());
    assert!(spiral.curve().to_string().starts_with('M'));
}

#[test]
fn test_spiral_layout_for_nodes() {
    let mandala = Mandala::default();
    let graph = Graph::new(
        vec![
            Node::new("a", "Season", "Spring").with_ordinal(3),
            Node::new("b", "Season", "Summer").with_ordinal(12),
            Node::new("c", "Season", "Nowhere").with_ordinal(99),
            Node::new("d", "Season", "Unindexed"),
        ],
        vec![],
    );
    let spiral = mandala
        .spiral_layout_for_nodes(&graph, Size::new(600.0, 600.0))
        .expect("valid canvas");
    let ids: Vec<&str> = spiral
        .points()
        .iter()
        .filter_map(|p| p.node_id())
        .map(|id| id.as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn test_invalid_canvas_is_rejected() {
    let mandala = Mandala::default();
    let graph = sample_graph();
    for canvas in [
        Size::new(0.0, 100.0),
        Size::new(100.0, -1.0),
        Size::new(f32::NAN, 100.0),
    ] {
        assert!(matches!(
            mandala.ring_layout(&graph, canvas),
            Err(MandalaError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            mandala.spiral_layout(canvas),
            Err(MandalaError::InvalidCanvas { .. })
        ));
    }
}

#[test]
fn test_invalid_quadrant_table_fails_construction() {
    let config: AppConfig = toml::from_str(
        r#"
        [[spiral.quadrants]]
        name = "A"
        direction = "north"
        index_range = [1, 5]

        [[spiral.quadrants]]
        name = "B"
        direction = "south"
        index_range = [7, 9]
        "#,
    )
    .unwrap();
    assert!(matches!(
        Mandala::new(config),
        Err(MandalaError::Quadrant(_))
    ));
}

#[test]
fn test_oversized_quadrant_ranges_fail_construction() {
    for ranges in ["[1, 4294967295]", "[1, 4000000000]"] {
        let config: AppConfig = toml::from_str(&format!(
            r#"
            [[spiral.quadrants]]
            name = "Vast"
            direction = "north"
            index_range = {ranges}

            [[spiral.quadrants]]
            name = "After"
            direction = "east"
            index_range = [5, 6]
            "#
        ))
        .unwrap();
        assert!(matches!(
            Mandala::new(config),
            Err(MandalaError::Quadrant(QuadrantError::TooManyOrdinals { .. }))
        ));
    }
}

#[test]
fn test_custom_categories_from_config() {
    let config: AppConfig = toml::from_str(
        r#"
        [categories]
        order = ["Star", "Planet", "Moon"]
        hub = "Star"
        "#,
    )
    .unwrap();
    let mandala = Mandala::new(config).unwrap();
    let graph = Graph::new(vec![Node::new("m", "Moon", "Io")], vec![]);
    let complete = mandala.synthesize_with_rules(&graph, RuleFlags::none());
    let ids: Vec<&str> = complete.nodes().iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, ["m", "star-placeholder-0", "planet-placeholder-1"]);

    let layout = mandala
        .ring_layout(&complete, Size::new(400.0, 400.0))
        .unwrap();
    assert_eq!(
        layout.hub().node_id().map(|id| id.as_str()),
        Some("star-placeholder-0")
    );
    assert_eq!(layout.rings().len(), 2);
}

#[test]
fn test_placeholder_marker_is_a_label_marker() {
    let config: AppConfig = toml::from_str(
        r#"
        [categories]
        placeholder_marker = "?"
        "#,
    )
    .unwrap();
    assert_eq!(config.inference().label_markers(), ['*']);

    let mandala = Mandala::new(config).unwrap();
    let graph = Graph::new(
        vec![
            Node::new("t1", "Tribe", "Wolf?"),
            Node::new("t2", "Tribe", "Wolf"),
            Node::new("t3", "Tribe", "Wolf*"),
        ],
        vec![],
    );
    let inference = mandala.infer(&graph);
    let repeated: Vec<&str> = inference
        .pattern(Heuristic::RepeatedLabels)
        .unwrap()
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(repeated, ["t1", "t2", "t3"]);
}
