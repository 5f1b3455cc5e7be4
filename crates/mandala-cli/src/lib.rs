//! CLI logic for the Mandala layout tool.
//!
//! This module contains the core CLI logic: it reads a JSON graph, runs the
//! synthesis pipeline and writes the chosen layout as JSON.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::{Args, LayoutKind};
pub use error::CliError;

use std::fs;

use log::{debug, info};
use serde::Serialize;

use mandala::{
    Mandala,
    geometry::Size,
    graph::Graph,
    infer::RuleFlags,
    layout::{PathPoint, RingLayoutResult},
};

/// Document written to the output file.
#[derive(Debug, Serialize)]
pub struct LayoutOutput {
    graph: Graph,
    layout: LayoutData,
}

/// Result of the selected layout engine.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutData {
    Ring(RingLayoutResult),
    Spiral {
        points: Vec<PathPoint>,
        /// SVG path data of the smoothed curve through `points`.
        path: String,
    },
}

/// Run the Mandala CLI application
///
/// This function processes the input graph through the Mandala pipeline
/// and writes the resulting layout to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Malformed input JSON
/// - Invalid canvas sizes
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        layout:? = args.layout;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.no_infer {
        app_config = app_config.with_rules(RuleFlags::none());
    }

    let source = fs::read_to_string(&args.input)?;
    let graph: Graph = match serde_json::from_str(&source) {
        Ok(graph) => graph,
        Err(err) => return Err(CliError::new_json_error(err, source)),
    };

    let mandala = Mandala::new(app_config)?;
    let output = build_output(&mandala, &graph, args)?;

    let json = serde_json::to_string_pretty(&output).map_err(CliError::Output)?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

fn build_output(mandala: &Mandala, graph: &Graph, args: &Args) -> Result<LayoutOutput, CliError> {
    let graph = mandala.synthesize(graph);
    let canvas = Size::new(args.width, args.height);

    let layout = match args.layout {
        LayoutKind::Ring => LayoutData::Ring(mandala.ring_layout(&graph, canvas)?),
        LayoutKind::Spiral => {
            let indexed = graph.nodes().iter().any(|n| n.ordinal_index().is_some());
            debug!(indexed; "Selecting spiral mode");
            let spiral = if indexed {
                mandala.spiral_layout_for_nodes(&graph, canvas)?
            } else {
                mandala.spiral_layout(canvas)?
            };
            let (points, curve) = spiral.into_parts();
            LayoutData::Spiral {
                points,
                path: curve.to_string(),
            }
        }
    };

    Ok(LayoutOutput { graph, layout })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use mandala::graph::Node;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["mandala", "in.json"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_ring_output_serializes_with_kind() {
        let graph = Graph::new(vec![Node::new("h", "Hub", "Heart")], vec![]);
        let output = build_output(&Mandala::default(), &graph, &args(&[])).unwrap();
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["layout"]["kind"], "ring");
        assert_eq!(value["graph"]["nodes"].as_array().unwrap().len(), 9);
        assert_eq!(value["layout"]["rings"].as_array().unwrap().len(), 8);
        assert_eq!(value["layout"]["hub"]["x"], 500.0);
    }

    #[test]
    fn test_spiral_without_ordinals_walks_full_table() {
        let graph = Graph::default();
        let output = build_output(&Mandala::default(), &graph, &args(&["--layout", "spiral"])).unwrap();
        let LayoutData::Spiral { points, path } = &output.layout else {
            panic!("expected spiral output");
        };
        assert_eq!(points.len(), 27);
        assert!(path.starts_with('M'));
    }

    #[test]
    fn test_spiral_with_ordinals_places_nodes() {
        let graph = Graph::new(
            vec![
                Node::new("a", "Season", "Dawn").with_ordinal(1),
                Node::new("b", "Season", "Dusk").with_ordinal(27),
            ],
            vec![],
        );
        let output = build_output(&Mandala::default(), &graph, &args(&["--layout", "spiral"])).unwrap();
        let LayoutData::Spiral { points, .. } = &output.layout else {
            panic!("expected spiral output");
        };
        let ordinals: Vec<u32> = points.iter().map(PathPoint::source_ordinal).collect();
        assert_eq!(ordinals, [1, 27]);
    }

    #[test]
    fn test_invalid_canvas() {
        let err = build_output(&Mandala::default(), &Graph::default(), &args(&["--width", "0"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(mandala::MandalaError::InvalidCanvas { .. })
        ));
    }
}
