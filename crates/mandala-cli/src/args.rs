//! Command-line argument definitions for the Mandala CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout choice, canvas size and logging verbosity.

use clap::{Parser, ValueEnum};

/// Layout engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    /// Hub at the center, one concentric ring per category
    #[default]
    Ring,
    /// Ordinal path spiralling through the quadrant table
    Spiral,
}

/// Command-line arguments for the Mandala layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file
    #[arg(help = "Path to the input JSON graph")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout engine
    #[arg(long, value_enum, default_value_t = LayoutKind::Ring)]
    pub layout: LayoutKind,

    /// Canvas width
    #[arg(long, default_value_t = 1000.0)]
    pub width: f32,

    /// Canvas height
    #[arg(long, default_value_t = 1000.0)]
    pub height: f32,

    /// Skip relation inference; missing categories are still filled
    #[arg(long)]
    pub no_infer: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
