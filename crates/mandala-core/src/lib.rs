//! Mandala Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Mandala layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Owned node and category identifiers ([`identifier`] module)
//! - **Graph**: Nodes, edges, elements and graph snapshots ([`graph`] module)
//! - **Categories**: The ordered set of known node kinds ([`category`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Quadrants**: Validated spiral partition tables ([`quadrant`] module)

pub mod category;
pub mod color;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod quadrant;
