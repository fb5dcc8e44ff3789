//! Canvas components.

pub mod force_graph;
