//! Data model for campus pedestrian routing
//!
//! Contains the walking graph and the building routing tables. Instances are
//! built once by [`crate::loading::build_campus_model`] and never mutated by
//! the routing core.

pub mod buildings;
pub mod graph;

pub use buildings::BuildingDirectory;
pub use graph::{CampusGraph, CampusNode, IndexedPoint};

/// Immutable campus routing model: walking graph plus building tables.
///
/// Safe to share by reference across any number of callers; route queries
/// that need a virtual attachment work on a private per-call copy of the
/// graph.
#[derive(Debug, Clone)]
pub struct CampusModel {
    pub graph: CampusGraph,
    pub buildings: BuildingDirectory,
}
