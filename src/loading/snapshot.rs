//! Serde types for the campus dataset snapshot
//!
//! The snapshot is the hand-off format from the editor tooling: a node table,
//! links (explicit pairs and/or a consecutive path chain) and the building
//! tables. It is treated as an immutable input; edge weights are derived, not
//! read.

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{BuildingId, Error, NodeId};

/// Raw node record with its position in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
}

/// Explicit undirected link between two nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
}

/// Building record: optional entrance/exit nodes plus a ground outline given
/// as `[lng, lat]` vertex pairs. The outline ring need not repeat its first
/// vertex.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingRecord {
    pub id: BuildingId,
    #[serde(default)]
    pub entrance: Option<NodeId>,
    #[serde(default)]
    pub exit: Option<NodeId>,
    #[serde(default)]
    pub outline: Vec<[f64; 2]>,
}

/// Immutable snapshot of the campus dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampusSnapshot {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// Consecutive nodes along the main walking path; every adjacent pair
    /// becomes an edge.
    #[serde(default)]
    pub path_chain: Vec<NodeId>,
    #[serde(default)]
    pub buildings: Vec<BuildingRecord>,
}

impl CampusSnapshot {
    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a snapshot from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error when reading fails or the JSON is malformed.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
