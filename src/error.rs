use thiserror::Error;

use crate::{BuildingId, NodeId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("building {building:?} references unknown node {node:?}")]
    InvalidGraphReference {
        building: BuildingId,
        node: NodeId,
    },
    #[error("no entrance registered for building {0:?}")]
    NoEntranceDefined(BuildingId),
    #[error("no exit registered for building {0:?}")]
    NoExitDefined(BuildingId),
    #[error("no walkable path between origin and destination")]
    NoPathFound,
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("No nearby points found for snapping")]
    NoPointsFound,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
