// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{CampusSnapshot, build_campus_model};
pub use crate::model::{BuildingDirectory, CampusGraph, CampusModel, CampusNode};
pub use crate::routing::{OriginKind, RouteResult, compute_route};
pub use crate::snapping::{Attachment, snap_to_graph};
pub use crate::tracking::{FilterConfig, PositionFilter, PositionSample, PositionTracker};

// Core id and measure aliases
pub use crate::BuildingId;
pub use crate::DistanceMeters;
pub use crate::NodeId;
