//! Loading of campus snapshot data and assembly of the routing model.

mod builder;
mod snapshot;

pub use builder::build_campus_model;
pub use snapshot::{BuildingRecord, CampusSnapshot, EdgeRecord, NodeRecord};
