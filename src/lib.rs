//! Campus pedestrian routing core.
//!
//! Builds an immutable walking graph for a campus, snaps arbitrary
//! coordinates onto it, answers building-aware shortest-path queries and
//! filters noisy position samples into a stable smoothed stream.
//!
//! The model is constructed once from a [`loading::CampusSnapshot`] and is
//! read-only afterwards; route queries and tracking sessions borrow it
//! without locking.

pub mod error;
pub mod geo_math;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod snapping;
pub mod tracking;

pub use error::Error;

/// Identifier of a walking-graph node.
pub type NodeId = String;
/// Identifier of a campus building.
pub type BuildingId = String;
/// Walking distance in meters.
pub type DistanceMeters = f64;
