//! Route computation over the campus walking graph.

pub(crate) mod dijkstra;
mod route;
mod to_geojson;

pub use route::{OriginKind, RouteResult, compute_route};
