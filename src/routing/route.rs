//! Route computation: origin resolution, graph augmentation and assembly

use geo::{Coord, LineString, Point};
use petgraph::graph::{NodeIndex, UnGraph};

use super::dijkstra::shortest_path;
use crate::{
    BuildingId, Error, NodeId, geo_math,
    model::{CampusModel, CampusNode},
    snapping::{Attachment, snap_to_graph},
};

/// How the route origin was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginKind {
    /// The user position was snapped onto the walking graph.
    Snapped,
    /// The user was inside a building; the route starts at its exit node.
    InsideBuilding(BuildingId),
}

/// A computed walking route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Persistent graph nodes along the route, in walking order. A virtual
    /// origin on an edge interior has no id and appears only in `polyline`.
    pub nodes: Vec<NodeId>,
    /// Total walking distance, rounded to the nearest meter.
    pub total_distance_m: u32,
    /// Route geometry for the rendering layer, origin first.
    pub polyline: LineString<f64>,
    pub origin: OriginKind,
}

/// Computes a walking route from `user` to the entrance of `destination`.
///
/// Origin resolution checks the building outlines first (first match in load
/// order): inside a building the route starts at that building's exit node.
/// Otherwise the position is snapped onto the graph, and an edge attachment
/// inserts a virtual origin into a private copy of the graph. The model
/// itself is never modified, and the direct edge between the attachment's
/// endpoints stays in place, so the solver may bypass the virtual origin when
/// that is shorter.
///
/// # Errors
///
/// [`Error::NoExitDefined`] when the containing building has no exit,
/// [`Error::NoEntranceDefined`] when the destination has no entrance,
/// [`Error::NoPathFound`] when origin and destination are disconnected, and
/// [`Error::NoPointsFound`] when snapping against an empty graph.
pub fn compute_route(
    model: &CampusModel,
    user: Point<f64>,
    destination: &str,
) -> Result<RouteResult, Error> {
    let graph = &model.graph;

    let (origin, origin_kind) = match model.buildings.containing(&user) {
        Some(building) => {
            let exit = model
                .buildings
                .exit_of(building)
                .ok_or_else(|| Error::NoExitDefined(building.clone()))?;
            let idx = graph
                .index_of(exit)
                .ok_or_else(|| Error::UnknownNode(exit.clone()))?;
            (
                Attachment::Existing(idx),
                OriginKind::InsideBuilding(building.clone()),
            )
        }
        None => (snap_to_graph(graph, user)?, OriginKind::Snapped),
    };

    let entrance = model
        .buildings
        .entrance_of(destination)
        .ok_or_else(|| Error::NoEntranceDefined(destination.to_owned()))?;
    let target = graph
        .index_of(entrance)
        .ok_or_else(|| Error::UnknownNode(entrance.clone()))?;

    match origin {
        Attachment::Existing(source) => {
            let (path, total) =
                shortest_path(&graph.graph, source, target).ok_or(Error::NoPathFound)?;
            Ok(assemble(&graph.graph, &path, total, None, origin_kind))
        }
        Attachment::OnEdge {
            point,
            endpoints: (a, b),
        } => {
            // Private per-query copy; the direct a-b edge is retained
            let mut augmented = graph.graph.clone();
            let source = augmented.add_node(CampusNode {
                id: NodeId::new(),
                geometry: point,
            });
            let to_a = geo_math::geodesic_distance(point, augmented[a].geometry);
            let to_b = geo_math::geodesic_distance(point, augmented[b].geometry);
            augmented.add_edge(source, a, to_a);
            augmented.add_edge(source, b, to_b);

            let (path, total) =
                shortest_path(&augmented, source, target).ok_or(Error::NoPathFound)?;
            Ok(assemble(&augmented, &path, total, Some(source), origin_kind))
        }
    }
}

fn assemble(
    graph: &UnGraph<CampusNode, f64>,
    path: &[NodeIndex],
    total: f64,
    virtual_origin: Option<NodeIndex>,
    origin: OriginKind,
) -> RouteResult {
    let coords: Vec<Coord<f64>> = path.iter().map(|&idx| graph[idx].geometry.into()).collect();
    let nodes = path
        .iter()
        .filter(|&&idx| Some(idx) != virtual_origin)
        .map(|&idx| graph[idx].id.clone())
        .collect();

    RouteResult {
        nodes,
        total_distance_m: total.round() as u32,
        polyline: LineString::new(coords),
        origin,
    }
}
