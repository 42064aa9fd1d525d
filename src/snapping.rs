//! Point-to-graph snapping
//!
//! Maps an arbitrary coordinate to an attachment point on the walking graph:
//! either an existing node or an ephemeral point on an edge interior. The
//! attachment is per-query state and is never written back into the graph.

use geo::Point;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::{Error, geo_math, model::CampusGraph};

/// An edge-snap must beat the nearest node by this much before it wins;
/// keeps near-exact node matches from snapping onto an adjacent segment.
const EDGE_PREFERENCE_MARGIN_M: f64 = 0.1;

/// Ephemeral attachment of a query point to the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    /// The query point is closest to an existing node.
    Existing(NodeIndex),
    /// The query point projects onto the interior of an edge.
    OnEdge {
        /// Projected point on the segment (x = lng, y = lat).
        point: Point<f64>,
        endpoints: (NodeIndex, NodeIndex),
    },
}

/// Snaps `point` onto the nearest node or edge of the graph.
///
/// Every edge is scanned: the point is projected onto the segment in the
/// local planar frame at the query latitude, clamped to the segment, and the
/// geodesic distance to the projected point is compared against the nearest
/// node distance.
///
/// # Errors
///
/// Returns [`Error::NoPointsFound`] when the graph has no nodes.
pub fn snap_to_graph(graph: &CampusGraph, point: Point<f64>) -> Result<Attachment, Error> {
    let (nearest_node, node_dist) = graph.nearest_node(&point).ok_or(Error::NoPointsFound)?;

    let mut best_edge: Option<(Point<f64>, (NodeIndex, NodeIndex), f64)> = None;
    for edge in graph.graph.edge_references() {
        let (a, b) = (edge.source(), edge.target());
        let (projected, _) = geo_math::closest_point_on_segment(
            point,
            graph.graph[a].geometry,
            graph.graph[b].geometry,
        );
        let dist = geo_math::geodesic_distance(point, projected);
        if best_edge.is_none_or(|(_, _, best)| dist < best) {
            best_edge = Some((projected, (a, b), dist));
        }
    }

    match best_edge {
        Some((projected, endpoints, edge_dist))
            if edge_dist + EDGE_PREFERENCE_MARGIN_M < node_dist =>
        {
            Ok(Attachment::OnEdge {
                point: projected,
                endpoints,
            })
        }
        _ => Ok(Attachment::Existing(nearest_node)),
    }
}
