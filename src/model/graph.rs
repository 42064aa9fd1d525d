//! Walking network graph with a spatial index over its nodes

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::{NodeId, geo_math};

/// Walking graph node
#[derive(Debug, Clone)]
pub struct CampusNode {
    /// Stable identifier from the campus dataset; empty for the ephemeral
    /// virtual origin of an edge-snapped query
    pub id: NodeId,
    /// Node coordinates (x = lng, y = lat)
    pub geometry: Point<f64>,
}

/// Node reference stored in the spatial index
#[derive(Debug, Clone)]
pub struct IndexedPoint {
    pub node: NodeIndex,
    position: [f64; 2],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Immutable weighted walking graph.
///
/// Undirected; edge weights are walking distances in meters, equal to the
/// geodesic distance between the endpoints. The graph may be disconnected.
/// The spatial index holds node positions projected at the mean node
/// latitude, so degree-space nearest-neighbor queries agree with geodesic
/// order at campus scale.
#[derive(Debug, Clone)]
pub struct CampusGraph {
    pub graph: UnGraph<CampusNode, f64>,
    node_ids: HashMap<NodeId, NodeIndex>,
    index: RTree<IndexedPoint>,
    ref_lat: f64,
}

impl CampusGraph {
    pub(crate) fn new(graph: UnGraph<CampusNode, f64>, node_ids: HashMap<NodeId, NodeIndex>) -> Self {
        let ref_lat = if graph.node_count() == 0 {
            0.0
        } else {
            graph.node_weights().map(|n| n.geometry.y()).sum::<f64>() / graph.node_count() as f64
        };

        let points = graph
            .node_indices()
            .map(|idx| {
                let projected = geo_math::project_local(graph[idx].geometry, ref_lat);
                IndexedPoint {
                    node: idx,
                    position: [projected.x, projected.y],
                }
            })
            .collect();

        Self {
            graph,
            node_ids,
            index: RTree::bulk_load(points),
            ref_lat,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_ids.contains_key(id)
    }

    /// Graph index of a node id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&CampusNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn node_weight(&self, idx: NodeIndex) -> Option<&CampusNode> {
        self.graph.node_weight(idx)
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Walking distance of the edge between two node ids, if one exists.
    /// Symmetric in its arguments.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Nearest graph node to a point, with its geodesic distance in meters.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        let projected = geo_math::project_local(*point, self.ref_lat);
        let found = self.index.nearest_neighbor(&[projected.x, projected.y])?;
        let node = &self.graph[found.node];
        Some((found.node, geo_math::geodesic_distance(*point, node.geometry)))
    }
}
