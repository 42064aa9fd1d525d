//! Assembles a `CampusModel` from a snapshot

use geo::{LineString, Point, Polygon};
use hashbrown::HashMap;
use itertools::Itertools;
use log::info;
use petgraph::graph::{NodeIndex, UnGraph};

use super::snapshot::{BuildingRecord, CampusSnapshot};
use crate::{
    Error, NodeId, geo_math,
    model::{BuildingDirectory, CampusGraph, CampusModel, CampusNode},
};

/// Builds an immutable routing model from a snapshot.
///
/// Referential integrity is validated here, never at lookup time: edge and
/// chain endpoints as well as building entrance/exit nodes must name existing
/// nodes. Edge weights are always the geodesic distance between the
/// endpoints, so symmetry holds by construction.
///
/// # Errors
///
/// Returns an error when the snapshot references unknown nodes, contains a
/// duplicate node id or a self-loop, or carries a degenerate building
/// outline.
pub fn build_campus_model(snapshot: &CampusSnapshot) -> Result<CampusModel, Error> {
    let mut graph =
        UnGraph::<CampusNode, f64>::with_capacity(snapshot.nodes.len(), snapshot.edges.len());
    let mut node_ids: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(snapshot.nodes.len());

    for record in &snapshot.nodes {
        if node_ids.contains_key(&record.id) {
            return Err(Error::InvalidData(format!(
                "duplicate node id {:?}",
                record.id
            )));
        }
        let idx = graph.add_node(CampusNode {
            id: record.id.clone(),
            geometry: Point::new(record.lng, record.lat),
        });
        node_ids.insert(record.id.clone(), idx);
    }

    let explicit = snapshot.edges.iter().map(|edge| (&edge.from, &edge.to));
    let chained = snapshot.path_chain.iter().tuple_windows();
    for (from, to) in explicit.chain(chained) {
        add_edge(&mut graph, &node_ids, from, to)?;
    }

    let mut buildings = BuildingDirectory::default();
    for record in &snapshot.buildings {
        register_building(&mut buildings, &node_ids, record)?;
    }

    let graph = CampusGraph::new(graph, node_ids);
    info!(
        "Campus model ready: {} nodes, {} edges, {} buildings",
        graph.node_count(),
        graph.edge_count(),
        snapshot.buildings.len()
    );

    Ok(CampusModel { graph, buildings })
}

fn add_edge(
    graph: &mut UnGraph<CampusNode, f64>,
    node_ids: &HashMap<NodeId, NodeIndex>,
    from: &str,
    to: &str,
) -> Result<(), Error> {
    let a = *node_ids
        .get(from)
        .ok_or_else(|| Error::UnknownNode(from.to_owned()))?;
    let b = *node_ids
        .get(to)
        .ok_or_else(|| Error::UnknownNode(to.to_owned()))?;

    if a == b {
        return Err(Error::InvalidData(format!("self-loop on node {from:?}")));
    }

    let weight = geo_math::geodesic_distance(graph[a].geometry, graph[b].geometry);
    // Re-listing a link updates the existing edge instead of duplicating it
    graph.update_edge(a, b, weight);
    Ok(())
}

fn register_building(
    buildings: &mut BuildingDirectory,
    node_ids: &HashMap<NodeId, NodeIndex>,
    record: &BuildingRecord,
) -> Result<(), Error> {
    for node in record.entrance.iter().chain(record.exit.iter()) {
        if !node_ids.contains_key(node) {
            return Err(Error::InvalidGraphReference {
                building: record.id.clone(),
                node: node.clone(),
            });
        }
    }

    if let Some(entrance) = &record.entrance {
        buildings.insert_entrance(record.id.clone(), entrance.clone());
    }
    if let Some(exit) = &record.exit {
        buildings.insert_exit(record.id.clone(), exit.clone());
    }

    if !record.outline.is_empty() {
        if record.outline.len() < 3 {
            return Err(Error::InvalidData(format!(
                "building {:?} outline has fewer than 3 vertices",
                record.id
            )));
        }
        let ring: Vec<(f64, f64)> = record.outline.iter().map(|[lng, lat]| (*lng, *lat)).collect();
        buildings.push_outline(record.id.clone(), Polygon::new(LineString::from(ring), vec![]));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::CampusSnapshot;

    fn chain_snapshot() -> CampusSnapshot {
        CampusSnapshot::from_json(
            r#"{
                "nodes": [
                    { "id": "a", "lat": 0.0, "lng": 0.0 },
                    { "id": "b", "lat": 0.0, "lng": 0.001 },
                    { "id": "c", "lat": 0.0, "lng": 0.002 }
                ],
                "path_chain": ["a", "b", "c"],
                "buildings": [
                    { "id": "x", "entrance": "c" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn chain_generates_consecutive_edges() {
        let model = build_campus_model(&chain_snapshot()).unwrap();
        assert_eq!(model.graph.node_count(), 3);
        assert_eq!(model.graph.edge_count(), 2);
        assert!(model.graph.weight("a", "b").is_some());
        assert!(model.graph.weight("b", "c").is_some());
        assert!(model.graph.weight("a", "c").is_none());
    }

    #[test]
    fn weights_equal_geodesic_distance() {
        let model = build_campus_model(&chain_snapshot()).unwrap();
        let a = model.graph.node("a").unwrap().geometry;
        let b = model.graph.node("b").unwrap().geometry;
        let weight = model.graph.weight("a", "b").unwrap();
        assert!((weight - geo_math::geodesic_distance(a, b)).abs() < 1e-9);
    }

    #[test]
    fn duplicate_link_is_collapsed() {
        let mut snapshot = chain_snapshot();
        snapshot.edges.push(crate::loading::EdgeRecord {
            from: "b".to_string(),
            to: "a".to_string(),
        });
        let model = build_campus_model(&snapshot).unwrap();
        assert_eq!(model.graph.edge_count(), 2);
    }

    #[test]
    fn unknown_edge_endpoint_fails() {
        let mut snapshot = chain_snapshot();
        snapshot.path_chain.push("ghost".to_string());
        assert!(matches!(
            build_campus_model(&snapshot),
            Err(Error::UnknownNode(node)) if node == "ghost"
        ));
    }

    #[test]
    fn self_loop_fails() {
        let mut snapshot = chain_snapshot();
        snapshot.edges.push(crate::loading::EdgeRecord {
            from: "a".to_string(),
            to: "a".to_string(),
        });
        assert!(matches!(
            build_campus_model(&snapshot),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn dangling_building_reference_fails() {
        let mut snapshot = chain_snapshot();
        snapshot.buildings[0].exit = Some("ghost".to_string());
        assert!(matches!(
            build_campus_model(&snapshot),
            Err(Error::InvalidGraphReference { building, node })
                if building == "x" && node == "ghost"
        ));
    }

    #[test]
    fn disconnected_graph_is_valid() {
        let mut snapshot = chain_snapshot();
        snapshot.nodes.push(crate::loading::NodeRecord {
            id: "island".to_string(),
            lat: 0.01,
            lng: 0.01,
        });
        let model = build_campus_model(&snapshot).unwrap();
        assert_eq!(model.graph.node_count(), 4);
        assert_eq!(model.graph.edge_count(), 2);
    }

    #[test]
    fn degenerate_outline_fails() {
        let mut snapshot = chain_snapshot();
        snapshot.buildings[0].outline = vec![[0.0, 0.0], [1.0, 1.0]];
        assert!(matches!(
            build_campus_model(&snapshot),
            Err(Error::InvalidData(_))
        ));
    }
}
