use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::Point;

use campuswalk::loading::{CampusSnapshot, EdgeRecord, NodeRecord, build_campus_model};
use campuswalk::model::CampusModel;
use campuswalk::routing::compute_route;
use campuswalk::snapping::snap_to_graph;

/// Square grid of walkable nodes, 0.0005 degrees apart, with one building
/// entrance in the far corner.
fn grid_model(side: usize) -> CampusModel {
    let mut snapshot = CampusSnapshot::default();
    for row in 0..side {
        for col in 0..side {
            snapshot.nodes.push(NodeRecord {
                id: format!("n{row}_{col}"),
                lat: row as f64 * 0.0005,
                lng: col as f64 * 0.0005,
            });
            if col > 0 {
                snapshot.edges.push(EdgeRecord {
                    from: format!("n{row}_{col}"),
                    to: format!("n{row}_{}", col - 1),
                });
            }
            if row > 0 {
                snapshot.edges.push(EdgeRecord {
                    from: format!("n{row}_{col}"),
                    to: format!("n{}_{col}", row - 1),
                });
            }
        }
    }
    snapshot.buildings.push(campuswalk::loading::BuildingRecord {
        id: "target".to_string(),
        entrance: Some(format!("n{0}_{0}", side - 1)),
        exit: None,
        outline: Vec::new(),
    });
    build_campus_model(&snapshot).unwrap()
}

fn bench_snapping(c: &mut Criterion) {
    let model = grid_model(12);
    let query = Point::new(0.00137, 0.00219);

    c.bench_function("snap_to_graph grid 12x12", |b| {
        b.iter(|| snap_to_graph(&model.graph, black_box(query)).unwrap());
    });
}

fn bench_routing(c: &mut Criterion) {
    let model = grid_model(12);
    let user = Point::new(0.0, 0.0);

    c.bench_function("compute_route grid 12x12", |b| {
        b.iter(|| compute_route(&model, black_box(user), "target").unwrap());
    });
}

criterion_group!(benches, bench_snapping, bench_routing);
criterion_main!(benches);
