//! Shortest-path search over the walking graph

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::model::CampusNode;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap). Ties between
// equal-cost candidates break arbitrarily, so equal-length shortest paths may
// come back in either order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm with predecessor tracking and early target exit.
///
/// Returns the node sequence from `start` to `target` together with its total
/// length in meters, or `None` when the target is unreachable. The total
/// equals the sum of the traversed edge weights.
pub(crate) fn shortest_path(
    graph: &UnGraph<CampusNode, f64>,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<(Vec<NodeIndex>, f64)> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(graph.node_count());
    let mut predecessors: HashMap<NodeIndex, NodeIndex> =
        HashMap::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            return Some((walk_back(&predecessors, start, target), cost));
        }

        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + *edge.weight();

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    None
}

fn walk_back(
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match predecessors.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
