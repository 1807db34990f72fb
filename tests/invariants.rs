/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Property tests for the structural graph invariants: the neighbor
//! relation stays symmetric, free of self-loops and duplicates, and every
//! topology mutation wipes the per-node search bookkeeping.

use std::collections::HashSet;

use euclid::default::Point2D;
use pathboard::{Graph, NodeKey};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(f32, f32),
    Remove(usize),
    Connect(usize, usize),
    DisconnectAll(usize),
    ClearEdges,
    AutoConnect(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        ((-500.0f32..500.0), (-500.0f32..500.0)).prop_map(|(x, y)| Op::Add(x, y)),
        (0usize..16).prop_map(Op::Remove),
        ((0usize..16), (0usize..16)).prop_map(|(a, b)| Op::Connect(a, b)),
        (0usize..16).prop_map(Op::DisconnectAll),
        Just(Op::ClearEdges),
        (10.0f32..400.0).prop_map(Op::AutoConnect),
    ]
}

/// Resolve a pseudo-index to a live node key, wrapping over the current
/// node count.
fn pick(graph: &Graph, index: usize) -> Option<NodeKey> {
    let count = graph.node_count();
    if count == 0 {
        None
    } else {
        graph.nodes().nth(index % count)
    }
}

fn check_structure(graph: &Graph) {
    for key in graph.nodes() {
        let neighbors: Vec<NodeKey> = graph.neighbors(key).collect();
        let unique: HashSet<NodeKey> = neighbors.iter().copied().collect();
        assert_eq!(neighbors.len(), unique.len(), "duplicate edge on {key:?}");
        assert!(!unique.contains(&key), "self-loop on {key:?}");
        for neighbor in unique {
            assert!(
                graph.neighbors(neighbor).any(|k| k == key),
                "asymmetric edge {key:?} -> {neighbor:?}",
            );
        }
    }
}

fn check_search_fields_reset(graph: &Graph) {
    for (key, node) in graph.iter() {
        assert_eq!(node.distance, f32::INFINITY, "stale distance on {key:?}");
        assert!(node.predecessor.is_none(), "stale predecessor on {key:?}");
    }
}

/// Pretend a run stamped results, so the reset check after the next
/// mutation is meaningful.
fn stamp_search_fields(graph: &mut Graph) {
    let keys: Vec<NodeKey> = graph.nodes().collect();
    for (index, key) in keys.iter().enumerate() {
        if let Some(node) = graph.get_node_mut(*key) {
            node.distance = index as f32;
            node.predecessor = keys.first().copied().filter(|first| first != key);
        }
    }
}

proptest! {
    #[test]
    fn mutations_preserve_invariants(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut graph = Graph::new();

        for op in ops {
            stamp_search_fields(&mut graph);

            let mutated = match op {
                Op::Add(x, y) => {
                    graph.add_node(Point2D::new(x, y));
                    true
                }
                Op::Remove(i) => match pick(&graph, i) {
                    Some(key) => graph.remove_node(key),
                    None => false,
                },
                Op::Connect(i, j) => match (pick(&graph, i), pick(&graph, j)) {
                    (Some(a), Some(b)) => graph.connect(a, b),
                    _ => false,
                },
                Op::DisconnectAll(i) => match pick(&graph, i) {
                    Some(key) => {
                        let had_edges = graph.neighbors(key).count() > 0;
                        graph.disconnect_all(key);
                        had_edges
                    }
                    None => false,
                },
                Op::ClearEdges => {
                    graph.clear_edges();
                    true
                }
                Op::AutoConnect(threshold) => {
                    graph.auto_connect_within(threshold);
                    true
                }
            };

            check_structure(&graph);
            if mutated {
                check_search_fields_reset(&graph);
            }
        }
    }
}
