/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Incremental single-source shortest-path engine.
//!
//! The engine is a stepper: one [`Search::advance`] call relaxes the current
//! node's neighbors, settles it, and picks the next frontier node. Drivers
//! own the pacing, either a tight loop to completion (no animation delay)
//! or one `advance` per timer fire. The engine itself never schedules
//! anything and is fully synchronous between calls.
//!
//! Cancellation is the owner dropping the `Search`; whatever distances and
//! predecessors were stamped on nodes up to that point remain a valid
//! shortest-path tree over the visited region.

use std::collections::HashSet;

use crate::graph::{Graph, NodeKey};

/// State of one shortest-path run.
#[derive(Debug, Clone)]
pub struct Search {
    source: NodeKey,

    /// Nodes not yet settled.
    frontier: HashSet<NodeKey>,

    /// Nodes whose distance is final. Scratch state: cleared when the run
    /// finishes, since the surviving result lives on the nodes themselves.
    visited: HashSet<NodeKey>,

    /// The node being relaxed this step. Always drawn from the frontier;
    /// `None` once the run has finished.
    current: Option<NodeKey>,

    finished: bool,

    /// Milliseconds between animated steps; `None` means the run was driven
    /// to completion synchronously.
    delay_ms: Option<u64>,
}

impl Search {
    /// Start a run from `source`: reset all node bookkeeping, stamp the
    /// source distance to zero, and stage every node on the frontier.
    pub fn begin(graph: &mut Graph, source: NodeKey, delay_ms: Option<u64>) -> Self {
        graph.reset_search_fields();
        if let Some(node) = graph.get_node_mut(source) {
            node.distance = 0.0;
        }
        Self {
            source,
            frontier: graph.nodes().collect(),
            visited: HashSet::new(),
            current: Some(source),
            finished: false,
            delay_ms,
        }
    }

    /// Settle one node: relax the current node's unvisited neighbors, move
    /// it to the visited set, and select the next frontier node by minimum
    /// distance. Ties break by insertion order; the pick is observable in
    /// the step animation, so the tie-break is part of the contract.
    ///
    /// Calling this after the run has finished is a caller-contract
    /// violation; it trips a debug assertion and is a no-op in release.
    pub fn advance(&mut self, graph: &mut Graph) {
        debug_assert!(!self.finished, "advance() called on a finished search");
        let Some(current) = self.current else {
            return;
        };

        let Some(node) = graph.get_node(current) else {
            debug_assert!(false, "current node vanished mid-run");
            self.finish();
            return;
        };
        let (current_pos, current_dist) = (node.position, node.distance);

        let neighbors: Vec<NodeKey> = graph.neighbors(current).collect();
        for neighbor in neighbors {
            if self.visited.contains(&neighbor) {
                continue;
            }
            if let Some(node) = graph.get_node_mut(neighbor) {
                let candidate = current_dist + current_pos.distance_to(node.position);
                if candidate < node.distance {
                    node.distance = candidate;
                    node.predecessor = Some(current);
                }
            }
        }

        self.frontier.remove(&current);
        self.visited.insert(current);

        if self.frontier.is_empty() {
            self.finish();
            return;
        }

        // Minimum-distance frontier node, first in insertion order on ties.
        let mut next: Option<(NodeKey, f32)> = None;
        for key in graph.nodes() {
            if !self.frontier.contains(&key) {
                continue;
            }
            let Some(node) = graph.get_node(key) else {
                continue;
            };
            if next.is_none_or(|(_, best)| node.distance < best) {
                next = Some((key, node.distance));
            }
        }

        match next {
            // An infinite minimum means the rest of the frontier is
            // unreachable from the source; visiting it would stamp nothing.
            Some((key, dist)) if dist.is_finite() => self.current = Some(key),
            _ => self.finish(),
        }
    }

    /// Drive the run to completion in one uninterrupted burst.
    ///
    /// Bounded: every `advance` shrinks the frontier, so this terminates in
    /// at most `node_count` steps.
    pub fn run_to_completion(&mut self, graph: &mut Graph) {
        while !self.finished {
            self.advance(graph);
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.current = None;
        self.frontier.clear();
        self.visited.clear();
    }

    /// The node the run started from.
    pub fn source(&self) -> NodeKey {
        self.source
    }

    /// The node being relaxed this step, if the run is still going.
    pub fn current(&self) -> Option<NodeKey> {
        self.current
    }

    /// Settled nodes, in no particular order. Empty once the run finishes.
    pub fn visited(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.visited.iter().copied()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Delay between animated steps, `None` for a synchronous run.
    pub fn delay_ms(&self) -> Option<u64> {
        self.delay_ms
    }
}

/// Walk predecessor links from `target` back to the root of its tree.
///
/// Returns the node sequence from target to source; a single-element
/// sequence means `target` is the source itself or was never reached. Pure:
/// only meaningful once a run has finished, which the session layer
/// enforces before exposing it.
pub fn reconstruct_path(graph: &Graph, target: NodeKey) -> Vec<NodeKey> {
    let mut path = Vec::new();
    let mut cursor = Some(target);
    while let Some(key) = cursor {
        path.push(key);
        if path.len() > graph.node_count() {
            debug_assert!(false, "predecessor links form a cycle");
            break;
        }
        cursor = graph.get_node(key).and_then(|node| node.predecessor);
    }
    path
}
