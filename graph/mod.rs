/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the path canvas.
//!
//! Core structures:
//! - `Graph`: undirected graph backed by petgraph::StableGraph, with an
//!   insertion-order side list that defines the canonical iteration order
//! - `Node`: canvas node with world-space position and search bookkeeping
//!
//! Every topology mutator resets the per-node search fields: a shortest-path
//! result computed over a previous topology must never survive a change.

use euclid::default::{Point2D, Size2D};
use log::debug;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;

/// Stable node handle (petgraph NodeIndex — survives other deletions)
pub type NodeKey = NodeIndex;

/// A node on the canvas.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position in world space
    pub position: Point2D<f32>,

    /// Best known distance from the search source
    pub distance: f32,

    /// Node the best known path arrives from
    pub predecessor: Option<NodeKey>,
}

impl Node {
    fn at(position: Point2D<f32>) -> Self {
        Self {
            position,
            distance: f32::INFINITY,
            predecessor: None,
        }
    }

    /// Reset the search bookkeeping to its pre-run state.
    pub(crate) fn reset_search_fields(&mut self) {
        self.distance = f32::INFINITY;
        self.predecessor = None;
    }
}

/// Undirected canvas graph.
///
/// Edges carry no payload; an edge's weight is always the Euclidean distance
/// between its endpoints, computed on demand. Storing the graph undirected
/// makes the mutual-neighbor invariant structural: there is no way to
/// represent an asymmetric connection.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: StableUnGraph<Node, ()>,

    /// Node keys in insertion order.
    ///
    /// This is the observable iteration order everywhere order matters:
    /// `find_node_near` returns the earliest-created node on overlap, the
    /// search engine breaks frontier ties toward earlier nodes, and export
    /// numbers nodes in this order.
    order: Vec<NodeKey>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableUnGraph::default(),
            order: Vec::new(),
        }
    }

    /// Add a new node at a world-space position. Always succeeds.
    pub fn add_node(&mut self, position: Point2D<f32>) -> NodeKey {
        self.reset_search_fields();
        let key = self.inner.add_node(Node::at(position));
        self.order.push(key);
        key
    }

    /// Remove a node and all its incident edges.
    /// Returns false (not an error) when the key is stale.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        if self.inner.remove_node(key).is_none() {
            return false;
        }
        self.order.retain(|k| *k != key);
        self.reset_search_fields();
        true
    }

    /// Connect two nodes with an undirected edge.
    ///
    /// Returns false without mutating when the pair is a self-loop or is
    /// already connected; drag-paint interaction retries the same pair on
    /// every pointer move, so this is an idempotent skip rather than an
    /// error.
    pub fn connect(&mut self, a: NodeKey, b: NodeKey) -> bool {
        if a == b {
            debug!("ignoring self-connection on node {a:?}");
            return false;
        }
        if !self.inner.contains_node(a) || !self.inner.contains_node(b) {
            return false;
        }
        if self.is_connected(a, b) {
            debug!("nodes {a:?} and {b:?} already connected");
            return false;
        }
        self.reset_search_fields();
        self.inner.add_edge(a, b, ());
        true
    }

    /// Whether an edge exists between two nodes (direction-free).
    pub fn is_connected(&self, a: NodeKey, b: NodeKey) -> bool {
        self.inner.find_edge(a, b).is_some()
    }

    /// Remove every edge incident to a node.
    pub fn disconnect_all(&mut self, key: NodeKey) {
        let incident: Vec<_> = self.inner.edges(key).map(|e| e.id()).collect();
        if incident.is_empty() {
            return;
        }
        for edge in incident {
            self.inner.remove_edge(edge);
        }
        self.reset_search_fields();
    }

    /// Remove every edge in the graph, keeping all nodes.
    pub fn clear_edges(&mut self) {
        self.inner.clear_edges();
        self.reset_search_fields();
    }

    /// Remove every node (and with them, every edge).
    pub fn clear_nodes(&mut self) {
        self.inner.clear();
        self.order.clear();
    }

    /// Find the first node in insertion order whose Euclidean distance to
    /// `point` is strictly less than `radius`.
    ///
    /// On overlapping nodes the earliest-created one wins; this tie-break is
    /// observable (it decides which node a click latches) and callers rely
    /// on it being stable.
    pub fn find_node_near(&self, point: Point2D<f32>, radius: f32) -> Option<NodeKey> {
        self.nodes().find(|key| {
            self.inner
                .node_weight(*key)
                .is_some_and(|node| node.position.distance_to(point) < radius)
        })
    }

    /// Drop all existing edges, then connect every unordered pair of
    /// distinct nodes closer than `threshold`.
    ///
    /// O(n²) over the node count; the canvas holds tens of nodes, not
    /// thousands.
    pub fn auto_connect_within(&mut self, threshold: f32) {
        self.clear_edges();
        let keys = self.order.clone();
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                let close = match (self.inner.node_weight(*a), self.inner.node_weight(*b)) {
                    (Some(na), Some(nb)) => na.position.distance_to(nb.position) < threshold,
                    _ => false,
                };
                if close {
                    self.connect(*a, *b);
                }
            }
        }
    }

    /// Replace the graph contents with `count` nodes scattered uniformly
    /// over `extent`.
    pub fn scatter_random(&mut self, count: usize, extent: Size2D<f32>) {
        self.clear_nodes();
        if extent.width <= 0.0 || extent.height <= 0.0 {
            debug!("scatter extent {extent:?} is empty; leaving graph cleared");
            return;
        }
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let x = rng.gen_range(0.0..extent.width);
            let y = rng.gen_range(0.0..extent.height);
            self.add_node(Point2D::new(x, y));
        }
    }

    /// Reset every node's search fields to their pre-run defaults.
    pub fn reset_search_fields(&mut self) {
        for key in &self.order {
            if let Some(node) = self.inner.node_weight_mut(*key) {
                node.reset_search_fields();
            }
        }
    }

    /// Get a node by key
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.inner.node_weight(key)
    }

    /// Get a mutable node by key
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.inner.node_weight_mut(key)
    }

    /// Iterate node keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.order.iter().copied()
    }

    /// Iterate `(key, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.order
            .iter()
            .filter_map(|key| self.inner.node_weight(*key).map(|node| (*key, node)))
    }

    /// Iterate the neighbors of a node.
    pub fn neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors(key)
    }

    /// Every edge as one unordered endpoint pair.
    pub fn edge_list(&self) -> Vec<(NodeKey, NodeKey)> {
        self.inner
            .edge_indices()
            .filter_map(|edge| self.inner.edge_endpoints(edge))
            .collect()
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        debug_assert_eq!(self.order.len(), self.inner.node_count());
        self.inner.node_count()
    }

    /// Count of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
