/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph codec: JSON export/import of topology and positions.
//!
//! The wire format is an array of node records (see
//! [`types::PersistedNode`]) with dense ids assigned at export time. Import
//! is two-pass (nodes first, then neighbor resolution) because neighbor
//! lists are mutual and may reference ids defined later in the document.
//! Import builds a fresh graph and only hands it over on full success, so a
//! malformed document can never leave the session half-replaced.

pub mod types;

use std::collections::HashMap;

use euclid::default::Point2D;
use log::warn;

use crate::graph::{Graph, NodeKey};
use types::{PersistedNode, PersistedPoint};

/// Import failure. The input text could not be understood; the caller's
/// graph is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    MalformedInput(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::MalformedInput(detail) => write!(f, "malformed graph input: {detail}"),
        }
    }
}

/// Serialize a graph to its textual form. Always succeeds.
///
/// Nodes are numbered `0..n-1` in insertion order; the numbering is
/// re-derived on every export and carries no identity across documents.
pub fn export_graph(graph: &Graph) -> String {
    let ids: HashMap<NodeKey, u32> = graph
        .nodes()
        .enumerate()
        .map(|(index, key)| (key, index as u32))
        .collect();

    let records: Vec<PersistedNode> = graph
        .iter()
        .map(|(key, node)| {
            let mut neighbors: Vec<u32> = graph
                .neighbors(key)
                .filter_map(|neighbor| ids.get(&neighbor).copied())
                .collect();
            neighbors.sort_unstable();
            PersistedNode {
                id: ids[&key],
                position: PersistedPoint {
                    x: node.position.x,
                    y: node.position.y,
                },
                neighbors,
            }
        })
        .collect();

    match serde_json::to_string(&records) {
        Ok(text) => text,
        Err(err) => {
            debug_assert!(false, "exporting plain records cannot fail: {err}");
            warn!("graph export failed: {err}");
            String::new()
        },
    }
}

/// Parse a graph from its textual form.
///
/// Fails with [`CodecError::MalformedInput`] on invalid JSON, duplicate
/// ids, or a neighbor reference to an id the document never defines.
/// Neighbor entries that would form a self-loop or repeat an existing edge
/// are skipped the same way interactive connects are.
pub fn import_graph(text: &str) -> Result<Graph, CodecError> {
    let records: Vec<PersistedNode> = serde_json::from_str(text)
        .map_err(|err| CodecError::MalformedInput(format!("invalid JSON: {err}")))?;

    // First pass: materialize every node so forward references resolve.
    let mut graph = Graph::new();
    let mut key_by_id: HashMap<u32, NodeKey> = HashMap::with_capacity(records.len());
    for record in &records {
        if key_by_id.contains_key(&record.id) {
            return Err(CodecError::MalformedInput(format!(
                "node id {} defined twice",
                record.id
            )));
        }
        let key = graph.add_node(Point2D::new(record.position.x, record.position.y));
        key_by_id.insert(record.id, key);
    }

    // Second pass: resolve neighbor id lists into edges.
    for record in &records {
        let from = key_by_id[&record.id];
        for neighbor_id in &record.neighbors {
            let Some(to) = key_by_id.get(neighbor_id).copied() else {
                return Err(CodecError::MalformedInput(format!(
                    "node {} references undefined neighbor id {neighbor_id}",
                    record.id
                )));
            };
            // Mutual lists name each edge twice; connect() skips the echo.
            graph.connect(from, to);
        }
    }

    Ok(graph)
}
