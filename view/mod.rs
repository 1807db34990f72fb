/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Read-only scene snapshots for the renderer.
//!
//! The renderer collaborator is pull-based: on every animation tick it
//! captures a [`SceneSnapshot`] and draws from that, never reaching into
//! live session state. Everything here is plain copied data in world space.

use euclid::default::Point2D;

use crate::app::{GraphEditorApp, Mode};
use crate::graph::NodeKey;

/// One node as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeView {
    pub key: NodeKey,
    pub position: Point2D<f32>,
    pub distance: f32,
    pub predecessor: Option<NodeKey>,
}

/// The run state the renderer colors nodes by.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub source: NodeKey,
    pub current: Option<NodeKey>,
    pub visited: Vec<NodeKey>,
    pub finished: bool,
}

/// Complete drawable state of the session at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    /// Nodes in insertion order.
    pub nodes: Vec<NodeView>,
    /// One unordered endpoint pair per edge.
    pub edges: Vec<(NodeKey, NodeKey)>,
    /// Active mode, for overlay text.
    pub mode: Mode,
    /// Whether the camera is pinned to the canvas.
    pub camera_static: bool,
    /// Present while a run exists (stepping or finished-but-uncancelled).
    pub search: Option<SearchView>,
    /// Highlighted route from target back to source; empty when unset.
    pub highlighted_path: Vec<NodeKey>,
}

impl SceneSnapshot {
    pub fn capture(app: &GraphEditorApp) -> Self {
        let nodes = app
            .graph
            .iter()
            .map(|(key, node)| NodeView {
                key,
                position: node.position,
                distance: node.distance,
                predecessor: node.predecessor,
            })
            .collect();

        let search = app.search().map(|search| SearchView {
            source: search.source(),
            current: search.current(),
            visited: search.visited().collect(),
            finished: search.is_finished(),
        });

        Self {
            nodes,
            edges: app.graph.edge_list(),
            mode: app.mode(),
            camera_static: app.camera.is_static,
            search,
            highlighted_path: app.highlighted_path().to_vec(),
        }
    }
}
