/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session state management for the path canvas.
//!
//! All mutation funnels through one place: hosts translate raw input into
//! [`GraphIntent`]s (see [`crate::input`]) and hand them to
//! [`GraphEditorApp::apply_intents`]. Nothing outside the reducer touches
//! the graph, the latches, or the run state, so invariants like mode-switch
//! cancellation and topology-change resets are enforced on a single code
//! path.

use euclid::default::{Point2D, Size2D};
use log::warn;

use crate::engine::{Search, reconstruct_path};
use crate::graph::{Graph, NodeKey};
use crate::persistence::{self, CodecError};

/// Camera coupling state.
///
/// The core never does coordinate math; it only tells the host's transform
/// layer whether the camera is pinned (edit modes) or free (pan/zoom mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub is_static: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self { is_static: true }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Interaction tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Hit-test radius around a node center, in world units. Matches the
    /// node's visual radius so clicking anywhere on the disc latches it.
    pub node_radius: f32,

    /// Distance threshold for the connect-nearby bulk operation.
    pub auto_connect_distance: f32,

    /// Node count produced by the random-scatter operation.
    pub scatter_count: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_radius: 15.0,
            auto_connect_distance: 200.0,
            scatter_count: 17,
        }
    }
}

/// Interpretation assigned to pointer and keyboard triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Click creates a node.
    AddNode,
    /// Click deletes the node under the pointer.
    DeleteNode,
    /// Drag repositions a latched node.
    MoveNode,
    /// Drag paints connections between nodes.
    AddConnection,
    /// Free camera movement; no graph mutation. A running search keeps
    /// stepping only in this mode.
    PanZoom,
    /// Next click picks the search source.
    ChoosingStart,
}

/// One unit of session mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphIntent {
    SwitchMode { mode: Mode },
    AddNodeAt { position: Point2D<f32> },
    DeleteNodeAt { position: Point2D<f32> },
    BeginDrag { position: Point2D<f32> },
    DragTo { position: Point2D<f32> },
    EndDrag,
    BeginConnection { position: Point2D<f32> },
    PaintConnectionTo { position: Point2D<f32> },
    EndConnection,
    ChooseStart { position: Point2D<f32> },
    FindPathTo { position: Point2D<f32> },
    StopRun,
    SetDelay { delay_ms: Option<u64> },
    AutoConnect,
    ScatterRandom { extent: Size2D<f32> },
    ClearEdges,
    ClearNodes,
}

/// Main session state.
pub struct GraphEditorApp {
    /// The graph data structure
    pub graph: Graph,

    pub config: EditorConfig,

    mode: Mode,

    pub camera: Camera,

    /// Node latched by a move gesture.
    dragged: Option<NodeKey>,

    /// Anchor end of an in-progress connection paint.
    connect_anchor: Option<NodeKey>,

    /// The active (or finished-but-not-cancelled) search run.
    search: Option<Search>,

    /// Step delay applied to the next run; `None` runs synchronously.
    delay_ms: Option<u64>,

    /// Highlighted route from `highlight_target` back to the source.
    highlighted_path: Vec<NodeKey>,
    highlight_target: Option<NodeKey>,
}

impl GraphEditorApp {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            config: EditorConfig::default(),
            mode: Mode::AddNode,
            camera: Camera::new(),
            dragged: None,
            connect_anchor: None,
            search: None,
            delay_ms: None,
            highlighted_path: Vec::new(),
            highlight_target: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Highlighted path from target back to source; empty when no highlight
    /// is set.
    pub fn highlighted_path(&self) -> &[NodeKey] {
        &self.highlighted_path
    }

    pub fn delay_ms(&self) -> Option<u64> {
        self.delay_ms
    }

    /// Apply a batch of intents deterministically in insertion order.
    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = GraphIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: GraphIntent) {
        match intent {
            GraphIntent::SwitchMode { mode } => self.set_mode(mode),
            GraphIntent::AddNodeAt { position } => {
                self.graph.add_node(position);
                self.after_topology_change();
            },
            GraphIntent::DeleteNodeAt { position } => {
                if let Some(key) = self.find_node_near(position) {
                    self.graph.remove_node(key);
                    self.after_topology_change();
                }
            },
            GraphIntent::BeginDrag { position } => {
                self.dragged = self.find_node_near(position);
            },
            GraphIntent::DragTo { position } => {
                if let Some(key) = self.dragged
                    && let Some(node) = self.graph.get_node_mut(key)
                {
                    node.position = position;
                }
            },
            GraphIntent::EndDrag => self.dragged = None,
            GraphIntent::BeginConnection { position } => {
                self.connect_anchor = self.find_node_near(position);
            },
            GraphIntent::PaintConnectionTo { position } => self.paint_connection_to(position),
            GraphIntent::EndConnection => self.connect_anchor = None,
            GraphIntent::ChooseStart { position } => self.choose_start(position),
            GraphIntent::FindPathTo { position } => self.find_path_to(position),
            GraphIntent::StopRun => self.stop_run(),
            GraphIntent::SetDelay { delay_ms } => self.delay_ms = delay_ms,
            GraphIntent::AutoConnect => {
                self.graph
                    .auto_connect_within(self.config.auto_connect_distance);
                self.after_topology_change();
            },
            GraphIntent::ScatterRandom { extent } => {
                self.graph.scatter_random(self.config.scatter_count, extent);
                self.after_topology_change();
            },
            GraphIntent::ClearEdges => {
                self.graph.clear_edges();
                self.after_topology_change();
            },
            GraphIntent::ClearNodes => {
                self.graph.clear_nodes();
                self.after_topology_change();
            },
        }
    }

    /// Switch the active mode.
    ///
    /// Any mode other than `PanZoom` pins the camera and cancels whatever
    /// run was in flight, wiping its stamped results; `PanZoom` frees the
    /// camera and leaves the graph and a running search alone.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.dragged = None;
        self.connect_anchor = None;
        if mode == Mode::PanZoom {
            self.camera.is_static = false;
        } else {
            self.cancel_run_and_reset();
            self.camera.is_static = true;
        }
    }

    fn find_node_near(&self, position: Point2D<f32>) -> Option<NodeKey> {
        self.graph.find_node_near(position, self.config.node_radius)
    }

    /// Connect the latched anchor to the node under the pointer, then
    /// advance the anchor so a continued drag chains further connections.
    /// (Connections commit immediately on drag-over; there is no
    /// release-time confirmation.)
    fn paint_connection_to(&mut self, position: Point2D<f32>) {
        let Some(anchor) = self.connect_anchor else {
            return;
        };
        let Some(target) = self.find_node_near(position) else {
            return;
        };
        if target == anchor || self.graph.is_connected(anchor, target) {
            return;
        }
        self.graph.connect(anchor, target);
        self.after_topology_change();
        self.connect_anchor = Some(target);
    }

    /// Resolve the clicked node and start a run from it.
    ///
    /// Clicking empty canvas aborts: run state is cleared and the session
    /// returns to `PanZoom`. With no delay configured the run completes
    /// before this returns; with a delay, the host drives it through
    /// [`Self::search_tick`].
    fn choose_start(&mut self, position: Point2D<f32>) {
        let Some(source) = self.find_node_near(position) else {
            self.cancel_run_and_reset();
            self.set_mode(Mode::PanZoom);
            return;
        };
        self.clear_highlight();
        let mut search = Search::begin(&mut self.graph, source, self.delay_ms);
        self.set_mode(Mode::PanZoom);
        if self.delay_ms.is_none() {
            search.run_to_completion(&mut self.graph);
        }
        self.search = Some(search);
    }

    /// Advance an animated run by one step.
    ///
    /// Returns the delay to wait before the next call, or `None` when no
    /// further tick is needed. A timer firing after the run was cancelled
    /// lands here as a no-op: cancellation removed the `Search`, so there is
    /// no state left to touch.
    pub fn search_tick(&mut self) -> Option<u64> {
        let search = self.search.as_mut()?;
        if search.is_finished() {
            return None;
        }
        search.advance(&mut self.graph);
        if search.is_finished() {
            None
        } else {
            search.delay_ms()
        }
    }

    /// Stop stepping without wiping stamped results.
    ///
    /// The partial distances and predecessors remain on the nodes (a valid
    /// shortest-path tree over whatever was visited) until the next mode
    /// switch or topology change resets them.
    fn stop_run(&mut self) {
        self.search = None;
        self.set_mode(Mode::PanZoom);
    }

    /// Toggle the highlighted path to the node under `position`.
    ///
    /// Only meaningful after a finished run. Hitting the highlighted node
    /// again (or empty canvas) clears the highlight; hitting another node
    /// recomputes it.
    fn find_path_to(&mut self, position: Point2D<f32>) {
        let finished = self.search.as_ref().is_some_and(Search::is_finished);
        if !finished {
            return;
        }
        match self.find_node_near(position) {
            Some(target) if self.highlight_target != Some(target) => {
                self.highlighted_path = reconstruct_path(&self.graph, target);
                self.highlight_target = Some(target);
            },
            _ => self.clear_highlight(),
        }
    }

    /// Serialize the current graph to its textual form.
    pub fn export_graph(&self) -> String {
        persistence::export_graph(&self.graph)
    }

    /// Replace the graph with one parsed from `text`.
    ///
    /// Atomic: on any parse or reference error the session graph is left
    /// untouched and the error is returned for the host to surface.
    pub fn import_graph(&mut self, text: &str) -> Result<(), CodecError> {
        match persistence::import_graph(text) {
            Ok(graph) => {
                self.graph = graph;
                self.after_topology_change();
                Ok(())
            },
            Err(err) => {
                warn!("graph import rejected: {err}");
                Err(err)
            },
        }
    }

    /// A topology change invalidates the run, the highlight, and any latch
    /// that might point at a removed node.
    fn after_topology_change(&mut self) {
        self.search = None;
        self.clear_highlight();
        self.dragged = self.dragged.filter(|key| self.graph.get_node(*key).is_some());
        self.connect_anchor = self
            .connect_anchor
            .filter(|key| self.graph.get_node(*key).is_some());
    }

    fn cancel_run_and_reset(&mut self) {
        self.search = None;
        self.graph.reset_search_fields();
        self.clear_highlight();
    }

    fn clear_highlight(&mut self) {
        self.highlighted_path.clear();
        self.highlight_target = None;
    }
}

impl Default for GraphEditorApp {
    fn default() -> Self {
        Self::new()
    }
}
