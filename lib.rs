/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Core state machine and shortest-path engine for an interactive graph
//! canvas.
//!
//! The crate owns the editable graph, the mode-driven mutation logic, the
//! stepwise Dijkstra run, and the JSON codec. Rendering, camera math, and
//! raw input capture live in the host: the host feeds world-space points and
//! trigger signals in (see [`input`]), and pulls read-only
//! [`view::SceneSnapshot`]s back out on every frame.

pub mod app;
pub mod engine;
pub mod graph;
pub mod input;
pub mod persistence;
pub mod view;

pub use app::{Camera, EditorConfig, GraphEditorApp, GraphIntent, Mode};
pub use engine::{Search, reconstruct_path};
pub use graph::{Graph, Node, NodeKey};
pub use input::{KeyTrigger, PointerEvent, PointerPhase};
pub use persistence::CodecError;
pub use view::SceneSnapshot;
