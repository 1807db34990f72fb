/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the path canvas.
//!
//! The host captures raw device events and resolves them to world-space
//! points; this module turns those into [`GraphIntent`]s according to the
//! active mode. Mapping is pure (no session access), which keeps the
//! per-mode input contract testable without a session or a window.
//!
//! Mode switches, delay selection, and export/import requests do not pass
//! through here: the host emits `GraphIntent::SwitchMode`/`SetDelay`
//! directly and calls the session's codec methods for persistence.

use euclid::default::Point2D;

use crate::app::{GraphIntent, Mode};

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer event, already transformed to world space by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point2D<f32>,
}

/// Keyboard triggers with a graph-level meaning.
///
/// Both act on the host-supplied world point (the camera center in the
/// reference host), and both work from any mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTrigger {
    /// Toggle the highlighted path to the node under the point.
    FindPath,
    /// Start a run from the node under the point.
    ChooseStartHere,
}

/// Map a pointer press/move/release to intents for the active mode.
///
/// Only the latch-driven modes react to the raw gesture phases; the
/// click-driven modes (add, delete, choose-start) are handled by
/// [`intents_for_click`].
pub fn intents_for_pointer(mode: Mode, event: PointerEvent) -> Vec<GraphIntent> {
    match (mode, event.phase) {
        (Mode::MoveNode, PointerPhase::Down) => vec![GraphIntent::BeginDrag {
            position: event.position,
        }],
        (Mode::MoveNode, PointerPhase::Move) => vec![GraphIntent::DragTo {
            position: event.position,
        }],
        (Mode::MoveNode, PointerPhase::Up) => vec![GraphIntent::EndDrag],
        (Mode::AddConnection, PointerPhase::Down) => vec![GraphIntent::BeginConnection {
            position: event.position,
        }],
        (Mode::AddConnection, PointerPhase::Move) => vec![GraphIntent::PaintConnectionTo {
            position: event.position,
        }],
        (Mode::AddConnection, PointerPhase::Up) => vec![GraphIntent::EndConnection],
        _ => Vec::new(),
    }
}

/// Map a click (press+release without drag) to intents for the active mode.
pub fn intents_for_click(mode: Mode, position: Point2D<f32>) -> Vec<GraphIntent> {
    match mode {
        Mode::AddNode => vec![GraphIntent::AddNodeAt { position }],
        Mode::DeleteNode => vec![GraphIntent::DeleteNodeAt { position }],
        Mode::ChoosingStart => vec![GraphIntent::ChooseStart { position }],
        _ => Vec::new(),
    }
}

/// Map a keyboard trigger to intents. Mode-independent.
pub fn intents_for_key(trigger: KeyTrigger, world_point: Point2D<f32>) -> Vec<GraphIntent> {
    match trigger {
        KeyTrigger::FindPath => vec![GraphIntent::FindPathTo {
            position: world_point,
        }],
        KeyTrigger::ChooseStartHere => vec![GraphIntent::ChooseStart {
            position: world_point,
        }],
    }
}
