/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end session scenarios driven the way a host drives the crate:
//! raw triggers through the input mapping, mutations through intents, and
//! reads through scene snapshots.

use euclid::default::Point2D;
use pathboard::{
    GraphEditorApp, GraphIntent, KeyTrigger, Mode, PointerEvent, PointerPhase, SceneSnapshot,
    input,
};

fn point(x: f32, y: f32) -> Point2D<f32> {
    Point2D::new(x, y)
}

fn click(app: &mut GraphEditorApp, x: f32, y: f32) {
    let intents = input::intents_for_click(app.mode(), point(x, y));
    app.apply_intents(intents);
}

fn pointer(app: &mut GraphEditorApp, phase: PointerPhase, x: f32, y: f32) {
    let intents = input::intents_for_pointer(
        app.mode(),
        PointerEvent {
            phase,
            position: point(x, y),
        },
    );
    app.apply_intents(intents);
}

fn key(app: &mut GraphEditorApp, trigger: KeyTrigger, x: f32, y: f32) {
    app.apply_intents(input::intents_for_key(trigger, point(x, y)));
}

#[test]
fn build_connect_run_highlight_and_round_trip() {
    let mut app = GraphEditorApp::new();

    // Lay out a line of four nodes in the initial add-node mode.
    for x in [0.0, 300.0, 700.0, 1200.0] {
        click(&mut app, x, 0.0);
    }
    assert_eq!(app.graph.node_count(), 4);

    // Paint the chain A-B-C-D in one drag.
    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::AddConnection,
    }]);
    pointer(&mut app, PointerPhase::Down, 0.0, 0.0);
    for x in [300.0, 700.0, 1200.0] {
        pointer(&mut app, PointerPhase::Move, x, 0.0);
    }
    pointer(&mut app, PointerPhase::Up, 0.0, 0.0);
    assert_eq!(app.graph.edge_count(), 3);

    // Start the search from A; no delay configured, so it completes here.
    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::ChoosingStart,
    }]);
    click(&mut app, 0.0, 0.0);

    let snapshot = SceneSnapshot::capture(&app);
    assert_eq!(snapshot.mode, Mode::PanZoom);
    assert!(snapshot.search.as_ref().is_some_and(|s| s.finished));
    let distances: Vec<f32> = snapshot.nodes.iter().map(|n| n.distance).collect();
    assert_eq!(distances, vec![0.0, 300.0, 700.0, 1200.0]);

    // Highlight the route to D, then toggle it back off.
    key(&mut app, KeyTrigger::FindPath, 1200.0, 0.0);
    let keys: Vec<_> = app.graph.nodes().collect();
    assert_eq!(
        app.highlighted_path(),
        &[keys[3], keys[2], keys[1], keys[0]]
    );
    key(&mut app, KeyTrigger::FindPath, 1200.0, 0.0);
    assert!(app.highlighted_path().is_empty());

    // The document survives a round trip into a fresh session.
    let text = app.export_graph();
    let mut restored = GraphEditorApp::new();
    restored.import_graph(&text).unwrap();
    assert_eq!(restored.graph.node_count(), 4);
    assert_eq!(restored.graph.edge_count(), 3);

    // And the restored topology produces the same distances.
    restored.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::ChoosingStart,
    }]);
    click(&mut restored, 0.0, 0.0);
    let distances: Vec<f32> = SceneSnapshot::capture(&restored)
        .nodes
        .iter()
        .map(|n| n.distance)
        .collect();
    assert_eq!(distances, vec![0.0, 300.0, 700.0, 1200.0]);
}

#[test]
fn animated_run_cancelled_mid_flight() {
    let mut app = GraphEditorApp::new();
    for x in [0.0, 300.0, 700.0] {
        click(&mut app, x, 0.0);
    }
    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::AddConnection,
    }]);
    pointer(&mut app, PointerPhase::Down, 0.0, 0.0);
    pointer(&mut app, PointerPhase::Move, 300.0, 0.0);
    pointer(&mut app, PointerPhase::Move, 700.0, 0.0);
    pointer(&mut app, PointerPhase::Up, 700.0, 0.0);

    app.apply_intents([
        GraphIntent::SetDelay { delay_ms: Some(100) },
        GraphIntent::SwitchMode {
            mode: Mode::ChoosingStart,
        },
    ]);
    click(&mut app, 0.0, 0.0);

    // One animated step has settled the source and relaxed its neighbor.
    assert_eq!(app.search_tick(), Some(100));
    let snapshot = SceneSnapshot::capture(&app);
    assert!(!snapshot.search.as_ref().unwrap().finished);

    // The user picks an edit mode before the next timer fires. The run is
    // gone, its stamps are wiped, and the stale timer finds nothing to do.
    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::DeleteNode,
    }]);
    assert_eq!(app.search_tick(), None);
    let snapshot = SceneSnapshot::capture(&app);
    assert!(snapshot.search.is_none());
    assert!(snapshot.nodes.iter().all(|n| n.distance == f32::INFINITY));
}

#[test]
fn auto_connect_then_run_reaches_the_chain() {
    let mut app = GraphEditorApp::new();
    for x in [0.0, 50.0, 150.0, 250.0] {
        click(&mut app, x, 0.0);
    }
    app.apply_intents([GraphIntent::AutoConnect]);

    let keys: Vec<_> = app.graph.nodes().collect();
    // Edges to the reference node exist exactly for the nodes within the
    // 200-unit threshold.
    assert!(app.graph.is_connected(keys[0], keys[1]));
    assert!(app.graph.is_connected(keys[0], keys[2]));
    assert!(!app.graph.is_connected(keys[0], keys[3]));

    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::ChoosingStart,
    }]);
    key(&mut app, KeyTrigger::ChooseStartHere, 0.0, 0.0);

    // The far node is still reachable through the chain.
    let snapshot = SceneSnapshot::capture(&app);
    assert!(snapshot.search.as_ref().is_some_and(|s| s.finished));
    assert!(snapshot.nodes.iter().all(|n| n.distance.is_finite()));
    assert_eq!(snapshot.nodes[3].distance, 250.0);
}

#[test]
fn choose_start_on_empty_canvas_aborts_cleanly() {
    let mut app = GraphEditorApp::new();
    click(&mut app, 0.0, 0.0);

    app.apply_intents([GraphIntent::SwitchMode {
        mode: Mode::ChoosingStart,
    }]);
    click(&mut app, 500.0, 500.0);

    let snapshot = SceneSnapshot::capture(&app);
    assert_eq!(snapshot.mode, Mode::PanZoom);
    assert!(!snapshot.camera_static);
    assert!(snapshot.search.is_none());
}
