/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for the graph codec.

use serde::{Deserialize, Serialize};

/// Persisted world-space position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PersistedPoint {
    pub x: f32,
    pub y: f32,
}

/// Persisted node.
///
/// `id` is a dense `0..n-1` numbering assigned in insertion order at export
/// time; it has no meaning beyond one serialized document. Neighbor lists
/// are mutual, so every edge appears once from each endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedNode {
    pub id: u32,
    pub position: PersistedPoint,
    pub neighbors: Vec<u32>,
}
