// Copyright 2025 The secureswipe Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Serialize;

use crate::config::GestureConfig;

/// Horizontal and vertical displacement of a drag from its start.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// Which way the player is leaning while dragging.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Dragging right: "this is good".
    Accept,
    /// Dragging left: "this is bad".
    Reject,
    Neutral,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct Tint {
    pub intent: Intent,
    /// From 0.0 (no tint) to 1.0 (the drag has reached the threshold).
    pub strength: f64,
}

/// What the renderer should draw for the card under the pointer.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub offset: Offset,
    pub rotation_deg: f64,
    pub tint: Tint,
}

impl Feedback {
    pub fn neutral() -> Self {
        Self {
            offset: Offset::default(),
            rotation_deg: 0.0,
            tint: Tint {
                intent: Intent::Neutral,
                strength: 0.0,
            },
        }
    }
}

pub fn rotation(offset: Offset, config: &GestureConfig) -> f64 {
    offset.dx * config.rotation_per_px
}

pub fn tint(offset: Offset, config: &GestureConfig) -> Tint {
    let intent = if offset.dx > 0.0 {
        Intent::Accept
    } else if offset.dx < 0.0 {
        Intent::Reject
    } else {
        Intent::Neutral
    };
    let strength = if config.threshold > 0.0 {
        (offset.dx.abs() / config.threshold).min(1.0)
    } else if offset.dx == 0.0 {
        0.0
    } else {
        1.0
    };
    Tint { intent, strength }
}

pub fn feedback(offset: Offset, config: &GestureConfig) -> Feedback {
    Feedback {
        offset,
        rotation_deg: rotation(offset, config),
        tint: tint(offset, config),
    }
}
