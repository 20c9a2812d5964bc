// SPDX-License-Identifier: MIT OR Apache-2.0
//! UI rect transforms carried by nodes, ports and port control points.

use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Rect transform as understood by the scene editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectTransform {
    /// World position (always written as zero, the editor derives it)
    pub position: Vector3,
    /// Position relative to the parent; this is what layout moves
    pub local_position: Vector3,
    /// Lower anchor
    pub anchor_min: Vector2,
    /// Upper anchor
    pub anchor_max: Vector2,
    /// Size of the rect
    pub size_delta: Vector2,
    /// Scale
    pub scale: Vector3,
}

impl RectTransform {
    /// Transform anchored to the top-left corner of its parent
    pub fn top_left(local_position: Vector3, size_delta: Vector2) -> Self {
        Self {
            position: Vector3::ZERO,
            local_position,
            anchor_min: Vector2::new(0.0, 1.0),
            anchor_max: Vector2::new(0.0, 1.0),
            size_delta,
            scale: Vector3::ONE,
        }
    }

    /// Transform of a port's bezier control point, anchored at the port's center
    pub fn control_point(local_position: Vector3) -> Self {
        Self {
            position: Vector3::ZERO,
            local_position,
            anchor_min: Vector2::new(0.5, 0.5),
            anchor_max: Vector2::new(0.5, 0.5),
            size_delta: Vector2::ZERO,
            scale: Vector3::splat(2.21),
        }
    }

    /// Whether the transform still sits at the origin sentinel
    pub fn is_unplaced(&self) -> bool {
        self.local_position == Vector3::ZERO
    }
}
