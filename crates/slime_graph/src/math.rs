// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geometry and color values written into scene documents.

use serde::{Deserialize, Serialize};

/// 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 3D vector
///
/// Node positions are stored as 3D vectors with `z = 0`. [`Vector3::ZERO`] doubles
/// as the "never placed" marker used by layout and pruning.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Zero vector, also the origin sentinel for unplaced nodes
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit scale
    pub const ONE: Self = Self::splat(1.0);

    /// Create a planar vector (`z = 0`)
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a vector with every component set to `v`
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }
}

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Orange used for selection outlines
    pub const SELECTED: Self = Self::rgb(1.0, 0.58, 0.04);
    /// Light orange used for hover outlines
    pub const HOVER: Self = Self::rgb(1.0, 0.81, 0.3);
    /// Cream used for connection lines
    pub const LINE: Self = Self::rgb(0.98, 0.94, 0.84);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
