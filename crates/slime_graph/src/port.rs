// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::id::{InstanceId, NodeId, PortId};
use crate::math::{Color, Vector2, Vector3};
use crate::transform::RectTransform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port polarity, written as `0` (input) or `1` (output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PortPolarity {
    /// Input port
    Input,
    /// Output port
    Output,
}

impl From<PortPolarity> for u8 {
    fn from(polarity: PortPolarity) -> Self {
        match polarity {
            PortPolarity::Input => 0,
            PortPolarity::Output => 1,
        }
    }
}

impl TryFrom<u8> for PortPolarity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Input),
            1 => Ok(Self::Output),
            other => Err(format!("invalid port polarity {other}")),
        }
    }
}

impl fmt::Display for PortPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Icon colors of a port in its interaction states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortColors {
    /// Idle color
    pub default: Color,
    /// Hovered color
    pub hover: Color,
    /// Selected color
    pub selected: Color,
}

impl PortColors {
    /// Same hue in every state, brightened on hover
    pub const fn uniform(color: Color) -> Self {
        Self {
            default: color,
            hover: Color::HOVER,
            selected: Color::SELECTED,
        }
    }
}

/// Catalog description of a port a node type is created with
#[derive(Debug, Clone, PartialEq)]
pub struct PortTemplate {
    /// Port key, stable within the node type
    pub id: String,
    /// Input or output
    pub polarity: PortPolarity,
    /// Local position on the node
    pub position: Vector3,
    /// Local position of the curve control point
    pub control_point_position: Vector3,
    /// Advisory connection limit, not enforced when connecting
    pub max_connections: u32,
    /// Icon colors
    pub colors: PortColors,
}

impl PortTemplate {
    /// Horizontal offset of input ports from the node's left edge
    const INPUT_X: f32 = 15.0;
    /// Vertical spacing between stacked ports
    const ROW_HEIGHT: f32 = 40.0;
    /// Offset of the first port row below the header
    const FIRST_ROW: f32 = -60.0;
    /// Distance of the control point from its port
    const CONTROL_DISTANCE: f32 = 50.0;

    /// Input port in the given row; inputs accept a single connection
    pub fn input(id: impl Into<String>, row: usize, color: Color) -> Self {
        let y = Self::row_y(row);
        Self {
            id: id.into(),
            polarity: PortPolarity::Input,
            position: Vector3::new(Self::INPUT_X, y),
            control_point_position: Vector3::new(-Self::CONTROL_DISTANCE, 0.0),
            max_connections: 1,
            colors: PortColors::uniform(color),
        }
    }

    /// Output port in the given row of a node of width `node_width`
    pub fn output(id: impl Into<String>, row: usize, node_width: f32, color: Color) -> Self {
        let y = Self::row_y(row);
        Self {
            id: id.into(),
            polarity: PortPolarity::Output,
            position: Vector3::new(node_width - Self::INPUT_X, y),
            control_point_position: Vector3::new(Self::CONTROL_DISTANCE, 0.0),
            max_connections: 20,
            colors: PortColors::uniform(color),
        }
    }

    fn row_y(row: usize) -> f32 {
        Self::FIRST_ROW - row as f32 * Self::ROW_HEIGHT
    }
}

/// A port on a node, in document form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Port transform
    pub serializable_rect_transform: RectTransform,
    /// Port key from the catalog
    pub id: String,
    /// Unique port ID
    #[serde(rename = "sID")]
    pub sid: PortId,
    /// Input or output
    pub polarity: PortPolarity,
    /// Advisory connection limit
    pub max_connections: u32,
    /// Idle icon color
    pub icon_color_default: Color,
    /// Hovered icon color
    pub icon_color_hover: Color,
    /// Selected icon color
    pub icon_color_selected: Color,
    /// Connected icon color
    pub icon_color_connected: Color,
    /// Whether the port can be dragged
    pub enable_drag: bool,
    /// Whether the port reacts to hover
    pub enable_hover: bool,
    /// Whether clicks are ignored
    pub disable_click: bool,
    /// Control point transform for connection curves
    pub control_point_serializable_rect_transform: RectTransform,
    /// Instance id of the owning node
    #[serde(rename = "nodeInstanceID")]
    pub node_instance_id: InstanceId,
    /// ID of the owning node
    #[serde(rename = "nodeSID")]
    pub node_sid: NodeId,
}

impl Port {
    /// Instantiate a catalog port for a node
    pub fn from_template(template: &PortTemplate, node_sid: NodeId, node_instance_id: InstanceId) -> Self {
        Self {
            serializable_rect_transform: RectTransform::top_left(
                template.position,
                Vector2::new(40.0, 40.0),
            ),
            id: template.id.clone(),
            sid: PortId::new(),
            polarity: template.polarity,
            max_connections: template.max_connections,
            icon_color_default: template.colors.default,
            icon_color_hover: template.colors.hover,
            icon_color_selected: template.colors.selected,
            icon_color_connected: Color::WHITE,
            enable_drag: true,
            enable_hover: true,
            disable_click: false,
            control_point_serializable_rect_transform: RectTransform::control_point(
                template.control_point_position,
            ),
            node_instance_id,
            node_sid,
        }
    }

    /// Check if this is an input port
    pub fn is_input(&self) -> bool {
        self.polarity == PortPolarity::Input
    }

    /// Check if this is an output port
    pub fn is_output(&self) -> bool {
        self.polarity == PortPolarity::Output
    }

    /// Local position of the port on its node
    pub fn position(&self) -> Vector3 {
        self.serializable_rect_transform.local_position
    }

    /// Local position of the port's curve control point
    pub fn control_point(&self) -> Vector3 {
        self.control_point_serializable_rect_transform.local_position
    }
}
