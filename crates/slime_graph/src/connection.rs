// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::id::{ConnectionId, InstanceId, PortId};
use crate::math::{Color, Vector3};
use crate::port::Port;
use serde::{Deserialize, Serialize};

/// Decoration drawn at one end of a connection line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCap {
    /// Whether the cap is drawn
    pub active: bool,
    /// Cap shape index
    pub shape: u8,
    /// Cap size
    pub size: f32,
    /// Cap color
    pub color: Color,
    /// Rotation offset in degrees
    pub angle_offset: f32,
}

impl Default for LineCap {
    fn default() -> Self {
        Self {
            active: false,
            shape: 3,
            size: 5.0,
            color: Color::HOVER,
            angle_offset: 0.0,
        }
    }
}

/// Flow animation along a connection line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnimation {
    /// Whether the animation runs
    pub is_active: bool,
    /// Distance between animated points
    pub points_distance: f32,
    /// Point size
    pub size: f32,
    /// Point color
    pub color: Color,
    /// Point shape index
    pub shape: u8,
    /// Animation speed
    pub speed: f32,
}

/// Curve drawn for a connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Start decoration
    pub cap_start: LineCap,
    /// End decoration
    pub cap_end: LineCap,
    /// Line identifier, unused by the authoring side
    #[serde(rename = "ID")]
    pub id: String,
    /// Width at the source end
    pub start_width: f32,
    /// Width at the destination end
    pub end_width: f32,
    /// Dash spacing
    pub dash_distance: f32,
    /// Line color
    pub color: Color,
    /// Source port, source control point, destination port, destination control point
    pub points: [Vector3; 4],
    /// Line style index
    pub line_style: u8,
    /// Cached length, recomputed by the editor
    pub length: f32,
    /// Flow animation
    pub animation: LineAnimation,
}

/// A connection between an output port and an input port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Display name
    pub id: String,
    /// Unique connection ID
    #[serde(rename = "sID")]
    pub sid: ConnectionId,
    /// Instance id of the source node
    #[serde(rename = "port0InstanceID")]
    pub port0_instance_id: InstanceId,
    /// Instance id of the destination node
    #[serde(rename = "port1InstanceID")]
    pub port1_instance_id: InstanceId,
    /// Source (output) port
    #[serde(rename = "port0SID")]
    pub port0_sid: PortId,
    /// Destination (input) port
    #[serde(rename = "port1SID")]
    pub port1_sid: PortId,
    /// Color while selected
    pub selected_color: Color,
    /// Color while hovered
    pub hover_color: Color,
    /// Idle color
    pub default_color: Color,
    /// Curve style index
    pub curve_style: u8,
    /// Label shown on the line
    pub label: String,
    /// Curve
    pub line: Line,
    /// Whether the connection can be dragged
    pub enable_drag: bool,
    /// Whether the connection reacts to hover
    pub enable_hover: bool,
    /// Whether the connection can be selected
    pub enable_select: bool,
    /// Whether clicks are ignored
    pub disable_click: bool,
}

impl Connection {
    /// Create a connection from `source` (an output) to `dest` (an input)
    pub fn new(source: &Port, dest: &Port) -> Self {
        Self {
            id: format!("Connection ({} - {})", source.id, dest.id),
            sid: ConnectionId::new(),
            port0_instance_id: source.node_instance_id,
            port1_instance_id: dest.node_instance_id,
            port0_sid: source.sid,
            port1_sid: dest.sid,
            selected_color: Color::SELECTED,
            hover_color: Color::HOVER,
            default_color: Color::LINE,
            curve_style: 2,
            label: String::new(),
            line: Line {
                cap_start: LineCap::default(),
                cap_end: LineCap::default(),
                id: String::new(),
                start_width: 3.0,
                end_width: 3.0,
                dash_distance: 5.0,
                color: Color::LINE,
                points: Self::path_between(source, dest),
                line_style: 0,
                length: 0.0,
                animation: LineAnimation {
                    is_active: false,
                    points_distance: 90.0,
                    size: 10.0,
                    color: source.icon_color_default,
                    shape: 1,
                    speed: 0.0,
                },
            },
            enable_drag: true,
            enable_hover: true,
            enable_select: true,
            disable_click: false,
        }
    }

    /// Curve points for a connection between two ports at their current positions
    pub fn path_between(source: &Port, dest: &Port) -> [Vector3; 4] {
        [
            source.position(),
            source.control_point(),
            dest.position(),
            dest.control_point(),
        ]
    }

    /// Check if this connection involves a specific port
    pub fn involves_port(&self, port_id: PortId) -> bool {
        self.port0_sid == port_id || self.port1_sid == port_id
    }
}
