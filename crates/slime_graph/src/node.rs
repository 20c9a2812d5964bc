// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::id::{InstanceId, NodeId, PortId};
use crate::math::{Color, Vector2, Vector3};
use crate::port::{Port, PortPolarity, PortTemplate};
use crate::transform::RectTransform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a node produces
///
/// Decides which expression operators a node takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueType {
    /// Floating point number
    Number,
    /// 3D vector
    Vector3,
    /// Boolean
    Boolean,
    /// Anything the expression builder does not compute with
    #[default]
    Other,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Vector3 => "vector3",
            Self::Boolean => "boolean",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Literal payload of a node (`modifier` in documents)
///
/// Constant nodes carry their value here; operation nodes carry the operator name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Modifier {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// Operator or free text; empty when unused
    Text(String),
}

impl Default for Modifier {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<f64> for Modifier {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Modifier {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Modifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Modifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Node type definition from the catalog
#[derive(Debug, Clone)]
pub struct NodeType {
    /// Type name, written as the node's `id`
    pub id: String,
    /// Display size
    pub size: Vector2,
    /// Default node color
    pub color: Color,
    /// Value produced by the node
    pub value_type: ValueType,
    /// Ports a new node is created with
    pub ports: Vec<PortTemplate>,
}

impl NodeType {
    /// Templates of the input ports
    pub fn inputs(&self) -> impl Iterator<Item = &PortTemplate> {
        self.ports.iter().filter(|p| p.polarity == PortPolarity::Input)
    }

    /// Templates of the output ports
    pub fn outputs(&self) -> impl Iterator<Item = &PortTemplate> {
        self.ports.iter().filter(|p| p.polarity == PortPolarity::Output)
    }
}

/// Registry of available node types
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    /// Registered node types by ID
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for [`Graph::add_node_with`](crate::Graph::add_node_with)
#[derive(Debug, Clone)]
pub struct NodeOptions {
    /// Literal payload
    pub modifier: Modifier,
    /// Create the catalog ports
    pub include_ports: bool,
    /// Explicit position; `None` leaves the node at the origin for layout
    pub position: Option<Vector3>,
}

impl NodeOptions {
    /// Set the literal payload
    pub fn with_modifier(mut self, modifier: impl Into<Modifier>) -> Self {
        self.modifier = modifier.into();
        self
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Vector3::new(x, y));
        self
    }

    /// Create the node without ports
    pub fn without_ports(mut self) -> Self {
        self.include_ports = false;
        self
    }
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            modifier: Modifier::default(),
            include_ports: true,
            position: None,
        }
    }
}

/// A node instance in the graph, in document form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node transform
    pub serializable_rect_transform: RectTransform,
    /// Node type name
    pub id: String,
    /// Unique instance ID
    #[serde(rename = "sID")]
    pub sid: NodeId,
    /// Whether ports of this node may connect to each other
    pub enable_self_connection: bool,
    /// Whether the node can be dragged
    pub enable_drag: bool,
    /// Whether the node reacts to hover
    pub enable_hover: bool,
    /// Whether the node can be selected
    pub enable_select: bool,
    /// Whether clicks are ignored
    pub disable_click: bool,
    /// Literal payload
    pub modifier: Modifier,
    /// Body color
    pub default_color: Color,
    /// Outline color while selected
    pub outline_selected_color: Color,
    /// Outline color while hovered
    pub outline_hover_color: Color,
    /// Ports of the node
    pub serializable_ports: Vec<Port>,
    /// Value produced by the node; assigned from the catalog, never written
    #[serde(skip)]
    pub value_type: ValueType,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType, options: NodeOptions) -> Self {
        let sid = NodeId::new();
        let instance_id = InstanceId::random();
        let serializable_ports = if options.include_ports {
            node_type
                .ports
                .iter()
                .map(|template| Port::from_template(template, sid, instance_id))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            serializable_rect_transform: RectTransform::top_left(
                options.position.unwrap_or(Vector3::ZERO),
                node_type.size,
            ),
            id: node_type.id.clone(),
            sid,
            enable_self_connection: false,
            enable_drag: true,
            enable_hover: false,
            enable_select: true,
            disable_click: false,
            modifier: options.modifier,
            default_color: node_type.color,
            outline_selected_color: Color::SELECTED,
            outline_hover_color: Color::HOVER,
            serializable_ports,
            value_type: node_type.value_type,
        }
    }

    /// Current layout position
    pub fn position(&self) -> Vector3 {
        self.serializable_rect_transform.local_position
    }

    /// Whether the node has never been placed
    pub fn is_unplaced(&self) -> bool {
        self.serializable_rect_transform.is_unplaced()
    }

    /// Get an input port by key
    pub fn input_port(&self, key: &str) -> Option<&Port> {
        self.serializable_ports.iter().find(|p| p.is_input() && p.id == key)
    }

    /// Get an output port by key
    pub fn output_port(&self, key: &str) -> Option<&Port> {
        self.serializable_ports.iter().find(|p| p.is_output() && p.id == key)
    }

    /// Input ports keyed by port key
    pub fn input_ports(&self) -> IndexMap<&str, &Port> {
        self.ports_with(PortPolarity::Input)
    }

    /// Output ports keyed by port key
    pub fn output_ports(&self) -> IndexMap<&str, &Port> {
        self.ports_with(PortPolarity::Output)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.serializable_ports.iter()
    }

    /// Check if one of this node's ports has the given ID
    pub fn owns_port(&self, port: PortId) -> bool {
        self.serializable_ports.iter().any(|p| p.sid == port)
    }

    fn ports_with(&self, polarity: PortPolarity) -> IndexMap<&str, &Port> {
        self.serializable_ports
            .iter()
            .filter(|p| p.polarity == polarity)
            .map(|p| (p.id.as_str(), p))
            .collect()
    }
}

/// Lightweight reference to a node in a [`Graph`](crate::Graph)
///
/// Handles do not keep nodes alive; a handle to a pruned node simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    /// ID of the referenced node
    pub sid: NodeId,
    /// Value the node produces
    pub value_type: ValueType,
}

impl NodeHandle {
    /// Handle for a node
    pub fn of(node: &Node) -> Self {
        Self {
            sid: node.sid,
            value_type: node.value_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adder() -> NodeType {
        NodeType {
            id: "Adder".to_string(),
            size: Vector2::new(200.0, 150.0),
            color: Color::rgb(0.2, 0.4, 0.8),
            value_type: ValueType::Number,
            ports: vec![
                PortTemplate::input("A", 0, Color::WHITE),
                PortTemplate::input("B", 1, Color::WHITE),
                PortTemplate::output("Result", 0, 200.0, Color::WHITE),
            ],
        }
    }

    #[test]
    fn test_node_ports_partition() {
        let node = Node::new(&adder(), NodeOptions::default());

        let inputs = node.input_ports();
        let outputs = node.output_ports();
        assert_eq!(inputs.keys().copied().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), ["Result"]);
        assert!(node.input_port("Result").is_none());
        assert!(node.output_port("A").is_none());
        assert!(node.ports().all(|p| p.node_sid == node.sid));
    }

    #[test]
    fn test_node_without_ports() {
        let node = Node::new(&adder(), NodeOptions::default().without_ports());
        assert_eq!(node.ports().count(), 0);
    }

    #[test]
    fn test_node_options() {
        let node = Node::new(
            &adder(),
            NodeOptions::default().with_modifier(2.5).with_position(10.0, -20.0),
        );
        assert_eq!(node.modifier, Modifier::Number(2.5));
        assert_eq!(node.position(), Vector3::new(10.0, -20.0));
        assert!(!node.is_unplaced());
        assert_eq!(node.serializable_rect_transform.size_delta, Vector2::new(200.0, 150.0));
    }

    #[test]
    fn test_ports_share_instance_id() {
        let node = Node::new(&adder(), NodeOptions::default());
        let first = node.serializable_ports[0].node_instance_id;
        assert!(node.ports().all(|p| p.node_instance_id == first));
    }

    #[test]
    fn test_modifier_wire_format() {
        assert_eq!(serde_json::to_string(&Modifier::default()).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Modifier::from(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Modifier::from(-1.0)).unwrap(), "-1.0");
        assert_eq!(serde_json::to_string(&Modifier::from("floor")).unwrap(), "\"floor\"");
    }
}
