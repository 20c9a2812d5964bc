// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store containing the nodes and connections of one scene document.

use crate::catalog::create_expression_registry;
use crate::connection::Connection;
use crate::id::{ConnectionId, NodeId, PortId};
use crate::math::Vector3;
use crate::node::{Node, NodeHandle, NodeOptions, NodeRegistry, ValueType};
use crate::port::{Port, PortPolarity};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Which ports [`Graph::connect_ports`] joins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelector {
    /// The same port key on both nodes
    Same(String),
    /// Source output key, then destination input key
    Pair(String, String),
}

impl PortSelector {
    fn keys(&self) -> (&str, &str) {
        match self {
            Self::Same(key) => (key, key),
            Self::Pair(output, input) => (output, input),
        }
    }
}

impl From<&str> for PortSelector {
    fn from(key: &str) -> Self {
        Self::Same(key.to_string())
    }
}

impl From<String> for PortSelector {
    fn from(key: String) -> Self {
        Self::Same(key)
    }
}

impl From<(&str, &str)> for PortSelector {
    fn from((output, input): (&str, &str)) -> Self {
        Self::Pair(output.to_string(), input.to_string())
    }
}

/// A scene graph being authored
///
/// Nodes keep insertion order, which is also the order layout visits them in and
/// the order they are written to the document.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: Vec<Connection>,
    /// Node types this graph can instantiate
    registry: NodeRegistry,
}

impl Graph {
    /// Create a new empty graph over a node catalog
    pub fn new(registry: NodeRegistry) -> Self {
        Self {
            nodes: IndexMap::new(),
            connections: Vec::new(),
            registry,
        }
    }

    /// Node catalog of this graph
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Add a node with default options
    pub fn add_node(&mut self, type_name: &str) -> Result<NodeHandle, GraphError> {
        self.add_node_with(type_name, NodeOptions::default())
    }

    /// Add a node of a catalog type
    pub fn add_node_with(&mut self, type_name: &str, options: NodeOptions) -> Result<NodeHandle, GraphError> {
        let node_type = self
            .registry
            .get(type_name)
            .ok_or_else(|| GraphError::UnknownNodeType(type_name.to_string()))?;

        let node = Node::new(node_type, options);
        let handle = NodeHandle::of(&node);
        tracing::debug!(node = %node.sid, node_type = type_name, ports = node.serializable_ports.len(), "added node");
        self.nodes.insert(node.sid, node);
        Ok(handle)
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&node_id)?;
        self.connections.retain(|c| !node.owns_port(c.port0_sid) && !node.owns_port(c.port1_sid));
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all nodes mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handle for an existing node
    pub fn handle(&self, node_id: NodeId) -> Option<NodeHandle> {
        self.nodes.get(&node_id).map(NodeHandle::of)
    }

    /// Place a node explicitly, taking it out of automatic layout
    pub fn set_position(&mut self, node_id: NodeId, position: Vector3) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        node.serializable_rect_transform.local_position = position;
        Ok(())
    }

    /// Connect an output port of `source` to an input port of `dest`
    ///
    /// Connection limits of the ports are advisory and not checked here.
    pub fn connect_ports(
        &mut self,
        selector: impl Into<PortSelector>,
        source: NodeHandle,
        dest: NodeHandle,
    ) -> Result<ConnectionId, GraphError> {
        let selector = selector.into();
        let (output_key, input_key) = selector.keys();

        let source_port = self.port(source.sid, output_key, PortPolarity::Output)?;
        let dest_port = self.port(dest.sid, input_key, PortPolarity::Input)?;

        let connection = Connection::new(source_port, dest_port);
        let id = connection.sid;
        tracing::debug!(connection = %id, from = %source.sid, to = %dest.sid, "{}", connection.id);
        self.connections.push(connection);
        Ok(id)
    }

    /// Key of the first output port of a node
    pub fn primary_output(&self, node_id: NodeId) -> Result<String, GraphError> {
        let node = self.nodes.get(&node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        node.ports()
            .find(|p| p.is_output())
            .map(|p| p.id.clone())
            .ok_or_else(|| GraphError::PortNotFound {
                node: node_id,
                port: String::from("<any>"),
                polarity: PortPolarity::Output,
            })
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.sid == connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Find the node owning a port
    pub fn find_node_by_port_sid(&self, port_id: PortId) -> Option<&Node> {
        self.nodes.values().find(|node| node.owns_port(port_id))
    }

    /// Remove every unplaced node none of whose ports is connected
    ///
    /// Nodes moved away from the origin are kept even when disconnected. Returns
    /// the number of removed nodes.
    pub fn remove_unused_nodes(&mut self) -> usize {
        let connected: HashSet<PortId> = self
            .connections
            .iter()
            .flat_map(|c| [c.port0_sid, c.port1_sid])
            .collect();

        let before = self.nodes.len();
        self.nodes.retain(|_, node| {
            !node.is_unplaced() || node.ports().any(|p| connected.contains(&p.sid))
        });

        let removed = before - self.nodes.len();
        tracing::info!(removed, remaining = self.nodes.len(), "pruned unused nodes");
        removed
    }

    /// Recompute every connection's curve from its ports' current positions
    ///
    /// Connections referencing a missing port keep their previous curve.
    pub fn update_connection_line_points(&mut self) {
        let ports: HashMap<PortId, &Port> = self
            .nodes
            .values()
            .flat_map(Node::ports)
            .map(|p| (p.sid, p))
            .collect();

        for connection in &mut self.connections {
            match (ports.get(&connection.port0_sid), ports.get(&connection.port1_sid)) {
                (Some(source), Some(dest)) => {
                    connection.line.points = Connection::path_between(source, dest);
                }
                _ => tracing::warn!(connection = %connection.sid, "skipping connection with a dangling port"),
            }
        }
    }

    /// Resolve a handle's current value type
    pub(crate) fn value_type(&self, node_id: NodeId) -> Result<ValueType, GraphError> {
        self.nodes
            .get(&node_id)
            .map(|n| n.value_type)
            .ok_or(GraphError::NodeNotFound(node_id))
    }

    fn port(&self, node_id: NodeId, key: &str, polarity: PortPolarity) -> Result<&Port, GraphError> {
        let node = self.nodes.get(&node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        let port = match polarity {
            PortPolarity::Input => node.input_port(key),
            PortPolarity::Output => node.output_port(key),
        };
        port.ok_or_else(|| GraphError::PortNotFound {
            node: node_id,
            port: key.to_string(),
            polarity,
        })
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(create_expression_registry())
    }
}

/// Error while building a graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Node type is not in the catalog
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("No {polarity} port '{port}' on node {node}")]
    PortNotFound {
        /// Node that was searched
        node: NodeId,
        /// Requested port key
        port: String,
        /// Side that was searched
        polarity: PortPolarity,
    },

    /// No expression rule applies to the operand types
    #[error("Unsupported operands for {op}: {lhs} and {rhs}")]
    UnsupportedOperands {
        /// Operator name
        op: String,
        /// Left operand type
        lhs: String,
        /// Right operand type
        rhs: String,
    },
}
