// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authoring library for node-graph scenes.
//!
//! Graphs are built from a registry of node types, either node by node with
//! explicit port wiring or through expression sugar where arithmetic and
//! comparison operators create and connect the matching nodes. Saving prunes
//! disconnected nodes, lays out the rest and writes a compact JSON document
//! for the scene editor.
//!
//! ## Architecture
//!
//! - [`graph`]: node and connection storage, wiring and pruning
//! - [`catalog`]: the built-in expression node types
//! - [`expression`] and [`ops`]: operator dispatch onto nodes
//! - [`layout`]: grid and dependency-depth placement
//! - [`save`]: the save pipeline and its options

pub mod catalog;
pub mod connection;
pub mod expression;
pub mod graph;
pub mod id;
pub mod layout;
pub mod math;
pub mod node;
pub mod ops;
pub mod port;
pub mod save;
pub mod transform;

pub use catalog::create_expression_registry;
pub use connection::Connection;
pub use expression::{BinaryOp, Dispatch, Operand, UnaryOp};
pub use graph::{Graph, GraphError, PortSelector};
pub use id::{ConnectionId, InstanceId, NodeId, PortId};
pub use layout::LayoutSpacing;
pub use math::{Color, Vector2, Vector3};
pub use node::{Modifier, Node, NodeHandle, NodeOptions, NodeRegistry, NodeType, ValueType};
pub use ops::{Expr, ExprScope};
pub use port::{Port, PortPolarity, PortTemplate};
pub use save::{ConfigError, Document, LayoutMode, SaveError, SaveOptions, UnknownLayoutMode};
