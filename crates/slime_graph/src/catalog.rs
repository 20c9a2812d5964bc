// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node catalog: constants, math, logic and vector nodes.
//!
//! Port keys are part of the scene format. Binary nodes take `A` and `B` and
//! produce `Result`; unary nodes take `Input`.

use crate::math::{Color, Vector2};
use crate::node::{NodeRegistry, NodeType, ValueType};
use crate::port::PortTemplate;

/// Width of every catalog node
const NODE_WIDTH: f32 = 250.0;

/// Port color used for a value type
fn port_color(value_type: ValueType) -> Color {
    match value_type {
        ValueType::Number => Color::rgb(0.33, 0.8, 0.42),
        ValueType::Vector3 => Color::rgb(0.95, 0.7, 0.25),
        ValueType::Boolean => Color::rgb(0.85, 0.3, 0.3),
        ValueType::Other => Color::rgb(0.6, 0.6, 0.6),
    }
}

/// Node body color used for a value type
fn node_color(value_type: ValueType) -> Color {
    match value_type {
        ValueType::Number => Color::rgb(0.16, 0.32, 0.2),
        ValueType::Vector3 => Color::rgb(0.38, 0.27, 0.1),
        ValueType::Boolean => Color::rgb(0.36, 0.14, 0.14),
        ValueType::Other => Color::rgb(0.2, 0.2, 0.22),
    }
}

/// Node height fitting `rows` port rows
fn node_size(rows: usize) -> Vector2 {
    Vector2::new(NODE_WIDTH, 80.0 + rows as f32 * 40.0)
}

fn constant(id: &str, value_type: ValueType) -> NodeType {
    NodeType {
        id: id.to_string(),
        size: node_size(1),
        color: node_color(value_type),
        value_type,
        ports: vec![PortTemplate::output("Value", 0, NODE_WIDTH, port_color(value_type))],
    }
}

fn binary(id: &str, operands: ValueType, value_type: ValueType) -> NodeType {
    binary_with(id, ["A", "B"], [operands, operands], value_type)
}

fn binary_with(id: &str, inputs: [&str; 2], operands: [ValueType; 2], value_type: ValueType) -> NodeType {
    NodeType {
        id: id.to_string(),
        size: node_size(2),
        color: node_color(value_type),
        value_type,
        ports: vec![
            PortTemplate::input(inputs[0], 0, port_color(operands[0])),
            PortTemplate::input(inputs[1], 1, port_color(operands[1])),
            PortTemplate::output("Result", 0, NODE_WIDTH, port_color(value_type)),
        ],
    }
}

fn unary(id: &str, value_type: ValueType) -> NodeType {
    NodeType {
        id: id.to_string(),
        size: node_size(1),
        color: node_color(value_type),
        value_type,
        ports: vec![
            PortTemplate::input("Input", 0, port_color(value_type)),
            PortTemplate::output("Result", 0, NODE_WIDTH, port_color(value_type)),
        ],
    }
}

/// Create the node registry used for expression graphs
pub fn create_expression_registry() -> NodeRegistry {
    use ValueType::{Boolean, Number, Other, Vector3};

    let mut registry = NodeRegistry::new();

    // Constants
    registry.register(constant("Float", Number));
    registry.register(constant("Bool", Boolean));

    // Arithmetic
    registry.register(binary("AddFloats", Number, Number));
    registry.register(binary("SubtractFloats", Number, Number));
    registry.register(binary("MultiplyFloats", Number, Number));
    registry.register(binary("DivideFloats", Number, Number));
    registry.register(binary("Modulo", Number, Number));
    registry.register(binary("Power", Number, Number));
    // Modifier names the function: abs, floor, ...
    registry.register(unary("Operation", Number));

    // Comparison and logic; modifier names the operator
    registry.register(binary("CompareFloats", Number, Boolean));
    registry.register(binary("CompareBool", Boolean, Boolean));
    registry.register(unary("Not", Boolean));

    // Vectors
    registry.register(binary("AddVector3", Vector3, Vector3));
    registry.register(binary("SubtractVector3", Vector3, Vector3));
    registry.register(binary_with("ScaleVector3", ["Vector", "Scale"], [Vector3, Number], Vector3));
    registry.register(binary("DotProduct", Vector3, Number));
    registry.register(NodeType {
        id: "Vector3".to_string(),
        size: node_size(3),
        color: node_color(Vector3),
        value_type: Vector3,
        ports: vec![
            PortTemplate::input("X", 0, port_color(Number)),
            PortTemplate::input("Y", 1, port_color(Number)),
            PortTemplate::input("Z", 2, port_color(Number)),
            PortTemplate::output("Vector", 0, NODE_WIDTH, port_color(Vector3)),
        ],
    });
    registry.register(NodeType {
        id: "SplitVector3".to_string(),
        size: node_size(3),
        color: node_color(Other),
        value_type: Other,
        ports: vec![
            PortTemplate::input("Vector", 0, port_color(Vector3)),
            PortTemplate::output("X", 0, NODE_WIDTH, port_color(Number)),
            PortTemplate::output("Y", 1, NODE_WIDTH, port_color(Number)),
            PortTemplate::output("Z", 2, NODE_WIDTH, port_color(Number)),
        ],
    });

    // Sinks
    registry.register(NodeType {
        id: "Debug".to_string(),
        size: node_size(1),
        color: node_color(Other),
        value_type: Other,
        ports: vec![PortTemplate::input("Value", 0, port_color(Other))],
    });

    registry
}
