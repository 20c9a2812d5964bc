// SPDX-License-Identifier: MIT OR Apache-2.0
//! Expression building: turning operators on nodes into computation nodes.
//!
//! [`Graph::binary`] and [`Graph::unary`] pick a rule from the operands' value
//! types, promote bare literals to constant nodes and wire the resulting node.
//! Operand combinations without a rule yield [`Dispatch::NotApplicable`] and leave
//! the graph untouched.

use crate::graph::{Graph, GraphError};
use crate::node::{Modifier, NodeHandle, NodeOptions, ValueType};
use std::fmt;

/// One side of an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// Existing node
    Node(NodeHandle),
    /// Number literal, promoted to a `Float` node when used
    Number(f64),
    /// Boolean literal, promoted to a `Bool` node when used
    Bool(bool),
}

impl Operand {
    fn is_literal(&self) -> bool {
        !matches!(self, Self::Node(_))
    }
}

impl From<NodeHandle> for Operand {
    fn from(handle: NodeHandle) -> Self {
        Self::Node(handle)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// Floored division
    FloorDiv,
    /// `%`
    Rem,
    /// Exponentiation
    Pow,
    /// Equality
    Eq,
    /// Inequality
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// Logical and
    And,
    /// Logical or
    Or,
    /// Logical exclusive or
    Xor,
    /// Dot product
    Dot,
}

impl BinaryOp {
    /// Operator symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Dot => "@",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation
    Neg,
    /// Identity
    Plus,
    /// Absolute value
    Abs,
    /// Round down
    Floor,
    /// Logical not
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Not => "not",
        };
        f.write_str(name)
    }
}

/// Outcome of an expression dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The node computing the expression
    Node(NodeHandle),
    /// No rule covers these operand types
    NotApplicable,
}

impl Dispatch {
    /// The built node, if any
    pub fn node(self) -> Option<NodeHandle> {
        match self {
            Self::Node(handle) => Some(handle),
            Self::NotApplicable => None,
        }
    }
}

/// How a binary expression is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryRule {
    /// Two-input node with the operands on `A` and `B`
    Node(&'static str),
    /// Two-input node whose modifier names the operator
    Compare(&'static str, &'static str),
    /// `Not` wrapped around a comparison
    NotEqual(&'static str),
    /// Division wrapped in `Operation("floor")`
    FloorDiv,
    /// Vector scaled by a number; `true` when the vector is on the right
    Scale { swapped: bool },
}

impl BinaryRule {
    fn select(op: BinaryOp, lhs: ValueType, rhs: ValueType) -> Option<Self> {
        use ValueType::{Boolean, Number, Vector3};

        let rule = match (op, lhs, rhs) {
            (BinaryOp::Add, Number, Number) => Self::Node("AddFloats"),
            (BinaryOp::Sub, Number, Number) => Self::Node("SubtractFloats"),
            (BinaryOp::Mul, Number, Number) => Self::Node("MultiplyFloats"),
            (BinaryOp::Div, Number, Number) => Self::Node("DivideFloats"),
            (BinaryOp::Rem, Number, Number) => Self::Node("Modulo"),
            (BinaryOp::Pow, Number, Number) => Self::Node("Power"),
            (BinaryOp::FloorDiv, Number, Number) => Self::FloorDiv,

            (BinaryOp::Add, Vector3, Vector3) => Self::Node("AddVector3"),
            (BinaryOp::Sub, Vector3, Vector3) => Self::Node("SubtractVector3"),
            (BinaryOp::Dot, Vector3, Vector3) => Self::Node("DotProduct"),
            (BinaryOp::Mul, Vector3, Number) => Self::Scale { swapped: false },
            (BinaryOp::Mul, Number, Vector3) => Self::Scale { swapped: true },

            (BinaryOp::Eq, Number, Number) => Self::Compare("CompareFloats", "=="),
            (BinaryOp::Ne, Number, Number) => Self::NotEqual("CompareFloats"),
            (BinaryOp::Lt, Number, Number) => Self::Compare("CompareFloats", "<"),
            (BinaryOp::Le, Number, Number) => Self::Compare("CompareFloats", "<="),
            (BinaryOp::Gt, Number, Number) => Self::Compare("CompareFloats", ">"),
            (BinaryOp::Ge, Number, Number) => Self::Compare("CompareFloats", ">="),

            (BinaryOp::Eq, Boolean, Boolean) => Self::Compare("CompareBool", "=="),
            (BinaryOp::Ne, Boolean, Boolean) => Self::NotEqual("CompareBool"),
            (BinaryOp::And, Boolean, Boolean) => Self::Compare("CompareBool", "and"),
            (BinaryOp::Or, Boolean, Boolean) => Self::Compare("CompareBool", "or"),
            (BinaryOp::Xor, Boolean, Boolean) => Self::Compare("CompareBool", "xor"),

            _ => return None,
        };
        Some(rule)
    }
}

impl Graph {
    /// Build the node computing `lhs op rhs`
    ///
    /// At least one operand must be a node. A literal only combines with a node of
    /// its own category, so `Vector3 * 2.0` is not applicable while a `Float` node
    /// scales a vector. Literals are promoted to constant nodes only once a rule
    /// applies, keeping their position as left or right operand.
    pub fn binary(
        &mut self,
        op: BinaryOp,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Dispatch, GraphError> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        if lhs.is_literal() && rhs.is_literal() {
            return Ok(Dispatch::NotApplicable);
        }

        let (lhs_type, rhs_type) = (self.operand_type(lhs)?, self.operand_type(rhs)?);
        // A literal only promotes against a node of its own category
        if (lhs.is_literal() || rhs.is_literal()) && lhs_type != rhs_type {
            return Ok(Dispatch::NotApplicable);
        }
        let Some(rule) = BinaryRule::select(op, lhs_type, rhs_type) else {
            return Ok(Dispatch::NotApplicable);
        };

        // Fail before creating anything if an operand has no output to wire
        for operand in [lhs, rhs] {
            if let Operand::Node(handle) = operand {
                self.primary_output(handle.sid)?;
            }
        }

        let a = self.promote(lhs)?;
        let b = self.promote(rhs)?;

        let node = match rule {
            BinaryRule::Node(type_name) => self.binary_node(type_name, Modifier::default(), a, b)?,
            BinaryRule::Compare(type_name, operator) => self.binary_node(type_name, operator.into(), a, b)?,
            BinaryRule::NotEqual(type_name) => {
                let equal = self.binary_node(type_name, "==".into(), a, b)?;
                self.unary_node("Not", Modifier::default(), equal)?
            }
            BinaryRule::FloorDiv => {
                let quotient = self.binary_node("DivideFloats", Modifier::default(), a, b)?;
                self.unary_node("Operation", "floor".into(), quotient)?
            }
            BinaryRule::Scale { swapped } => {
                let (vector, scale) = if swapped { (b, a) } else { (a, b) };
                let node = self.add_node("ScaleVector3")?;
                self.wire(vector, node, "Vector")?;
                self.wire(scale, node, "Scale")?;
                node
            }
        };

        tracing::debug!(%op, node = %node.sid, "built expression node");
        Ok(Dispatch::Node(node))
    }

    /// Build the node computing `op operand`
    pub fn unary(&mut self, op: UnaryOp, operand: NodeHandle) -> Result<Dispatch, GraphError> {
        let node = match (op, self.value_type(operand.sid)?) {
            (UnaryOp::Plus, _) => operand,
            (UnaryOp::Neg, ValueType::Number) => {
                return self.binary(BinaryOp::Mul, operand, -1.0);
            }
            (UnaryOp::Abs, ValueType::Number) => self.unary_node("Operation", "abs".into(), operand)?,
            (UnaryOp::Floor, ValueType::Number) => self.unary_node("Operation", "floor".into(), operand)?,
            (UnaryOp::Not, ValueType::Boolean) => self.unary_node("Not", Modifier::default(), operand)?,
            _ => return Ok(Dispatch::NotApplicable),
        };
        Ok(Dispatch::Node(node))
    }

    /// Create a `Float` constant node
    pub fn float(&mut self, value: f64) -> Result<NodeHandle, GraphError> {
        self.add_node_with("Float", NodeOptions::default().with_modifier(value))
    }

    /// Create a `Bool` constant node
    pub fn boolean(&mut self, value: bool) -> Result<NodeHandle, GraphError> {
        self.add_node_with("Bool", NodeOptions::default().with_modifier(value))
    }

    fn operand_type(&self, operand: Operand) -> Result<ValueType, GraphError> {
        match operand {
            Operand::Node(handle) => self.value_type(handle.sid),
            Operand::Number(_) => Ok(ValueType::Number),
            Operand::Bool(_) => Ok(ValueType::Boolean),
        }
    }

    fn promote(&mut self, operand: Operand) -> Result<NodeHandle, GraphError> {
        match operand {
            Operand::Node(handle) => Ok(handle),
            Operand::Number(value) => self.float(value),
            Operand::Bool(value) => self.boolean(value),
        }
    }

    fn binary_node(
        &mut self,
        type_name: &str,
        modifier: Modifier,
        a: NodeHandle,
        b: NodeHandle,
    ) -> Result<NodeHandle, GraphError> {
        let node = self.add_node_with(type_name, NodeOptions::default().with_modifier(modifier))?;
        self.wire(a, node, "A")?;
        self.wire(b, node, "B")?;
        Ok(node)
    }

    fn unary_node(&mut self, type_name: &str, modifier: Modifier, input: NodeHandle) -> Result<NodeHandle, GraphError> {
        self.primary_output(input.sid)?;
        let node = self.add_node_with(type_name, NodeOptions::default().with_modifier(modifier))?;
        self.wire(input, node, "Input")?;
        Ok(node)
    }

    /// Connect the primary output of `source` to the `input` port of `dest`
    fn wire(&mut self, source: NodeHandle, dest: NodeHandle, input: &str) -> Result<(), GraphError> {
        let output = self.primary_output(source.sid)?;
        self.connect_ports((output.as_str(), input), source, dest)?;
        Ok(())
    }
}
