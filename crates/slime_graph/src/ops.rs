// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operator syntax for expression building.
//!
//! [`Expr`] pairs a node handle with the graph it lives in, so that ordinary Rust
//! operators build nodes:
//!
//! ```
//! use std::cell::RefCell;
//! use slime_graph::{ExprScope, Graph};
//!
//! let graph = RefCell::new(Graph::default());
//! let scope = ExprScope::new(&graph);
//! let speed = scope.float(2.0)?;
//! let scaled = ((speed + 3.0)? * speed)?;
//! let fast = scaled.gt(10.0)?;
//! assert_eq!(graph.borrow().node(fast.handle().sid).unwrap().id, "CompareFloats");
//! # Ok::<(), slime_graph::GraphError>(())
//! ```
//!
//! Every operator borrows the graph mutably for its own duration only; do not hold
//! a borrow of the `RefCell` across an operator call.

use crate::expression::{BinaryOp, Dispatch, Operand, UnaryOp};
use crate::graph::{Graph, GraphError};
use crate::node::{NodeHandle, NodeOptions, ValueType};
use std::cell::RefCell;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

/// Creates expression leaves in a graph
#[derive(Debug, Clone, Copy)]
pub struct ExprScope<'g> {
    graph: &'g RefCell<Graph>,
}

impl<'g> ExprScope<'g> {
    /// Scope over a graph
    pub fn new(graph: &'g RefCell<Graph>) -> Self {
        Self { graph }
    }

    /// Constant number node
    pub fn float(&self, value: f64) -> Result<Expr<'g>, GraphError> {
        let handle = self.graph.borrow_mut().float(value)?;
        Ok(self.wrap(handle))
    }

    /// Constant boolean node
    pub fn boolean(&self, value: bool) -> Result<Expr<'g>, GraphError> {
        let handle = self.graph.borrow_mut().boolean(value)?;
        Ok(self.wrap(handle))
    }

    /// Node of any catalog type
    pub fn node(&self, type_name: &str) -> Result<Expr<'g>, GraphError> {
        self.node_with(type_name, NodeOptions::default())
    }

    /// Node of any catalog type with options
    pub fn node_with(&self, type_name: &str, options: NodeOptions) -> Result<Expr<'g>, GraphError> {
        let handle = self.graph.borrow_mut().add_node_with(type_name, options)?;
        Ok(self.wrap(handle))
    }

    /// Use an existing node in expressions
    pub fn wrap(&self, handle: NodeHandle) -> Expr<'g> {
        Expr {
            graph: self.graph,
            handle,
        }
    }
}

/// A node usable with operators
#[derive(Debug, Clone, Copy)]
pub struct Expr<'g> {
    graph: &'g RefCell<Graph>,
    handle: NodeHandle,
}

impl<'g> Expr<'g> {
    /// Underlying node handle
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Value the node produces
    pub fn value_type(&self) -> ValueType {
        self.handle.value_type
    }

    /// `self ** rhs`
    pub fn pow(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Pow, rhs)
    }

    /// Floored division
    pub fn floor_div(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::FloorDiv, rhs)
    }

    /// Dot product of two vectors
    pub fn dot(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Dot, rhs)
    }

    /// Equality comparison node
    pub fn equals(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Eq, rhs)
    }

    /// Inequality comparison node
    pub fn not_equals(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Ne, rhs)
    }

    /// `self < rhs`
    pub fn lt(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Lt, rhs)
    }

    /// `self <= rhs`
    pub fn le(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Le, rhs)
    }

    /// `self > rhs`
    pub fn gt(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Gt, rhs)
    }

    /// `self >= rhs`
    pub fn ge(self, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        self.apply(BinaryOp::Ge, rhs)
    }

    /// Absolute value
    pub fn abs(self) -> Result<Self, GraphError> {
        self.apply_unary(UnaryOp::Abs)
    }

    /// Round down
    pub fn floor(self) -> Result<Self, GraphError> {
        self.apply_unary(UnaryOp::Floor)
    }

    /// Apply any binary operator with `self` on the left
    pub fn apply(self, op: BinaryOp, rhs: impl Into<Operand>) -> Result<Self, GraphError> {
        let lhs = Operand::Node(self.handle);
        let rhs = rhs.into();
        let dispatch = self.graph.borrow_mut().binary(op, lhs, rhs)?;
        self.finish(dispatch, op.symbol(), lhs, rhs)
    }

    /// Apply any binary operator with `self` on the right
    pub fn apply_reversed(self, op: BinaryOp, lhs: impl Into<Operand>) -> Result<Self, GraphError> {
        let lhs = lhs.into();
        let rhs = Operand::Node(self.handle);
        let dispatch = self.graph.borrow_mut().binary(op, lhs, rhs)?;
        self.finish(dispatch, op.symbol(), lhs, rhs)
    }

    /// Apply a unary operator
    pub fn apply_unary(self, op: UnaryOp) -> Result<Self, GraphError> {
        let dispatch = self.graph.borrow_mut().unary(op, self.handle)?;
        let operand = Operand::Node(self.handle);
        self.finish(dispatch, &op.to_string(), operand, operand)
    }

    fn finish(self, dispatch: Dispatch, op: &str, lhs: Operand, rhs: Operand) -> Result<Self, GraphError> {
        match dispatch {
            Dispatch::Node(handle) => Ok(Self {
                graph: self.graph,
                handle,
            }),
            Dispatch::NotApplicable => Err(GraphError::UnsupportedOperands {
                op: op.to_string(),
                lhs: describe(lhs),
                rhs: describe(rhs),
            }),
        }
    }
}

fn describe(operand: Operand) -> String {
    match operand {
        Operand::Node(handle) => handle.value_type.to_string(),
        Operand::Number(_) => String::from("number literal"),
        Operand::Bool(_) => String::from("boolean literal"),
    }
}

impl From<Expr<'_>> for Operand {
    fn from(expr: Expr<'_>) -> Self {
        Self::Node(expr.handle)
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:ident, $literal:ty) => {
        impl<'g, R: Into<Operand>> $trait<R> for Expr<'g> {
            type Output = Result<Expr<'g>, GraphError>;

            fn $method(self, rhs: R) -> Self::Output {
                self.apply(BinaryOp::$op, rhs)
            }
        }

        impl<'g> $trait<Expr<'g>> for $literal {
            type Output = Result<Expr<'g>, GraphError>;

            fn $method(self, rhs: Expr<'g>) -> Self::Output {
                rhs.apply_reversed(BinaryOp::$op, self)
            }
        }
    };
}

binary_operator!(Add, add, Add, f64);
binary_operator!(Sub, sub, Sub, f64);
binary_operator!(Mul, mul, Mul, f64);
binary_operator!(Div, div, Div, f64);
binary_operator!(Rem, rem, Rem, f64);
binary_operator!(BitAnd, bitand, And, bool);
binary_operator!(BitOr, bitor, Or, bool);
binary_operator!(BitXor, bitxor, Xor, bool);

impl<'g> Neg for Expr<'g> {
    type Output = Result<Expr<'g>, GraphError>;

    fn neg(self) -> Self::Output {
        self.apply_unary(UnaryOp::Neg)
    }
}

impl<'g> Not for Expr<'g> {
    type Output = Result<Expr<'g>, GraphError>;

    fn not(self) -> Self::Output {
        self.apply_unary(UnaryOp::Not)
    }
}
