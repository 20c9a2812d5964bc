// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demo scene: a moving point that raises an alert once it is far away and
//! still moving.

use slime_graph::{ExprScope, Graph, GraphError, NodeHandle, NodeOptions};
use std::cell::RefCell;

/// Build the demo scene into `graph` and return its `Debug` sink
pub fn build(graph: &RefCell<Graph>) -> Result<NodeHandle, GraphError> {
    let scope = ExprScope::new(graph);

    let direction = scope.node("Vector3")?;
    for (axis, value) in [("X", 1.0), ("Y", 0.0), ("Z", 0.5)] {
        let component = scope.float(value)?;
        graph
            .borrow_mut()
            .connect_ports(("Value", axis), component.handle(), direction.handle())?;
    }

    let speed = scope.float(4.0)?;
    let delta = scope.float(0.25)?;
    let step = (speed * delta)?;
    let velocity = (direction * step)?;

    let origin = scope.node_with("Vector3", NodeOptions::default().with_position(800.0, -100.0))?;
    let position = (velocity + origin)?;

    let distance = position.dot(position)?;
    let far = distance.gt(100.0)?;
    let moving = speed.not_equals(0.0)?;
    let alert = (far & moving)?;

    let sink = scope.node("Debug")?;
    graph
        .borrow_mut()
        .connect_ports(("Result", "Value"), alert.handle(), sink.handle())?;

    // Scratch value never wired in; pruned on save
    scope.float(42.0)?;

    tracing::debug!(nodes = graph.borrow().node_count(), "built demo scene");
    Ok(sink.handle())
}
