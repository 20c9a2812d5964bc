// SPDX-License-Identifier: MIT OR Apache-2.0
//! Automatic placement of nodes that were never positioned explicitly.
//!
//! Both layouts only move nodes still at the origin sentinel. The dependency
//! layout puts every node in the column of its longest path from a source node
//! and falls back to the grid when the graph has a cycle.

use crate::graph::Graph;
use crate::id::NodeId;
use crate::math::Vector3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// X coordinate of the first column
pub const LAYOUT_ORIGIN_X: f32 = 1263.0;
/// Y coordinate of the first row
pub const LAYOUT_ORIGIN_Y: f32 = -278.0;

/// Distance between layout columns and rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpacing {
    /// Horizontal step between columns
    pub offset_x: f32,
    /// Vertical step between rows (negative grows downwards)
    pub offset_y: f32,
}

impl Default for LayoutSpacing {
    fn default() -> Self {
        Self {
            offset_x: 350.0,
            offset_y: -215.0,
        }
    }
}

/// Number of nodes per grid row
pub fn grid_row_length(node_count: usize) -> usize {
    // Integer square root; the float estimate is corrected by at most a step
    let mut root = (node_count as f64).sqrt() as usize;
    while root * root > node_count {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= node_count {
        root += 1;
    }
    root.max(1)
}

impl Graph {
    /// Place unpositioned nodes on a grid in insertion order
    ///
    /// Rows wrap by node index, so explicitly placed nodes take up a slot in the
    /// row count without advancing the cursor.
    pub fn grid_layout(&mut self, spacing: LayoutSpacing) {
        let per_row = grid_row_length(self.node_count());
        let mut x = LAYOUT_ORIGIN_X;
        let mut y = LAYOUT_ORIGIN_Y;
        let mut placed = 0;

        for (i, node) in self.nodes_mut().enumerate() {
            let transform = &mut node.serializable_rect_transform;
            if !transform.is_unplaced() {
                continue;
            }
            transform.local_position = Vector3::new(x, y);
            placed += 1;

            x += spacing.offset_x;
            if (i + 1) % per_row == 0 {
                x = LAYOUT_ORIGIN_X;
                y += spacing.offset_y;
            }
        }

        tracing::info!(placed, per_row, "grid layout");
    }

    /// Longest-path level of every node, or `None` if the connections form a cycle
    ///
    /// Self-connections and connections with an unresolvable port are ignored.
    pub fn compute_levels(&self) -> Option<IndexMap<NodeId, usize>> {
        let mut successors: IndexMap<NodeId, Vec<NodeId>> =
            self.nodes().map(|n| (n.sid, Vec::new())).collect();
        let mut in_degree: IndexMap<NodeId, usize> = self.nodes().map(|n| (n.sid, 0)).collect();

        for connection in self.connections() {
            let source = self.find_node_by_port_sid(connection.port0_sid);
            let dest = self.find_node_by_port_sid(connection.port1_sid);
            let (Some(source), Some(dest)) = (source, dest) else {
                tracing::warn!(connection = %connection.sid, "layout ignores connection with a dangling port");
                continue;
            };
            if source.sid == dest.sid {
                continue;
            }
            if let Some(next) = successors.get_mut(&source.sid) {
                next.push(dest.sid);
            }
            if let Some(degree) = in_degree.get_mut(&dest.sid) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<NodeId> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut levels: IndexMap<NodeId, usize> = self.nodes().map(|n| (n.sid, 0)).collect();
        let mut visited = 0;

        while let Some(current) = queue.pop_front() {
            visited += 1;
            let level = levels[&current];

            for next in &successors[&current] {
                if let Some(next_level) = levels.get_mut(next) {
                    *next_level = (*next_level).max(level + 1);
                }
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*next);
                    }
                }
            }
        }

        (visited == self.node_count()).then_some(levels)
    }

    /// Place unpositioned nodes in columns by dependency depth
    ///
    /// Each column is centered vertically around the first row. Falls back to
    /// [`Graph::grid_layout`] if the graph contains a cycle.
    pub fn auto_layout(&mut self, spacing: LayoutSpacing) {
        let Some(levels) = self.compute_levels() else {
            tracing::warn!("graph contains a cycle, falling back to grid layout");
            self.grid_layout(spacing);
            return;
        };

        let mut columns: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for (id, level) in levels {
            columns.entry(level).or_default().push(id);
        }

        let mut x = LAYOUT_ORIGIN_X;
        for column in columns.values() {
            let total_height = (column.len() - 1) as f32 * spacing.offset_y;
            let mut y = -total_height / 2.0 + LAYOUT_ORIGIN_Y;

            for id in column {
                let Some(node) = self.node_mut(*id) else { continue };
                let transform = &mut node.serializable_rect_transform;
                if !transform.is_unplaced() {
                    continue;
                }
                transform.local_position = Vector3::new(x, y);
                y += spacing.offset_y;
            }

            x += spacing.offset_x;
        }

        tracing::info!(columns = columns.len(), "auto layout");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeHandle, NodeOptions};

    fn float(graph: &mut Graph) -> NodeHandle {
        graph.add_node("Float").unwrap()
    }

    fn operation(graph: &mut Graph) -> NodeHandle {
        graph.add_node("Operation").unwrap()
    }

    fn position(graph: &Graph, node: NodeHandle) -> Vector3 {
        graph.node(node.sid).unwrap().position()
    }

    #[test]
    fn test_grid_row_length() {
        assert_eq!(grid_row_length(0), 1);
        assert_eq!(grid_row_length(1), 1);
        assert_eq!(grid_row_length(3), 1);
        assert_eq!(grid_row_length(4), 2);
        assert_eq!(grid_row_length(8), 2);
        assert_eq!(grid_row_length(9), 3);
        assert_eq!(grid_row_length(99), 9);
        assert_eq!(grid_row_length(100), 10);
    }

    #[test]
    fn test_grid_layout() {
        let mut graph = Graph::default();
        let nodes: Vec<NodeHandle> = (0..5).map(|_| float(&mut graph)).collect();
        graph.grid_layout(LayoutSpacing::default());

        // Two nodes per row for five nodes
        assert_eq!(position(&graph, nodes[0]), Vector3::new(1263.0, -278.0));
        assert_eq!(position(&graph, nodes[1]), Vector3::new(1613.0, -278.0));
        assert_eq!(position(&graph, nodes[2]), Vector3::new(1263.0, -493.0));
        assert_eq!(position(&graph, nodes[3]), Vector3::new(1613.0, -493.0));
        assert_eq!(position(&graph, nodes[4]), Vector3::new(1263.0, -708.0));
    }

    #[test]
    fn test_grid_layout_keeps_placed_nodes() {
        let mut graph = Graph::default();
        let placed = graph
            .add_node_with("Float", NodeOptions::default().with_position(5.0, 5.0))
            .unwrap();
        let a = float(&mut graph);
        let b = float(&mut graph);
        let c = float(&mut graph);
        graph.grid_layout(LayoutSpacing::default());

        assert_eq!(position(&graph, placed), Vector3::new(5.0, 5.0));
        assert_eq!(position(&graph, a), Vector3::new(1263.0, -278.0));
        assert_eq!(position(&graph, b), Vector3::new(1263.0, -493.0));
        assert_eq!(position(&graph, c), Vector3::new(1613.0, -493.0));
    }

    #[test]
    fn test_auto_layout_chain() {
        let mut graph = Graph::default();
        let a = float(&mut graph);
        let b = operation(&mut graph);
        let c = operation(&mut graph);
        graph.connect_ports(("Value", "Input"), a, b).unwrap();
        graph.connect_ports(("Result", "Input"), b, c).unwrap();

        let levels = graph.compute_levels().unwrap();
        assert_eq!(levels[&a.sid], 0);
        assert_eq!(levels[&b.sid], 1);
        assert_eq!(levels[&c.sid], 2);

        graph.auto_layout(LayoutSpacing::default());
        let (pa, pb, pc) = (position(&graph, a), position(&graph, b), position(&graph, c));
        assert!(pa.x < pb.x && pb.x < pc.x);
        assert_eq!(pb, Vector3::new(1613.0, -278.0));
        assert_eq!(pa.y, pb.y);
        assert_eq!(pb.y, pc.y);
    }

    #[test]
    fn test_auto_layout_edges_point_forward() {
        let mut graph = Graph::default();
        let a = float(&mut graph);
        let b = float(&mut graph);
        let sum = graph.add_node("AddFloats").unwrap();
        let product = graph.add_node("MultiplyFloats").unwrap();
        graph.connect_ports(("Value", "A"), a, sum).unwrap();
        graph.connect_ports(("Value", "B"), b, sum).unwrap();
        graph.connect_ports(("Result", "A"), sum, product).unwrap();
        graph.connect_ports(("Value", "B"), a, product).unwrap();

        graph.auto_layout(LayoutSpacing::default());
        for connection in graph.connections() {
            let source = graph.find_node_by_port_sid(connection.port0_sid).unwrap();
            let dest = graph.find_node_by_port_sid(connection.port1_sid).unwrap();
            assert!(source.position().x < dest.position().x);
        }

        // Column of two sources is centered on the first row
        let (pa, pb) = (position(&graph, a), position(&graph, b));
        assert_eq!(pa.x, pb.x);
        assert_eq!((pa.y + pb.y) / 2.0, LAYOUT_ORIGIN_Y);
    }

    #[test]
    fn test_auto_layout_ignores_self_connection() {
        let mut graph = Graph::default();
        let a = graph.add_node("Not").unwrap();
        graph.connect_ports(("Result", "Input"), a, a).unwrap();

        assert_eq!(graph.compute_levels().unwrap()[&a.sid], 0);
    }

    #[test]
    fn test_auto_layout_skips_dangling_connection() {
        let mut graph = Graph::default();
        let a = float(&mut graph);
        let b = operation(&mut graph);
        graph.connect_ports(("Value", "Input"), a, b).unwrap();
        graph.node_mut(a.sid).unwrap().serializable_ports.clear();

        let levels = graph.compute_levels().unwrap();
        assert_eq!(levels[&a.sid], 0);
        assert_eq!(levels[&b.sid], 0);

        graph.auto_layout(LayoutSpacing::default());
        assert!(!graph.node(b.sid).unwrap().is_unplaced());
        assert_eq!(position(&graph, a).x, position(&graph, b).x);
    }

    #[test]
    fn test_auto_layout_cycle_falls_back_to_grid() {
        let mut graph = Graph::default();
        let a = operation(&mut graph);
        let b = operation(&mut graph);
        let c = float(&mut graph);
        let d = float(&mut graph);
        graph.connect_ports(("Result", "Input"), a, b).unwrap();
        graph.connect_ports(("Result", "Input"), b, a).unwrap();

        assert!(graph.compute_levels().is_none());

        let mut grid = graph.clone();
        grid.grid_layout(LayoutSpacing::default());
        graph.auto_layout(LayoutSpacing::default());

        for node in [a, b, c, d] {
            assert_eq!(position(&graph, node), position(&grid, node));
        }
        assert_eq!(position(&graph, c), Vector3::new(1263.0, -493.0));
    }

    #[test]
    fn test_auto_layout_keeps_placed_nodes() {
        let mut graph = Graph::default();
        let a = float(&mut graph);
        let b = operation(&mut graph);
        graph.connect_ports(("Value", "Input"), a, b).unwrap();
        graph.set_position(a.sid, Vector3::new(-10.0, 20.0)).unwrap();

        graph.auto_layout(LayoutSpacing::default());
        assert_eq!(position(&graph, a), Vector3::new(-10.0, 20.0));
        assert_eq!(position(&graph, b), Vector3::new(1613.0, -278.0));
    }
}
