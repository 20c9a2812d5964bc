// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene document output: pruning, final layout and serialization.

use crate::connection::Connection;
use crate::graph::Graph;
use crate::layout::LayoutSpacing;
use crate::math::Vector3;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Where the save pipeline puts unplaced nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Columns by dependency depth, grid on cycles
    #[default]
    Auto,
    /// Square-ish grid
    Grid,
    /// Stack nodes at the origin
    Single,
    /// Shrink nodes to nothing far off canvas
    Hidden,
    /// Leave positions as they are
    None,
}

impl LayoutMode {
    /// Off-canvas position of hidden nodes
    pub const HIDDEN_POSITION: Vector3 = Vector3::new(9999.0, 9999.0);

    /// Every mode, in declaration order
    pub const ALL: [Self; 5] = [Self::Auto, Self::Grid, Self::Single, Self::Hidden, Self::None];

    /// Lowercase name of the mode
    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Grid => "grid",
            Self::Single => "single",
            Self::Hidden => "hidden",
            Self::None => "none",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownLayoutMode(s.to_string()))
    }
}

/// Layout mode name that is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout mode '{0}' (expected auto, grid, single, hidden or none)")]
pub struct UnknownLayoutMode(pub String);

/// Options for [`Graph::save`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Placement of unplaced nodes
    pub layout: LayoutMode,
    /// Drop unplaced nodes without connections first
    pub prune_unused_nodes: bool,
    /// In `single`/`hidden` mode, leave explicitly placed nodes alone
    pub keep_position: bool,
    /// Spacing for `auto`/`grid`
    pub spacing: LayoutSpacing,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Auto,
            prune_unused_nodes: true,
            keep_position: true,
            spacing: LayoutSpacing::default(),
        }
    }
}

impl SaveOptions {
    /// Parse options from RON
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load options from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_ron(&content)?;
        tracing::info!("Loaded save options from {:?}", path);
        Ok(options)
    }

    /// Set the layout mode
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }
}

/// The document consumed by the scene editor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<'a> {
    /// All nodes, in insertion order
    pub serializable_nodes: Vec<&'a Node>,
    /// All connections, in creation order
    pub serializable_connections: &'a [Connection],
}

impl Graph {
    /// Document view of the graph
    pub fn document(&self) -> Document<'_> {
        Document {
            serializable_nodes: self.nodes().collect(),
            serializable_connections: self.connections(),
        }
    }

    /// Serialize the graph as a compact JSON document
    pub fn to_document_string(&self) -> Result<String, SaveError> {
        serde_json::to_string(&self.document()).map_err(SaveError::Serialize)
    }

    /// Prune, lay out and refresh connection curves without writing anything
    pub fn prepare(&mut self, options: &SaveOptions) {
        if options.prune_unused_nodes {
            self.remove_unused_nodes();
        }

        match options.layout {
            LayoutMode::Auto => self.auto_layout(options.spacing),
            LayoutMode::Grid => self.grid_layout(options.spacing),
            LayoutMode::Single => self.stack_nodes(options.keep_position, Vector3::ZERO, None),
            LayoutMode::Hidden => {
                self.stack_nodes(options.keep_position, LayoutMode::HIDDEN_POSITION, Some(Vector3::ZERO));
            }
            LayoutMode::None => {}
        }

        self.update_connection_line_points();
    }

    /// Prepare the graph and write it to `path`
    pub fn save(&mut self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<(), SaveError> {
        let path = path.as_ref();
        self.prepare(options);
        let content = self.to_document_string()?;
        std::fs::write(path, content)?;

        tracing::info!(
            nodes = self.node_count(),
            connections = self.connection_count(),
            layout = %options.layout,
            "Saved scene to {:?}",
            path
        );
        Ok(())
    }

    fn stack_nodes(&mut self, keep_position: bool, position: Vector3, scale: Option<Vector3>) {
        for node in self.nodes_mut() {
            let transform = &mut node.serializable_rect_transform;
            if keep_position && !transform.is_unplaced() {
                continue;
            }
            transform.local_position = position;
            if let Some(scale) = scale {
                transform.scale = scale;
            }
        }
    }
}

/// Error while writing a scene document
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Writing the file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The graph could not be serialized
    #[error("Failed to serialize scene: {0}")]
    Serialize(serde_json::Error),
}

/// Error while reading save options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for the options
    #[error("Invalid save options: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeHandle, NodeOptions};
    use serde_json::Value;

    fn chain(graph: &mut Graph) -> (NodeHandle, NodeHandle) {
        let a = graph.float(1.0).unwrap();
        let b = graph.float(2.0).unwrap();
        let sum = graph.binary(crate::BinaryOp::Add, a, b).unwrap().node().unwrap();
        (a, sum)
    }

    #[test]
    fn test_layout_mode_names() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.name().parse::<LayoutMode>().unwrap(), mode);
        }
        assert_eq!("diagonal".parse::<LayoutMode>().unwrap_err(), UnknownLayoutMode("diagonal".to_string()));
    }

    #[test]
    fn test_save_options_from_ron() {
        let options = SaveOptions::from_ron("(layout: grid, keep_position: false)").unwrap();
        assert_eq!(options.layout, LayoutMode::Grid);
        assert!(!options.keep_position);
        assert!(options.prune_unused_nodes);
        assert_eq!(options.spacing, LayoutSpacing::default());

        let options = SaveOptions::from_ron("(spacing: (offset_x: 100.0))").unwrap();
        assert_eq!(options.spacing.offset_x, 100.0);
        assert_eq!(options.spacing.offset_y, -215.0);

        assert!(matches!(SaveOptions::from_ron("(layout: sideways)"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_document_shape() {
        let mut graph = Graph::default();
        chain(&mut graph);

        let json = graph.to_document_string().unwrap();
        assert!(!json.contains('\n'));
        assert!(!json.contains(": "));

        let value: Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["serializableNodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["serializableConnections"].as_array().unwrap().len(), 2);
        assert_eq!(value["serializableNodes"][0]["id"], "Float");
        assert_eq!(value["serializableNodes"][0]["modifier"], 1.0);
        assert!(value["serializableNodes"][0].get("valueType").is_none());
    }

    #[test]
    fn test_prepare_prunes_and_lays_out() {
        let mut graph = Graph::default();
        let (a, sum) = chain(&mut graph);
        let orphan = graph.float(9.0).unwrap();

        graph.prepare(&SaveOptions::default());
        assert!(graph.node(orphan.sid).is_none());
        assert!(graph.nodes().all(|n| !n.is_unplaced()));
        assert!(graph.node(a.sid).unwrap().position().x < graph.node(sum.sid).unwrap().position().x);
    }

    #[test]
    fn test_prepare_refreshes_curves() {
        let mut graph = Graph::default();
        let (a, _) = chain(&mut graph);
        let port = graph.node(a.sid).unwrap().output_port("Value").unwrap().sid;

        graph.node_mut(a.sid).unwrap().serializable_ports[0]
            .serializable_rect_transform
            .local_position = Vector3::new(1.0, 2.0);
        graph.prepare(&SaveOptions::default().with_layout(LayoutMode::None));

        let connection = graph.connections().iter().find(|c| c.port0_sid == port).unwrap();
        assert_eq!(connection.line.points[0], Vector3::new(1.0, 2.0));
    }

    #[test]
    fn test_prepare_without_pruning() {
        let mut graph = Graph::default();
        graph.float(9.0).unwrap();

        let options = SaveOptions {
            prune_unused_nodes: false,
            ..SaveOptions::default()
        };
        graph.prepare(&options);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_single_and_hidden() {
        let mut graph = Graph::default();
        let placed = graph
            .add_node_with("Debug", NodeOptions::default().with_position(50.0, 60.0))
            .unwrap();
        let loose = graph.add_node("Debug").unwrap();

        let mut hidden = graph.clone();
        hidden.prepare(&SaveOptions {
            layout: LayoutMode::Hidden,
            prune_unused_nodes: false,
            ..SaveOptions::default()
        });
        let loose_node = hidden.node(loose.sid).unwrap();
        assert_eq!(loose_node.position(), LayoutMode::HIDDEN_POSITION);
        assert_eq!(loose_node.serializable_rect_transform.scale, Vector3::ZERO);
        assert_eq!(hidden.node(placed.sid).unwrap().position(), Vector3::new(50.0, 60.0));

        graph.prepare(&SaveOptions {
            layout: LayoutMode::Single,
            prune_unused_nodes: false,
            keep_position: false,
            ..SaveOptions::default()
        });
        assert_eq!(graph.node(placed.sid).unwrap().position(), Vector3::ZERO);
        assert_eq!(graph.node(loose.sid).unwrap().position(), Vector3::ZERO);
    }

    #[test]
    fn test_save_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let mut graph = Graph::default();
        chain(&mut graph);

        graph.save(&path, &SaveOptions::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, graph.to_document_string().unwrap());
    }

    #[test]
    fn test_save_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.json");
        let mut graph = Graph::default();

        let err = graph.save(&path, &SaveOptions::default()).unwrap_err();
        match err {
            SaveError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }
}
