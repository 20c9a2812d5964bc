// SPDX-License-Identifier: MIT OR Apache-2.0
//! `slime_graph` - author a node-graph scene and write it as a scene document.
//!
//! Builds the demo expression scene, then runs the save pipeline with options
//! taken from an optional RON file and the command line.

mod args;
mod demo;

use args::Args;
use clap::Parser;
use slime_graph::{ConfigError, Graph, GraphError, SaveError};
use std::cell::RefCell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read save options: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build scene: {0}")]
    Graph(#[from] GraphError),

    #[error("Failed to save scene: {0}")]
    Save(#[from] SaveError),
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = args.save_options()?;

    let graph = RefCell::new(Graph::default());
    demo::build(&graph)?;

    let mut graph = graph.into_inner();
    graph.save(&args.output, &options)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slime_graph=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting slime_graph v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_run_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("scene.json");
        let args = Args::try_parse_from(["slime_graph", output.to_str().unwrap(), "--layout", "grid"]).unwrap();

        run(&args).unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert!(!value["serializableNodes"].as_array().unwrap().is_empty());
        assert!(!value["serializableConnections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_run_reports_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("scene.json");
        let args = Args::try_parse_from(["slime_graph", output.to_str().unwrap()]).unwrap();

        assert!(matches!(run(&args), Err(CliError::Save(SaveError::Io(_)))));
    }
}
