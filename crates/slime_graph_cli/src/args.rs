// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line arguments.

use clap::Parser;
use slime_graph::{ConfigError, LayoutMode, SaveOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "slime_graph", version)]
#[command(about = "Build the demo expression scene and save it as a scene document")]
pub struct Args {
    /// Document to write
    pub output: PathBuf,

    /// Layout for unplaced nodes: auto, grid, single, hidden or none
    #[arg(short, long)]
    pub layout: Option<LayoutMode>,

    /// RON file with save options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep disconnected nodes
    #[arg(long)]
    pub no_prune: bool,

    /// Let `single` and `hidden` move explicitly placed nodes too
    #[arg(long)]
    pub overwrite_positions: bool,
}

impl Args {
    /// Save options from the config file with command line overrides applied
    pub fn save_options(&self) -> Result<SaveOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => SaveOptions::load(path)?,
            None => SaveOptions::default(),
        };

        if let Some(layout) = self.layout {
            options.layout = layout;
        }
        if self.no_prune {
            options.prune_unused_nodes = false;
        }
        if self.overwrite_positions {
            options.keep_position = false;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("slime_graph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["scene.json"]);
        assert_eq!(args.output, PathBuf::from("scene.json"));
        assert_eq!(args.save_options().unwrap(), SaveOptions::default());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&["scene.json", "--layout", "hidden", "--no-prune", "--overwrite-positions"]);
        let options = args.save_options().unwrap();
        assert_eq!(options.layout, LayoutMode::Hidden);
        assert!(!options.prune_unused_nodes);
        assert!(!options.keep_position);
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let result = Args::try_parse_from(["slime_graph", "scene.json", "--layout", "spiral"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_then_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(layout: grid, spacing: (offset_x: 400.0, offset_y: -200.0))").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let options = parse(&["scene.json", "--config", &path]).save_options().unwrap();
        assert_eq!(options.layout, LayoutMode::Grid);
        assert_eq!(options.spacing.offset_x, 400.0);

        let options = parse(&["scene.json", "--config", &path, "--layout", "single"])
            .save_options()
            .unwrap();
        assert_eq!(options.layout, LayoutMode::Single);
        assert_eq!(options.spacing.offset_y, -200.0);
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["scene.json", "--config", "/nonexistent/save.ron"]);
        assert!(matches!(args.save_options(), Err(ConfigError::Io(_))));
    }
}
