//! Iconographic backend: architecture and domain views drawn with icon nodes.
//!
//! Each component becomes an image node labelled underneath. Only the first
//! [`MAX_ICON_NODES`] components are drawn so the picture stays legible, and
//! edges are limited to pairs where both ends were drawn.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::DiagramKind;
use super::dot::DotBuilder;
use crate::extract::Graph;

pub const MAX_ICON_NODES: usize = 15;

/// File name of the generic service icon inside the icon directory.
pub const RACK_ICON: &str = "rack.png";

const NODE_SIZE: &str = "1.4";

/// A validated icon directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    rack: PathBuf,
}

impl IconSet {
    /// Check that `dir` holds every icon the backend draws with.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when an icon is missing.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let rack = dir.join(RACK_ICON);
        if rack.is_file() {
            Ok(Self { rack })
        } else {
            Err(format!("icon `{}` not found in {}", RACK_ICON, dir.display()))
        }
    }

    #[must_use]
    pub fn rack(&self) -> &Path {
        &self.rack
    }
}

/// DOT source for `graph` with components drawn as icons.
#[must_use]
pub fn iconographic(graph: &Graph, kind: DiagramKind, title: &str, icons: &IconSet) -> String {
    let image = icons.rack().display().to_string();
    let drawn: Vec<&str> = graph.components().iter().take(MAX_ICON_NODES).map(String::as_str).collect();
    let visible: HashSet<&str> = drawn.iter().copied().collect();

    let mut dot = DotBuilder::new();
    dot.graph_attrs(&[
        ("label", title),
        ("labelloc", "t"),
        ("rankdir", "TB"),
        ("pad", "0.5"),
        ("bgcolor", "white"),
        ("fontname", "Helvetica"),
    ]);
    dot.node_defaults(&[
        ("shape", "none"),
        ("image", &image),
        ("imagescale", "true"),
        ("fixedsize", "true"),
        ("width", NODE_SIZE),
        ("height", NODE_SIZE),
        ("labelloc", "b"),
        ("fontname", "Helvetica"),
        ("fontsize", "10"),
    ]);
    dot.edge_defaults(&[("color", "#7B8894")]);

    let clustered = kind == DiagramKind::Domain;
    if clustered {
        dot.open_cluster("domain", &[("label", title), ("style", "filled"), ("bgcolor", "#E5F5FD")]);
    }
    for name in &drawn {
        dot.node(name, &[]);
    }
    if clustered {
        dot.close_cluster();
    }

    for relation in graph.relations() {
        if visible.contains(relation.source.as_str()) && visible.contains(relation.target.as_str()) {
            dot.edge(&relation.source, &relation.target);
        }
    }
    dot.finish()
}

#[cfg(test)]
#[path = "icons_test.rs"]
mod tests;
