//! Structural graphs and diagrams from loosely formatted specification documents.
//!
//! [`extract`] scans a markdown document into a [`Graph`] of components,
//! entities with fields, and directed relations. [`render`] hands that graph
//! to Graphviz to produce a PNG, and [`upload`] attaches the result to a wiki
//! page.

pub mod error;
pub mod extract;
pub mod output;
pub mod render;
pub mod upload;

use std::io::ErrorKind;
use std::path::Path;

pub use error::Error;
pub use extract::{Graph, ScanMode, extract};
pub use render::{DiagramKind, RenderConfig, RenderRequest};

/// Read a source document as UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] when `path` does not exist and
/// [`Error::Io`] for any other read failure.
pub fn read_document(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
