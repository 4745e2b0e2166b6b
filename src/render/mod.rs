//! Renderer adapter: turns an extracted [`Graph`] into a PNG via Graphviz.
//!
//! DESIGN
//! ======
//! Two backends produce DOT source for the external `dot` program:
//! - [`dot::generic`] draws records for entities and plain nodes for components
//! - [`icons::iconographic`] draws icon nodes for architecture/domain views
//!
//! Which one runs is decided by [`Strategy::select`] from the result of a
//! capability probe, never by catching a failure and retrying. Layout and
//! rasterization are left entirely to Graphviz.

pub mod dot;
pub mod graphviz;
pub mod icons;
pub mod probe;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::Error;
use crate::extract::Graph;
use icons::IconSet;
use probe::{Capabilities, Capability};

// =============================================================================
// DIAGRAM KIND
// =============================================================================

/// The diagram views a document can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Architecture,
    Dependency,
    Er,
    Interaction,
    Domain,
}

impl DiagramKind {
    pub const ALL: [Self; 5] = [Self::Architecture, Self::Dependency, Self::Er, Self::Interaction, Self::Domain];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Dependency => "dependency",
            Self::Er => "er",
            Self::Interaction => "interaction",
            Self::Domain => "domain",
        }
    }

    /// Title used when the caller supplies none.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Architecture => "Architecture",
            Self::Dependency => "Module Dependencies",
            Self::Er => "ER Diagram",
            Self::Interaction => "Component Interaction",
            Self::Domain => "Domain Boundaries",
        }
    }

    /// Whether the iconographic backend should be preferred for this kind.
    #[must_use]
    pub fn prefers_icons(self) -> bool {
        matches!(self, Self::Architecture | Self::Domain)
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnsupportedKind(raw.to_owned()))
    }
}

// =============================================================================
// CONFIG AND REQUEST
// =============================================================================

/// Where the external renderer and its assets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// The Graphviz `dot` executable (bare name or path).
    pub dot: PathBuf,
    /// Directory holding the icon set used by the iconographic backend.
    pub icon_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { dot: PathBuf::from("dot"), icon_dir: None }
    }
}

/// One diagram to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub kind: DiagramKind,
    pub title: Option<String>,
    pub output: PathBuf,
}

impl RenderRequest {
    /// The caller's title, or the kind's default when absent or empty.
    #[must_use]
    pub fn title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => self.kind.default_title(),
        }
    }
}

// =============================================================================
// STRATEGY
// =============================================================================

/// The backend chosen for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// Icon nodes for architecture/domain views.
    Iconographic(&'a IconSet),
    /// Plain Graphviz nodes and records; handles every kind.
    Generic,
}

impl<'a> Strategy<'a> {
    /// Pick the backend for `kind` given what the probe found.
    #[must_use]
    pub fn select(kind: DiagramKind, capabilities: &'a Capabilities) -> Self {
        match (&capabilities.icons, kind.prefers_icons()) {
            (Capability::Available(icons), true) => Self::Iconographic(icons),
            _ => Self::Generic,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iconographic(_) => "iconographic",
            Self::Generic => "generic",
        }
    }

    /// DOT source for `graph` drawn as `kind`.
    #[must_use]
    pub fn dot_source(&self, graph: &Graph, kind: DiagramKind, title: &str) -> String {
        match self {
            Self::Iconographic(icons) => icons::iconographic(graph, kind, title, icons),
            Self::Generic => dot::generic(graph, kind, title),
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Render `graph` and return the path of the written image.
///
/// # Errors
///
/// Returns [`Error::BackendUnavailable`] when `dot` cannot be run and
/// [`Error::RenderFailure`] when Graphviz rejects the diagram or the image
/// cannot be moved into place.
pub fn render(graph: &Graph, request: &RenderRequest, config: &RenderConfig) -> Result<PathBuf, Error> {
    let capabilities = probe::probe(config);
    let dot = match &capabilities.dot {
        Capability::Available(dot) => dot.clone(),
        Capability::Missing(reason) => return Err(Error::BackendUnavailable(reason.clone())),
    };

    let strategy = Strategy::select(request.kind, &capabilities);
    if let (true, Capability::Missing(reason)) = (request.kind.prefers_icons(), &capabilities.icons) {
        info!(%reason, "icon set unavailable, using generic backend");
    }

    let title = request.title();
    let source = strategy.dot_source(graph, request.kind, title);
    let target = graphviz::png_path(&request.output);
    info!(kind = %request.kind, backend = strategy.name(), output = %target.display(), "rendering diagram");

    graphviz::write_png(&dot, &source, &target)?;
    Ok(target)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
