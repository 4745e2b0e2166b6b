//! Capability probe for the external renderer and the icon set.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::RenderConfig;
use super::icons::IconSet;

/// Whether an optional facility can be used, and why not if it cannot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Missing(String),
}

impl<T> Capability<T> {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Everything the renderer may rely on for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub dot: Capability<PathBuf>,
    pub icons: Capability<IconSet>,
}

/// Probe the `dot` executable and the icon directory named in `config`.
#[must_use]
pub fn probe(config: &RenderConfig) -> Capabilities {
    let capabilities = Capabilities { dot: probe_dot(&config.dot), icons: probe_icons(config.icon_dir.as_deref()) };
    debug!(
        dot = capabilities.dot.is_available(),
        icons = capabilities.icons.is_available(),
        "renderer capabilities probed"
    );
    capabilities
}

/// Run `<dot> -V` and report whether it exits successfully.
#[must_use]
pub fn probe_dot(dot: &Path) -> Capability<PathBuf> {
    let status = Command::new(dot)
        .arg("-V")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => Capability::Available(dot.to_path_buf()),
        Ok(status) => Capability::Missing(format!("graphviz `{}` exited with {status}", dot.display())),
        Err(err) => Capability::Missing(format!(
            "graphviz `{}` could not be run ({err}); install graphviz or pass --dot",
            dot.display()
        )),
    }
}

/// Load the icon set from `dir`, if one is configured.
#[must_use]
pub fn probe_icons(dir: Option<&Path>) -> Capability<IconSet> {
    let Some(dir) = dir else {
        return Capability::Missing("no icon directory configured".to_owned());
    };
    match IconSet::load(dir) {
        Ok(icons) => Capability::Available(icons),
        Err(reason) => Capability::Missing(reason),
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
