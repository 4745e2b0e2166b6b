//! Invocation of the Graphviz `dot` program.
//!
//! The image is written to a `.partial` sibling first and renamed into place
//! only after `dot` succeeds, so a failed render never leaves a truncated PNG
//! at the requested path.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::Error;

/// The requested output path with a `.png` extension guaranteed.
#[must_use]
pub fn png_path(requested: &Path) -> PathBuf {
    let is_png = requested.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        return requested.to_path_buf();
    }
    let mut name = OsString::from(requested.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}

/// Scratch path `dot` writes to before the final rename.
#[must_use]
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// Run `dot -Tpng` on `source` and place the image at `target`.
///
/// # Errors
///
/// [`Error::BackendUnavailable`] if `dot` cannot be started,
/// [`Error::RenderFailure`] if it exits unsuccessfully or the image cannot be
/// moved into place.
pub fn write_png(dot: &Path, source: &str, target: &Path) -> Result<(), Error> {
    let partial = partial_path(target);
    let result = run_dot(dot, source, &partial).and_then(|()| {
        std::fs::rename(&partial, target)
            .map_err(|err| Error::RenderFailure(format!("could not move image to {}: {err}", target.display())))
    });
    if result.is_err() {
        discard(&partial);
    }
    result
}

fn run_dot(dot: &Path, source: &str, partial: &Path) -> Result<(), Error> {
    let mut child = Command::new(dot)
        .arg("-Tpng")
        .arg("-o")
        .arg(partial)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::BackendUnavailable(format!("graphviz `{}` not found", dot.display())),
            _ => Error::RenderFailure(format!("could not start `{}`: {err}", dot.display())),
        })?;

    // stdin is fed from its own thread; dot may fill stderr before reading all input.
    let output = std::thread::scope(|scope| {
        if let Some(mut stdin) = child.stdin.take() {
            scope.spawn(move || {
                // dot may exit early on a syntax error; its status explains why.
                if let Err(err) = stdin.write_all(source.as_bytes()) {
                    debug!(error = %err, "dot closed stdin early");
                }
            });
        }
        child.wait_with_output()
    });
    let output =
        output.map_err(|err| Error::RenderFailure(format!("waiting for `{}` failed: {err}", dot.display())))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(Error::RenderFailure(format!("`{}` exited with {}: {}", dot.display(), output.status, stderr.trim())))
}

fn discard(partial: &Path) {
    match std::fs::remove_file(partial) {
        Ok(()) => debug!(path = %partial.display(), "removed partial image"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(path = %partial.display(), error = %err, "could not remove partial image"),
    }
}

#[cfg(test)]
#[path = "graphviz_test.rs"]
mod tests;
