//! Error taxonomy shared by the diagram and upload commands.
//!
//! Extraction never fails; every variant here comes from I/O around it:
//! reading the document, probing the renderer, writing the image, or talking
//! to the attachment API.

use std::path::PathBuf;

/// Errors surfaced to the caller as a single `{"error": ...}` line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document or an attachment file does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The requested diagram kind is outside the supported set.
    #[error("unsupported diagram type: {0} (expected one of architecture, dependency, er, interaction, domain)")]
    UnsupportedKind(String),

    /// A required rendering program or API client could not be set up.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Building the diagram or writing the image failed.
    #[error("render failed: {0}")]
    RenderFailure(String),

    /// The remote service rejected an attachment upload.
    #[error("remote call failed: {0}")]
    RemoteCallFailure(String),

    /// The host configuration file is unusable.
    #[error("config error: {0}")]
    Config(String),

    /// Unexpected filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable code, used as a structured log field.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "E_INPUT_NOT_FOUND",
            Self::UnsupportedKind(_) => "E_UNSUPPORTED_KIND",
            Self::BackendUnavailable(_) => "E_BACKEND_UNAVAILABLE",
            Self::RenderFailure(_) => "E_RENDER_FAILURE",
            Self::RemoteCallFailure(_) => "E_REMOTE_CALL_FAILURE",
            Self::Config(_) => "E_CONFIG",
            Self::Io(_) => "E_IO",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
