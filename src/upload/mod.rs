//! Attach rendered diagrams to a remote wiki page.
//!
//! DESIGN
//! ======
//! Every requested file is checked before the first request so a typo fails
//! fast without a partial upload. After that, files are attached one at a
//! time and each outcome lands in the [`UploadReport`]; one rejected file does
//! not stop the rest.

pub mod client;
pub mod config;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Error;

/// Attachment operations the uploader needs. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AttachmentApi: Send + Sync {
    /// Attach the file at `path` to `page_id` and return its file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputNotFound`] if the file cannot be read and
    /// [`Error::RemoteCallFailure`] if the service rejects the upload.
    async fn attach_file(&self, page_id: &str, path: &Path) -> Result<String, Error>;
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uploaded {
    pub file: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub file: String,
    pub error: String,
}

/// Per-file outcome of one upload run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub page_id: String,
    pub uploaded: Vec<Uploaded>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<UploadFailure>,
}

impl UploadReport {
    /// True when at least one file was requested and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.uploaded.is_empty() && !self.errors.is_empty()
    }
}

// =============================================================================
// RUN
// =============================================================================

/// Fail with [`Error::InputNotFound`] on the first path that is not a file.
///
/// # Errors
///
/// See above.
pub fn check_files(files: &[PathBuf]) -> Result<(), Error> {
    match files.iter().find(|path| !path.is_file()) {
        Some(missing) => Err(Error::InputNotFound(missing.clone())),
        None => Ok(()),
    }
}

/// Attach every file in `files` to `page_id`.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] before any upload if a file is missing.
/// Failures of individual uploads are recorded in the report instead.
pub async fn run<A: AttachmentApi + ?Sized>(api: &A, page_id: &str, files: &[PathBuf]) -> Result<UploadReport, Error> {
    check_files(files)?;

    let mut report = UploadReport { page_id: page_id.to_owned(), uploaded: Vec::new(), errors: Vec::new() };
    for path in files {
        let file = path.display().to_string();
        match api.attach_file(page_id, path).await {
            Ok(filename) => {
                info!(%page_id, %filename, "attachment uploaded");
                report.uploaded.push(Uploaded { file, filename });
            }
            Err(err) => {
                warn!(%page_id, %file, error_code = err.error_code(), error = %err, "attachment upload failed");
                report.errors.push(UploadFailure { file, error: err.to_string() });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
