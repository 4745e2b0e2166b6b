//! Single-line JSON results written to stdout.

use serde::Serialize;

use crate::error::Error;
use crate::render::DiagramKind;
use crate::upload::UploadReport;

/// Successful `diagram` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramOutput {
    pub output: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
}

/// Any failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub error: String,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self { error: err.to_string() }
    }
}

/// What one command run prints on stdout and whether it exits successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub line: String,
    pub success: bool,
}

impl Outcome {
    pub fn succeeded<T: Serialize>(value: &T) -> Self {
        Self { line: json_line(value), success: true }
    }

    #[must_use]
    pub fn failed(err: &Error) -> Self {
        tracing::error!(error_code = err.error_code(), error = %err, "command failed");
        Self { line: json_line(&Failure::from(err)), success: false }
    }

    /// An upload run fails only when no file made it.
    #[must_use]
    pub fn upload(report: &UploadReport) -> Self {
        Self { line: json_line(report), success: !report.all_failed() }
    }

    /// Fold a command result into its outcome.
    pub fn from_result<T>(result: Result<T, Error>, on_success: impl FnOnce(&T) -> Self) -> Self {
        match &result {
            Ok(value) => on_success(value),
            Err(err) => Self::failed(err),
        }
    }
}

/// Serialize `value` as one line of JSON.
///
/// Serialization of these plain structs cannot fail in practice; if it ever
/// does, the line still carries a well-formed `{"error": ...}` object.
pub fn json_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        let message = serde_json::Value::String(format!("could not encode result: {err}"));
        format!("{{\"error\":{message}}}")
    })
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
