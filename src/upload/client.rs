//! Attachment API client.
//!
//! Thin HTTP wrapper over the page-attachment endpoints. URL building and
//! response parsing are pure functions so they can be tested without a server.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::AttachmentApi;
use super::config::Credentials;
use crate::error::Error;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_ERROR_BODY_CHARS: usize = 300;

// =============================================================================
// CLIENT
// =============================================================================

pub struct ConfluenceClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl ConfluenceClient {
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] if the HTTP client cannot be built.
    pub fn new(credentials: &Credentials) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(!credentials.verify_tls)
            .build()
            .map_err(|e| Error::BackendUnavailable(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url: credentials.base_url.clone(),
            username: credentials.username.clone(),
            api_token: credentials.api_token.clone(),
        })
    }

    /// Id of the attachment named `filename` on `page_id`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteCallFailure`] on transport errors, non-success
    /// statuses, or an unreadable response.
    pub async fn find_attachment(&self, page_id: &str, filename: &str) -> Result<Option<String>, Error> {
        let response = self
            .http
            .get(attachments_url(&self.base_url, page_id))
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[("filename", filename)])
            .send()
            .await
            .map_err(|e| Error::RemoteCallFailure(e.to_string()))?;
        let body = read_success(response).await?;
        parse_attachment_lookup(&body)
    }
}

#[async_trait::async_trait]
impl AttachmentApi for ConfluenceClient {
    /// Replaces an attachment of the same name with a new version.
    async fn attach_file(&self, page_id: &str, path: &Path) -> Result<String, Error> {
        let filename = file_name(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        let url = match self.find_attachment(page_id, &filename).await? {
            Some(id) => {
                debug!(%filename, attachment_id = %id, "updating existing attachment");
                attachment_data_url(&self.base_url, page_id, &id)
            }
            None => attachments_url(&self.base_url, page_id),
        };

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.clone()))
            .text("comment", attachment_comment(&filename));
        let response = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::RemoteCallFailure(e.to_string()))?;
        read_success(response).await?;
        Ok(filename)
    }
}

async fn read_success(response: reqwest::Response) -> Result<String, Error> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::RemoteCallFailure(e.to_string()))?;
    if status.is_success() {
        return Ok(text);
    }
    Err(Error::RemoteCallFailure(format!("status {}: {}", status.as_u16(), truncate(&text))))
}

// =============================================================================
// PURE HELPERS
// =============================================================================

#[must_use]
pub fn attachments_url(base_url: &str, page_id: &str) -> String {
    format!("{}/rest/api/content/{page_id}/child/attachment", base_url.trim_end_matches('/'))
}

#[must_use]
pub fn attachment_data_url(base_url: &str, page_id: &str, attachment_id: &str) -> String {
    format!("{}/{attachment_id}/data", attachments_url(base_url, page_id))
}

#[must_use]
pub fn attachment_comment(filename: &str) -> String {
    format!("SDD diagram: {filename}")
}

/// Final path component as UTF-8.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`] for paths without a usable file name.
pub fn file_name(path: &Path) -> Result<String, Error> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::InputNotFound(path.to_path_buf()))
}

/// Read `results[0].id` from an attachment lookup response.
///
/// # Errors
///
/// Returns [`Error::RemoteCallFailure`] when the body is not JSON.
pub fn parse_attachment_lookup(body: &str) -> Result<Option<String>, Error> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::RemoteCallFailure(format!("unreadable attachment lookup: {e}")))?;
    let id = value
        .get("results")
        .and_then(serde_json::Value::as_array)
        .and_then(|results| results.first())
        .and_then(|first| first.get("id"))
        .and_then(|id| match id {
            serde_json::Value::String(id) => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        });
    Ok(id)
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_owned();
    }
    let mut short: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
