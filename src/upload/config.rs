//! Credentials for the attachment API, read from the host configuration file.
//!
//! The file is the JSON document other tools already keep their server
//! settings in: `{"mcpServers": {"<name>": {"env": {...}}}}`. Only the named
//! server's `env` map is consulted.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".claude.json";

const URL_KEY: &str = "CONFLUENCE_URL";
const USERNAME_KEY: &str = "CONFLUENCE_USERNAME";
const TOKEN_KEY: &str = "CONFLUENCE_API_TOKEN";
const SSL_VERIFY_KEY: &str = "CONFLUENCE_SSL_VERIFY";
const FALLBACK_URL_KEY: &str = "JIRA_URL";

// =============================================================================
// FILE SHAPE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct HostConfig {
    #[serde(rename = "mcpServers", default)]
    servers: BTreeMap<String, ServerEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerEntry {
    #[serde(default)]
    env: HashMap<String, Value>,
}

// =============================================================================
// CREDENTIALS
// =============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Site base URL without a trailing slash, e.g. `https://acme.atlassian.net/wiki`.
    pub base_url: String,
    pub username: String,
    pub api_token: String,
    pub verify_tls: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// `$HOME/.claude.json`, when `HOME` is set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| Path::new(&home).join(DEFAULT_CONFIG_FILE))
}

/// Read `path` and return the credentials of `server`.
///
/// # Errors
///
/// Returns [`Error::Config`] when the file is missing or malformed, the
/// server is not configured, or required keys are absent.
pub fn load(path: &Path, server: &str) -> Result<Credentials, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| Error::Config(format!("cannot read {}: {err}", path.display())))?;
    parse_server(&text, server)
}

/// Pick `server` out of a host configuration document.
///
/// # Errors
///
/// See [`load`].
pub fn parse_server(json: &str, server: &str) -> Result<Credentials, Error> {
    let config: HostConfig =
        serde_json::from_str(json).map_err(|err| Error::Config(format!("invalid host config: {err}")))?;
    let Some(entry) = config.servers.get(server) else {
        let known: Vec<&str> = config.servers.keys().map(String::as_str).collect();
        return Err(Error::Config(format!(
            "server `{server}` not configured (available: {})",
            if known.is_empty() { "none".to_owned() } else { known.join(", ") }
        )));
    };
    credentials_from_env(&entry.env)
}

/// Build credentials from a server's `env` map.
///
/// # Errors
///
/// Returns [`Error::Config`] naming every required key that is missing.
pub fn credentials_from_env(env: &HashMap<String, Value>) -> Result<Credentials, Error> {
    let base_url = env_string(env, URL_KEY).or_else(|| {
        env_string(env, FALLBACK_URL_KEY).map(|jira| format!("{}/wiki", jira.trim_end_matches('/')))
    });
    let username = env_string(env, USERNAME_KEY);
    let api_token = env_string(env, TOKEN_KEY);

    match (base_url, username, api_token) {
        (Some(base_url), Some(username), Some(api_token)) => Ok(Credentials {
            base_url: base_url.trim_end_matches('/').to_owned(),
            username,
            api_token,
            verify_tls: verify_tls(env.get(SSL_VERIFY_KEY)),
        }),
        (base_url, username, api_token) => {
            let missing: Vec<&str> = [(URL_KEY, base_url.is_none()), (USERNAME_KEY, username.is_none()), (TOKEN_KEY, api_token.is_none())]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
            Err(Error::Config(format!("missing credentials: {}", missing.join(", "))))
        }
    }
}

fn env_string(env: &HashMap<String, Value>, key: &str) -> Option<String> {
    let raw = match env.get(key)? {
        Value::String(text) => text.trim().to_owned(),
        Value::Null => return None,
        other => other.to_string(),
    };
    (!raw.is_empty()).then_some(raw)
}

/// TLS verification stays on unless the value is `false`.
fn verify_tls(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.trim().eq_ignore_ascii_case("false"),
        _ => true,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
