//! Client configuration.

use crate::error::Error;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_AUTHORITY: &str = "https://api.tv.appneta.com";
pub const DEFAULT_VERSION: &str = "api-v2";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where and how to reach the TraceView API.
///
/// Every field has a default, so a partial document deserializes cleanly:
///
/// ```
/// let config: traceview_lib::Config =
///     serde_json::from_str(r#"{"timeout_secs": 30}"#).unwrap();
/// assert_eq!(config.authority, "https://api.tv.appneta.com");
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host of the API, e.g. `https://api.tv.appneta.com`.
    pub authority: String,
    /// Version path segment that prefixes every resource path.
    pub version: String,
    /// Per-request timeout; `0` disables it.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("traceview-rs/{}", crate::VERSION),
        }
    }
}

impl Config {
    /// Point the client at another authority (a proxy or a mock server).
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// `{authority}/{version}/`, the URL every resource path is joined onto.
    pub fn base_url(&self) -> Result<Url, Error> {
        let authority = self.authority.trim_end_matches('/');
        let version = self.version.trim_matches('/');
        if authority.is_empty() {
            return Err(Error::Configuration("API authority is empty".to_string()));
        }
        let raw = if version.is_empty() {
            format!("{}/", authority)
        } else {
            format!("{}/{}/", authority, version)
        };
        let url = Url::parse(&raw)
            .map_err(|e| Error::Configuration(format!("invalid API authority {:?}: {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "API authority {:?} cannot be used as a base URL",
                raw
            )));
        }
        Ok(url)
    }
}
