//! Shared context every resource dispatches through.

use crate::config::Config;
use crate::credential::ApiKey;
use crate::error::Error;
use crate::query::{Query, KEY_PARAM};
use crate::transport::{HttpTransport, Request, Transport, Verb};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Credential, base URL and transport. Immutable once built; resources hold
/// it behind an `Arc`.
pub struct Api {
    key: ApiKey,
    base: Url,
    transport: Arc<dyn Transport>,
}

impl Api {
    /// Context using the default reqwest transport.
    pub fn new(key: impl Into<ApiKey>, config: &Config) -> Result<Self, Error> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Self::with_transport(key, config, transport)
    }

    pub fn with_transport(
        key: impl Into<ApiKey>,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        Ok(Self {
            key: key.into(),
            base: config.base_url()?,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a resolved resource path.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(Error::Configuration("resource path is empty".to_string()));
        }
        self.base
            .join(path)
            .map_err(|e| Error::Configuration(format!("invalid resource path {:?}: {}", path, e)))
    }

    /// Caller parameters with the API key overlaid last.
    ///
    /// ```
    /// use serde_json::json;
    /// use traceview_lib::{Api, Config, Query};
    ///
    /// let api = Api::new("ABC123", &Config::default()).unwrap();
    /// let params = api.build_params(Query::new().with("key", "mine").with("foo", "bar"));
    /// assert_eq!(params.get("key"), Some(&json!("ABC123")));
    /// assert_eq!(params.get("foo"), Some(&json!("bar")));
    /// ```
    pub fn build_params(&self, params: Query) -> Query {
        params.with(KEY_PARAM, self.key.expose())
    }

    pub async fn send(&self, verb: Verb, path: &str, params: Query) -> Result<Value, Error> {
        let request = Request {
            verb,
            url: self.url(path)?,
            query: self.build_params(params),
        };
        self.transport.send(request).await
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("key", &self.key)
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}
