//! The `TraceView` entry point.

use crate::api::Api;
use crate::config::Config;
use crate::credential::ApiKey;
use crate::error::Error;
use crate::query::Query;
use crate::resources::{
    AnnotationOptions, Annotations, Apps, AssignOptions, Errors, Hosts, Latency, Layers, Listing,
    Organization, TotalRequests,
};
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;

/// TraceView API client.
///
/// Every resource is built once, here, from a single API key. Cloning is
/// cheap and clones share one connection pool.
///
/// ```no_run
/// # async fn run() -> Result<(), traceview_lib::Error> {
/// use traceview_lib::{Query, TraceView};
///
/// let tv = TraceView::new("API KEY HERE")?;
/// let apps = tv.apps.get(Query::new()).await?;
/// let latency = tv.latency.server.series("Default", Query::new()).await?;
/// let hosts = tv.hosts.get(Some("Default"), Query::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TraceView {
    api: Arc<Api>,

    pub actions: Listing,
    pub annotations: Annotations,
    pub apps: Apps,
    pub browsers: Listing,
    pub controllers: Listing,
    pub domains: Listing,
    pub errors: Errors,
    pub hosts: Hosts,
    pub latency: Latency,
    pub layers: Layers,
    pub metrics: Listing,
    pub organization: Organization,
    pub regions: Listing,
    pub total_requests: TotalRequests,
}

impl TraceView {
    /// Client for the production API with default settings.
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self, Error> {
        Self::with_config(api_key, &Config::default())
    }

    pub fn with_config(api_key: impl Into<ApiKey>, config: &Config) -> Result<Self, Error> {
        Ok(Self::from_api(Api::new(api_key, config)?))
    }

    /// Client dispatching through a caller-supplied transport.
    pub fn with_transport(
        api_key: impl Into<ApiKey>,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        Ok(Self::from_api(Api::with_transport(api_key, config, transport)?))
    }

    fn from_api(api: Api) -> Self {
        let api = Arc::new(api);
        Self {
            actions: Listing::new(api.clone(), "actions"),
            annotations: Annotations::new(api.clone()),
            apps: Apps::new(api.clone()),
            browsers: Listing::new(api.clone(), "browsers"),
            controllers: Listing::new(api.clone(), "controllers"),
            domains: Listing::new(api.clone(), "domains"),
            errors: Errors::new(api.clone()),
            hosts: Hosts::new(api.clone()),
            latency: Latency::new(api.clone()),
            layers: Layers::new(api.clone()),
            metrics: Listing::new(api.clone(), "metrics"),
            organization: Organization::new(api.clone()),
            regions: Listing::new(api.clone(), "regions"),
            total_requests: TotalRequests::new(api.clone()),
            api,
        }
    }

    /// Shared context, for building resources the client does not cover.
    pub fn api(&self) -> &Arc<Api> {
        &self.api
    }

    /// Post an annotation.
    pub async fn annotate(
        &self,
        message: &str,
        options: &AnnotationOptions,
    ) -> Result<Value, Error> {
        self.annotations.create(message, options).await
    }

    /// Assign `hostname` to `appname`.
    pub async fn assign_app(
        &self,
        hostname: &str,
        appname: &str,
        options: &AssignOptions,
    ) -> Result<Value, Error> {
        self.apps.assign(hostname, appname, options).await
    }

    pub async fn delete_app(&self, app_name: &str) -> Result<Value, Error> {
        self.apps.delete(app_name).await
    }

    pub async fn delete_host(&self, host_id: &str) -> Result<Value, Error> {
        self.hosts.delete(host_id).await
    }

    /// Layers for `app`, optionally since a point in time.
    pub async fn layers_since(
        &self,
        app: &str,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Value, Error> {
        let params = match since {
            Some(t) => Query::new().since(t),
            None => Query::new(),
        };
        self.layers.get(app, params).await
    }
}
