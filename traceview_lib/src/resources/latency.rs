//! Latency resources, split into server-side and client-side data.
//!
//! Both sides share the same path skeletons and differ only in the
//! `{data_type}` segment. The by-layer breakdown exists for server data only.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::{PathTemplate, Resource};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

const SERIES: PathTemplate = PathTemplate::new("latency/{app}/{data_type}/series");
const SUMMARY: PathTemplate = PathTemplate::new("latency/{app}/{data_type}/summary");
const BY_LAYER: PathTemplate = PathTemplate::new("latency/{app}/{data_type}/by-layer");

/// Which side of the request latency is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Server,
    Client,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Server => "server",
            DataType::Client => "client",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn bound(api: Arc<Api>, skeleton: PathTemplate, data_type: DataType) -> Resource {
    Resource::builder(api)
        .get(skeleton)
        .bind("data_type", data_type.as_str())
        .build()
}

#[derive(Debug, Clone)]
struct Perspective {
    series: Resource,
    summary: Resource,
}

impl Perspective {
    fn new(api: Arc<Api>, data_type: DataType) -> Self {
        Self {
            series: bound(api.clone(), SERIES, data_type),
            summary: bound(api, SUMMARY, data_type),
        }
    }
}

/// Server-side latency: `latency/{app}/server/...`.
#[derive(Debug, Clone)]
pub struct ServerLatency {
    perspective: Perspective,
    by_layer: Resource,
}

impl ServerLatency {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            perspective: Perspective::new(api.clone(), DataType::Server),
            by_layer: bound(api, BY_LAYER, DataType::Server),
        }
    }

    /// Timeseries of `(timestamp, volume, latency)` triples.
    pub async fn series(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.perspective.series.get(&[app], params).await
    }

    pub async fn summary(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.perspective.summary.get(&[app], params).await
    }

    /// Latency broken down per layer.
    pub async fn by_layer(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.by_layer.get(&[app], params).await
    }
}

/// Client-side (browser) latency: `latency/{app}/client/...`.
///
/// There is no by-layer breakdown for client data:
///
/// ```compile_fail
/// # async fn f(tv: traceview_lib::TraceView) {
/// tv.latency.client.by_layer("Default", traceview_lib::Query::new()).await;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientLatency {
    perspective: Perspective,
}

impl ClientLatency {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            perspective: Perspective::new(api, DataType::Client),
        }
    }

    pub async fn series(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.perspective.series.get(&[app], params).await
    }

    pub async fn summary(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.perspective.summary.get(&[app], params).await
    }
}

#[derive(Debug, Clone)]
pub struct Latency {
    pub server: ServerLatency,
    pub client: ClientLatency,
}

impl Latency {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            server: ServerLatency::new(api.clone()),
            client: ClientLatency::new(api),
        }
    }
}
