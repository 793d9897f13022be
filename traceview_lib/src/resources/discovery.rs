//! Discovery resources: what TraceView has seen reporting.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde_json::Value;
use std::sync::Arc;

/// A static GET listing such as `domains` or `regions`.
#[derive(Debug, Clone)]
pub struct Listing {
    resource: Resource,
}

impl Listing {
    pub fn new(api: Arc<Api>, path: &'static str) -> Self {
        Self {
            resource: Resource::get_only(api, path),
        }
    }

    pub async fn get(&self, params: Query) -> Result<Value, Error> {
        self.resource.get(&[], params).await
    }
}

/// Layers reporting recently for an app (`layers/{app}`).
///
/// The API defaults to the last day; narrow it with [`Query::since`].
#[derive(Debug, Clone)]
pub struct Layers {
    resource: Resource,
}

impl Layers {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            resource: Resource::get_only(api, "layers/{app}"),
        }
    }

    pub async fn get(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.resource.get(&[app], params).await
    }
}
