//! Host listing, deletion and instrumentation versions.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Hosts {
    resource: Resource,
    versions: Resource,
}

impl Hosts {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            resource: Resource::builder(api.clone())
                .get("hosts")
                .get("app/{app}/hosts")
                .delete("hosts/{host_id}")
                .build(),
            versions: Resource::get_only(api, "hosts/{host_id}/versions"),
        }
    }

    /// All hosts, or only those reporting for `app`.
    ///
    /// `Some("")` is a configuration error, not a request for all hosts.
    pub async fn get(&self, app: Option<&str>, params: Query) -> Result<Value, Error> {
        match app {
            Some(app) => self.resource.get(&[app], params).await,
            None => self.resource.get(&[], params).await,
        }
    }

    pub async fn delete(&self, host_id: &str) -> Result<Value, Error> {
        self.resource.delete(&[host_id], Query::new()).await
    }

    /// Instrumentation versions installed on a host.
    pub async fn versions(&self, host_id: &str, params: Query) -> Result<Value, Error> {
        self.versions.get(&[host_id], params).await
    }
}
