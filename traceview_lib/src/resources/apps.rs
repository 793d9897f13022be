//! App discovery and management.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Optional parameters for [`Apps::assign`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignOptions {
    /// Only assign traces from this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// Create the app if it does not exist yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
}

/// `apps` listing, `app/{app_name}` deletion and `assign_app`.
#[derive(Debug, Clone)]
pub struct Apps {
    resource: Resource,
    assignment: Resource,
}

impl Apps {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            resource: Resource::builder(api.clone())
                .get("apps")
                .delete("app/{app_name}")
                .build(),
            assignment: Resource::builder(api).post("assign_app").build(),
        }
    }

    pub async fn get(&self, params: Query) -> Result<Value, Error> {
        self.resource.get(&[], params).await
    }

    /// Assign a host to an app.
    pub async fn assign(
        &self,
        hostname: &str,
        appname: &str,
        options: &AssignOptions,
    ) -> Result<Value, Error> {
        let params = Query::from_serialize(options)?
            .with("hostname", hostname)
            .with("appname", appname);
        self.assignment.post(&[], params).await
    }

    pub async fn delete(&self, app_name: &str) -> Result<Value, Error> {
        self.resource.delete(&[app_name], Query::new()).await
    }
}
