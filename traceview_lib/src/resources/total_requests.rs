//! Total request volume for an app.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TotalRequests {
    series: Resource,
    summary: Resource,
}

impl TotalRequests {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            series: Resource::get_only(api.clone(), "total_requests/{app}/series"),
            summary: Resource::get_only(api, "total_requests/{app}/summary"),
        }
    }

    pub async fn series(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.series.get(&[app], params).await
    }

    pub async fn summary(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.summary.get(&[app], params).await
    }
}
