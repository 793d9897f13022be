//! Error rate resources.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Errors {
    rate: Resource,
}

impl Errors {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            rate: Resource::get_only(api, "errors/{app}/rate"),
        }
    }

    /// Timeseries of `(timestamp, error_rate)` pairs, where the rate is the
    /// share of traces with at least one error.
    pub async fn rate(&self, app: &str, params: Query) -> Result<Value, Error> {
        self.rate.get(&[app], params).await
    }
}
