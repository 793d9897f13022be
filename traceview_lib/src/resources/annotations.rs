//! Annotations: free-form messages pinned to the timeline.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Optional fields of a new annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// When it happened; the API uses the time of receipt if unset.
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Annotations {
    create: Resource,
    listing: Resource,
}

impl Annotations {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            create: Resource::builder(api.clone()).post("log_message").build(),
            listing: Resource::builder(api)
                .get("annotations")
                .get("app/{app}/annotations")
                .build(),
        }
    }

    pub async fn create(&self, message: &str, options: &AnnotationOptions) -> Result<Value, Error> {
        let params = Query::from_serialize(options)?.with("message", message);
        self.create.post(&[], params).await
    }

    /// All annotations, or only those for `app`.
    ///
    /// `Some("")` is a configuration error, not a request for every
    /// annotation.
    pub async fn get(&self, app: Option<&str>, params: Query) -> Result<Value, Error> {
        match app {
            Some(app) => self.listing.get(&[app], params).await,
            None => self.listing.get(&[], params).await,
        }
    }
}
