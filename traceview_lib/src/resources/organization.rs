//! Organization resources.

use super::discovery::Listing;
use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::resource::Resource;
use serde_json::Value;
use std::sync::Arc;

/// `organization`, with `users` and `licenses` beneath it.
#[derive(Debug, Clone)]
pub struct Organization {
    resource: Resource,
    pub users: Listing,
    pub licenses: Listing,
}

impl Organization {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            resource: Resource::get_only(api.clone(), "organization"),
            users: Listing::new(api.clone(), "organization/users"),
            licenses: Listing::new(api, "organization/licenses"),
        }
    }

    pub async fn get(&self, params: Query) -> Result<Value, Error> {
        self.resource.get(&[], params).await
    }
}
