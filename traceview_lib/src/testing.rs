//! Transport spy for unit tests.

use crate::api::Api;
use crate::config::Config;
use crate::error::{Error, HttpError};
use crate::transport::{Request, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Records every request and answers with a canned payload or status.
pub(crate) struct RecordingTransport {
    reply: Result<Value, u16>,
    calls: Mutex<Vec<Request>>,
}

impl RecordingTransport {
    pub(crate) fn ok(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(payload),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// URL paths requested so far, e.g. `/api-v2/apps`.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }

    /// An `Api` with key `ABC123` dispatching through this spy.
    pub(crate) fn api(self: &Arc<Self>) -> Arc<Api> {
        Arc::new(Api::with_transport("ABC123", &Config::default(), self.clone()).unwrap())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: Request) -> Result<Value, Error> {
        let url = request.url.to_string();
        self.calls.lock().unwrap().push(request);
        match &self.reply {
            Ok(payload) => Ok(payload.clone()),
            Err(status) => Err(HttpError::new(*status, url, "{\"response\": \"error\"}").into()),
        }
    }
}
