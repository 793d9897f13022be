//! TraceView (AppNeta) API client library.
//!
//! Provides a typed client for the TraceView REST API: organization,
//! discovery, latency, error rates, total requests, annotations, and host and
//! app management. Each operation performs one HTTP request and returns the
//! `data` field of the response envelope as a [`serde_json::Value`].

pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod query;
pub mod resource;
pub mod resources;
pub mod transport;

#[cfg(test)]
mod testing;

pub use api::Api;
pub use client::TraceView;
pub use config::Config;
pub use credential::ApiKey;
pub use error::{Error, HttpError};
pub use query::Query;
pub use resource::{PathTemplate, Resource, ResourceBuilder};
pub use resources::{AnnotationOptions, AssignOptions, DataType};
pub use transport::{HttpTransport, Request, Transport, Verb};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
