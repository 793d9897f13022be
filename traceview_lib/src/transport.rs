//! HTTP transport: one request in, one decoded payload out.

use crate::config::Config;
use crate::error::{Error, HttpError};
use crate::query::Query;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// HTTP methods the API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "post" => Ok(Verb::Post),
            "delete" => Ok(Verb::Delete),
            _ => Err(Error::Protocol(format!("HTTP method is unsupported: {}", s))),
        }
    }
}

/// A fully resolved request. `query` already carries the API key.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub verb: Verb,
    pub url: Url,
    pub query: Query,
}

impl Request {
    /// `url` with the query string appended, as it goes on the wire.
    pub fn wire_url(&self) -> Url {
        let mut url = self.url.clone();
        let pairs = self.query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }
}

/// Performs exactly one request and returns the envelope's `data` field.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Value, Error>;
}

/// Default transport backed by `reqwest`. Redirects are never followed.
///
/// Any 2xx status is a success. A 2xx with an empty body, such as a
/// `204 No Content` from a delete, yields a `null` payload.
#[derive(Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut builder = HttpClient::builder()
            .redirect(Policy::none())
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::Client)?;
        Ok(Self { http })
    }

    fn builder(&self, verb: Verb, url: Url) -> reqwest::RequestBuilder {
        let req = match verb {
            Verb::Get => self.http.get(url),
            Verb::Post => self.http.post(url),
            Verb::Delete => self.http.delete(url),
        };
        req.header(ACCEPT, HeaderValue::from_static("application/json"))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Value, Error> {
        let url = request.url.to_string();
        tracing::debug!(
            method = %request.verb,
            url = %url,
            params = ?request.query.redacted(),
            "sending request"
        );
        let res = self
            .builder(request.verb, request.wire_url())
            .send()
            .await
            .map_err(|source| Error::Network {
                url: url.clone(),
                source: source.without_url(),
            })?;
        let status = res.status();
        let body = res.text().await.map_err(|source| Error::Network {
            url: url.clone(),
            source: source.without_url(),
        })?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "request failed");
            return Err(HttpError::new(status.as_u16(), url, body).into());
        }
        decode_payload(&url, &body)
    }
}

/// Extract `data` from a `{"data": ..., "response": ...}` envelope.
///
/// An empty or whitespace-only body decodes to `null`.
pub fn decode_payload(url: &str, body: &str) -> Result<Value, Error> {
    if body.trim().is_empty() {
        tracing::debug!(url = %url, "empty response body");
        return Ok(Value::Null);
    }
    let mut envelope: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
        url: url.to_string(),
        message: e.to_string(),
        body: body.to_string(),
    })?;
    if let Some(status) = envelope.get("response").and_then(Value::as_str) {
        tracing::trace!(url = %url, response = status, "response envelope");
    }
    match envelope.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(Error::Decode {
            url: url.to_string(),
            message: "response envelope has no `data` field".to_string(),
            body: body.to_string(),
        }),
    }
}
