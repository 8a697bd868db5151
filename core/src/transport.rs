//! Shared HTTP transport for all gateway resource clients.
//!
//! # Design
//! `Transport` holds only immutable configuration (base URL, timeout and
//! body limit). `execute` builds a fresh `ureq::Agent` per call, so every
//! request runs on its own connection and the connection is released when
//! the agent drops, on success and on every error path. There is no pool,
//! no retry and no cache.
//!
//! Once a body has been read in full the call succeeds, whatever the status
//! and whatever the bytes. Only failing to get a complete response (refused
//! connection, I/O error, timeout, body over the limit) is an error.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::GatewayError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest response body read before the call fails.
pub const DEFAULT_BODY_LIMIT: u64 = 64 * 1024 * 1024;

const JSON: &str = "application/json";

/// Base URL plus timeout, shared by value between resource clients.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    timeout: Duration,
    body_limit: u64,
}

impl Transport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Build a GET request with `Accept: application/json`.
    pub fn get(&self, path: &str, query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            query,
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
        }
    }

    /// Build a POST request carrying `body` as JSON.
    pub fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpRequest, GatewayError> {
        let body = serde_json::to_string(body).map_err(|e| GatewayError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            query: Vec::new(),
            headers: vec![
                ("content-type".to_string(), JSON.to_string()),
                ("accept".to_string(), JSON.to_string()),
            ],
            body: Some(body),
        })
    }

    /// Perform one HTTP round trip.
    ///
    /// Every status code is returned as an `HttpResponse`. Only failures to
    /// obtain a response become errors.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(self.timeout))
            .build()
            .new_agent();

        debug!(method = request.method.as_str(), url = %request.url, "sending gateway request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(request.url.as_str());
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(request.url.as_str());
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Bytes as sent. Text and JSON decoding belong to the caller.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()
            .map_err(|e| self.transport_error(e))?;

        debug!(status, url = %request.url, "gateway response received");

        Ok(HttpResponse { status, headers, body })
    }

    fn transport_error(&self, err: ureq::Error) -> GatewayError {
        match err {
            ureq::Error::Timeout(_) => GatewayError::Timeout(self.timeout),
            ureq::Error::BodyExceedsLimit(limit) => {
                GatewayError::Transport(format!("response body exceeds {limit} bytes"))
            }
            other => GatewayError::Transport(other.to_string()),
        }
    }
}

/// Flatten a serializable query struct into key/value pairs, sorted by key.
///
/// `None` fields must be skipped by the struct's serde attributes; any `null`
/// that still appears is dropped here.
pub fn query_pairs<T: Serialize>(query: &T) -> Result<Vec<(String, String)>, GatewayError> {
    let value = serde_json::to_value(query).map_err(|e| GatewayError::Serialization(e.to_string()))?;
    let serde_json::Value::Object(fields) = value else {
        return Err(GatewayError::Serialization(
            "query parameters must serialize to an object".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let value = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        pairs.push((key, value));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}
