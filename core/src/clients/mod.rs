//! Resource-scoped gateway clients.
//!
//! # Design
//! Each client embeds a [`Transport`](crate::Transport) by value and exposes
//! every endpoint in up to three forms:
//! - `build_*` produces the `HttpRequest` without any I/O,
//! - `*_api` executes it and returns the raw `HttpResponse` whatever its
//!   status,
//! - the unsuffixed method asserts a 2xx status and decodes the envelope.

pub mod accounts;
pub mod cards;
pub mod documents;
pub mod operations;
pub mod users;

use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::http::HttpResponse;

/// Fail with `Status` on any non-2xx response.
pub fn check_success(response: &HttpResponse) -> Result<(), GatewayError> {
    if response.is_success() {
        return Ok(());
    }
    Err(GatewayError::Status {
        status: response.status,
        body: response.text().into_owned(),
    })
}

/// Assert success and decode the body into `T`. A body that is not valid
/// UTF-8 JSON is a `Decode` error.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, GatewayError> {
    check_success(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| GatewayError::Decode(e.to_string()))
}
