//! HTTP request and response types described as plain data.
//!
//! # Design
//! Resource clients build `HttpRequest` values without touching the network,
//! and `Transport::execute` turns them into `HttpResponse` values. Keeping
//! both sides as plain data lets request construction and response decoding
//! be tested without a server.
//!
//! Response bodies are kept as raw bytes. Whether they are text or JSON is
//! decided by the caller, so a response that arrived is never lost to a
//! decoding problem.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved across
//! threads and stored by callers without lifetime concerns.

use std::borrow::Cow;

/// HTTP method for a request. The gateway surface only uses GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A fixed gateway endpoint: method plus path relative to the base URL.
///
/// Paths for parameterised endpoints hold the prefix only; the client appends
/// the identifier segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
        }
    }

    /// The endpoint path with `segment` appended as a final path component.
    pub fn with_segment(&self, segment: &str) -> String {
        format!("{}/{segment}", self.path)
    }
}

/// An HTTP request described as plain data.
///
/// `url` is already joined with the base URL. `query` pairs are appended
/// in order and percent-encoded by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data. Returned for every status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The body as text, with invalid UTF-8 replaced by U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
