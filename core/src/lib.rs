//! Typed, blocking client for the banking gateway HTTP API.
//!
//! # Overview
//! One client per gateway resource (users, accounts, cards, documents,
//! operations), all built on a shared [`Transport`]. Each endpoint has a
//! low-level `*_api` method returning the raw [`HttpResponse`] and a
//! high-level method that asserts a 2xx status and decodes the response
//! envelope.
//!
//! # Design
//! - `Transport` holds only the base URL and timeout and opens a fresh
//!   connection per call. Clients embed it by value and can be shared across
//!   threads.
//! - Contracts are closed serde structs; only `metadata` is an open map.
//! - Nothing is validated client side: the gateway owns validation and its
//!   status code decides success.
//! - No retry, caching, authentication or pooling.

pub mod clients;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use clients::accounts::AccountsClient;
pub use clients::cards::CardsClient;
pub use clients::documents::DocumentsClient;
pub use clients::operations::OperationsClient;
pub use clients::users::UsersClient;
pub use error::GatewayError;
pub use http::{Endpoint, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, DEFAULT_BODY_LIMIT, DEFAULT_TIMEOUT};
