//! Request and response contracts for the gateway API.
//!
//! # Design
//! Every contract is a closed struct whose field names serialize to the wire
//! names the gateway expects. Optional request fields are skipped when
//! `None`, so a serialized body carries exactly the populated fields.
//! Response structs ignore unknown keys, so new fields do not break
//! decoding. Operation status and type are closed enums: a value outside
//! the known set fails the whole response with a `Decode` error.
//!
//! The only open shape is [`Metadata`], passed through untouched.

pub mod accounts;
pub mod cards;
pub mod documents;
pub mod operations;
pub mod users;

/// Free-form key/value data attached to a request. Never inspected.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
