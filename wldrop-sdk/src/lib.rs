//! Shared types for the whitelist drop coordinator.
//!
//! - [`objects`]: request/response bodies exchanged with the command layer
//!   and the chat gateway.
//! - [`signature`]: the HMAC body-signing scheme used on every call.
//! - `client` (feature): typed HTTP clients for both directions.

pub mod objects;
pub mod signature;

#[cfg(feature = "client")]
pub mod client;
