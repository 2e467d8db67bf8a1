//! Wire types shared by the Potluck server and its clients.
//!
//! Enable the `client` feature for typed HTTP clients.

#[cfg(feature = "client")]
pub mod client;
pub mod objects;

/// Header carrying the plaintext host PIN on host-only endpoints.
pub const HOST_PIN_HEADER: &str = "Potluck-Host-Pin";
