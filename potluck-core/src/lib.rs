#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod config;
pub mod entities;
pub mod framework;
pub mod memory;
pub mod secret_santa;
