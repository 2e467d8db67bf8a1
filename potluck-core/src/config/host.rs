//! Host PIN configuration.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// Something that can tell whether a submitted host PIN is correct.
pub trait PinVerifier {
    fn verify_pin(&self, candidate: &str) -> bool;
}

/// Host configuration holding the argon2 hash of the host PIN.
///
/// The plaintext PIN only ever exists in the config file until the first
/// load, which replaces it with its hash.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub pin_hash: String,
}

impl HostConfig {
    pub fn new(pin_hash: String) -> Self {
        Self { pin_hash }
    }
}

impl PinVerifier for HostConfig {
    fn verify_pin(&self, candidate: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.pin_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
