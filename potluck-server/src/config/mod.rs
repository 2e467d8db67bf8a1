//! Configuration loading for potluck-server.
//!
//! Reads the TOML file, applies CLI overrides and hashes a plaintext host
//! PIN in place.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{HostConfig, ServerConfig, SharedConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("password hashing error: {0}")]
    HashError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

pub struct LoadedConfig {
    pub server: ServerConfig,
    pub host: HostConfig,
}

impl LoadedConfig {
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.host)
    }
}

pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Read, validate and build the configuration.
    ///
    /// A plaintext host PIN is hashed and the file rewritten before the
    /// config is returned, so the plaintext never outlives the first load.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        let pin_hash = if file_config.is_pin_hashed() {
            file_config.host.pin.clone()
        } else {
            let hash = hash_pin(&file_config.host.pin)?;
            file_config.host.pin = hash.clone();
            self.rewrite_config(&file_config)?;
            tracing::info!("Host PIN hashed and config file updated");
            hash
        };

        Ok(LoadedConfig {
            server: ServerConfig::new(file_config.server.listen),
            host: HostConfig::new(pin_hash),
        })
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn rewrite_config(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(config)?;

        // temp file + rename keeps the original intact if the write fails
        let temp_path = self.config_path.with_extension("toml.tmp");
        std::fs::write(&temp_path, toml_string)?;
        std::fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.host.pin.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "host.pin must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn hash_pin(plaintext: &str) -> Result<String, ConfigError> {
    use argon2::{
        Argon2, PasswordHasher,
        password_hash::{SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ConfigError::HashError(e.to_string()))
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}
