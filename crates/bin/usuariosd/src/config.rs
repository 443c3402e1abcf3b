//! Daemon settings: an optional TOML file, then `USUARIOS_*` environment
//! variables on top.
//!
//! The file defaults to `usuarios.toml` in the working directory and can be
//! moved with `USUARIOS_CONFIG`. A missing file is not an error. An
//! environment variable that is set but unparsable is.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use usuarios_adapter_http_axum::router::{
    DEFAULT_BODY_LIMIT, DEFAULT_CORS_ORIGIN, HttpOptions, WILDCARD_ORIGIN,
};

const DEFAULT_CONFIG_PATH: &str = "usuarios.toml";

/// Settings for `usuariosd`, as read from `usuarios.toml`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Socket the HTTP listener binds to.
    pub bind: SocketAddr,
    /// `sqlx` `SQLite` URL, e.g. `sqlite:usuarios.db?mode=rwc`.
    pub database_url: String,
    /// `tracing` filter directive.
    pub log: String,
    /// Browser origins answered with CORS headers.
    pub cors_origins: Vec<String>,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite:usuarios.db?mode=rwc".to_string(),
            log: "usuariosd=info,usuarios=info,tower_http=debug".to_string(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load_with`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Read the config file named by `USUARIOS_CONFIG` (or the default
    /// path), apply overrides looked up through `var`, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override
    /// is malformed, or the merged settings are rejected by validation.
    pub fn load_with(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = var("USUARIOS_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = Self::read(&path)?;
        config.apply_overrides(var)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var("USUARIOS_BIND") {
            self.bind = parse_var("USUARIOS_BIND", &val)?;
        }
        if let Some(val) = var("USUARIOS_PORT") {
            self.bind.set_port(parse_var("USUARIOS_PORT", &val)?);
        }
        if let Some(val) = var("USUARIOS_DATABASE_URL") {
            self.database_url = val;
        }
        if let Some(val) = var("RUST_LOG").or_else(|| var("USUARIOS_LOG")) {
            self.log = val;
        }
        if let Some(val) = var("USUARIOS_CORS_ORIGINS") {
            self.cors_origins = val
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(val) = var("USUARIOS_BODY_LIMIT") {
            self.body_limit = parse_var("USUARIOS_BODY_LIMIT", &val)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.port() == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.body_limit == 0 {
            return Err(ConfigError::Validation(
                "body_limit must be non-zero".to_string(),
            ));
        }
        for origin in &self.cors_origins {
            if origin == WILDCARD_ORIGIN {
                return Err(ConfigError::Validation(
                    "wildcard CORS origin is not supported, list origins explicitly".to_string(),
                ));
            }
            if origin.parse::<HeaderValue>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "invalid CORS origin {origin:?}"
                )));
            }
        }
        EnvFilter::try_new(&self.log)
            .map_err(|err| ConfigError::Validation(format!("invalid log filter: {err}")))?;
        Ok(())
    }

    /// Router layer settings carried by this config.
    #[must_use]
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            cors_origins: self.cors_origins.clone(),
            body_limit: self.body_limit,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        key,
        value: value.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{key} has an unusable value {value:?}")]
    Env { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Validation(String),
}
