//! Server configuration, populated from environment variables.

use std::net::SocketAddr;

use thiserror::Error;
use wam::DecodeOptions;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime configuration for the server.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `WAM_BIND` | `0.0.0.0:3000` | TCP socket address to listen on |
/// | `WAM_MAX_UPLOAD_BYTES` | `10485760` | Largest accepted request body |
/// | `WAM_RDF_STRICT` | `false` | Reject RDF documents with syntax errors or unknown triples |
/// | `WAM_RDF_TYPE_FROM_CLASS` | `false` | Read node types from the RDF class triple instead of the id |
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    /// Applied to every RDF import.
    pub decode: DecodeOptions,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a socket address such as 0.0.0.0:3000, got {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a positive number of bytes, got {value:?}")]
    InvalidSize { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            decode: DecodeOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("WAM_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr = bind.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "WAM_BIND",
            value: bind.clone(),
        })?;

        let max_upload_bytes = match lookup("WAM_MAX_UPLOAD_BYTES") {
            None => DEFAULT_MAX_UPLOAD_BYTES,
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidSize {
                        var: "WAM_MAX_UPLOAD_BYTES",
                        value: v,
                    })
                }
            },
        };

        let decode = DecodeOptions {
            strict: flag(&lookup, "WAM_RDF_STRICT")?,
            type_from_class: flag(&lookup, "WAM_RDF_TYPE_FROM_CLASS")?,
        };

        Ok(Self {
            bind_addr,
            max_upload_bytes,
            decode,
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}
