//! Link configuration file
//!
//! Line-oriented `key=value` text. Blank lines and lines starting with `#`
//! are skipped, `ip`/`ip_address` and `port` are recognized, anything else
//! is ignored. A missing file is not an error: the defaults apply.
//!
//! ```text
//! # destination
//! ip_address=192.168.1.100
//! port=9090
//! ```

use std::io;
use std::path::Path;

use crate::error::{LinkError, Result};

/// Default destination host (local testing)
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default destination port
pub const DEFAULT_PORT: u16 = 9090;

/// Default config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/udp_config.txt";

/// Destination of the datagram link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub host: String,
    pub port: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl LinkConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let config = Self {
            host: host.into(),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::parse(&text)?;
                tracing::info!(path = %path.display(), "loaded link configuration");
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %path.display(),
                    "configuration file not found, using defaults"
                );
                Ok(Self::default())
            }
            Err(source) => Err(LinkError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse config text over the defaults
    pub fn parse(text: &str) -> Result<Self> {
        let mut config = Self::default();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::debug!(line = lineno + 1, "skipping line without '='");
                continue;
            };
            // Only the first token of the value counts
            let key = key.trim();
            let value = value.split_whitespace().next().unwrap_or("");

            match key {
                "ip" | "ip_address" => config.host = value.to_string(),
                "port" => config.port = parse_port(value)?,
                other => tracing::debug!(key = other, "ignoring unknown config key"),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(LinkError::InvalidConfig("host must not be empty".into()));
        }
        if self.host.chars().any(char::is_whitespace) {
            return Err(LinkError::InvalidConfig(format!(
                "host must not contain whitespace, got {:?}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(LinkError::InvalidConfig("port must be in 1..=65535".into()));
        }
        Ok(())
    }

    /// `host:port` form accepted by socket address resolution
    pub fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16> {
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(LinkError::InvalidConfig(format!(
            "port must be an integer in 1..=65535, got {:?}",
            value
        ))),
    }
}
