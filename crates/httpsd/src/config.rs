//! Configuration loading and validation for the server binary.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any value is invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TCP port the HTTPS listener binds on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Directory the certificate and key PEM files are written into. Created
    /// at startup if absent; may use `~` shorthand.
    #[serde(default = "default_cert_dir")]
    pub cert_dir: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8090
}
fn default_cert_dir() -> String {
    "/etc/httpsd".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.cert_dir.trim().is_empty() {
            anyhow::bail!("CERT_DIR is required and must not be empty");
        }
        Ok(())
    }
}
