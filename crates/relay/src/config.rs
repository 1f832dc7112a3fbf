//! Configuration loading and validation for the relay.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or
//! invalid. Everything here is immutable after [`Config::from_env`] returns.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Origins permitted to receive credentialed cross-origin responses when no
/// `CORS_ALLOWED_ORIGINS` override is set. Exact scheme+host+port literals,
/// no wildcards.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://localhost:3000",
    "http://localhost:4000",
    "https://localhost:4000",
    "http://10.5.50.245:9999",
    "http://localhost:9999",
    "http://10.5.51.50:9999",
    "https://10.5.51.50:9999",
    "http://172.20.10.3:9999",
    "https://172.20.10.3:9999",
    "http://10.5.48.100:9999",
    "https://10.5.50.245:9999",
    "https://localhost:9999",
    "http://217.145.69.251:9999",
    "https://217.145.69.251:9999",
    "http://192.168.150.146:9999",
    "https://192.168.150.146:9999",
    "https://217.145.69.239:9999",
    "http://217.145.69.239:9999",
    "https://login.messgeblast.com",
    "http://login.messgeblast.com",
    "https://login.messgeblast.com:9999",
    "http://login.messgeblast.com:9999",
    "https://crm.voicemeetme.net",
    "http://crm.voicemeetme.net",
    "https://crm.voicemeetme.net:9999",
    "http://crm.voicemeetme.net:9999",
];

/// Validated relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the upstream CDR data source. **Required.**
    pub upstream_url: String,

    /// Port the relay listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host/interface the relay binds.
    #[serde(default = "default_host")]
    pub host: String,

    /// Externally visible URL, informational only (logged at startup).
    #[serde(default)]
    pub public_url: Option<String>,

    /// HTTPS toggle; truthy iff it equals `"true"` case-insensitively.
    #[serde(default)]
    pub use_https: String,

    /// Certificate directory override. Absolute, or relative to the working
    /// directory. Defaults to `./ssl` when unset.
    #[serde(default)]
    pub ssl_dir: Option<String>,

    /// Private key path override (default `<ssl_dir>/privkey.pem`).
    #[serde(default)]
    pub ssl_key: Option<String>,

    /// Certificate chain path override (default `<ssl_dir>/fullchain.pem`).
    #[serde(default)]
    pub ssl_cert: Option<String>,

    /// CA bundle path. No default — only loaded when explicitly configured.
    #[serde(default)]
    pub ssl_ca: Option<String>,

    /// Private key passphrase. Carried for parity with the deployment env;
    /// rustls requires unencrypted keys (see `server::tls`).
    #[serde(default)]
    pub ssl_passphrase: Option<String>,

    /// Comma-separated allow-list override for CORS origins.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    9086
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
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

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.upstream_url, "UPSTREAM_URL")?;
        ensure_non_empty(&self.host, "HOST")?;
        Ok(())
    }

    /// Whether the HTTPS toggle is enabled (`USE_HTTPS=true`, any case).
    pub fn use_https(&self) -> bool {
        self.use_https.eq_ignore_ascii_case("true")
    }

    /// The effective CORS allow-list: the `CORS_ALLOWED_ORIGINS` override
    /// split on commas, or the built-in deployment list.
    pub fn allowed_origins(&self) -> Vec<String> {
        match &self.cors_allowed_origins {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
