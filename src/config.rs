//! Reference listener configuration: a small TOML file with the handful of
//! fields the protocol engine and its listener actually consume. Grounded in
//! the teacher's `Config::from_file` / field-default pattern, trimmed down
//! from the teacher's much larger configuration surface (TLS, peers,
//! retention, filters, user limits, …) since those belong to out-of-scope
//! collaborators this crate doesn't implement.

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_site_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".into())
}

fn default_idle_timeout_secs() -> u64 {
    600
}

/// The product name reported in the greeting and CAPABILITIES.
pub const PRODUCT_NAME: &str = "Postus";
/// The version reported alongside [`PRODUCT_NAME`]; independent of the
/// crate's own Cargo version so a host application can report a different
/// public version if it wraps this engine.
pub const PRODUCT_VERSION: &str = "0.7";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// `host:port` the reference listener binds to.
    pub addr: String,

    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Idle read timeout applied to each connection by the reference
    /// listener; the engine itself is timeout-agnostic.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// valid configuration.
    pub fn from_file(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration file '{path}'"))?;
        toml::from_str(&text).with_context(|| format!("parsing configuration file '{path}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let cfg: Config = toml::from_str("addr = \"127.0.0.1:1190\"\n").unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:1190");
        assert_eq!(cfg.idle_timeout_secs, 600);
    }

    #[test]
    fn honors_explicit_overrides() {
        let cfg: Config = toml::from_str(
            "addr = \"0.0.0.0:119\"\nsite_name = \"news.example\"\nidle_timeout_secs = 30\n",
        )
        .unwrap();
        assert_eq!(cfg.site_name, "news.example");
        assert_eq!(cfg.idle_timeout_secs, 30);
    }
}
