//! Configuration for Elle API

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "elle.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port (overridden by `PORT`)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding public files; its `src/` subdirectory is served under `/src`
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Descriptor read at startup
    #[serde(default = "default_descriptor_path")]
    pub descriptor_path: PathBuf,

    /// Origin used when the UI invokes an endpoint. Derived from the `Host` header when unset.
    #[serde(default)]
    pub public_url: Option<String>,

    /// Catalog UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Load the descriptor over HTTP on each page load instead of from disk
    #[serde(default)]
    pub descriptor_url: Option<String>,

    /// Milliseconds before a toast dismisses itself
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,

    /// Number of steps in the counter animation
    #[serde(default = "default_counter_steps")]
    pub counter_steps: u32,

    /// Milliseconds between counter animation steps
    #[serde(default = "default_counter_interval_ms")]
    pub counter_interval_ms: u64,

    /// Timeout for try-it requests. None waits forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            descriptor_path: default_descriptor_path(),
            public_url: None,
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            descriptor_url: None,
            toast_ttl_ms: default_toast_ttl_ms(),
            counter_steps: default_counter_steps(),
            counter_interval_ms: default_counter_interval_ms(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from an explicit file, or `elle.toml` in the working directory, or defaults.
    /// `PORT` from the environment is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_file(local)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Could not read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply the value of the `PORT` variable, if any
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) {
            self.port = raw
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT value: {raw}")))?;
        }
        Ok(())
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory served under `/src`
    pub fn static_src_dir(&self) -> PathBuf {
        self.public_dir.join("src")
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.ui.toast_ttl_ms)
    }

    pub fn counter_interval(&self) -> Duration {
        Duration::from_millis(self.ui.counter_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.ui.request_timeout_secs.map(Duration::from_secs)
    }
}

// Default value functions

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_descriptor_path() -> PathBuf {
    PathBuf::from("public/src/settings.json")
}

fn default_toast_ttl_ms() -> u64 {
    3000
}

fn default_counter_steps() -> u32 {
    50
}

fn default_counter_interval_ms() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
        assert_eq!(config.static_src_dir(), PathBuf::from("public/src"));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            port = 8080
            public_url = "http://docs.local"

            [ui]
            toast_ttl_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.public_url.as_deref(), Some("http://docs.local"));
        assert_eq!(config.toast_ttl(), Duration::from_millis(1500));
        assert_eq!(config.ui.counter_steps, 50);
        assert_eq!(config.descriptor_path, PathBuf::from("public/src/settings.json"));
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port_override(Some("5050")).unwrap();
        assert_eq!(config.port, 5050);

        config.apply_port_override(None).unwrap();
        assert_eq!(config.port, 5050);

        config.apply_port_override(Some("  ")).unwrap();
        assert_eq!(config.port, 5050);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = Config::default();
        let err = config.apply_port_override(Some("not-a-port")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("elle.toml");
        std::fs::write(&path, "host = \"127.0.0.1\"\nport = 9000\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
