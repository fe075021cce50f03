//! Server configuration
//!
//! Loaded from an optional TOML file, then overridden by command line flags.
//! Every field has a default, so a partial file is fine.

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use showcase_core::{Latency, ShowcaseConfig};
use std::path::Path;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default route prefix
pub const DEFAULT_PREFIX: &str = "/api/java25";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    /// Prefix for every route
    pub prefix: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Demo component settings
    pub showcase: ShowcaseConfig,
}

impl ServerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// - `ServerError::Config` if the text is not valid configuration
    pub fn from_toml(text: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - `ServerError::Io` if the file cannot be read
    /// - `ServerError::Config` if its contents are invalid
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    ///
    /// # Errors
    /// - Same as `load`
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ServerError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// With route prefix
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// With demo component settings
    #[inline]
    #[must_use]
    pub fn with_showcase(mut self, showcase: ShowcaseConfig) -> Self {
        self.showcase = showcase;
        self
    }

    /// Disable every simulated delay
    #[inline]
    #[must_use]
    pub fn with_fast_latency(mut self) -> Self {
        self.showcase.latency = Latency::zero();
        self
    }

    /// With fan-out deadline
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.showcase.deadline_ms = timeout_ms;
        self
    }

    /// Prefix with a single leading slash and no trailing slash
    ///
    /// Empty when routes are served from the root.
    #[must_use]
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            log_format: LogFormat::default(),
            showcase: ShowcaseConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ServerConfig::new();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.prefix, "/api/java25");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.showcase.deadline_ms, 5_000);
    }

    #[test]
    fn partial_toml() {
        let config = ServerConfig::from_toml(
            r#"
            prefix = "/demo"
            log_format = "json"

            [showcase]
            deadline_ms = 2000

            [showcase.latency]
            cache_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.prefix, "/demo");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.showcase.deadline_ms, 2000);
        assert_eq!(config.showcase.latency.cache_ms, 10);
        assert_eq!(config.showcase.latency.api_ms, 300);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml("bind = 8080").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind = \"127.0.0.1:9090\"").unwrap();

        let config = ServerConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.bind, "127.0.0.1:9090");
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(ServerConfig::load_or_default(None).unwrap(), ServerConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::load(Path::new("/nonexistent/showcase.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }

    #[test]
    fn builders_override() {
        let config = ServerConfig::new()
            .with_bind("127.0.0.1:0")
            .with_prefix("api/")
            .with_fast_latency()
            .with_timeout_ms(50);

        assert_eq!(config.bind, "127.0.0.1:0");
        assert_eq!(config.normalized_prefix(), "/api");
        assert_eq!(config.showcase.latency, Latency::zero());
        assert_eq!(config.showcase.deadline_ms, 50);
    }

    #[test]
    fn root_prefix_normalizes_to_empty() {
        assert_eq!(ServerConfig::new().with_prefix("/").normalized_prefix(), "");
        assert_eq!(ServerConfig::new().with_prefix("").normalized_prefix(), "");
    }
}
