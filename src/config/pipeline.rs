//! Acquisition configuration, loadable from JSON, YAML or TOML files.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration for a multi-source acquisition run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcquireConfig {
    /// Sources to resolve, in order
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Emit skip/selection decisions as debug events
    #[serde(default)]
    pub verbose: bool,
    /// Error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
    /// Strategy subset and order, e.g. ["zip", "tar", "plaintext"]
    #[serde(default)]
    pub strategies: Option<Vec<String>>,
    /// Remote fetch settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Configuration for a single source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Path or URL
    pub source: String,
    /// Regular expression matched against base file names
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Settings for fetching remote sources. Missing fields keep their
/// default values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Overall request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Honor proxy environment variables
    pub proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            user_agent: Some(concat!("sourcewalk/", env!("CARGO_PKG_VERSION")).to_string()),
            proxy: true,
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config extension '{0}'. Enable the corresponding feature.")]
    UnsupportedExtension(String),

    #[error("failed to parse config: {0}")]
    Parse(Box<dyn std::error::Error + Send + Sync>),
}

impl AcquireConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source configuration.
    pub fn add_source(mut self, source: SourceConfig) -> Self {
        self.sources.push(source);
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    /// Set the strategy order.
    pub fn with_strategies(mut self, order: Vec<String>) -> Self {
        self.strategies = Some(order);
        self
    }

    /// Load a configuration file, picking the parser by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().into_owned(),
            source: e,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::from_str_with_extension(&text, &ext)
    }

    /// Parse configuration text in the format named by `ext`.
    pub fn from_str_with_extension(text: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            #[cfg(feature = "json")]
            "json" => serde_json::from_str(text).map_err(|e| ConfigError::Parse(Box::new(e))),

            #[cfg(feature = "yaml")]
            "yaml" | "yml" => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(Box::new(e)))
            }

            #[cfg(feature = "toml")]
            "toml" => toml::from_str(text).map_err(|e| ConfigError::Parse(Box::new(e))),

            other => {
                let _ = text;
                Err(ConfigError::UnsupportedExtension(other.to_string()))
            }
        }
    }
}

impl SourceConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}
