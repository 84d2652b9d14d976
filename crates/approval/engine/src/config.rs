//! Configuration for the approval engine

use crate::instantiation::DEFAULT_APPROVER_ROLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `APPROVAL_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "APPROVAL";

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed templates loaded at startup
    #[serde(default)]
    pub seeds: SeedConfig,

    /// Instantiation behaviour
    #[serde(default)]
    pub instantiation: InstantiationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from defaults, an optional file, then environment
    ///
    /// The file format is picked from its extension (TOML, YAML or JSON).
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&EngineConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("seeds.files")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

/// Seed template sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Load the built-in templates
    #[serde(default = "default_true")]
    pub builtin: bool,

    /// Extra template files (YAML or JSON list of templates)
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            files: Vec::new(),
        }
    }
}

/// Instantiation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantiationConfig {
    /// Role given to steps that name none
    #[serde(default = "default_approver_role")]
    pub default_approver_role: String,
}

impl Default for InstantiationConfig {
    fn default() -> Self {
        Self {
            default_approver_role: default_approver_role(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_approver_role() -> String {
    DEFAULT_APPROVER_ROLE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
