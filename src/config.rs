//! Configuration management for kcov-runner.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
}

impl RunnerConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let user_config = directories::ProjectDirs::from("com", "kcov-runner", "kcov-runner")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        Self::load_from(project_root, user_config.as_deref())
    }

    fn load_from(
        project_root: Option<&Path>,
        user_config: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.kcov-runner.toml in project root)
        if let Some(root) = project_root {
            let project_config = root.join(".kcov-runner.toml");
            if project_config.exists() {
                tracing::debug!("Using project config {}", project_config.display());
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/kcov-runner/config.toml)
        if let Some(user_config) = user_config {
            if user_config.exists() {
                tracing::debug!("Using user config {}", user_config.display());
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (KCOV_RUNNER__*)
        builder = builder.add_source(
            Environment::with_prefix("KCOV_RUNNER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Names or paths of the external programs that get invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_cargo")]
    pub cargo: String,
    #[serde(default = "default_rustc")]
    pub rustc: String,
    #[serde(default = "default_kcov")]
    pub kcov: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cargo: default_cargo(),
            rustc: default_rustc(),
            kcov: default_kcov(),
        }
    }
}

fn default_cargo() -> String {
    "cargo".to_string()
}

fn default_rustc() -> String {
    "rustc".to_string()
}

fn default_kcov() -> String {
    "kcov".to_string()
}

/// Coverage collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Value written to RUSTFLAGS for the test build
    #[serde(default = "default_rustflags")]
    pub rustflags: String,
    /// Source path pattern kcov should ignore
    #[serde(default = "default_exclude_pattern")]
    pub exclude_pattern: String,
    /// Directory under the target directory receiving kcov output
    #[serde(default = "default_output_subdir")]
    pub output_subdir: String,
    /// Attempt every test binary even after one fails
    #[serde(default)]
    pub keep_going: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            rustflags: default_rustflags(),
            exclude_pattern: default_exclude_pattern(),
            output_subdir: default_output_subdir(),
            keep_going: false,
        }
    }
}

fn default_rustflags() -> String {
    "-C link-dead-code".to_string()
}

fn default_exclude_pattern() -> String {
    "/.cargo".to_string()
}

fn default_output_subdir() -> String {
    "cov".to_string()
}
