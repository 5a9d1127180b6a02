//! Top-level awaitguard configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ConfigureAwaitSetting, PolicyConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`AWAITGUARD_*`)
/// 3. Project config (`awaitguard.toml` in project root)
/// 4. User config (`~/.awaitguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AwaitGuardConfig {
    pub policy: PolicyConfig,
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub configure_await: Option<String>,
    pub policy_cache_capacity: Option<u64>,
    pub parallel: Option<bool>,
}

impl AwaitGuardConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            root = %root.display(),
            configure_await = ?config.policy.configure_await,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AwaitGuardConfig) -> Result<(), ConfigError> {
        if let Some(ref value) = config.policy.configure_await {
            if ConfigureAwaitSetting::parse(value).is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "policy.configure_await".to_string(),
                    message: format!(
                        "must be \"{}\" or \"{}\", got \"{}\"",
                        ConfigureAwaitSetting::Decline.name(),
                        ConfigureAwaitSetting::Capture.name(),
                        value
                    ),
                });
            }
        }
        if let Some(capacity) = config.analysis.policy_cache_capacity {
            if capacity == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.policy_cache_capacity".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.awaitguard/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut AwaitGuardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: AwaitGuardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut AwaitGuardConfig, other: &AwaitGuardConfig) {
        if other.policy.configure_await.is_some() {
            base.policy.configure_await = other.policy.configure_await.clone();
        }
        if other.analysis.policy_cache_capacity.is_some() {
            base.analysis.policy_cache_capacity = other.analysis.policy_cache_capacity;
        }
        if other.analysis.parallel.is_some() {
            base.analysis.parallel = other.analysis.parallel;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `AWAITGUARD_POLICY_CONFIGURE_AWAIT`, `AWAITGUARD_ANALYSIS_PARALLEL`, etc.
    fn apply_env_overrides(config: &mut AwaitGuardConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("AWAITGUARD_POLICY_CONFIGURE_AWAIT") {
            config.policy.configure_await = Some(val);
        }
        if let Ok(val) = std::env::var("AWAITGUARD_ANALYSIS_POLICY_CACHE_CAPACITY") {
            let v = val.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: "analysis.policy_cache_capacity".to_string(),
                message: format!("\"{val}\": {e}"),
            })?;
            config.analysis.policy_cache_capacity = Some(v);
        }
        if let Ok(val) = std::env::var("AWAITGUARD_ANALYSIS_PARALLEL") {
            let v = val.trim().parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                field: "analysis.parallel".to_string(),
                message: format!("\"{val}\": {e}"),
            })?;
            config.analysis.parallel = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut AwaitGuardConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.configure_await {
            config.policy.configure_await = Some(v.clone());
        }
        if let Some(v) = cli.policy_cache_capacity {
            config.analysis.policy_cache_capacity = Some(v);
        }
        if let Some(v) = cli.parallel {
            config.analysis.parallel = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
