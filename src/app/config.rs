//! Application configuration loaded from `lpc.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "lpc.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub policies: PolicyConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where policy documents come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Policy file or directory. Embedded defaults are used when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Audit log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: false, log_path: default_audit_log_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("lpc-audit.jsonl")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.audit.enabled && self.audit.log_path.as_os_str().is_empty() {
            return Err(AppError::config_error("audit.log_path must be set when audit is enabled"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(AppError::config_error(format!(
                "logging.level '{}' must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `lpc.toml` in `cwd` is used
    /// when present, otherwise defaults apply. Relative paths inside the file
    /// resolve against the file's directory.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, AppError> {
        match Self::locate(explicit, cwd)? {
            Some(path) => Self::from_file(&path, cwd),
            None => Ok(Self::default()),
        }
    }

    /// Path of the configuration file to use, if any.
    pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>, AppError> {
        match explicit {
            Some(path) if !path.exists() => Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => Ok(Some(path.to_path_buf())),
            None => {
                let candidate = cwd.join(CONFIG_FILE);
                Ok(candidate.exists().then_some(candidate))
            }
        }
    }

    /// Read and validate one configuration file.
    pub fn from_file(path: &Path, cwd: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = parse_config_content(&content)?;
        let base = path.parent().unwrap_or(cwd);
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(policy_path) = &self.policies.path
            && policy_path.is_relative()
        {
            self.policies.path = Some(base.join(policy_path));
        }
        if self.audit.log_path.is_relative() {
            self.audit.log_path = base.join(&self.audit.log_path);
        }
    }
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
