//! Configuration management for daylog.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It describes where day logs live (repository,
//! branch and base path), how to authenticate, and the read-only feature flags that
//! outer layers consult.
//!
//! # Environment Variables
//!
//! - `DAILYLOG_REPO`: Repository in `owner/repo` form (required)
//! - `DAILYLOG_TOKEN`: Access token; `GITHUB_TOKEN` is used when unset
//! - `DAILYLOG_PATH`: Base path inside the repository (defaults to `daily-logs`)
//! - `DAILYLOG_BRANCH`: Branch to read and write (defaults to the repository default)
//! - `DAILYLOG_API_URL`: REST API root (defaults to `https://api.github.com`)
//! - `DAILYLOG_BACKUP_ENABLED`, `DAILYLOG_BACKUP_FREQUENCY`: backup flags
//! - `DAILYLOG_BACKUP_DIR`: Local directory for backup archives (shell-expanded)
//! - `DAILYLOG_AI_ENABLED`: Allow summaries to use the insight provider
//! - `DAILYLOG_WRITE_ATTEMPTS`: Attempts per versioned write (defaults to 3)
//! - `DAILYLOG_TIMEOUT_SECS`: HTTP request timeout (defaults to 30)

use crate::constants::{
    BACKUP_FREQUENCIES, DEFAULT_API_URL, DEFAULT_BACKUP_FREQUENCY, DEFAULT_BASE_PATH,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WRITE_ATTEMPTS, ENV_VAR_AI_ENABLED, ENV_VAR_API_URL,
    ENV_VAR_BACKUP_DIR, ENV_VAR_BACKUP_ENABLED, ENV_VAR_BACKUP_FREQUENCY, ENV_VAR_BRANCH,
    ENV_VAR_GITHUB_TOKEN, ENV_VAR_PATH, ENV_VAR_REPO, ENV_VAR_TIMEOUT_SECS, ENV_VAR_TOKEN,
    ENV_VAR_WRITE_ATTEMPTS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::remote::github::parse_repository;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for daylog.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daylog::Config;
///
/// let config = Config {
///     repository: "octo/journal".to_string(),
///     token: "ghp_example".to_string(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_path, "daily-logs");
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use daylog::Config;
/// use std::env;
///
/// env::set_var("DAILYLOG_REPO", "octo/journal");
/// env::set_var("DAILYLOG_TOKEN", "ghp_example");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.repository, "octo/journal");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Repository holding the logs, `owner/repo`.
    pub repository: String,

    /// Access token sent with every request. Never printed.
    pub token: String,

    /// Directory inside the repository that holds the `YYYY/MM/YYYY-MM-DD.json` tree.
    pub base_path: String,

    /// Branch to target; the repository default branch when `None`.
    pub branch: Option<String>,

    /// REST API root.
    pub api_url: String,

    /// Read-only flag for schedulers.
    pub backup_enabled: bool,

    /// Read-only flag for schedulers, `daily` or `weekly`.
    pub backup_frequency: String,

    /// Where `backup()` writes archives. Backups are skipped when unset.
    pub backup_dir: Option<PathBuf>,

    /// Allow summaries to be written by the insight provider.
    pub ai_enabled: bool,

    /// Attempts per versioned write before a conflict is reported.
    pub write_attempts: u32,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repository", &self.repository)
            .field("token", &REDACTED_PLACEHOLDER)
            .field("base_path", &self.base_path)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .field("backup_enabled", &self.backup_enabled)
            .field("backup_frequency", &self.backup_frequency)
            .field("backup_dir", &self.backup_dir)
            .field("ai_enabled", &self.ai_enabled)
            .field("write_attempts", &self.write_attempts)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: String::new(),
            token: String::new(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            branch: None,
            api_url: DEFAULT_API_URL.to_string(),
            backup_enabled: false,
            backup_frequency: DEFAULT_BACKUP_FREQUENCY.to_string(),
            backup_dir: None,
            ai_enabled: false,
            write_attempts: DEFAULT_WRITE_ATTEMPTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Reads a variable, treating empty values as unset.
fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(name: &str) -> AppResult<Option<bool>> {
    env_string(name)
        .map(|raw| match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!(
                "{} must be a boolean, got '{}'",
                name, raw
            ))),
        })
        .transpose()
}

fn env_number<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    env_string(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                AppError::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))
            })
        })
        .transpose()
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The backup directory is expanded with `shellexpand`, so `~` and
    /// environment references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - a boolean or numeric variable cannot be parsed
    /// - the backup directory path expansion fails
    /// - the resulting configuration fails [`Config::validate`]
    pub fn load() -> AppResult<Self> {
        let defaults = Config::default();

        let token = env_string(ENV_VAR_TOKEN)
            .or_else(|| env_string(ENV_VAR_GITHUB_TOKEN))
            .unwrap_or_default();

        let backup_dir = match env_string(ENV_VAR_BACKUP_DIR) {
            Some(raw) => {
                let expanded = shellexpand::full(&raw)
                    .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
                Some(PathBuf::from(expanded.into_owned()))
            }
            None => None,
        };

        let config = Config {
            repository: env_string(ENV_VAR_REPO).unwrap_or_default(),
            token,
            base_path: env_string(ENV_VAR_PATH).unwrap_or(defaults.base_path),
            branch: env_string(ENV_VAR_BRANCH),
            api_url: env_string(ENV_VAR_API_URL).unwrap_or(defaults.api_url),
            backup_enabled: env_bool(ENV_VAR_BACKUP_ENABLED)?.unwrap_or(defaults.backup_enabled),
            backup_frequency: env_string(ENV_VAR_BACKUP_FREQUENCY)
                .map(|f| f.to_lowercase())
                .unwrap_or(defaults.backup_frequency),
            backup_dir,
            ai_enabled: env_bool(ENV_VAR_AI_ENABLED)?.unwrap_or(defaults.ai_enabled),
            write_attempts: env_number(ENV_VAR_WRITE_ATTEMPTS)?.unwrap_or(defaults.write_attempts),
            timeout_secs: env_number(ENV_VAR_TIMEOUT_SECS)?.unwrap_or(defaults.timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when:
    /// - the repository is not `owner/repo`
    /// - the token is empty
    /// - the base path is empty, starts or ends with `/`, or contains `..`
    /// - the backup frequency is not `daily` or `weekly`
    /// - the backup directory is relative
    /// - `write_attempts` or `timeout_secs` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use daylog::Config;
    ///
    /// let config = Config {
    ///     repository: "not-a-repo".to_string(),
    ///     token: "ghp_example".to_string(),
    ///     ..Default::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        parse_repository(&self.repository)?;

        if self.token.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Access token is empty; set {} or {}",
                ENV_VAR_TOKEN, ENV_VAR_GITHUB_TOKEN
            )));
        }

        if self.base_path.is_empty()
            || self.base_path.starts_with('/')
            || self.base_path.ends_with('/')
            || self.base_path.split('/').any(|part| part == "..")
        {
            return Err(AppError::Config(format!(
                "Base path must be a relative path without leading or trailing '/' or '..', got '{}'",
                self.base_path
            )));
        }

        if !BACKUP_FREQUENCIES.contains(&self.backup_frequency.as_str()) {
            return Err(AppError::Config(format!(
                "Backup frequency must be one of {}, got '{}'",
                BACKUP_FREQUENCIES.join(", "),
                self.backup_frequency
            )));
        }

        if let Some(dir) = &self.backup_dir {
            if !dir.is_absolute() {
                return Err(AppError::Config(
                    "Backup directory must be an absolute path".to_string(),
                ));
            }
        }

        if self.write_attempts == 0 {
            return Err(AppError::Config(
                "Write attempts must be at least 1".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "Timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    /// The HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
