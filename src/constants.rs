//! Constants used throughout the crate.
//!
//! This module contains the constants used by daylog, organized into logical
//! groups. Keeping them in one place makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the crate, used in user agents and archive names.
pub const APP_NAME: &str = "daylog";

// Configuration Keys & Environment Variables
/// Environment variable holding the `owner/repo` repository identifier.
pub const ENV_VAR_REPO: &str = "DAILYLOG_REPO";
/// Environment variable holding the access token.
pub const ENV_VAR_TOKEN: &str = "DAILYLOG_TOKEN";
/// Fallback environment variable for the access token.
pub const ENV_VAR_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable for the base path inside the repository.
pub const ENV_VAR_PATH: &str = "DAILYLOG_PATH";
/// Environment variable for the branch to read from and commit to.
pub const ENV_VAR_BRANCH: &str = "DAILYLOG_BRANCH";
/// Environment variable overriding the REST API root.
pub const ENV_VAR_API_URL: &str = "DAILYLOG_API_URL";
/// Environment variable toggling local backups.
pub const ENV_VAR_BACKUP_ENABLED: &str = "DAILYLOG_BACKUP_ENABLED";
/// Environment variable for the backup cadence.
pub const ENV_VAR_BACKUP_FREQUENCY: &str = "DAILYLOG_BACKUP_FREQUENCY";
/// Environment variable for the local backup directory.
pub const ENV_VAR_BACKUP_DIR: &str = "DAILYLOG_BACKUP_DIR";
/// Environment variable toggling the insight provider for summaries.
pub const ENV_VAR_AI_ENABLED: &str = "DAILYLOG_AI_ENABLED";
/// Environment variable for the optimistic write attempt budget.
pub const ENV_VAR_WRITE_ATTEMPTS: &str = "DAILYLOG_WRITE_ATTEMPTS";
/// Environment variable for the HTTP request timeout in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "DAILYLOG_TIMEOUT_SECS";

// Defaults
/// Default base path for day-log objects.
pub const DEFAULT_BASE_PATH: &str = "daily-logs";
/// Default REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default backup cadence.
pub const DEFAULT_BACKUP_FREQUENCY: &str = "daily";
/// Accepted backup cadences.
pub const BACKUP_FREQUENCIES: &[&str] = &["daily", "weekly"];
/// Default number of attempts for a versioned write, including the first.
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 3;
/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Format for month labels (YYYY-MM).
pub const MONTH_FORMAT: &str = "%Y-%m";
/// File extension for day-log objects.
pub const DAY_FILE_EXTENSION: &str = ".json";
/// Months searched back from today when a search has no start date.
pub const DEFAULT_SEARCH_MONTHS: u32 = 3;
/// Prefix of generated entry identifiers.
pub const ENTRY_ID_PREFIX: &str = "entry_";

// Validation
/// Lowest valid status rating.
pub const STATUS_MIN: u8 = 1;
/// Highest valid status rating.
pub const STATUS_MAX: u8 = 10;
/// Lowest valid priority.
pub const PRIORITY_MIN: u8 = 1;
/// Highest valid priority.
pub const PRIORITY_MAX: u8 = 5;

// Logging Configuration
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
