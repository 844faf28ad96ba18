//! Typed requests and responses for the persistence contract.
//!
//! Requests validate themselves before any remote call is made; see
//! [`CreateEntryRequest::validate`] and [`UpdateEntryRequest::validate`].

use super::{DayLog, Entry, EntryType};
use crate::constants::{PRIORITY_MAX, PRIORITY_MIN, STATUS_MAX, STATUS_MIN};
use crate::errors::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

fn check_range(field: &str, value: u8, min: u8, max: u8) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ))
    }
}

/// Optional patches accept 0 as "clear the field".
pub(super) fn check_patch_range(field: &str, value: u8, min: u8, max: u8) -> Result<(), ValidationError> {
    if value == 0 {
        Ok(())
    } else {
        check_range(field, value, min, max)
    }
}

pub(super) fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "is required"));
    }
    Ok(())
}

/// Request to append a new entry to the day log for `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daylog::model::{CreateEntryRequest, EntryType};
///
/// let request = CreateEntryRequest {
///     date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
///     entry_type: EntryType::Activity,
///     title: "Shipped release 1.4".to_string(),
///     status: Some(8),
///     ..Default::default()
/// };
/// assert!(request.validate().is_ok());
///
/// let invalid = CreateEntryRequest { status: Some(11), ..request };
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Point in time of the entry; defaults to the creation instant
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CreateEntryRequest {
    /// Checks the request without touching any backend.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when:
    /// - the title is empty or whitespace
    /// - `status` is set outside 1-10
    /// - `priority` is set outside 1-5
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_title(&self.title)?;
        if let Some(status) = self.status {
            check_range("status", status, STATUS_MIN, STATUS_MAX)?;
        }
        if let Some(priority) = self.priority {
            check_range("priority", priority, PRIORITY_MIN, PRIORITY_MAX)?;
        }
        Ok(())
    }

    /// Builds the entry this request describes.
    pub fn into_entry(self, id: String, created_at: DateTime<Utc>) -> Entry {
        Entry {
            id,
            timestamp: self.timestamp.unwrap_or(created_at),
            entry_type: self.entry_type,
            title: self.title.trim().to_string(),
            description: self.description,
            tags: self.tags,
            status: self.status.unwrap_or(0),
            priority: self.priority.unwrap_or(0),
            duration: self.duration,
            location: self.location,
            metadata: self.metadata,
        }
    }
}

/// Patch for an existing entry.
///
/// The owning `date` is required: entries are only addressable through their
/// day log. Every other field is optional; `None` keeps the current value.
/// `Some(0)` for `status` or `priority` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, rename = "type")]
    pub entry_type: Option<EntryType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl UpdateEntryRequest {
    /// Starts an empty patch for entry `id` on `date`.
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            ..Default::default()
        }
    }

    /// Checks the patch without touching any backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::new("id", "is required"));
        }
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(status) = self.status {
            check_patch_range("status", status, STATUS_MIN, STATUS_MAX)?;
        }
        if let Some(priority) = self.priority {
            check_patch_range("priority", priority, PRIORITY_MIN, PRIORITY_MAX)?;
        }
        Ok(())
    }

    /// Applies the patch. Identity fields (`id`, `timestamp`) are preserved.
    pub fn apply(&self, entry: &mut Entry) {
        if let Some(entry_type) = self.entry_type {
            entry.entry_type = entry_type;
        }
        if let Some(title) = &self.title {
            entry.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(duration) = self.duration {
            entry.duration = Some(duration);
        }
        if let Some(location) = &self.location {
            entry.location = location.clone();
        }
        if let Some(metadata) = &self.metadata {
            entry.metadata = metadata.clone();
        }
    }
}

/// How a search treats its result limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Stop scanning as soon as `limit` matches are collected. Results under a
    /// limit are best-effort: the earliest matches in the window, not a ranked
    /// top-K, and `total_count` stops at the limit.
    #[default]
    FirstMatches,
    /// Scan the whole window, report the full match count, and keep the last
    /// `limit` matches in chronological order.
    MostRecent,
}

/// Filters for [`crate::storage::LogStorage::search_logs`].
///
/// Every filter is independent and optional; an empty request matches every
/// entry in the default window (the trailing three months).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    /// Matches entries carrying at least one of these tags
    pub tags: Vec<String>,
    pub status_min: Option<u8>,
    pub status_max: Option<u8>,
    /// Case-insensitive substring of title or description
    pub text: Option<String>,
    /// Maximum number of entries returned; 0 means unlimited
    pub limit: usize,
    /// Every pair must be present in the entry's metadata
    pub metadata: BTreeMap<String, String>,
    /// Attach the owning day logs of the matched entries
    pub include_days: bool,
    pub mode: SearchMode,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub entries: Vec<Entry>,
    /// Owning day logs, when requested; ascending, each at most once
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<DayLog>,
    pub total_count: usize,
    /// Echo of the originating request
    pub query: SearchRequest,
}

/// Span a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    Day,
    Week,
    Month,
    /// Explicit `start_date..=end_date` range
    Custom,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Day => "day",
            SummaryType::Week => "week",
            SummaryType::Month => "month",
            SummaryType::Custom => "custom",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(SummaryType::Day),
            "week" => Ok(SummaryType::Week),
            "month" => Ok(SummaryType::Month),
            "custom" => Ok(SummaryType::Custom),
            _ => Err(ValidationError::new(
                "type",
                format!("unknown summary type '{}', expected day, week, month or custom", s),
            )),
        }
    }
}

/// Request for [`crate::storage::LogStorage::generate_summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    /// Any date inside the day/week/month to summarize
    pub date: NaiveDate,
    /// Required for `custom`
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Required for `custom`
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Ask the configured insight provider for the text
    #[serde(default)]
    pub use_ai: bool,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl SummaryRequest {
    pub fn new(summary_type: SummaryType, date: NaiveDate) -> Self {
        Self {
            summary_type,
            date,
            start_date: None,
            end_date: None,
            use_ai: false,
            prompt: None,
        }
    }

    /// Checks that a custom range is complete and ordered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.summary_type != SummaryType::Custom {
            return Ok(());
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(ValidationError::new(
                "start_date",
                "start date cannot be after end date",
            )),
            (Some(_), Some(_)) => Ok(()),
            _ => Err(ValidationError::new(
                "start_date",
                "custom summaries require both start_date and end_date",
            )),
        }
    }
}

/// Counts reported alongside a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_entries: usize,
    pub total_days: usize,
    pub average_status: f64,
    pub entries_per_day: f64,
}

/// Generated summary text and the numbers behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    /// Human readable label of the covered span
    pub period: String,
    pub stats: SummaryStats,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}
