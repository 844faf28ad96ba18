//! Entity model for day logs and their entries.
//!
//! A [`DayLog`] is the durable unit of storage: one record per calendar date,
//! holding an ordered list of [`Entry`] values. Its `total_entries` and
//! `status_average` fields are derived and only ever written by the
//! mutators on `DayLog` itself, so they can never drift from `entries`.
//!
//! [`WeekLog`] and [`MonthLog`] are views assembled on demand from the day
//! logs in their span; they are never persisted.

pub mod requests;


pub use requests::{
    CreateEntryRequest, SearchMode, SearchRequest, SearchResponse, SummaryRequest,
    SummaryResponse, SummaryStats, SummaryType, UpdateEntryRequest,
};

use crate::constants::{
    DATE_FORMAT_ISO, DAY_FILE_EXTENSION, ENTRY_ID_PREFIX, PRIORITY_MAX, PRIORITY_MIN, STATUS_MAX,
    STATUS_MIN,
};
use crate::errors::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Kind of a logged item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Activity,
    Status,
    Note,
    Summary,
}

impl EntryType {
    /// Every entry type, in declaration order.
    pub const ALL: [EntryType; 4] = [
        EntryType::Activity,
        EntryType::Status,
        EntryType::Note,
        EntryType::Summary,
    ];

    /// Returns the wire representation of the type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Activity => "activity",
            EntryType::Status => "status",
            EntryType::Note => "note",
            EntryType::Summary => "summary",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ValidationError;

    /// Parses a type tag, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use daylog::model::EntryType;
    ///
    /// assert_eq!("Activity".parse::<EntryType>().unwrap(), EntryType::Activity);
    /// assert!("mood".parse::<EntryType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::new(
                    "type",
                    format!(
                        "unknown entry type '{}', expected one of activity, status, note, summary",
                        s
                    ),
                )
            })
    }
}

/// A single logged item, owned by exactly one [`DayLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque identifier, generated at creation
    pub id: String,
    /// When the item happened
    pub timestamp: DateTime<Utc>,
    /// Type tag
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Short title, never empty
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unordered tags; duplicates carry no meaning
    #[serde(default)]
    pub tags: Vec<String>,
    /// Rating 1-10, 0 when unset
    #[serde(default)]
    pub status: u8,
    /// Priority 1-5, 0 when unset
    #[serde(default)]
    pub priority: u8,
    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an entry with the given identity and title and every optional
    /// field left empty.
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        entry_type: EntryType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            entry_type,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            status: 0,
            priority: 0,
            duration: None,
            location: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Returns true if the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Checks the title and the status/priority ranges. A value of 0 means
    /// unset and is accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        requests::check_title(&self.title)?;
        requests::check_patch_range("status", self.status, STATUS_MIN, STATUS_MAX)?;
        requests::check_patch_range("priority", self.priority, PRIORITY_MIN, PRIORITY_MAX)?;
        Ok(())
    }
}

static LAST_ENTRY_NANOS: AtomicI64 = AtomicI64::new(0);

/// Generates an entry identifier from a high-resolution timestamp.
///
/// Identifiers have the form `entry_<unix-nanos>`. Within one process they are
/// strictly increasing, so two entries created in the same nanosecond still get
/// distinct identifiers.
pub fn generate_entry_id(now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_nanos_opt().unwrap_or(i64::MAX - 1);
    let mut last = LAST_ENTRY_NANOS.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last + 1);
        match LAST_ENTRY_NANOS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return format!("{}{}", ENTRY_ID_PREFIX, next),
            Err(actual) => last = actual,
        }
    }
}

/// All entries recorded for one calendar date.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use daylog::model::{DayLog, Entry, EntryType};
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let mut day = DayLog::new(date, Utc::now());
///
/// let mut entry = Entry::new("entry_1", Utc::now(), EntryType::Activity, "Deploy");
/// entry.status = 8;
/// day.add_entry(entry);
///
/// let mut entry = Entry::new("entry_2", Utc::now(), EntryType::Status, "Retro");
/// entry.status = 4;
/// day.add_entry(entry);
///
/// assert_eq!(day.total_entries(), 2);
/// assert_eq!(day.status_average(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    /// Calendar date this log is keyed by
    pub date: NaiveDate,
    #[serde(default)]
    entries: Vec<Entry>,
    /// Free-text summary, written only by an explicit summary save
    #[serde(default)]
    pub day_summary: String,
    #[serde(default)]
    status_average: f64,
    #[serde(default)]
    total_entries: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DayLog {
    /// Creates an empty day log.
    pub fn new(date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            date,
            entries: Vec::new(),
            day_summary: String::new(),
            status_average: 0.0,
            total_entries: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consumes the log, returning its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Number of entries; always equal to `entries().len()`.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Mean status over entries with a status set, or 0 when none have one.
    pub fn status_average(&self) -> f64 {
        self.status_average
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validates every entry, stopping at the first invalid one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.entries.iter().try_for_each(Entry::validate)
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.touch();
    }

    /// Replaces the entry with identifier `id` in place.
    ///
    /// Returns false, leaving the log untouched, when no entry has that id.
    pub fn update_entry(&mut self, id: &str, updated: Entry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(slot) => {
                *slot = updated;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Removes the entry with identifier `id`.
    ///
    /// Returns `None`, leaving the log untouched, when no entry has that id.
    pub fn remove_entry(&mut self, id: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns all entries of the given type.
    pub fn entries_by_type(&self, entry_type: EntryType) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .collect()
    }

    /// Returns all entries carrying the given tag.
    pub fn entries_by_tag(&self, tag: &str) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.has_tag(tag)).collect()
    }

    /// Recomputes `total_entries` and `status_average` from `entries`.
    ///
    /// Used after decoding a stored record, whose derived fields may have been
    /// edited by hand. Does not change `updated_at`.
    pub fn refresh_derived(&mut self) {
        self.total_entries = self.entries.len();

        let (sum, count) = self
            .entries
            .iter()
            .filter(|e| e.status > 0)
            .fold((0u32, 0u32), |(sum, count), e| (sum + u32::from(e.status), count + 1));

        self.status_average = if count > 0 {
            f64::from(sum) / f64::from(count)
        } else {
            0.0
        };
    }

    fn touch(&mut self) {
        self.refresh_derived();
        self.updated_at = Utc::now();
    }

    /// The date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT_ISO).to_string()
    }

    /// The file name this log is stored under, `YYYY-MM-DD.json`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.date_string(), DAY_FILE_EXTENSION)
    }

    /// Serializes the log as pretty-printed JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Decodes a log from JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// The day logs of one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLog {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Days with at least one entry, ascending
    pub days: Vec<DayLog>,
    pub total_entries: usize,
    pub generated_at: DateTime<Utc>,
}

impl WeekLog {
    pub fn from_days(week_start: NaiveDate, week_end: NaiveDate, days: Vec<DayLog>) -> Self {
        let total_entries = days.iter().map(DayLog::total_entries).sum();
        Self {
            week_start,
            week_end,
            days,
            total_entries,
            generated_at: Utc::now(),
        }
    }
}

/// The day logs of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthLog {
    /// Month label, `YYYY-MM`
    pub month: String,
    pub year: i32,
    /// Days with at least one entry, ascending
    pub days: Vec<DayLog>,
    pub total_entries: usize,
    pub generated_at: DateTime<Utc>,
}

impl MonthLog {
    pub fn from_days(year: i32, month: u32, days: Vec<DayLog>) -> Self {
        let total_entries = days.iter().map(DayLog::total_entries).sum();
        Self {
            month: format!("{:04}-{:02}", year, month),
            year,
            days,
            total_entries,
            generated_at: Utc::now(),
        }
    }
}

/// Aggregate statistics over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStats {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sum of per-day entry counts
    pub total_entries: usize,
    /// Days with at least one entry
    pub total_days: usize,
    /// Mean of the per-day status averages over days that have one
    pub average_status: f64,
    /// `total_entries / total_days`, 0 when there are no days
    pub entries_per_day: f64,
}
