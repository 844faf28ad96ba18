//! The persistence contract every day-log backend implements.
//!
//! [`LogStorage`] is what callers program against; [`crate::provider::RemoteLogStore`]
//! is the implementation shipped with the crate.

use crate::errors::AppResult;
use crate::model::{
    CreateEntryRequest, DayLog, Entry, LogStats, MonthLog, SearchRequest, SearchResponse,
    SummaryRequest, SummaryResponse, SummaryType, UpdateEntryRequest, WeekLog,
};
use chrono::NaiveDate;

/// Storage operations over day logs and their entries.
///
/// Every operation validates its input before touching the backend and
/// reports failures through [`crate::errors::AppError`]:
///
/// - `Validation` for rejected input
/// - `NotFound` for a missing day log (on delete) or entry (on get/update/delete)
/// - `Storage` for any backend failure, tagged with the failing operation
pub trait LogStorage {
    /// Returns the log for `date`, or an empty one when nothing was recorded.
    fn get_day(&self, date: NaiveDate) -> AppResult<DayLog>;

    /// Creates or replaces the full log for its date.
    fn save_day(&self, day: &DayLog) -> AppResult<()>;

    /// Removes the log for `date`.
    fn delete_day(&self, date: NaiveDate) -> AppResult<()>;

    /// Appends a new entry to the log for the request's date.
    fn create_entry(&self, request: CreateEntryRequest) -> AppResult<Entry>;

    /// Patches an existing entry and returns the updated value.
    fn update_entry(&self, request: UpdateEntryRequest) -> AppResult<Entry>;

    fn delete_entry(&self, id: &str, date: NaiveDate) -> AppResult<()>;

    fn get_entry(&self, id: &str, date: NaiveDate) -> AppResult<Entry>;

    /// Finds entries matching every filter of `request`.
    fn search_logs(&self, request: &SearchRequest) -> AppResult<SearchResponse>;

    /// Returns the non-empty logs in `start..=end`, ascending.
    fn get_date_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DayLog>>;

    /// Returns the Monday-to-Sunday week containing `date`.
    fn get_week(&self, date: NaiveDate) -> AppResult<WeekLog>;

    fn get_month(&self, year: i32, month: u32) -> AppResult<MonthLog>;

    fn generate_summary(&self, request: &SummaryRequest) -> AppResult<SummaryResponse>;

    /// Persists a generated summary. Only day summaries have a durable home.
    fn save_summary(
        &self,
        summary: &SummaryResponse,
        summary_type: SummaryType,
        date: NaiveDate,
    ) -> AppResult<()>;

    /// Returns the dates in `start..=end` that have a stored log.
    fn list_days(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>>;

    fn get_stats(&self, start: NaiveDate, end: NaiveDate) -> AppResult<LogStats>;

    /// Takes a backup of every stored log, when the backend supports it.
    fn backup(&self) -> AppResult<()>;

    /// Checks that the backend is reachable.
    fn health_check(&self) -> AppResult<()>;
}
