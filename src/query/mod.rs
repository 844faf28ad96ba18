//! Date-range scanning, predicate filtering and aggregation over day logs.
//!
//! These functions are backend independent: search takes a fetch closure that
//! loads one day, so the same engine runs over any [`crate::storage::LogStorage`]
//! implementation.

use crate::constants::DEFAULT_SEARCH_MONTHS;
use crate::errors::{AppResult, ValidationError};
use crate::model::{DayLog, Entry, LogStats, SearchMode, SearchRequest, SearchResponse};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, warn};

/// Resolves the inclusive search window, defaulting each side independently
/// to the trailing three months ending `today`.
pub fn search_window(request: &SearchRequest, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = request.date_end.unwrap_or(today);
    let start = request.date_start.unwrap_or_else(|| {
        today
            .checked_sub_months(Months::new(DEFAULT_SEARCH_MONTHS))
            .unwrap_or(NaiveDate::MIN)
    });
    (start, end)
}

/// Every calendar day in `start..=end`, ascending. Empty when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Applies the search predicates to one entry, short-circuiting on the first
/// that fails: type, status range, text, tags, metadata.
pub fn matches(entry: &Entry, request: &SearchRequest) -> bool {
    if let Some(entry_type) = request.entry_type {
        if entry.entry_type != entry_type {
            return false;
        }
    }

    if request.status_min.is_some_and(|min| entry.status < min) {
        return false;
    }
    if request.status_max.is_some_and(|max| entry.status > max) {
        return false;
    }

    if let Some(text) = request.text.as_deref().filter(|t| !t.is_empty()) {
        let needle = text.to_lowercase();
        if !entry.title.to_lowercase().contains(&needle)
            && !entry.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if !request.tags.is_empty() && !request.tags.iter().any(|t| entry.has_tag(t)) {
        return false;
    }

    request
        .metadata
        .iter()
        .all(|(key, value)| entry.metadata.get(key) == Some(value))
}

/// Runs a search over the days of the request window.
///
/// `fetch` loads one day. A day that fails to load counts as a day without
/// entries; the failure is logged and the scan continues.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use daylog::model::{DayLog, Entry, EntryType, SearchRequest};
/// use daylog::query::run_search;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let mut day = DayLog::new(date, Utc::now());
/// let mut entry = Entry::new("entry_1", Utc::now(), EntryType::Activity, "Deploy api");
/// entry.tags = vec!["deployment".to_string()];
/// day.add_entry(entry);
///
/// let request = SearchRequest {
///     date_start: Some(date),
///     date_end: Some(date),
///     tags: vec!["deployment".to_string()],
///     ..Default::default()
/// };
/// let response = run_search(&request, date, |_| Ok(day.clone()));
/// assert_eq!(response.total_count, 1);
/// ```
pub fn run_search<F>(request: &SearchRequest, today: NaiveDate, mut fetch: F) -> SearchResponse
where
    F: FnMut(NaiveDate) -> AppResult<DayLog>,
{
    let (start, end) = search_window(request, today);
    debug!("Searching {} to {} ({:?})", start, end, request.mode);

    let limit = request.limit;
    let mut matched: VecDeque<(NaiveDate, Entry)> = VecDeque::new();
    let mut total_count = 0usize;
    let mut owning_days: BTreeMap<NaiveDate, DayLog> = BTreeMap::new();

    'days: for date in days_in_range(start, end) {
        let day = match fetch(date) {
            Ok(day) => day,
            Err(e) => {
                warn!("Skipping {} during search: {}", date, e);
                continue;
            }
        };

        let mut day_matched = false;
        for entry in day.entries().iter().filter(|e| matches(e, request)) {
            matched.push_back((date, entry.clone()));
            total_count += 1;
            day_matched = true;

            if limit > 0 {
                match request.mode {
                    SearchMode::FirstMatches if matched.len() >= limit => {
                        if request.include_days {
                            owning_days.insert(date, day.clone());
                        }
                        break 'days;
                    }
                    SearchMode::MostRecent if matched.len() > limit => {
                        matched.pop_front();
                    }
                    _ => {}
                }
            }
        }

        if day_matched && request.include_days {
            owning_days.insert(date, day);
        }
    }

    let days = if request.include_days {
        let kept: BTreeSet<NaiveDate> = matched.iter().map(|(date, _)| *date).collect();
        owning_days
            .into_iter()
            .filter(|(date, _)| kept.contains(date))
            .map(|(_, day)| day)
            .collect()
    } else {
        Vec::new()
    };

    debug!("Search matched {} entries", total_count);
    SearchResponse {
        entries: matched.into_iter().map(|(_, entry)| entry).collect(),
        days,
        total_count,
        query: request.clone(),
    }
}

/// Monday-to-Sunday bounds of the week containing `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daylog::query::week_bounds;
///
/// let wednesday = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let (start, end) = week_bounds(wednesday).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 9, 29).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 10, 5).unwrap());
/// ```
///
/// # Errors
///
/// Returns a `ValidationError` on field `date` when the week runs past the
/// representable calendar.
pub fn week_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .and_then(|start| Some((start, start.checked_add_days(Days::new(6))?)))
        .ok_or_else(|| ValidationError::new("date", format!("week of {} is out of range", date)))
}

/// First and last day of `year`-`month`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::new("month", format!("invalid month {:04}-{:02}", year, month))
    })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| {
            ValidationError::new("month", format!("month {:04}-{:02} is out of range", year, month))
        })?;
    Ok((first, last))
}

/// Aggregates the given days.
///
/// The average status is the mean of each day's own average over the days
/// that have one, not a weighted mean over entries.
pub fn compute_stats(start: NaiveDate, end: NaiveDate, days: &[DayLog]) -> LogStats {
    let total_entries: usize = days.iter().map(DayLog::total_entries).sum();
    let total_days = days.iter().filter(|d| d.total_entries() > 0).count();

    let averages: Vec<f64> = days
        .iter()
        .map(DayLog::status_average)
        .filter(|avg| *avg > 0.0)
        .collect();
    let average_status = if averages.is_empty() {
        0.0
    } else {
        averages.iter().sum::<f64>() / averages.len() as f64
    };

    let entries_per_day = if total_days > 0 {
        total_entries as f64 / total_days as f64
    } else {
        0.0
    };

    LogStats {
        start,
        end,
        total_entries,
        total_days,
        average_status,
        entries_per_day,
    }
}
