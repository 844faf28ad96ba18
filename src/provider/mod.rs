//! [`LogStorage`] over a remote [`ObjectStore`].
//!
//! Each date maps to one object at `{base_path}/{YYYY}/{MM}/{YYYY-MM-DD}.json`,
//! so a sorted key listing is also a chronological one.
//!
//! Every mutation is a read-modify-write guarded by the object's version
//! token. When the store reports that the object changed between the read and
//! the write, the day is read again and the same mutation is re-applied, up to
//! `Config::write_attempts` times in total.

use crate::backup::create_backup;
use crate::config::Config;
use crate::constants::{APP_NAME, DATE_FORMAT_ISO};
use crate::errors::{AppResult, BackendError, NotFoundError, Operation, StorageError};
use crate::model::{
    generate_entry_id, CreateEntryRequest, DayLog, Entry, LogStats, MonthLog, SearchRequest,
    SearchResponse, SummaryRequest, SummaryResponse, SummaryStats, SummaryType, UpdateEntryRequest,
    WeekLog,
};
use crate::query::{compute_stats, days_in_range, month_bounds, run_search, week_bounds};
use crate::remote::{GitHubStore, ObjectStore};
use crate::storage::LogStorage;
use crate::summary::{day_stats, period_label, template_text, InsightProvider, TemplateInsights};
use chrono::{Datelike, Local, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Supplies the current local date.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

const GENERATOR_TEMPLATE: &str = "template";
const GENERATOR_INSIGHTS: &str = "insights";

/// Day-log storage backed by an object store.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daylog::model::CreateEntryRequest;
/// use daylog::remote::MemoryStore;
/// use daylog::{Config, LogStorage, RemoteLogStore};
///
/// let logs = RemoteLogStore::new(MemoryStore::new(), Config::default());
/// let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
///
/// let entry = logs.create_entry(CreateEntryRequest {
///     date,
///     title: "Deployed the api".to_string(),
///     status: Some(8),
///     ..Default::default()
/// })?;
///
/// let day = logs.get_day(date)?;
/// assert_eq!(day.total_entries(), 1);
/// assert_eq!(day.entries()[0].id, entry.id);
/// # Ok::<(), daylog::AppError>(())
/// ```
pub struct RemoteLogStore<S: ObjectStore> {
    store: S,
    config: Config,
    insights: Box<dyn InsightProvider>,
    today: Clock,
}

impl<S: ObjectStore> fmt::Debug for RemoteLogStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteLogStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RemoteLogStore<GitHubStore> {
    /// Builds a store for the GitHub repository named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the configuration is invalid.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let mut github = GitHubStore::new(
            config.api_url.clone(),
            &config.repository,
            config.token.clone(),
            config.timeout(),
        )?;
        if let Some(branch) = &config.branch {
            github = github.with_branch(branch.clone());
        }

        Ok(Self::new(github, config.clone()))
    }
}

impl<S: ObjectStore> RemoteLogStore<S> {
    /// Wraps `store`, using template insights and the local date.
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            insights: Box::new(TemplateInsights),
            today: local_today,
        }
    }

    /// Replaces the insight provider used for summaries.
    pub fn with_insights(mut self, insights: impl InsightProvider + 'static) -> Self {
        self.insights = Box::new(insights);
        self
    }

    /// Replaces the source of "today", which anchors default search windows.
    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn insights(&self) -> &dyn InsightProvider {
        self.insights.as_ref()
    }

    /// Object key of the log for `date`.
    pub fn day_key(&self, date: NaiveDate) -> String {
        format!(
            "{}/{:04}/{:02}/{}.json",
            self.config.base_path.trim_end_matches('/'),
            date.year(),
            date.month(),
            date.format(DATE_FORMAT_ISO)
        )
    }

    fn attempts(&self) -> u32 {
        self.config.write_attempts.max(1)
    }

    /// Reads and decodes the log for `date` with its version token.
    fn load_day(&self, date: NaiveDate, operation: Operation) -> AppResult<Option<(DayLog, String)>> {
        let key = self.day_key(date);
        match self.store.get(&key) {
            Ok(object) => {
                let mut day = DayLog::from_json(&object.content).map_err(|e| {
                    StorageError::with_cause(
                        operation,
                        format!("failed to decode day log {}", key),
                        BackendError::from(e),
                    )
                })?;
                day.refresh_derived();
                Ok(Some((day, object.version)))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(StorageError::with_cause(
                operation,
                format!("failed to fetch day log for {}", date),
                e,
            )
            .into()),
        }
    }

    /// Read-modify-write of one day log with conflict retries.
    ///
    /// `mutate` runs against a freshly read day on every attempt. An error
    /// from `mutate` aborts without writing and is never retried.
    fn mutate_day<T, F>(&self, date: NaiveDate, operation: Operation, mut mutate: F) -> AppResult<T>
    where
        F: FnMut(&mut DayLog) -> AppResult<T>,
    {
        let key = self.day_key(date);
        let attempts = self.attempts();
        let mut attempt = 1;

        loop {
            let (mut day, version) = match self.load_day(date, operation)? {
                Some((day, version)) => (day, Some(version)),
                None => (DayLog::new(date, Utc::now()), None),
            };

            let value = mutate(&mut day)?;

            let content = day.to_json().map_err(|e| {
                StorageError::with_cause(operation, "failed to encode day log", BackendError::from(e))
            })?;
            let message = match version {
                Some(_) => format!("Update daily log for {}", day.date_string()),
                None => format!("Create daily log for {}", day.date_string()),
            };

            match self.store.put(&key, &content, version.as_deref(), &message) {
                Ok(_) => {
                    info!("{}: saved day log {}", operation, key);
                    return Ok(value);
                }
                Err(e) if e.is_conflict() && attempt < attempts => {
                    warn!(
                        "{}: write conflict on {} (attempt {}/{}), retrying",
                        operation, key, attempt, attempts
                    );
                    attempt += 1;
                }
                Err(e) if e.is_conflict() => {
                    return Err(StorageError::with_cause(
                        operation,
                        format!("write conflict on {} after {} attempts", key, attempts),
                        e,
                    )
                    .into());
                }
                Err(e) => {
                    return Err(StorageError::with_cause(
                        operation,
                        format!("failed to write day log for {}", date),
                        e,
                    )
                    .into());
                }
            }
        }
    }

    /// Entries of every covered day, in day order.
    fn collect_entries(days: &[DayLog]) -> Vec<Entry> {
        days.iter().flat_map(|d| d.entries().iter().cloned()).collect()
    }
}

impl<S: ObjectStore> LogStorage for RemoteLogStore<S> {
    fn get_day(&self, date: NaiveDate) -> AppResult<DayLog> {
        debug!("Getting day log for {}", date);
        Ok(match self.load_day(date, Operation::GetDay)? {
            Some((day, _)) => day,
            None => DayLog::new(date, Utc::now()),
        })
    }

    fn save_day(&self, day: &DayLog) -> AppResult<()> {
        day.validate()?;
        self.mutate_day(day.date, Operation::SaveDay, |stored| {
            *stored = day.clone();
            stored.refresh_derived();
            Ok(())
        })
    }

    fn delete_day(&self, date: NaiveDate) -> AppResult<()> {
        let key = self.day_key(date);
        let attempts = self.attempts();
        let mut attempt = 1;

        loop {
            let version = match self.load_day(date, Operation::DeleteDay)? {
                Some((_, version)) => version,
                None => return Err(NotFoundError::new("day log", date.to_string()).into()),
            };

            let message = format!("Delete daily log for {}", date);
            match self.store.delete(&key, &version, &message) {
                Ok(()) => {
                    info!("Deleted day log {}", key);
                    return Ok(());
                }
                Err(e) if e.is_not_found() => {
                    return Err(NotFoundError::new("day log", date.to_string()).into())
                }
                Err(e) if e.is_conflict() && attempt < attempts => {
                    warn!(
                        "DeleteDay: write conflict on {} (attempt {}/{}), retrying",
                        key, attempt, attempts
                    );
                    attempt += 1;
                }
                Err(e) => {
                    return Err(StorageError::with_cause(
                        Operation::DeleteDay,
                        format!("failed to delete day log for {}", date),
                        e,
                    )
                    .into())
                }
            }
        }
    }

    fn create_entry(&self, request: CreateEntryRequest) -> AppResult<Entry> {
        request.validate()?;

        let now = Utc::now();
        let date = request.date;
        let entry = request.into_entry(generate_entry_id(now), now);
        debug!("Creating entry {} on {}", entry.id, date);

        self.mutate_day(date, Operation::CreateEntry, |day| {
            day.add_entry(entry.clone());
            Ok(())
        })?;
        Ok(entry)
    }

    fn update_entry(&self, request: UpdateEntryRequest) -> AppResult<Entry> {
        request.validate()?;

        self.mutate_day(request.date, Operation::UpdateEntry, |day| {
            let mut entry = day
                .find_entry(&request.id)
                .cloned()
                .ok_or_else(|| NotFoundError::new("log entry", request.id.clone()))?;
            request.apply(&mut entry);
            day.update_entry(&request.id, entry.clone());
            Ok(entry)
        })
    }

    fn delete_entry(&self, id: &str, date: NaiveDate) -> AppResult<()> {
        self.mutate_day(date, Operation::DeleteEntry, |day| {
            day.remove_entry(id)
                .map(|_| ())
                .ok_or_else(|| NotFoundError::new("log entry", id).into())
        })
    }

    fn get_entry(&self, id: &str, date: NaiveDate) -> AppResult<Entry> {
        self.load_day(date, Operation::GetEntry)?
            .and_then(|(day, _)| day.find_entry(id).cloned())
            .ok_or_else(|| NotFoundError::new("log entry", id).into())
    }

    fn search_logs(&self, request: &SearchRequest) -> AppResult<SearchResponse> {
        Ok(run_search(request, (self.today)(), |date| {
            let loaded = self.load_day(date, Operation::SearchLogs)?;
            Ok(loaded
                .map(|(day, _)| day)
                .unwrap_or_else(|| DayLog::new(date, Utc::now())))
        }))
    }

    fn get_date_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DayLog>> {
        debug!("Getting day logs from {} to {}", start, end);

        let mut days = Vec::new();
        for date in days_in_range(start, end) {
            match self.load_day(date, Operation::GetDateRange) {
                Ok(Some((day, _))) if !day.is_empty() => days.push(day),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable day log for {}: {}", date, e),
            }
        }
        Ok(days)
    }

    fn get_week(&self, date: NaiveDate) -> AppResult<WeekLog> {
        let (start, end) = week_bounds(date)?;
        let days = self.get_date_range(start, end)?;
        Ok(WeekLog::from_days(start, end, days))
    }

    fn get_month(&self, year: i32, month: u32) -> AppResult<MonthLog> {
        let (start, end) = month_bounds(year, month)?;
        let days = self.get_date_range(start, end)?;
        Ok(MonthLog::from_days(year, month, days))
    }

    fn generate_summary(&self, request: &SummaryRequest) -> AppResult<SummaryResponse> {
        request.validate()?;

        let (start, end, days, stats) = match request.summary_type {
            SummaryType::Day => {
                let day = self.get_day(request.date)?;
                let stats = day_stats(&day);
                (request.date, request.date, vec![day], stats)
            }
            SummaryType::Week | SummaryType::Month | SummaryType::Custom => {
                let (start, end) = match request.summary_type {
                    SummaryType::Week => week_bounds(request.date)?,
                    SummaryType::Month => month_bounds(request.date.year(), request.date.month())?,
                    _ => (
                        request.start_date.unwrap_or(request.date),
                        request.end_date.unwrap_or(request.date),
                    ),
                };
                let days = self.get_date_range(start, end)?;
                let stats = SummaryStats::from(&compute_stats(start, end, &days));
                (start, end, days, stats)
            }
        };

        let (summary, generator) = if request.use_ai && self.config.ai_enabled {
            let entries = Self::collect_entries(&days);
            (
                self.insights.summarize(&entries, request.prompt.as_deref())?,
                GENERATOR_INSIGHTS,
            )
        } else {
            (template_text(request.summary_type, &stats), GENERATOR_TEMPLATE)
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("generator".to_string(), generator.to_string());
        metadata.insert("start_date".to_string(), start.to_string());
        metadata.insert("end_date".to_string(), end.to_string());

        debug!("Generated {} summary for {} to {}", request.summary_type, start, end);
        Ok(SummaryResponse {
            summary,
            summary_type: request.summary_type,
            period: period_label(request.summary_type, start, end),
            stats,
            created_at: Utc::now(),
            metadata,
        })
    }

    fn save_summary(
        &self,
        summary: &SummaryResponse,
        summary_type: SummaryType,
        date: NaiveDate,
    ) -> AppResult<()> {
        match summary_type {
            SummaryType::Day => self.mutate_day(date, Operation::SaveSummary, |day| {
                day.day_summary = summary.summary.clone();
                day.updated_at = Utc::now();
                Ok(())
            }),
            other => {
                debug!("{} summaries have no durable location; not saved", other);
                Ok(())
            }
        }
    }

    fn list_days(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for date in days_in_range(start, end) {
            let exists = self.store.exists(&self.day_key(date)).map_err(|e| {
                StorageError::with_cause(
                    Operation::ListDays,
                    format!("failed to probe day log for {}", date),
                    e,
                )
            })?;
            if exists {
                dates.push(date);
            }
        }
        Ok(dates)
    }

    fn get_stats(&self, start: NaiveDate, end: NaiveDate) -> AppResult<LogStats> {
        let days = self.get_date_range(start, end)?;
        Ok(compute_stats(start, end, &days))
    }

    fn backup(&self) -> AppResult<()> {
        let dir = match &self.config.backup_dir {
            Some(dir) => dir,
            None => {
                info!("No backup directory configured; the remote store is the durable copy");
                return Ok(());
            }
        };

        let output = dir.join(format!(
            "{}-backup-{}.tar.gz",
            APP_NAME,
            Utc::now().format("%Y%m%dT%H%M%SZ")
        ));
        let report = create_backup(&self.store, &self.config.base_path, &output)?;
        info!(
            "Backed up {} day logs to {:?} in {:?}",
            report.total_days, output, report.duration
        );
        Ok(())
    }

    fn health_check(&self) -> AppResult<()> {
        self.store.ping().map_err(|e| {
            StorageError::with_cause(Operation::HealthCheck, "object store is not reachable", e)
        })?;
        Ok(())
    }
}
