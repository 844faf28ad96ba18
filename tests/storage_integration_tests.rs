use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
use daylog::config::Config;
use daylog::errors::{AppError, AppResult, BackendError, Operation};
use daylog::model::{
    CreateEntryRequest, DayLog, Entry, EntryType, SearchMode, SearchRequest, SummaryRequest,
    SummaryType, UpdateEntryRequest,
};
use daylog::remote::{MemoryStore, ObjectStore, StoredObject};
use daylog::summary::{EntryAnalysis, InsightProvider};
use daylog::{LogStorage, RemoteLogStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Fixed "today" for deterministic search windows
fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()
}

fn request(day: NaiveDate, title: &str, status: u8, tags: &[&str]) -> CreateEntryRequest {
    CreateEntryRequest {
        date: day,
        entry_type: EntryType::Activity,
        title: title.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status: if status > 0 { Some(status) } else { None },
        timestamp: Some(Utc.with_ymd_and_hms(day.year(), day.month(), day.day(), 9, 0, 0).unwrap()),
        ..Default::default()
    }
}

fn new_store() -> RemoteLogStore<MemoryStore> {
    RemoteLogStore::new(MemoryStore::new(), Config::default()).with_clock(fixed_today)
}

/// Five days, 2025-09-29 (Monday) through 2025-10-03.
fn seed_fixture<S: ObjectStore>(logs: &RemoteLogStore<S>) -> AppResult<()> {
    let entries = [
        request(date(2025, 9, 29), "Deploy api", 9, &["deployment"]),
        request(date(2025, 9, 29), "Standup", 6, &["meeting"]),
        request(date(2025, 9, 30), "Hotfix rollout", 5, &["deployment"]),
        request(date(2025, 10, 1), "Deploy web", 8, &["deployment", "web"]),
        request(date(2025, 10, 1), "Lunch", 0, &["meal"]),
        request(date(2025, 10, 2), "Retro", 7, &["meeting"]),
        request(date(2025, 10, 3), "Deploy db", 10, &["deployment"]),
        request(date(2025, 10, 3), "Write docs", 4, &["docs"]),
    ];
    for entry in entries {
        logs.create_entry(entry)?;
    }
    Ok(())
}

fn titles(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn test_get_day_on_missing_date_is_empty() -> AppResult<()> {
    let logs = new_store();

    let day = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(day.total_entries(), 0);
    assert!(day.is_empty());
    assert_eq!(day.date, date(2025, 10, 1));

    // Reading never persists anything
    assert!(logs.store().is_empty());
    Ok(())
}

#[test]
fn test_create_entry_round_trips_through_store() -> AppResult<()> {
    let logs = new_store();
    let created = logs.create_entry(request(date(2025, 10, 1), "Deploy web", 8, &["deployment"]))?;

    assert!(created.id.starts_with("entry_"));
    assert!(logs
        .store()
        .exists("daily-logs/2025/10/2025-10-01.json")
        .unwrap());

    let fetched = logs.get_entry(&created.id, date(2025, 10, 1))?;
    assert_eq!(fetched, created);

    let day = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(day.total_entries(), 1);
    assert_eq!(day.status_average(), 8.0);
    Ok(())
}

#[test]
fn test_create_entry_validates_before_writing() {
    let logs = new_store();

    let err = logs
        .create_entry(request(date(2025, 10, 1), "Broken", 11, &[]))
        .unwrap_err();
    assert!(err.is_validation());

    let err = logs
        .create_entry(request(date(2025, 10, 1), "   ", 5, &[]))
        .unwrap_err();
    assert!(err.is_validation());

    assert!(logs.store().is_empty());
}

#[test]
fn test_update_entry_patches_fields() -> AppResult<()> {
    let logs = new_store();
    let created = logs.create_entry(request(date(2025, 10, 1), "Deploy", 6, &["deployment"]))?;

    let mut patch = UpdateEntryRequest::new(created.id.clone(), date(2025, 10, 1));
    patch.title = Some("Deploy web".to_string());
    patch.status = Some(9);
    let updated = logs.update_entry(patch)?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.timestamp, created.timestamp);
    assert_eq!(updated.title, "Deploy web");
    assert_eq!(updated.tags, vec!["deployment".to_string()]);

    let day = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(day.status_average(), 9.0);
    Ok(())
}

#[test]
fn test_update_unknown_entry_is_not_found() {
    let logs = new_store();
    let err = logs
        .update_entry(UpdateEntryRequest::new("entry_404", date(2025, 10, 1)))
        .unwrap_err();

    match err {
        AppError::NotFound(e) => {
            assert_eq!(e.resource, "log entry");
            assert_eq!(e.id, "entry_404");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert!(logs.store().is_empty());
}

#[test]
fn test_delete_entry_with_unknown_id_is_not_found() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let err = logs.delete_entry("entry_missing", date(2025, 9, 29)).unwrap_err();
    match err {
        AppError::NotFound(e) => {
            assert_eq!(e.resource, "log entry");
            assert_eq!(e.id, "entry_missing");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }

    assert_eq!(logs.get_day(date(2025, 9, 29))?.total_entries(), 2);
    Ok(())
}

#[test]
fn test_delete_last_entry_keeps_day() -> AppResult<()> {
    let logs = new_store();
    let created = logs.create_entry(request(date(2025, 10, 1), "Solo", 5, &[]))?;

    logs.delete_entry(&created.id, date(2025, 10, 1))?;

    assert_eq!(logs.list_days(date(2025, 10, 1), date(2025, 10, 1))?, vec![date(2025, 10, 1)]);
    let day = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(day.total_entries(), 0);
    assert_eq!(day.status_average(), 0.0);

    let err = logs.get_entry(&created.id, date(2025, 10, 1)).unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_delete_day() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    logs.delete_day(date(2025, 9, 30))?;
    assert_eq!(logs.get_day(date(2025, 9, 30))?.total_entries(), 0);

    let err = logs.delete_day(date(2025, 9, 30)).unwrap_err();
    match err {
        AppError::NotFound(e) => {
            assert_eq!(e.resource, "day log");
            assert_eq!(e.id, "2025-09-30");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_save_day_upserts_full_content() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let mut replacement = DayLog::new(date(2025, 9, 29), Utc::now());
    replacement.add_entry(Entry::new("entry_1", Utc::now(), EntryType::Note, "Rewritten"));
    logs.save_day(&replacement)?;

    let day = logs.get_day(date(2025, 9, 29))?;
    assert_eq!(titles(day.entries()), vec!["Rewritten"]);
    assert_eq!(day.total_entries(), 1);

    // Saving a day that never existed creates it
    let fresh = DayLog::new(date(2025, 11, 1), Utc::now());
    logs.save_day(&fresh)?;
    assert_eq!(logs.list_days(date(2025, 11, 1), date(2025, 11, 1))?.len(), 1);
    Ok(())
}

#[test]
fn test_save_day_rejects_invalid_entries_before_writing() {
    let logs = new_store();

    let mut bad_status = DayLog::new(date(2025, 10, 1), Utc::now());
    let mut entry = Entry::new("entry_1", Utc::now(), EntryType::Activity, "Deploy");
    entry.status = 200;
    bad_status.add_entry(entry);

    let mut blank_title = DayLog::new(date(2025, 10, 1), Utc::now());
    blank_title.add_entry(Entry::new("entry_2", Utc::now(), EntryType::Note, "   "));

    let mut bad_priority = DayLog::new(date(2025, 10, 1), Utc::now());
    let mut entry = Entry::new("entry_3", Utc::now(), EntryType::Note, "Plan");
    entry.priority = 99;
    bad_priority.add_entry(entry);

    for (day, field) in [
        (bad_status, "status"),
        (blank_title, "title"),
        (bad_priority, "priority"),
    ] {
        match logs.save_day(&day) {
            Err(AppError::Validation(e)) => assert_eq!(e.field, field),
            other => panic!("Expected Validation error on {}, got {:?}", field, other),
        }
    }
    assert!(logs.store().is_empty());
}

#[test]
fn test_search_by_tag_and_minimum_status() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let search = SearchRequest {
        date_start: Some(date(2025, 9, 29)),
        date_end: Some(date(2025, 10, 3)),
        tags: vec!["deployment".to_string()],
        status_min: Some(8),
        ..Default::default()
    };
    let response = logs.search_logs(&search)?;

    assert_eq!(titles(&response.entries), vec!["Deploy api", "Deploy web", "Deploy db"]);
    assert_eq!(response.total_count, 3);
    assert_eq!(response.query, search);
    Ok(())
}

#[test]
fn test_search_limit_stops_early() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let search = SearchRequest {
        date_start: Some(date(2025, 9, 29)),
        date_end: Some(date(2025, 10, 3)),
        tags: vec!["deployment".to_string()],
        status_min: Some(8),
        limit: 2,
        ..Default::default()
    };
    let response = logs.search_logs(&search)?;
    assert_eq!(titles(&response.entries), vec!["Deploy api", "Deploy web"]);
    assert_eq!(response.total_count, 2);

    let recent = SearchRequest {
        mode: SearchMode::MostRecent,
        ..search
    };
    let response = logs.search_logs(&recent)?;
    assert_eq!(titles(&response.entries), vec!["Deploy web", "Deploy db"]);
    assert_eq!(response.total_count, 3);
    Ok(())
}

#[test]
fn test_search_defaults_to_trailing_window() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;
    // Outside the three month window ending on the fixed today
    logs.create_entry(request(date(2025, 6, 1), "Old deploy", 9, &["deployment"]))?;

    let response = logs.search_logs(&SearchRequest {
        tags: vec!["deployment".to_string()],
        ..Default::default()
    })?;

    assert_eq!(response.total_count, 4);
    assert!(!titles(&response.entries).contains(&"Old deploy"));
    Ok(())
}

#[test]
fn test_search_text_and_metadata() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let mut tagged = request(date(2025, 10, 2), "Deploy worker", 7, &["deployment"]);
    tagged.metadata.insert("service".to_string(), "worker".to_string());
    logs.create_entry(tagged)?;

    let mut search = SearchRequest {
        date_start: Some(date(2025, 9, 29)),
        date_end: Some(date(2025, 10, 3)),
        text: Some("DEPLOY".to_string()),
        include_days: true,
        ..Default::default()
    };
    search.metadata.insert("service".to_string(), "worker".to_string());

    let response = logs.search_logs(&search)?;
    assert_eq!(titles(&response.entries), vec!["Deploy worker"]);
    assert_eq!(response.days.len(), 1);
    assert_eq!(response.days[0].date, date(2025, 10, 2));
    Ok(())
}

#[test]
fn test_search_skips_undecodable_day() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let key = logs.day_key(date(2025, 9, 30));
    let version = logs.store().get(&key).unwrap().version;
    logs.store()
        .put(&key, b"not json", Some(&version), "corrupt")
        .unwrap();

    let response = logs.search_logs(&SearchRequest {
        date_start: Some(date(2025, 9, 29)),
        date_end: Some(date(2025, 10, 3)),
        tags: vec!["deployment".to_string()],
        ..Default::default()
    })?;
    assert_eq!(titles(&response.entries), vec!["Deploy api", "Deploy web", "Deploy db"]);

    // Direct reads still report the failure
    let err = logs.get_day(date(2025, 9, 30)).unwrap_err();
    match err {
        AppError::Storage(e) => assert_eq!(e.operation, Operation::GetDay),
        other => panic!("Expected Storage error, got {:?}", other),
    }

    // Range reads skip it
    assert_eq!(logs.get_date_range(date(2025, 9, 29), date(2025, 10, 3))?.len(), 4);
    Ok(())
}

#[test]
fn test_get_week_spans_monday_to_sunday() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let week = logs.get_week(date(2025, 10, 1))?;
    assert_eq!(week.week_start, date(2025, 9, 29));
    assert_eq!(week.week_end, date(2025, 10, 5));
    assert_eq!(week.week_start.weekday(), Weekday::Mon);
    assert_eq!(week.days.len(), 5);
    assert_eq!(week.total_entries, 8);

    let dates: Vec<NaiveDate> = week.days.iter().map(|d| d.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    Ok(())
}

#[test]
fn test_week_past_calendar_end_is_validation_error() {
    let logs = new_store();

    let err = logs.get_week(NaiveDate::MAX).unwrap_err();
    assert!(err.is_validation());

    let err = logs
        .generate_summary(&SummaryRequest::new(SummaryType::Week, NaiveDate::MAX))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(logs.store().is_empty());
}

#[test]
fn test_get_month() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let september = logs.get_month(2025, 9)?;
    assert_eq!(september.month, "2025-09");
    assert_eq!(september.year, 2025);
    assert_eq!(september.days.len(), 2);
    assert_eq!(september.total_entries, 3);

    let err = logs.get_month(2025, 13).unwrap_err();
    assert!(err.is_validation());
    Ok(())
}

#[test]
fn test_empty_days_are_omitted_from_views() -> AppResult<()> {
    let logs = new_store();
    let created = logs.create_entry(request(date(2025, 10, 1), "Temporary", 5, &[]))?;
    logs.delete_entry(&created.id, date(2025, 10, 1))?;

    let week = logs.get_week(date(2025, 10, 1))?;
    assert!(week.days.is_empty());
    assert_eq!(week.total_entries, 0);
    Ok(())
}

#[test]
fn test_list_days() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let days = logs.list_days(date(2025, 9, 28), date(2025, 10, 5))?;
    assert_eq!(
        days,
        vec![
            date(2025, 9, 29),
            date(2025, 9, 30),
            date(2025, 10, 1),
            date(2025, 10, 2),
            date(2025, 10, 3),
        ]
    );
    Ok(())
}

#[test]
fn test_get_stats() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let stats = logs.get_stats(date(2025, 9, 29), date(2025, 10, 3))?;
    assert_eq!(stats.total_entries, 8);
    assert_eq!(stats.total_days, 5);
    assert_eq!(stats.entries_per_day, 8.0 / 5.0);
    // Day averages 7.5, 5, 8, 7, 7
    assert!((stats.average_status - 6.9).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_get_stats_without_days() -> AppResult<()> {
    let logs = new_store();
    let stats = logs.get_stats(date(2025, 1, 1), date(2025, 1, 31))?;
    assert_eq!(stats.total_days, 0);
    assert_eq!(stats.entries_per_day, 0.0);
    assert_eq!(stats.average_status, 0.0);
    Ok(())
}

#[test]
fn test_generate_summaries_from_templates() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let day = logs.generate_summary(&SummaryRequest::new(SummaryType::Day, date(2025, 9, 29)))?;
    assert_eq!(day.summary, "Day had 2 activities with an average status of 7.5");
    assert_eq!(day.period, "2025-09-29");
    assert_eq!(day.metadata["generator"], "template");

    let empty = logs.generate_summary(&SummaryRequest::new(SummaryType::Day, date(2025, 9, 1)))?;
    assert_eq!(empty.summary, "No activities recorded for this day.");

    let week = logs.generate_summary(&SummaryRequest::new(SummaryType::Week, date(2025, 10, 2)))?;
    assert_eq!(week.summary, "Week had 8 total activities across 5 days");
    assert_eq!(week.period, "2025-09-29 to 2025-10-05");

    let month = logs.generate_summary(&SummaryRequest::new(SummaryType::Month, date(2025, 10, 20)))?;
    assert_eq!(month.summary, "Month had 5 total activities across 3 days");
    assert_eq!(month.period, "2025-10");
    Ok(())
}

#[test]
fn test_custom_summary_requires_ordered_range() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let mut custom = SummaryRequest::new(SummaryType::Custom, date(2025, 9, 30));
    assert!(logs.generate_summary(&custom).unwrap_err().is_validation());

    custom.start_date = Some(date(2025, 10, 2));
    custom.end_date = Some(date(2025, 9, 30));
    assert!(logs.generate_summary(&custom).unwrap_err().is_validation());

    custom.start_date = Some(date(2025, 9, 30));
    custom.end_date = Some(date(2025, 10, 2));
    let summary = logs.generate_summary(&custom)?;
    assert_eq!(summary.summary, "Period had 4 total activities across 3 days");
    assert_eq!(summary.period, "2025-09-30 to 2025-10-02");
    assert_eq!(summary.stats.total_days, 3);
    Ok(())
}

struct CannedInsights;

impl InsightProvider for CannedInsights {
    fn summarize(&self, entries: &[Entry], prompt: Option<&str>) -> AppResult<String> {
        Ok(format!("{} entries, prompt {:?}", entries.len(), prompt))
    }

    fn suggest_tags(&self, _description: &str) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn analyze_status(&self, _entries: &[Entry]) -> AppResult<EntryAnalysis> {
        Ok(EntryAnalysis::default())
    }

    fn generate_insights(&self, _days: &[DayLog]) -> AppResult<String> {
        Ok(String::new())
    }

    fn improve_wording(&self, text: &str) -> AppResult<String> {
        Ok(text.to_string())
    }
}

#[test]
fn test_insight_provider_used_only_when_enabled() -> AppResult<()> {
    let mut summary = SummaryRequest::new(SummaryType::Week, date(2025, 10, 1));
    summary.use_ai = true;
    summary.prompt = Some("highlights".to_string());

    let disabled = new_store().with_insights(CannedInsights);
    seed_fixture(&disabled)?;
    let response = disabled.generate_summary(&summary)?;
    assert_eq!(response.metadata["generator"], "template");

    let config = Config {
        ai_enabled: true,
        ..Default::default()
    };
    let enabled = RemoteLogStore::new(MemoryStore::new(), config).with_insights(CannedInsights);
    seed_fixture(&enabled)?;
    let response = enabled.generate_summary(&summary)?;
    assert_eq!(response.summary, "8 entries, prompt Some(\"highlights\")");
    assert_eq!(response.metadata["generator"], "insights");
    assert_eq!(response.stats.total_entries, 8);
    Ok(())
}

#[test]
fn test_save_summary_persists_day_summaries_only() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;

    let day = logs.generate_summary(&SummaryRequest::new(SummaryType::Day, date(2025, 10, 1)))?;
    logs.save_summary(&day, SummaryType::Day, date(2025, 10, 1))?;
    let stored = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(stored.day_summary, day.summary);
    assert_eq!(stored.total_entries(), 2);

    let week = logs.generate_summary(&SummaryRequest::new(SummaryType::Week, date(2025, 10, 1)))?;
    logs.save_summary(&week, SummaryType::Week, date(2025, 10, 2))?;
    assert_eq!(logs.get_day(date(2025, 10, 2))?.day_summary, "");
    Ok(())
}

#[test]
fn test_backup_without_directory_is_noop() -> AppResult<()> {
    let logs = new_store();
    seed_fixture(&logs)?;
    logs.backup()?;
    logs.health_check()?;
    Ok(())
}

/// Store that loses the first `conflicts` writes to a competing writer.
///
/// Before rejecting a write it appends an entry titled "Concurrent" to the
/// same day, as another client would.
struct ContendedStore {
    inner: MemoryStore,
    conflicts: AtomicUsize,
    puts: Arc<AtomicUsize>,
}

impl ContendedStore {
    fn new(conflicts: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            conflicts: AtomicUsize::new(conflicts),
            puts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn interfere(&self, key: &str) {
        let (mut day, version) = match self.inner.get(key) {
            Ok(object) => (DayLog::from_json(&object.content).unwrap(), Some(object.version)),
            Err(_) => (DayLog::new(date(2025, 10, 1), Utc::now()), None),
        };
        day.add_entry(Entry::new(
            format!("entry_concurrent_{}", day.total_entries()),
            Utc::now(),
            EntryType::Note,
            "Concurrent",
        ));
        self.inner
            .put(key, &day.to_json().unwrap(), version.as_deref(), "concurrent")
            .unwrap();
    }
}

impl ObjectStore for ContendedStore {
    fn get(&self, key: &str) -> Result<StoredObject, BackendError> {
        self.inner.get(key)
    }

    fn put(
        &self,
        key: &str,
        content: &[u8],
        version: Option<&str>,
        message: &str,
    ) -> Result<String, BackendError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.conflicts.store(remaining - 1, Ordering::SeqCst);
            self.interfere(key);
        }
        self.inner.put(key, content, version, message)
    }

    fn delete(&self, key: &str, version: &str, message: &str) -> Result<(), BackendError> {
        self.inner.delete(key, version, message)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        self.inner.list(prefix)
    }

    fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

#[test]
fn test_conflict_is_retried_on_fresh_day() -> AppResult<()> {
    let store = ContendedStore::new(1);
    let puts = Arc::clone(&store.puts);
    let logs = RemoteLogStore::new(store, Config::default());

    let created = logs.create_entry(request(date(2025, 10, 1), "Mine", 8, &[]))?;

    let day = logs.get_day(date(2025, 10, 1))?;
    assert_eq!(titles(day.entries()), vec!["Concurrent", "Mine"]);
    assert_eq!(day.entries()[1].id, created.id);
    assert_eq!(puts.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_conflict_budget_exhausted() {
    let store = ContendedStore::new(usize::MAX);
    let puts = Arc::clone(&store.puts);
    let logs = RemoteLogStore::new(store, Config::default());

    let err = logs
        .create_entry(request(date(2025, 10, 1), "Mine", 8, &[]))
        .unwrap_err();

    match err {
        AppError::Storage(e) => {
            assert_eq!(e.operation, Operation::CreateEntry);
            assert!(e.is_conflict());
        }
        other => panic!("Expected Storage error, got {:?}", other),
    }
    assert_eq!(puts.load(Ordering::SeqCst), 3);
}

#[test]
fn test_single_attempt_budget_surfaces_first_conflict() {
    let config = Config {
        write_attempts: 1,
        ..Default::default()
    };
    let store = ContendedStore::new(1);
    let puts = Arc::clone(&store.puts);
    let logs = RemoteLogStore::new(store, config);

    let err = logs
        .create_entry(request(date(2025, 10, 1), "Mine", 8, &[]))
        .unwrap_err();
    assert!(err.is_storage());
    assert_eq!(puts.load(Ordering::SeqCst), 1);
}
