//! Summary text generation and the pluggable insight capability.
//!
//! Summaries are templated from counts that are already computed. Richer text
//! comes from an [`InsightProvider`]; the crate ships [`TemplateInsights`],
//! which needs no external service, and callers inject anything else.

use crate::constants::{DATE_FORMAT_ISO, MONTH_FORMAT};
use crate::errors::AppResult;
use crate::model::{DayLog, Entry, LogStats, SummaryStats, SummaryType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tags [`TemplateInsights::suggest_tags`] recognizes.
pub const TAG_VOCABULARY: [&str; 8] = [
    "work", "meeting", "exercise", "meal", "family", "friends", "health", "learning",
];

/// Returned by `suggest_tags` when no vocabulary word occurs.
pub const FALLBACK_TAGS: [&str; 2] = ["general", "daily"];

/// Human readable label for the span a summary covers.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daylog::model::SummaryType;
/// use daylog::summary::period_label;
///
/// let start = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
/// assert_eq!(period_label(SummaryType::Week, start, end), "2025-09-29 to 2025-10-05");
/// assert_eq!(period_label(SummaryType::Month, start, end), "2025-09");
/// ```
pub fn period_label(summary_type: SummaryType, start: NaiveDate, end: NaiveDate) -> String {
    match summary_type {
        SummaryType::Day => start.format(DATE_FORMAT_ISO).to_string(),
        SummaryType::Month => start.format(MONTH_FORMAT).to_string(),
        SummaryType::Week | SummaryType::Custom => format!(
            "{} to {}",
            start.format(DATE_FORMAT_ISO),
            end.format(DATE_FORMAT_ISO)
        ),
    }
}

/// Templated summary sentence for the given counts.
pub fn template_text(summary_type: SummaryType, stats: &SummaryStats) -> String {
    let span = match summary_type {
        SummaryType::Day => {
            if stats.total_entries == 0 {
                return "No activities recorded for this day.".to_string();
            }
            return format!(
                "Day had {} activities with an average status of {:.1}",
                stats.total_entries, stats.average_status
            );
        }
        SummaryType::Week => "Week",
        SummaryType::Month => "Month",
        SummaryType::Custom => "Period",
    };
    format!(
        "{} had {} total activities across {} days",
        span, stats.total_entries, stats.total_days
    )
}

/// Summary counts for a single day.
pub fn day_stats(day: &DayLog) -> SummaryStats {
    let total_entries = day.total_entries();
    let total_days = usize::from(total_entries > 0);
    SummaryStats {
        total_entries,
        total_days,
        average_status: day.status_average(),
        entries_per_day: if total_days > 0 {
            total_entries as f64
        } else {
            0.0
        },
    }
}

impl From<&LogStats> for SummaryStats {
    fn from(stats: &LogStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            total_days: stats.total_days,
            average_status: stats.average_status,
            entries_per_day: stats.entries_per_day,
        }
    }
}

/// Counts over a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryAnalysis {
    pub total_entries: usize,
    /// Entry count per type tag
    pub by_type: BTreeMap<String, usize>,
    /// Occurrences of each tag
    pub tag_counts: BTreeMap<String, usize>,
    /// Mean over entries with a status set
    pub average_status: Option<f64>,
    /// Mean over entries with a priority set
    pub average_priority: Option<f64>,
}

impl EntryAnalysis {
    /// Tags ordered by descending count, ties alphabetical.
    pub fn top_tags(&self, n: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .tag_counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }
}

/// Text-generation capability used by summaries.
///
/// Implementations may call out to a language model; the core never depends on
/// one. Every method is fallible so remote implementations can report
/// failures through the normal error type.
pub trait InsightProvider: Send + Sync {
    /// Summarizes `entries`, optionally steered by a caller prompt.
    fn summarize(&self, entries: &[Entry], prompt: Option<&str>) -> AppResult<String>;

    /// Suggests tags for a free-text description.
    fn suggest_tags(&self, description: &str) -> AppResult<Vec<String>>;

    fn analyze_status(&self, entries: &[Entry]) -> AppResult<EntryAnalysis>;

    /// Describes trends across several days.
    fn generate_insights(&self, days: &[DayLog]) -> AppResult<String>;

    /// Tidies up a piece of user-written text.
    fn improve_wording(&self, text: &str) -> AppResult<String>;
}

/// Insight provider built from counting and fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInsights;

fn mean(values: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| *v > 0)
        .fold((0u32, 0u32), |(sum, count), v| (sum + u32::from(v), count + 1));
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

impl InsightProvider for TemplateInsights {
    /// The prompt is ignored; the output only restates counts and titles.
    fn summarize(&self, entries: &[Entry], _prompt: Option<&str>) -> AppResult<String> {
        if entries.is_empty() {
            return Ok("No activities recorded.".to_string());
        }

        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        let mut text = format!("{} activities: {}.", entries.len(), titles.join("; "));
        if let Some(avg) = mean(entries.iter().map(|e| e.status)) {
            text.push_str(&format!(" Average status {:.1}.", avg));
        }
        Ok(text)
    }

    fn suggest_tags(&self, description: &str) -> AppResult<Vec<String>> {
        let mut tags: Vec<String> = Vec::new();
        for word in description
            .split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
        {
            if TAG_VOCABULARY.contains(&word.as_str()) && !tags.contains(&word) {
                tags.push(word);
            }
        }

        if tags.is_empty() {
            tags = FALLBACK_TAGS.iter().map(|t| t.to_string()).collect();
        }
        Ok(tags)
    }

    fn analyze_status(&self, entries: &[Entry]) -> AppResult<EntryAnalysis> {
        let mut analysis = EntryAnalysis {
            total_entries: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            *analysis
                .by_type
                .entry(entry.entry_type.as_str().to_string())
                .or_default() += 1;
            for tag in &entry.tags {
                *analysis.tag_counts.entry(tag.clone()).or_default() += 1;
            }
        }
        analysis.average_status = mean(entries.iter().map(|e| e.status));
        analysis.average_priority = mean(entries.iter().map(|e| e.priority));

        Ok(analysis)
    }

    fn generate_insights(&self, days: &[DayLog]) -> AppResult<String> {
        let (first, last) = match (days.first(), days.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Ok("No activities recorded for this period.".to_string()),
        };

        let stats = crate::query::compute_stats(first, last, days);
        let entries: Vec<Entry> = days.iter().flat_map(|d| d.entries().to_vec()).collect();
        let analysis = self.analyze_status(&entries)?;

        let mut text = format!(
            "{} activities across {} days, {:.1} per day.",
            stats.total_entries, stats.total_days, stats.entries_per_day
        );
        if stats.average_status > 0.0 {
            text.push_str(&format!(" Average status {:.1}.", stats.average_status));
        }
        let top = analysis.top_tags(3);
        if !top.is_empty() {
            let names: Vec<&str> = top.iter().map(|(tag, _)| *tag).collect();
            text.push_str(&format!(" Most frequent tags: {}.", names.join(", ")));
        }
        Ok(text)
    }

    fn improve_wording(&self, text: &str) -> AppResult<String> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut chars = normalized.chars();
        let mut improved = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => return Ok(String::new()),
        };
        if !improved.ends_with(['.', '!', '?']) {
            improved.push('.');
        }
        Ok(improved)
    }
}
