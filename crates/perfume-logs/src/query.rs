// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Filtering and statistics over the retained window.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entry::{Category, Level, LogEntry, Origin};

/// Criteria for selecting entries out of the retained window.
///
/// All criteria are optional and combine with AND; an empty filter matches
/// everything.
///
/// # Example
///
/// ```
/// use perfume_logs::{EntryFilter, Level};
///
/// let filter = EntryFilter::new().level(Level::Error).search("timeout");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
	pub level: Option<Level>,
	pub origin: Option<Origin>,
	pub category: Option<Category>,
	pub since: Option<DateTime<Utc>>,
	pub search: Option<String>,
}

impl EntryFilter {
	/// Creates an empty filter that matches every entry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Keep only entries at exactly this level.
	pub fn level(mut self, level: Level) -> Self {
		self.level = Some(level);
		self
	}

	/// Keep only entries from this origin.
	pub fn origin(mut self, origin: Origin) -> Self {
		self.origin = Some(origin);
		self
	}

	/// Keep only entries in this category.
	pub fn category(mut self, category: Category) -> Self {
		self.category = Some(category);
		self
	}

	/// Keep only entries stamped at or after this instant.
	pub fn since(mut self, since: DateTime<Utc>) -> Self {
		self.since = Some(since);
		self
	}

	/// Keep only entries whose serialized form contains this text,
	/// case-insensitively.
	pub fn search(mut self, needle: impl Into<String>) -> Self {
		self.search = Some(needle.into());
		self
	}

	/// Whether `entry` satisfies every criterion.
	pub fn matches(&self, entry: &LogEntry) -> bool {
		if self.level.is_some_and(|level| entry.level != level) {
			return false;
		}
		if self.origin.is_some_and(|origin| entry.origin != origin) {
			return false;
		}
		if self
			.category
			.is_some_and(|category| entry.category != category)
		{
			return false;
		}
		if self.since.is_some_and(|since| entry.timestamp < since) {
			return false;
		}
		if let Some(needle) = &self.search {
			let haystack = serde_json::to_string(entry)
				.unwrap_or_default()
				.to_lowercase();
			if !haystack.contains(&needle.to_lowercase()) {
				return false;
			}
		}
		true
	}
}

/// Timing aggregation over `details.durationMs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingStats {
	pub count: usize,
	pub sum: f64,
	pub avg: f64,
	pub max: f64,
	pub min: f64,
}

/// Counts and timings over a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
	pub total: usize,
	pub by_level: BTreeMap<Level, usize>,
	pub timings: TimingStats,
}

impl LogStats {
	/// Aggregate over the given entries. Only finite `durationMs` values
	/// contribute to timings; with no contributions every timing field is 0
	/// rather than infinite or NaN.
	pub fn collect<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
		let mut total = 0;
		let mut by_level: BTreeMap<Level, usize> = BTreeMap::new();
		let mut count = 0usize;
		let mut sum = 0.0f64;
		let mut max = f64::NEG_INFINITY;
		let mut min = f64::INFINITY;

		for entry in entries {
			total += 1;
			*by_level.entry(entry.level).or_insert(0) += 1;
			if let Some(duration) = entry.duration_ms() {
				count += 1;
				sum += duration;
				max = max.max(duration);
				min = min.min(duration);
			}
		}

		let timings = if count == 0 {
			TimingStats {
				count: 0,
				sum: 0.0,
				avg: 0.0,
				max: 0.0,
				min: 0.0,
			}
		} else {
			TimingStats {
				count,
				sum,
				avg: sum / count as f64,
				max,
				min,
			}
		};

		Self {
			total,
			by_level,
			timings,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use serde_json::{json, Map};

	fn entry(level: Level, duration: Option<f64>) -> LogEntry {
		let mut details = Map::new();
		if let Some(duration) = duration {
			details.insert("durationMs".to_string(), json!(duration));
		}
		LogEntry {
			timestamp: Utc.with_ymd_and_hms(2026, 8, 27, 10, 0, 0).unwrap(),
			level,
			origin: Origin::Server,
			category: Category::Sheet,
			message: "recalculated".to_string(),
			details,
			session_id: "session".to_string(),
			request_id: "req-1".to_string(),
			context: Map::new(),
		}
	}

	#[test]
	fn test_empty_filter_matches_everything() {
		assert!(EntryFilter::new().matches(&entry(Level::Debug, None)));
	}

	#[test]
	fn test_level_filter_is_exact() {
		let filter = EntryFilter::new().level(Level::Error);
		assert!(filter.matches(&entry(Level::Error, None)));
		assert!(!filter.matches(&entry(Level::Warn, None)));
	}

	#[test]
	fn test_since_is_inclusive() {
		let stamp = Utc.with_ymd_and_hms(2026, 8, 27, 10, 0, 0).unwrap();
		assert!(EntryFilter::new().since(stamp).matches(&entry(Level::Info, None)));
		assert!(!EntryFilter::new()
			.since(stamp + chrono::Duration::seconds(1))
			.matches(&entry(Level::Info, None)));
	}

	#[test]
	fn test_search_is_case_insensitive_over_serialized_entry() {
		let filter = EntryFilter::new().search("RECALC");
		assert!(filter.matches(&entry(Level::Info, None)));
		let filter = EntryFilter::new().search("req-1");
		assert!(filter.matches(&entry(Level::Info, None)));
		let filter = EntryFilter::new().search("absent");
		assert!(!filter.matches(&entry(Level::Info, None)));
	}

	#[test]
	fn test_stats_aggregates_levels_and_timings() {
		let entries = [
			entry(Level::Info, Some(10.0)),
			entry(Level::Error, Some(20.0)),
		];
		let stats = LogStats::collect(&entries);
		assert_eq!(stats.total, 2);
		assert_eq!(stats.by_level.get(&Level::Error), Some(&1));
		assert_eq!(stats.by_level.get(&Level::Info), Some(&1));
		assert_eq!(stats.timings.count, 2);
		assert_eq!(stats.timings.sum, 30.0);
		assert_eq!(stats.timings.avg, 15.0);
		assert_eq!(stats.timings.max, 20.0);
		assert_eq!(stats.timings.min, 10.0);
	}

	#[test]
	fn test_stats_with_no_timings_reports_zeroes() {
		let entries = [entry(Level::Info, None)];
		let stats = LogStats::collect(&entries);
		assert_eq!(stats.total, 1);
		assert_eq!(
			stats.timings,
			TimingStats {
				count: 0,
				sum: 0.0,
				avg: 0.0,
				max: 0.0,
				min: 0.0
			}
		);
	}
}
