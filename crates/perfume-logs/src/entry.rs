// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log entry types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Debug,
	Info,
	Warn,
	Error,
}

impl Level {
	/// All legal levels, in severity order.
	pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Debug => "debug",
			Level::Info => "info",
			Level::Warn => "warn",
			Level::Error => "error",
		}
	}

	/// Parse from the lowercase wire form.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|level| level.as_str() == s)
	}
}

impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Which side of the application produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
	Client,
	Server,
}

impl Origin {
	/// All legal origins.
	pub const ALL: [Origin; 2] = [Origin::Client, Origin::Server];

	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Origin::Client => "client",
			Origin::Server => "server",
		}
	}

	/// Parse from the lowercase wire form.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|origin| origin.as_str() == s)
	}
}

impl std::fmt::Display for Origin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Functional area the entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Auth,
	Sheet,
	Ui,
	Http,
	Job,
}

impl Category {
	/// All legal categories.
	pub const ALL: [Category; 5] = [
		Category::Auth,
		Category::Sheet,
		Category::Ui,
		Category::Http,
		Category::Job,
	];

	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Category::Auth => "auth",
			Category::Sheet => "sheet",
			Category::Ui => "ui",
			Category::Http => "http",
			Category::Job => "job",
		}
	}

	/// Parse from the lowercase wire form.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|category| category.as_str() == s)
	}
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A structured log entry, immutable once stored.
///
/// Entries are validated and masked at ingest; anything read back out of the
/// buffer has already had sensitive fields replaced by the mask token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
	/// When the event happened.
	#[serde(serialize_with = "serialize_timestamp")]
	pub timestamp: DateTime<Utc>,
	/// Severity.
	pub level: Level,
	/// Client or server side.
	pub origin: Origin,
	/// Functional area.
	pub category: Category,
	/// Human-readable message.
	pub message: String,
	/// Open key/value payload; may carry a numeric `durationMs`.
	#[serde(default)]
	pub details: Map<String, Value>,
	/// Session the entry belongs to.
	pub session_id: String,
	/// Request the entry belongs to.
	pub request_id: String,
	/// Open key/value ambient context.
	#[serde(default)]
	pub context: Map<String, Value>,
}

// Serialized entries keep the canonical storage form: RFC 3339 with
// millisecond precision. chrono's default would drop whole-second millis.
fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl LogEntry {
	/// Canonical timestamp text: RFC 3339 with millisecond precision and a
	/// `Z` suffix.
	pub fn timestamp_string(&self) -> String {
		self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
	}

	/// The entry's timing measurement, if `details.durationMs` holds a
	/// finite number.
	pub fn duration_ms(&self) -> Option<f64> {
		self.details
			.get("durationMs")
			.and_then(Value::as_f64)
			.filter(|duration| duration.is_finite())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use serde_json::json;

	#[test]
	fn test_level_parse_round_trips() {
		for level in Level::ALL {
			assert_eq!(Level::parse(level.as_str()), Some(level));
		}
		assert_eq!(Level::parse("fatal"), None);
	}

	#[test]
	fn test_level_ordering() {
		assert!(Level::Debug < Level::Info);
		assert!(Level::Info < Level::Warn);
		assert!(Level::Warn < Level::Error);
	}

	#[test]
	fn test_entry_serializes_camel_case() {
		let entry = LogEntry {
			timestamp: Utc::now(),
			level: Level::Info,
			origin: Origin::Server,
			category: Category::Sheet,
			message: "ok".to_string(),
			details: Map::new(),
			session_id: "session".to_string(),
			request_id: "req-1".to_string(),
			context: Map::new(),
		};
		let json = serde_json::to_string(&entry).unwrap();
		assert!(json.contains("\"sessionId\":\"session\""));
		assert!(json.contains("\"requestId\":\"req-1\""));
		assert!(json.contains("\"level\":\"info\""));
	}

	#[test]
	fn test_timestamp_serializes_in_canonical_millis_form() {
		let entry = LogEntry {
			// Whole second on purpose: the wire form must still carry millis.
			timestamp: Utc.with_ymd_and_hms(2026, 8, 27, 10, 0, 0).unwrap(),
			level: Level::Info,
			origin: Origin::Server,
			category: Category::Sheet,
			message: "ok".to_string(),
			details: Map::new(),
			session_id: "session".to_string(),
			request_id: "req-1".to_string(),
			context: Map::new(),
		};
		let json = serde_json::to_string(&entry).unwrap();
		assert!(json.contains("\"timestamp\":\"2026-08-27T10:00:00.000Z\""));
		assert!(!json.contains("10:00:00Z\""));

		let parsed: LogEntry = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.timestamp, entry.timestamp);
	}

	#[test]
	fn test_duration_ms_requires_finite_number() {
		let mut details = Map::new();
		details.insert("durationMs".to_string(), json!(12.5));
		let entry = LogEntry {
			timestamp: Utc::now(),
			level: Level::Info,
			origin: Origin::Client,
			category: Category::Ui,
			message: "m".to_string(),
			details,
			session_id: "s".to_string(),
			request_id: "r".to_string(),
			context: Map::new(),
		};
		assert_eq!(entry.duration_ms(), Some(12.5));

		let mut entry = entry;
		entry.details
			.insert("durationMs".to_string(), json!("not a number"));
		assert_eq!(entry.duration_ms(), None);
	}
}
