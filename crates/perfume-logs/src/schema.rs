// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shape validation for candidate log entries.
//!
//! [`validate_entry`] is total: it accepts any JSON value and reports every
//! field-level problem it finds rather than stopping at the first one. The
//! error texts name the offending field (and for enums the legal set) and
//! are surfaced verbatim to callers, so they are part of the contract.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entry::{Category, Level, Origin};

/// Outcome of validating a candidate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
	pub valid: bool,
	pub errors: Vec<String>,
}

/// Parse an ISO-8601 / RFC 3339 instant.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(text)
		.ok()
		.map(|parsed| parsed.with_timezone(&Utc))
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
	value
		.and_then(Value::as_str)
		.is_some_and(|text| !text.trim().is_empty())
}

fn is_plain_object(value: Option<&Value>) -> bool {
	value.is_some_and(Value::is_object)
}

fn enum_error<T: std::fmt::Display>(field: &str, legal: &[T]) -> String {
	let set = legal
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ");
	format!("{field} must be one of {set}.")
}

/// Validate a candidate log entry against the fixed schema.
///
/// Non-object input short-circuits with a single error; object input has
/// every field checked independently and all failures collected.
pub fn validate_entry(candidate: &Value) -> Validation {
	let mut errors = Vec::new();

	let Some(map) = candidate.as_object() else {
		return Validation {
			valid: false,
			errors: vec!["Log entry must be an object.".to_string()],
		};
	};

	let timestamp_ok = map
		.get("timestamp")
		.and_then(Value::as_str)
		.and_then(parse_instant)
		.is_some();
	if !timestamp_ok {
		errors.push("timestamp must be an ISO string.".to_string());
	}

	let level_ok = map
		.get("level")
		.and_then(Value::as_str)
		.and_then(Level::parse)
		.is_some();
	if !level_ok {
		errors.push(enum_error("level", &Level::ALL));
	}

	let origin_ok = map
		.get("origin")
		.and_then(Value::as_str)
		.and_then(Origin::parse)
		.is_some();
	if !origin_ok {
		errors.push(enum_error("origin", &Origin::ALL));
	}

	let category_ok = map
		.get("category")
		.and_then(Value::as_str)
		.and_then(Category::parse)
		.is_some();
	if !category_ok {
		errors.push(enum_error("category", &Category::ALL));
	}

	if !is_non_empty_string(map.get("message")) {
		errors.push("message must be a non-empty string.".to_string());
	}
	if !is_plain_object(map.get("details")) {
		errors.push("details must be an object.".to_string());
	}
	if !is_non_empty_string(map.get("sessionId")) {
		errors.push("sessionId is required.".to_string());
	}
	if !is_non_empty_string(map.get("requestId")) {
		errors.push("requestId is required.".to_string());
	}
	if !is_plain_object(map.get("context")) {
		errors.push("context must be an object.".to_string());
	}

	Validation {
		valid: errors.is_empty(),
		errors,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn valid_entry() -> Value {
		json!({
			"timestamp": "2026-08-27T10:00:00.000Z",
			"level": "debug",
			"origin": "client",
			"category": "auth",
			"message": "Test message",
			"details": {},
			"sessionId": "session-1",
			"requestId": "request-1",
			"context": {}
		})
	}

	#[test]
	fn test_accepts_valid_entry() {
		let validation = validate_entry(&valid_entry());
		assert!(validation.valid, "errors: {:?}", validation.errors);
		assert!(validation.errors.is_empty());
	}

	#[test]
	fn test_non_object_short_circuits() {
		for candidate in [json!(null), json!(42), json!("text"), json!([1, 2])] {
			let validation = validate_entry(&candidate);
			assert!(!validation.valid);
			assert_eq!(validation.errors, vec!["Log entry must be an object."]);
		}
	}

	#[test]
	fn test_collects_all_failures() {
		let validation = validate_entry(&json!({ "message": "missing fields" }));
		assert!(!validation.valid);
		let joined = validation.errors.join(" ");
		for field in [
			"timestamp",
			"level",
			"origin",
			"category",
			"sessionId",
			"requestId",
			"context",
		] {
			assert!(joined.contains(field), "missing {field} in {joined}");
		}
		assert!(joined.contains("details"));
	}

	#[test]
	fn test_enum_errors_enumerate_legal_set() {
		let mut entry = valid_entry();
		entry["level"] = json!("fatal");
		let validation = validate_entry(&entry);
		assert!(!validation.valid);
		assert_eq!(
			validation.errors,
			vec!["level must be one of debug, info, warn, error."]
		);
	}

	#[test]
	fn test_rejects_array_details() {
		let mut entry = valid_entry();
		entry["details"] = json!([1, 2, 3]);
		let validation = validate_entry(&entry);
		assert_eq!(validation.errors, vec!["details must be an object."]);
	}

	#[test]
	fn test_rejects_blank_identifiers() {
		let mut entry = valid_entry();
		entry["sessionId"] = json!("   ");
		entry["requestId"] = json!("");
		let validation = validate_entry(&entry);
		assert_eq!(
			validation.errors,
			vec!["sessionId is required.", "requestId is required."]
		);
	}

	#[test]
	fn test_rejects_unparseable_timestamp() {
		let mut entry = valid_entry();
		entry["timestamp"] = json!("yesterday");
		let validation = validate_entry(&entry);
		assert_eq!(validation.errors, vec!["timestamp must be an ISO string."]);
	}
}
