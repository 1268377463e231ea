// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Sensitive-field masking for structured log payloads.
//!
//! This crate walks arbitrarily nested JSON values and replaces anything
//! stored under a credential-looking key (`password`, `token`, `apiKey`, ...)
//! with a fixed [`MASK_TOKEN`] placeholder. Matching is a case-insensitive
//! substring check, so `apiKeyValue` and `cardNumber` are both caught.
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//!
//! let masked = perfume_redact::mask_sensitive_fields(&json!({
//!     "user": "alice",
//!     "password": "hunter2",
//! }));
//! assert_eq!(masked["password"], perfume_redact::MASK_TOKEN);
//! assert_eq!(masked["user"], "alice");
//! ```

use serde_json::Value;

/// Replacement value substituted for any sensitive field's content.
pub const MASK_TOKEN: &str = "[MASKED]";

/// Keywords that mark a key as sensitive when they appear anywhere in its
/// lowercased form.
const SENSITIVE_KEYWORDS: [&str; 10] = [
	"password",
	"passwd",
	"token",
	"secret",
	"key",
	"apikey",
	"card",
	"authorization",
	"auth",
	"credential",
];

/// Maximum nesting depth the masker will descend into. Subtrees past this
/// depth collapse to the mask token rather than being traversed, which
/// bounds recursion on pathologically deep payloads without letting a
/// sensitive key below the cap through unmasked.
const MAX_DEPTH: usize = 128;

/// Returns true if `key` names a sensitive field.
pub fn is_sensitive_key(key: &str) -> bool {
	if key.is_empty() {
		return false;
	}
	let lower = key.to_lowercase();
	SENSITIVE_KEYWORDS
		.iter()
		.any(|keyword| lower.contains(keyword))
}

/// Produces a structural clone of `value` with every sensitive leaf redacted.
///
/// A value stored under a sensitive key collapses to [`MASK_TOKEN`] whatever
/// its type, with two exceptions: `null` stays `null`, and an array becomes
/// an array of the same length with every element replaced by the token.
/// Non-sensitive objects and arrays are recursed into; scalars are copied
/// unchanged. Traversal depth is capped, and anything nested deeper than
/// the cap collapses to the token. The input is never mutated.
pub fn mask_sensitive_fields(value: &Value) -> Value {
	mask_at_depth(value, 0)
}

fn mask_at_depth(value: &Value, depth: usize) -> Value {
	if depth >= MAX_DEPTH {
		// Fail closed: an over-deep subtree could hide sensitive keys.
		return Value::String(MASK_TOKEN.to_string());
	}
	match value {
		Value::Object(map) => Value::Object(
			map.iter()
				.map(|(key, child)| {
					let masked = if is_sensitive_key(key) {
						mask_value(child)
					} else {
						mask_at_depth(child, depth + 1)
					};
					(key.clone(), masked)
				})
				.collect(),
		),
		Value::Array(items) => Value::Array(
			items
				.iter()
				.map(|item| mask_at_depth(item, depth + 1))
				.collect(),
		),
		scalar => scalar.clone(),
	}
}

/// Redacts a value that sits directly under a sensitive key.
fn mask_value(value: &Value) -> Value {
	match value {
		Value::Null => Value::Null,
		Value::Array(items) => Value::Array(
			items
				.iter()
				.map(|_| Value::String(MASK_TOKEN.to_string()))
				.collect(),
		),
		_ => Value::String(MASK_TOKEN.to_string()),
	}
}
