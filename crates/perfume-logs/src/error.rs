// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the log buffer.

use thiserror::Error;

/// Log buffer errors.
#[derive(Debug, Error)]
pub enum LogError {
	/// A candidate entry failed schema validation. Carries every field-level
	/// error the validator collected.
	#[error("Invalid log entry: {}", .errors.join("; "))]
	Validation { errors: Vec<String> },

	/// `add_many` was handed something other than an array.
	#[error("add_many expects an array of log entries")]
	NotAnArray,

	/// The caller-supplied persistence handler failed. The batch has already
	/// been cleared by the time the handler runs.
	#[error("persist handler failed: {0}")]
	Persist(#[source] anyhow::Error),

	/// Serialization error.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type alias for log buffer operations.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validation_error_joins_field_errors() {
		let err = LogError::Validation {
			errors: vec![
				"timestamp must be an ISO string.".to_string(),
				"sessionId is required.".to_string(),
			],
		};
		assert_eq!(
			err.to_string(),
			"Invalid log entry: timestamp must be an ISO string.; sessionId is required."
		);
	}

	#[test]
	fn test_persist_error_wraps_handler_error() {
		let err = LogError::Persist(anyhow::anyhow!("disk full"));
		assert!(err.to_string().contains("disk full"));
	}
}
