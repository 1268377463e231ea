// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Serialized export of log entries.

use crate::entry::LogEntry;
use crate::error::Result;

/// Column order for the CSV export.
const CSV_COLUMNS: &str = "timestamp,level,origin,category,message,sessionId,requestId";

/// Serialize entries as line-delimited JSON: one record per line, no
/// trailing newline.
pub fn to_jsonl<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Result<String> {
	let lines = entries
		.into_iter()
		.map(serde_json::to_string)
		.collect::<std::result::Result<Vec<_>, _>>()?;
	Ok(lines.join("\n"))
}

/// Serialize entries as a fixed-column CSV table.
///
/// Every cell is double-quoted with embedded quotes doubled; empty input
/// yields only the header row.
pub fn to_csv<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> String {
	let mut out = String::from(CSV_COLUMNS);
	for entry in entries {
		out.push('\n');
		let row = [
			entry.timestamp_string(),
			entry.level.to_string(),
			entry.origin.to_string(),
			entry.category.to_string(),
			entry.message.clone(),
			entry.session_id.clone(),
			entry.request_id.clone(),
		];
		let cells = row
			.iter()
			.map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
			.collect::<Vec<_>>();
		out.push_str(&cells.join(","));
	}
	out
}
