// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bounded in-memory log aggregation with batched persistence.
//!
//! [`LogBuffer`] accepts candidate entries as raw JSON, validates and masks
//! them at ingest, keeps a capacity- and retention-bounded window of recent
//! entries, and hands off fixed-size batches to a caller-supplied
//! [`PersistHandler`].

use std::collections::VecDeque;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use crate::export;
use crate::query::{EntryFilter, LogStats};
use crate::schema::{parse_instant, validate_entry};

/// Configuration for a [`LogBuffer`].
#[derive(Debug, Clone)]
pub struct BufferConfig {
	/// Maximum number of retained entries; oldest are evicted past this.
	pub capacity: usize,
	/// How long entries stay in the window; `None` disables time-based
	/// trimming.
	pub retention: Option<Duration>,
	/// Number of pending entries that triggers an automatic flush.
	pub batch_size: usize,
}

impl Default for BufferConfig {
	fn default() -> Self {
		Self {
			capacity: 2000,
			retention: Some(Duration::days(30)),
			batch_size: 40,
		}
	}
}

/// Receiver for completed batches.
///
/// Invoked synchronously with exactly the entries accumulated since the last
/// flush, in insertion order, at most once per flush. The buffer neither
/// retries nor swallows handler errors; retry and backoff policy belong to
/// the handler's owner.
pub trait PersistHandler {
	fn persist(&mut self, batch: &[LogEntry]) -> anyhow::Result<()>;
}

impl<F> PersistHandler for F
where
	F: FnMut(&[LogEntry]) -> anyhow::Result<()>,
{
	fn persist(&mut self, batch: &[LogEntry]) -> anyhow::Result<()> {
		self(batch)
	}
}

/// Bounded aggregator for structured log entries.
///
/// Entries enter through [`add`](Self::add) as arbitrary JSON, are validated
/// against the fixed schema, have sensitive fields masked, and are then
/// retained oldest-first. Every operation runs synchronously to completion;
/// the buffer exclusively owns its window and pending batch, and read
/// operations hand out copies.
pub struct LogBuffer {
	config: BufferConfig,
	clock: Box<dyn Clock>,
	persist: Option<Box<dyn PersistHandler>>,
	window: VecDeque<LogEntry>,
	batch: Vec<LogEntry>,
	last_flush: Option<DateTime<Utc>>,
}

impl LogBuffer {
	/// Create a buffer with the given configuration, the system clock, and
	/// no persistence handler.
	pub fn new(config: BufferConfig) -> Self {
		Self {
			window: VecDeque::with_capacity(config.capacity.min(1024)),
			config,
			clock: Box::new(SystemClock),
			persist: None,
			batch: Vec::new(),
			last_flush: None,
		}
	}

	/// Replace the time source. Retention trimming and timestamp fill-in
	/// both read from this clock.
	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	/// Attach the persistence handler that receives completed batches.
	pub fn with_persist_handler(mut self, handler: impl PersistHandler + 'static) -> Self {
		self.persist = Some(Box::new(handler));
		self
	}

	/// Fill in defaults on a candidate entry before validation: a missing
	/// timestamp becomes "now", a parseable one is reformatted to the
	/// canonical RFC 3339 form, and missing or scalar `details`/`context`
	/// become empty objects. Arrays are left alone so the validator can
	/// reject them.
	fn normalize(&self, entry: Value) -> Value {
		let mut map = match entry {
			Value::Object(map) => map,
			other => return other,
		};

		let canonical = match map.get("timestamp") {
			None | Some(Value::Null) => Some(self.clock.now()),
			Some(Value::String(text)) if text.trim().is_empty() => Some(self.clock.now()),
			Some(Value::String(text)) => parse_instant(text),
			// Wrong type: leave it for the validator to flag.
			Some(_) => None,
		};
		if let Some(instant) = canonical {
			map.insert(
				"timestamp".to_string(),
				Value::String(instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
			);
		}

		for field in ["details", "context"] {
			let keep = map
				.get(field)
				.is_some_and(|value| value.is_object() || value.is_array());
			if !keep {
				map.insert(field.to_string(), Value::Object(serde_json::Map::new()));
			}
		}

		Value::Object(map)
	}

	/// Ingest one candidate entry.
	///
	/// Normalizes, validates (failing with [`LogError::Validation`] and no
	/// state change on a malformed entry), masks sensitive fields, appends
	/// to the window with capacity and retention trimming, and auto-flushes
	/// once the pending batch reaches the configured size. Returns the
	/// stored, masked entry.
	pub fn add(&mut self, entry: Value) -> Result<LogEntry> {
		let normalized = self.normalize(entry);
		let validation = validate_entry(&normalized);
		if !validation.valid {
			return Err(LogError::Validation {
				errors: validation.errors,
			});
		}

		let masked = perfume_redact::mask_sensitive_fields(&normalized);
		let stored: LogEntry = serde_json::from_value(masked)?;

		self.window.push_back(stored.clone());
		while self.window.len() > self.config.capacity {
			self.window.pop_front();
		}
		self.trim_retention();

		self.batch.push(stored.clone());
		if self.batch.len() >= self.config.batch_size {
			self.flush()?;
		}

		Ok(stored)
	}

	/// Ingest a JSON array of candidate entries, in order.
	///
	/// Fails with [`LogError::NotAnArray`] for non-array input. The first
	/// failing entry aborts the rest, but entries added before it stay
	/// committed.
	pub fn add_many(&mut self, entries: Value) -> Result<Vec<LogEntry>> {
		let Value::Array(items) = entries else {
			return Err(LogError::NotAnArray);
		};
		items.into_iter().map(|entry| self.add(entry)).collect()
	}

	/// Hand the pending batch to the persistence handler and clear it.
	///
	/// With no handler configured or nothing pending this only clears the
	/// batch and returns empty. The batch is cleared before the handler
	/// runs, so a handler error (surfaced as [`LogError::Persist`]) leaves
	/// those entries out of the pending set; they remain in the window.
	pub fn flush(&mut self) -> Result<Vec<LogEntry>> {
		if self.persist.is_none() || self.batch.is_empty() {
			self.batch.clear();
			return Ok(Vec::new());
		}

		let payload = std::mem::take(&mut self.batch);
		self.last_flush = Some(self.clock.now());
		debug!(count = payload.len(), "flushing log batch");
		if let Some(handler) = self.persist.as_mut() {
			handler.persist(&payload).map_err(LogError::Persist)?;
		}
		Ok(payload)
	}

	fn trim_retention(&mut self) {
		let Some(retention) = self.config.retention else {
			return;
		};
		let threshold = self.clock.now() - retention;
		while self
			.window
			.front()
			.is_some_and(|entry| entry.timestamp < threshold)
		{
			self.window.pop_front();
		}
	}

	/// Snapshot of the retained window, filtered. An empty filter returns
	/// the whole window, oldest first.
	pub fn entries(&self, filter: &EntryFilter) -> Vec<LogEntry> {
		self.window
			.iter()
			.filter(|entry| filter.matches(entry))
			.cloned()
			.collect()
	}

	/// Counts and timing aggregates over the filtered window.
	pub fn stats(&self, filter: &EntryFilter) -> LogStats {
		LogStats::collect(self.window.iter().filter(|entry| filter.matches(entry)))
	}

	/// The whole window as line-delimited JSON.
	pub fn to_jsonl(&self) -> Result<String> {
		export::to_jsonl(&self.window)
	}

	/// The whole window as a fixed-column CSV table.
	pub fn to_csv(&self) -> String {
		export::to_csv(&self.window)
	}

	/// Number of retained entries.
	pub fn len(&self) -> usize {
		self.window.len()
	}

	/// Whether the window is empty.
	pub fn is_empty(&self) -> bool {
		self.window.is_empty()
	}

	/// Configured window capacity.
	pub fn capacity(&self) -> usize {
		self.config.capacity
	}

	/// Number of entries awaiting the next flush.
	pub fn pending_len(&self) -> usize {
		self.batch.len()
	}

	/// When the most recent flush happened, if any.
	pub fn last_flush_at(&self) -> Option<DateTime<Utc>> {
		self.last_flush
	}

	/// Drop every retained entry. The pending batch is untouched.
	pub fn clear(&mut self) {
		self.window.clear();
	}
}

impl Default for LogBuffer {
	fn default() -> Self {
		Self::new(BufferConfig::default())
	}
}
