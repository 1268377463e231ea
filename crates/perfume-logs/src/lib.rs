// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-process log aggregation for the Perfume spreadsheet application.
//!
//! This crate provides:
//! - [`validate_entry`] - Schema validation for candidate entries
//! - [`LogEntry`] - The typed, masked entry stored in the buffer
//! - [`LogBuffer`] - Bounded retention window with batched persistence
//! - [`EntryFilter`] / [`LogStats`] - Filtered queries and statistics
//! - [`to_jsonl`] / [`to_csv`] - Serialized export of entry snapshots
//!
//! Sensitive-field masking lives in the `perfume-redact` crate and is
//! applied exactly once, at ingest, before an entry reaches the window.
//!
//! # Usage
//!
//! ```
//! use perfume_logs::{BufferConfig, EntryFilter, LogBuffer};
//! use serde_json::json;
//!
//! let mut buffer = LogBuffer::new(BufferConfig::default());
//! buffer.add(json!({
//!     "level": "info",
//!     "origin": "server",
//!     "category": "sheet",
//!     "message": "recalculated",
//!     "details": { "durationMs": 12, "apiKey": "sk-123" },
//!     "sessionId": "session-1",
//!     "requestId": "req-1",
//! }))?;
//!
//! let stats = buffer.stats(&EntryFilter::new());
//! assert_eq!(stats.total, 1);
//! # Ok::<(), perfume_logs::LogError>(())
//! ```

mod buffer;
mod clock;
mod entry;
mod error;
mod export;
mod query;
mod schema;

pub use buffer::{BufferConfig, LogBuffer, PersistHandler};
pub use clock::{Clock, SystemClock};
pub use entry::{Category, Level, LogEntry, Origin};
pub use error::{LogError, Result};
pub use export::{to_csv, to_jsonl};
pub use query::{EntryFilter, LogStats, TimingStats};
pub use schema::{parse_instant, validate_entry, Validation};
