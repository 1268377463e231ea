// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Injected time source.
//!
//! Retention trimming and timestamp normalization both depend on "now", so
//! the buffer takes its clock as a dependency instead of reading the system
//! time directly. Tests drive time explicitly with a closure clock.

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock {
	fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

impl<F> Clock for F
where
	F: Fn() -> DateTime<Utc>,
{
	fn now(&self) -> DateTime<Utc> {
		self()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_closure_clock() {
		let fixed = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
		let clock = move || fixed;
		assert_eq!(clock.now(), fixed);
	}
}
