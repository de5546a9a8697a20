//! Late-fee arithmetic.
//!
//! Fees are kept in the smallest currency unit (cents) and only rendered as
//! dollars for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monetary fee, in cents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LateFee(u64);

impl LateFee {
    pub const ZERO: LateFee = LateFee(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// `days` whole days at `cents_per_day`.
    pub fn for_days(days: u64, cents_per_day: u64) -> Self {
        Self(days.saturating_mul(cents_per_day))
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for LateFee {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Lateness assessed when a book comes back after its due date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateReturn {
    /// Whole days past the due date (rounded down).
    pub days_late: u64,
    pub fee: LateFee,
}

impl LateReturn {
    /// Assess a return at `now` against `due`.
    ///
    /// Returns `None` unless `now` is strictly after `due`. A return less than a
    /// full day late is still late, with a zero fee.
    pub fn assess(due: DateTime<Utc>, now: DateTime<Utc>, cents_per_day: u64) -> Option<Self> {
        if now <= due {
            return None;
        }
        let days_late = u64::try_from((now - due).num_days()).unwrap_or(0);
        Some(Self {
            days_late,
            fee: LateFee::for_days(days_late, cents_per_day),
        })
    }
}
