//! Daily telemetry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The per-day observational scalar the host records at close.
///
/// Purely observational; nothing in the engine reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Trading day the record describes.
    pub date: NaiveDate,
    /// Number of open positions at the end of the day.
    pub num_positions: usize,
}

impl DailyRecord {
    /// Create a record for `date`.
    pub const fn new(date: NaiveDate, num_positions: usize) -> Self {
        Self {
            date,
            num_positions,
        }
    }
}

impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: num_positions={}", self.date, self.num_positions)
    }
}
