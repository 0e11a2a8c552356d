use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Half-open time range `[start, end)`. The open end is what makes
/// back-to-back bookings legal: `[a, b)` and `[b, c)` do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if start >= end {
            return Err(AppError::Validation(
                "Interval start must be before its end".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn shift(&self, minutes: i64) -> TimeInterval {
        TimeInterval {
            start: self.start + Duration::minutes(minutes),
            end: self.end + Duration::minutes(minutes),
        }
    }
}
