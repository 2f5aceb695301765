use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FeedingMode;

/// One contiguous span of a single feeding mode within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedingInterval {
    pub mode: FeedingMode,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Whole seconds between `start_time` and `end_time`.
    #[serde(rename = "duration")]
    pub duration_secs: u64,
}

impl FeedingInterval {
    /// Builds a closed interval, deriving the duration from the timestamps.
    /// An `end` before `start` yields a zero duration; callers that accept user
    /// input validate ordering first.
    pub fn closed(mode: FeedingMode, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            mode,
            start_time: start,
            end_time: end,
            duration_secs: seconds_between(start, end),
        }
    }

    pub fn recompute_duration(&mut self) {
        self.duration_secs = seconds_between(self.start_time, self.end_time);
    }

    pub fn is_well_ordered(&self) -> bool {
        self.end_time >= self.start_time
    }
}

/// Floor of the elapsed seconds, clamped at zero.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    (end - start).num_seconds().max(0) as u64
}
