use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gap inside a session during which no interval was running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PausedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PausedInterval {
    pub fn duration_secs(&self) -> u64 {
        (self.end - self.start).num_seconds().max(0) as u64
    }

    /// Seconds of this pause that fall inside `[start, end)`.
    pub fn overlap_secs(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        if hi <= lo {
            return 0;
        }
        (hi - lo).num_seconds() as u64
    }
}
