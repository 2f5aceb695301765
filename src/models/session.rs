use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FeedingInterval, FeedingMode, PausedInterval};

/// One complete feeding episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Active seconds. A stopped session subtracts all paused time; an edited
    /// one subtracts paused time overlapping its intervals.
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    /// Mode of the last interval.
    pub mode: FeedingMode,
    pub intervals: Vec<FeedingInterval>,
    #[serde(default)]
    pub paused_intervals: Vec<PausedInterval>,
}

impl FeedingSession {
    /// Sum of bottle amounts across intervals, expressed in `unit`.
    pub fn total_volume(&self, unit: crate::models::VolumeUnit) -> f64 {
        self.intervals
            .iter()
            .filter_map(|interval| interval.mode.volume_in(unit))
            .sum()
    }

    pub fn paused_secs(&self) -> u64 {
        self.paused_intervals
            .iter()
            .map(PausedInterval::duration_secs)
            .sum()
    }
}

/// Active time across `intervals`, with paused spans that overlap an interval
/// taken back out. Clamped at zero.
pub fn active_secs(intervals: &[FeedingInterval], paused: &[PausedInterval]) -> u64 {
    let total: u64 = intervals.iter().map(|i| i.duration_secs).sum();
    let overlapping: u64 = paused
        .iter()
        .flat_map(move |pause| {
            intervals
                .iter()
                .map(move |i| pause.overlap_secs(i.start_time, i.end_time))
        })
        .sum();
    total.saturating_sub(overlapping)
}
