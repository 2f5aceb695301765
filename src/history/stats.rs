use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{FeedingSession, VolumeUnit};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Date,
    Volume,
    Duration,
}

/// `Desc` lists newest, largest and longest first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

pub fn sort_sessions<'a>(
    sessions: &'a [FeedingSession],
    by: SortBy,
    order: SortOrder,
    unit: VolumeUnit,
) -> Vec<&'a FeedingSession> {
    let mut sorted: Vec<&FeedingSession> = sessions.iter().collect();
    sorted.sort_by(|a, b| {
        let ascending = match by {
            SortBy::Date => a.start_time.cmp(&b.start_time),
            SortBy::Volume => a
                .total_volume(unit)
                .partial_cmp(&b.total_volume(unit))
                .unwrap_or(Ordering::Equal),
            SortBy::Duration => a.duration_secs.cmp(&b.duration_secs),
        };
        match order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    });
    sorted
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_feeds: usize,
    /// Seconds, rounded to the nearest whole second.
    pub avg_duration_secs: u64,
    /// Bottle volume per feed in `unit`, one decimal place. Breast-only feeds
    /// count towards the denominator.
    pub avg_volume: f64,
    pub unit: VolumeUnit,
}

pub fn compute_stats(sessions: &[FeedingSession], unit: VolumeUnit) -> HistoryStats {
    let total_feeds = sessions.len();
    if total_feeds == 0 {
        return HistoryStats {
            total_feeds,
            avg_duration_secs: 0,
            avg_volume: 0.0,
            unit,
        };
    }

    let total_duration: u64 = sessions.iter().map(|s| s.duration_secs).sum();
    let total_volume: f64 = sessions.iter().map(|s| s.total_volume(unit)).sum();
    let feeds = total_feeds as f64;

    HistoryStats {
        total_feeds,
        avg_duration_secs: (total_duration as f64 / feeds).round() as u64,
        avg_volume: (total_volume / feeds * 10.0).round() / 10.0,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreastSide, FeedingInterval, FeedingMode};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(mins: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(mins)
    }

    fn session(id: &str, start: i64, secs: u64, mode: FeedingMode) -> FeedingSession {
        let end = at(start) + Duration::seconds(secs as i64);
        FeedingSession {
            id: id.into(),
            start_time: at(start),
            end_time: end,
            duration_secs: secs,
            mode,
            intervals: vec![FeedingInterval::closed(mode, at(start), end)],
            paused_intervals: Vec::new(),
        }
    }

    fn fixture() -> Vec<FeedingSession> {
        vec![
            session("early", 0, 600, FeedingMode::bottle(3.0, VolumeUnit::Oz)),
            session("late", 180, 300, FeedingMode::breast(BreastSide::Left)),
            session("middle", 90, 901, FeedingMode::bottle(150.0, VolumeUnit::Ml)),
        ]
    }

    fn ids(sorted: &[&FeedingSession]) -> Vec<String> {
        sorted.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn default_sort_is_newest_first() {
        let sessions = fixture();
        let sorted = sort_sessions(&sessions, SortBy::default(), SortOrder::default(), VolumeUnit::Oz);
        assert_eq!(ids(&sorted), ["late", "middle", "early"]);
        let sorted = sort_sessions(&sessions, SortBy::Date, SortOrder::Asc, VolumeUnit::Oz);
        assert_eq!(ids(&sorted), ["early", "middle", "late"]);
    }

    #[test]
    fn volume_sort_compares_across_units() {
        let sessions = fixture();
        // 150 ml is about 5.07 oz, so it outranks 3 oz.
        let sorted = sort_sessions(&sessions, SortBy::Volume, SortOrder::Desc, VolumeUnit::Oz);
        assert_eq!(ids(&sorted), ["middle", "early", "late"]);
    }

    #[test]
    fn duration_sort_ascending() {
        let sessions = fixture();
        let sorted = sort_sessions(&sessions, SortBy::Duration, SortOrder::Asc, VolumeUnit::Ml);
        assert_eq!(ids(&sorted), ["late", "early", "middle"]);
    }

    #[test]
    fn stats_average_over_all_feeds() {
        let stats = compute_stats(&fixture(), VolumeUnit::Oz);
        assert_eq!(stats.total_feeds, 3);
        // (600 + 300 + 901) / 3 = 600.33
        assert_eq!(stats.avg_duration_secs, 600);
        // (3 + 5.072) / 3 = 2.69
        assert_eq!(stats.avg_volume, 2.7);
    }

    #[test]
    fn empty_history_has_zeroed_stats() {
        let stats = compute_stats(&[], VolumeUnit::Ml);
        assert_eq!(stats.total_feeds, 0);
        assert_eq!(stats.avg_duration_secs, 0);
        assert_eq!(stats.avg_volume, 0.0);
    }
}
