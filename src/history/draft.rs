use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{FeedingError, Result};
use crate::format::resolve_zone;
use crate::models::{BreastSide, FeedingInterval, FeedingMode, FeedingSession};

use super::edit::normalize_session;

const ADDED_INTERVAL_MINUTES: i64 = 5;
const BLANK_SESSION_MINUTES: i64 = 15;

/// Working copy of a session while it is being edited by hand.
///
/// Nothing here is checked until [`SessionDraft::finish`], which runs the same
/// validation as a direct edit.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDraft {
    session: FeedingSession,
}

impl SessionDraft {
    pub fn from_session(session: &FeedingSession) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// A manually entered feed: one breast/left interval starting at `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        let mode = FeedingMode::breast(BreastSide::Left);
        let interval =
            FeedingInterval::closed(mode, now, now + Duration::minutes(BLANK_SESSION_MINUTES));
        Self {
            session: FeedingSession {
                id: format!("new-{}", Uuid::new_v4()),
                start_time: interval.start_time,
                end_time: interval.end_time,
                duration_secs: interval.duration_secs,
                mode,
                intervals: vec![interval],
                paused_intervals: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.session.id
    }

    pub fn intervals(&self) -> &[FeedingInterval] {
        &self.session.intervals
    }

    /// Appends a five minute breast/left interval after the last one.
    pub fn add_interval(&mut self) -> &FeedingInterval {
        let start = self
            .session
            .intervals
            .last()
            .map(|last| last.end_time)
            .unwrap_or(self.session.start_time);
        self.session.intervals.push(FeedingInterval::closed(
            FeedingMode::breast(BreastSide::Left),
            start,
            start + Duration::minutes(ADDED_INTERVAL_MINUTES),
        ));
        &self.session.intervals[self.session.intervals.len() - 1]
    }

    pub fn remove_interval(&mut self, index: usize) -> Result<FeedingInterval> {
        if index >= self.session.intervals.len() {
            return Err(FeedingError::IntervalOutOfRange { index });
        }
        Ok(self.session.intervals.remove(index))
    }

    pub fn set_mode(&mut self, index: usize, mode: FeedingMode) -> Result<()> {
        let interval = self
            .session
            .intervals
            .get_mut(index)
            .ok_or(FeedingError::IntervalOutOfRange { index })?;
        interval.mode = mode;
        Ok(())
    }

    /// Sets both ends of an interval. Ordering is checked on `finish`.
    pub fn set_times(
        &mut self,
        index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        let interval = self
            .session
            .intervals
            .get_mut(index)
            .ok_or(FeedingError::IntervalOutOfRange { index })?;
        interval.start_time = start;
        interval.end_time = end;
        interval.recompute_duration();
        Ok(())
    }

    /// Moves every interval onto `date` as seen in `timezone`, keeping each
    /// wall-clock time. An end that lands before its start rolls over to the
    /// next day. Paused spans shift along with the first interval.
    pub fn move_to_date(&mut self, date: NaiveDate, timezone: &str) {
        let zone = resolve_zone(timezone);
        let onto_date = |at: DateTime<Utc>| -> DateTime<Utc> {
            zone.instant(&date.and_time(zone.local(at).time())).unwrap_or(at)
        };

        let shift = self
            .session
            .intervals
            .first()
            .map(|first| onto_date(first.start_time) - first.start_time);

        for interval in &mut self.session.intervals {
            interval.start_time = onto_date(interval.start_time);
            interval.end_time = onto_date(interval.end_time);
            if interval.end_time < interval.start_time {
                interval.end_time += Duration::days(1);
            }
            interval.recompute_duration();
        }

        if let Some(shift) = shift {
            for pause in &mut self.session.paused_intervals {
                pause.start += shift;
                pause.end += shift;
            }
        }
    }

    /// Validates and normalizes the draft into a session ready to store.
    pub fn finish(self) -> Result<FeedingSession> {
        normalize_session(self.session)
    }
}
