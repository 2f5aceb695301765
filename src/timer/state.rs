use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FeedingError, Result};
use crate::models::{active_secs, FeedingInterval, FeedingMode, FeedingSession, PausedInterval, VolumeUnit};
use crate::units;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrackerStatus {
    Idle,
    Active,
    Paused,
}

impl Default for TrackerStatus {
    fn default() -> Self {
        TrackerStatus::Idle
    }
}

/// The feeding currently being timed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InProgressSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    /// Mode of the open interval, or of the interval `resume` will open.
    pub mode: FeedingMode,
    pub intervals: Vec<FeedingInterval>,
    pub paused_intervals: Vec<PausedInterval>,
    /// Start of the running interval; `None` while paused.
    pub interval_start: Option<DateTime<Utc>>,
    /// Start of the open pause; `None` while running.
    pub pause_start: Option<DateTime<Utc>>,
}

impl InProgressSession {
    fn close_interval(&mut self, now: DateTime<Utc>) {
        if let Some(start) = self.interval_start.take() {
            self.intervals
                .push(FeedingInterval::closed(self.mode, start, now.max(start)));
        }
    }

    fn close_pause(&mut self, now: DateTime<Utc>) {
        if let Some(start) = self.pause_start.take() {
            self.paused_intervals.push(PausedInterval {
                start,
                end: now.max(start),
            });
        }
    }
}

/// Reducer state for the feeding clock: idle → active → (paused ⇄ active) → idle.
///
/// Every transition takes `now` explicitly; the controller feeds it from its clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedingState {
    pub session: Option<InProgressSession>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub status: TrackerStatus,
    pub session_id: Option<String>,
    pub mode: Option<FeedingMode>,
    pub started_at: Option<DateTime<Utc>>,
    pub active_secs: u64,
    pub interval_count: usize,
    /// Paused for at least the idle limit; the caller may offer to stop.
    pub idle_expired: bool,
}

impl FeedingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TrackerStatus {
        match &self.session {
            None => TrackerStatus::Idle,
            Some(session) if session.pause_start.is_some() => TrackerStatus::Paused,
            Some(_) => TrackerStatus::Active,
        }
    }

    pub fn current_mode(&self) -> Option<FeedingMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn begin_session(
        &mut self,
        session_id: String,
        mode: FeedingMode,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.session.is_some() {
            return Err(FeedingError::AlreadyActive);
        }
        self.session = Some(InProgressSession {
            id: session_id,
            started_at: now,
            mode,
            intervals: Vec::new(),
            paused_intervals: Vec::new(),
            interval_start: Some(now),
            pause_start: None,
        });
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<()> {
        let session = self.session.as_mut().ok_or(FeedingError::NotActive)?;
        if session.pause_start.is_some() {
            return Err(FeedingError::AlreadyPaused);
        }
        session.close_interval(now);
        session.pause_start = Some(now);
        Ok(())
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<()> {
        let session = self.session.as_mut().ok_or(FeedingError::NotActive)?;
        let Some(paused_at) = session.pause_start else {
            return Err(FeedingError::NotPaused);
        };
        session.close_pause(now);
        session.interval_start = Some(now.max(paused_at));
        Ok(())
    }

    /// Splits the session: while running, the open interval is closed and a new
    /// one starts with `mode`. While paused, `mode` is what `resume` will use.
    pub fn change_mode(&mut self, mode: FeedingMode, now: DateTime<Utc>) -> Result<()> {
        let session = self.session.as_mut().ok_or(FeedingError::NotActive)?;
        if session.pause_start.is_none() {
            let start = session.interval_start.unwrap_or(now);
            session.close_interval(now);
            session.interval_start = Some(now.max(start));
        }
        session.mode = mode;
        Ok(())
    }

    /// Closes whatever is open and hands back the finished session, leaving the
    /// state idle.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<FeedingSession> {
        let mut session = self.session.take().ok_or(FeedingError::NotActive)?;
        session.close_interval(now);
        session.close_pause(now);

        // Paused time comes off the interval total as a whole, clamped at zero.
        let interval_secs: u64 = session.intervals.iter().map(|i| i.duration_secs).sum();
        let paused_secs: u64 = session
            .paused_intervals
            .iter()
            .map(PausedInterval::duration_secs)
            .sum();
        let duration_secs = interval_secs.saturating_sub(paused_secs);
        let mode = session
            .intervals
            .last()
            .map(|interval| interval.mode)
            .unwrap_or(session.mode);

        Ok(FeedingSession {
            id: session.id,
            start_time: session.started_at,
            end_time: now.max(session.started_at),
            duration_secs,
            mode,
            intervals: session.intervals,
            paused_intervals: session.paused_intervals,
        })
    }

    pub fn cancel(&mut self) -> Option<InProgressSession> {
        self.session.take()
    }

    /// Active seconds so far, counting the running interval up to `now`.
    pub fn active_secs(&self, now: DateTime<Utc>) -> u64 {
        let Some(session) = &self.session else {
            return 0;
        };
        let closed = active_secs(&session.intervals, &session.paused_intervals);
        let running = session
            .interval_start
            .map(|start| crate::models::seconds_between(start, now))
            .unwrap_or(0);
        closed + running
    }

    /// Whether the session has sat paused for `limit` or longer. Only reports;
    /// stopping is left to the caller.
    pub fn idle_expired(&self, now: DateTime<Utc>, limit: Duration) -> bool {
        self.session
            .as_ref()
            .and_then(|session| session.pause_start)
            .is_some_and(|paused_at| now.signed_duration_since(paused_at) >= limit)
    }

    pub fn snapshot(&self, now: DateTime<Utc>, idle_limit: Duration) -> TrackerSnapshot {
        TrackerSnapshot {
            status: self.status(),
            session_id: self.session.as_ref().map(|s| s.id.clone()),
            mode: self.current_mode(),
            started_at: self.session.as_ref().map(|s| s.started_at),
            active_secs: self.active_secs(now),
            interval_count: self.session.as_ref().map_or(0, |s| s.intervals.len()),
            idle_expired: self.idle_expired(now, idle_limit),
        }
    }

    /// Rewrites bottle amounts of the in-progress session into `to`.
    pub fn convert_volume(&mut self, to: VolumeUnit) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };
        let mut converted = usize::from(units::convert_mode(&mut session.mode, to));
        for interval in &mut session.intervals {
            converted += usize::from(units::convert_mode(&mut interval.mode, to));
        }
        converted
    }
}
