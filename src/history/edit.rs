use crate::error::{FeedingError, Result};
use crate::models::{active_secs, FeedingSession, PausedInterval};

/// Validates a user-edited session and brings it back in line with the model
/// invariants.
///
/// Intervals are sorted by start time and their durations recomputed from the
/// timestamps. An interval that starts before the furthest end seen so far is
/// pushed forward to that end (an interval swallowed entirely becomes
/// zero-length). Overlapping paused spans are merged. Session start, end,
/// duration and mode are then derived from the result. Nothing is returned if
/// any interval or paused span ends before it starts.
pub fn normalize_session(mut session: FeedingSession) -> Result<FeedingSession> {
    if session.intervals.is_empty() {
        return Err(FeedingError::EmptySession);
    }
    if let Some(index) = session.intervals.iter().position(|i| !i.is_well_ordered()) {
        return Err(FeedingError::IntervalEndsBeforeStart { index });
    }
    if let Some(index) = session
        .paused_intervals
        .iter()
        .position(|p| p.end < p.start)
    {
        return Err(FeedingError::PauseEndsBeforeStart { index });
    }

    session.intervals.sort_by_key(|interval| interval.start_time);
    session.paused_intervals = merge_pauses(std::mem::take(&mut session.paused_intervals));

    let mut frontier = session.intervals[0].start_time;
    for interval in &mut session.intervals {
        if interval.start_time < frontier {
            interval.start_time = frontier;
        }
        if interval.end_time < interval.start_time {
            interval.end_time = interval.start_time;
        }
        interval.recompute_duration();
        frontier = interval.end_time;
    }

    // Non-empty was checked on entry.
    let last = &session.intervals[session.intervals.len() - 1];
    session.start_time = session.intervals[0].start_time;
    session.end_time = last.end_time;
    session.mode = last.mode;
    session.duration_secs = active_secs(&session.intervals, &session.paused_intervals);
    Ok(session)
}

/// Sorts paused spans and folds any that overlap or touch into one.
fn merge_pauses(mut pauses: Vec<PausedInterval>) -> Vec<PausedInterval> {
    pauses.sort_by_key(|pause| pause.start);
    let mut merged: Vec<PausedInterval> = Vec::with_capacity(pauses.len());
    for pause in pauses {
        match merged.last_mut() {
            Some(prev) if pause.start <= prev.end => prev.end = prev.end.max(pause.end),
            _ => merged.push(pause),
        }
    }
    merged
}
