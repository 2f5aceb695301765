use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::history::{HistoryStats, SessionHistory, SortBy, SortOrder};
use crate::models::{FeedingMode, FeedingSession, VolumeUnit};
use crate::settings::Settings;
use crate::units;
use crate::{log_debug, log_info, log_warn};

use super::{FeedingState, TrackerSnapshot};

const ENABLE_LOGS: bool = true;

/// Owns the feeding clock, the session history and the display settings.
///
/// All operations are synchronous and act on `clock.now()`. A failed
/// operation leaves the tracker unchanged.
#[derive(Debug)]
pub struct Tracker<C: Clock = SystemClock> {
    clock: C,
    settings: Settings,
    state: FeedingState,
    history: SessionHistory,
}

impl Tracker<SystemClock> {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Tracker<C> {
    pub fn with_clock(settings: Settings, clock: C) -> Self {
        Self {
            clock,
            settings,
            state: FeedingState::new(),
            history: SessionHistory::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &FeedingState {
        &self.state
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        self.state
            .snapshot(self.clock.now(), self.settings.idle_timeout())
    }

    pub fn start(&mut self, mode: FeedingMode) -> Result<TrackerSnapshot> {
        let mode = self.in_display_unit(mode);
        let now = self.clock.now();
        let session_id = Uuid::new_v4().to_string();
        self.state.begin_session(session_id.clone(), mode, now)?;
        log_info!("feeding {session_id} started ({})", mode.label());
        Ok(self.snapshot())
    }

    pub fn pause(&mut self) -> Result<TrackerSnapshot> {
        self.state.pause(self.clock.now())?;
        log_debug!("feeding paused");
        Ok(self.snapshot())
    }

    pub fn resume(&mut self) -> Result<TrackerSnapshot> {
        self.state.resume(self.clock.now())?;
        log_debug!("feeding resumed");
        Ok(self.snapshot())
    }

    pub fn change_mode(&mut self, mode: FeedingMode) -> Result<TrackerSnapshot> {
        let mode = self.in_display_unit(mode);
        self.state.change_mode(mode, self.clock.now())?;
        log_debug!("feeding mode changed to {}", mode.label());
        Ok(self.snapshot())
    }

    /// Finishes the running session and records it in the history.
    pub fn stop(&mut self) -> Result<FeedingSession> {
        let session = self.state.finish(self.clock.now())?;
        log_info!(
            "feeding {} stopped: {}s active over {} interval(s), {}s paused",
            session.id,
            session.duration_secs,
            session.intervals.len(),
            session.paused_secs()
        );
        self.history.push(session.clone());
        Ok(session)
    }

    /// Drops the running session without recording it. Returns whether there
    /// was one.
    pub fn cancel(&mut self) -> bool {
        match self.state.cancel() {
            Some(session) => {
                log_info!("feeding {} cancelled", session.id);
                true
            }
            None => false,
        }
    }

    /// Replaces (or adds) a session with a hand-edited version.
    pub fn edit_session(&mut self, session: FeedingSession) -> Result<FeedingSession> {
        let id = session.id.clone();
        match self.history.apply_edit(session) {
            Ok(stored) => {
                log_info!("feeding {id} edited");
                Ok(stored.clone())
            }
            Err(err) => {
                log_warn!("edit of feeding {id} rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn delete_session(&mut self, id: &str) -> Option<FeedingSession> {
        let removed = self.history.remove(id);
        if removed.is_none() {
            log_warn!("no feeding {id} to delete");
        }
        removed
    }

    /// Switches the display unit and rewrites every recorded bottle amount,
    /// including the running session. Returns how many amounts changed.
    pub fn convert_volume_unit(&mut self, unit: VolumeUnit) -> usize {
        if unit == self.settings.volume_unit {
            return 0;
        }
        let converted = self.history.convert_volume(unit) + self.state.convert_volume(unit);
        log_info!(
            "volume unit {} -> {}: {converted} amount(s) converted",
            self.settings.volume_unit.as_str(),
            unit.as_str()
        );
        self.settings.volume_unit = unit;
        converted
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.settings.timezone = timezone.into();
    }

    pub fn sorted_history(&self, by: SortBy, order: SortOrder) -> Vec<&FeedingSession> {
        self.history.sorted(by, order, self.settings.volume_unit)
    }

    pub fn stats(&self) -> HistoryStats {
        self.history.stats(self.settings.volume_unit)
    }

    fn in_display_unit(&self, mut mode: FeedingMode) -> FeedingMode {
        units::convert_mode(&mut mode, self.settings.volume_unit);
        mode
    }
}
