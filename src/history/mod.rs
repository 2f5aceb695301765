pub mod draft;
pub mod edit;
pub mod stats;

pub use draft::SessionDraft;
pub use edit::normalize_session;
pub use stats::{compute_stats, sort_sessions, HistoryStats, SortBy, SortOrder};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{FeedingSession, VolumeUnit};
use crate::units;

/// Finished sessions, in the order they were recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SessionHistory {
    sessions: Vec<FeedingSession>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[FeedingSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&FeedingSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn push(&mut self, session: FeedingSession) {
        self.sessions.push(session);
    }

    /// Normalizes `session` and stores it, replacing the session with the same
    /// id or appending a new one. On error the history is untouched.
    pub fn apply_edit(&mut self, session: FeedingSession) -> Result<&FeedingSession> {
        let normalized = normalize_session(session)?;
        let index = match self.sessions.iter().position(|s| s.id == normalized.id) {
            Some(index) => {
                self.sessions[index] = normalized;
                index
            }
            None => {
                self.sessions.push(normalized);
                self.sessions.len() - 1
            }
        };
        Ok(&self.sessions[index])
    }

    pub fn remove(&mut self, id: &str) -> Option<FeedingSession> {
        let index = self.sessions.iter().position(|s| s.id == id)?;
        Some(self.sessions.remove(index))
    }

    /// Returns how many bottle amounts were rewritten.
    pub fn convert_volume(&mut self, to: VolumeUnit) -> usize {
        self.sessions
            .iter_mut()
            .map(|session| units::convert_session(session, to))
            .sum()
    }

    pub fn sorted(&self, by: SortBy, order: SortOrder, unit: VolumeUnit) -> Vec<&FeedingSession> {
        sort_sessions(&self.sessions, by, order, unit)
    }

    pub fn stats(&self, unit: VolumeUnit) -> HistoryStats {
        compute_stats(&self.sessions, unit)
    }
}
