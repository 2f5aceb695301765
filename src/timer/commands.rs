use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{FeedingMode, FeedingSession, VolumeUnit};
use crate::settings::Settings;

use super::{Tracker, TrackerSnapshot};

/// A user interaction, as emitted by whatever front end drives the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TrackerEvent {
    Start { mode: FeedingMode },
    Pause,
    Resume,
    Stop,
    Cancel,
    ChangeMode { mode: FeedingMode },
    EditSession { session: FeedingSession },
    DeleteSession { id: String },
    SetVolumeUnit { unit: VolumeUnit },
    SetTimezone { timezone: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventOutcome {
    Snapshot(TrackerSnapshot),
    Recorded { session: FeedingSession },
    Cancelled { had_session: bool },
    Deleted { session: Option<FeedingSession> },
    Converted { amounts: usize },
    Settings(Settings),
}

impl<C: Clock> Tracker<C> {
    pub fn apply(&mut self, event: TrackerEvent) -> Result<EventOutcome> {
        let outcome = match event {
            TrackerEvent::Start { mode } => EventOutcome::Snapshot(self.start(mode)?),
            TrackerEvent::Pause => EventOutcome::Snapshot(self.pause()?),
            TrackerEvent::Resume => EventOutcome::Snapshot(self.resume()?),
            TrackerEvent::ChangeMode { mode } => EventOutcome::Snapshot(self.change_mode(mode)?),
            TrackerEvent::Stop => EventOutcome::Recorded {
                session: self.stop()?,
            },
            TrackerEvent::Cancel => EventOutcome::Cancelled {
                had_session: self.cancel(),
            },
            TrackerEvent::EditSession { session } => EventOutcome::Recorded {
                session: self.edit_session(session)?,
            },
            TrackerEvent::DeleteSession { id } => EventOutcome::Deleted {
                session: self.delete_session(&id),
            },
            TrackerEvent::SetVolumeUnit { unit } => EventOutcome::Converted {
                amounts: self.convert_volume_unit(unit),
            },
            TrackerEvent::SetTimezone { timezone } => {
                self.set_timezone(timezone);
                EventOutcome::Settings(self.settings().clone())
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::FeedingError;
    use crate::models::BreastSide;
    use crate::timer::TrackerStatus;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn events_deserialize_from_tagged_json() {
        let start: TrackerEvent = serde_json::from_str(
            r#"{"event":"start","mode":{"type":"bottle","amount":4,"unit":"oz"}}"#,
        )
        .unwrap();
        assert_eq!(
            start,
            TrackerEvent::Start {
                mode: FeedingMode::bottle(4.0, VolumeUnit::Oz)
            }
        );

        let change: TrackerEvent = serde_json::from_str(
            r#"{"event":"changeMode","mode":{"type":"breast","side":"right"}}"#,
        )
        .unwrap();
        assert_eq!(
            change,
            TrackerEvent::ChangeMode {
                mode: FeedingMode::breast(BreastSide::Right)
            }
        );

        let unit: TrackerEvent =
            serde_json::from_str(r#"{"event":"setVolumeUnit","unit":"ml"}"#).unwrap();
        assert_eq!(unit, TrackerEvent::SetVolumeUnit { unit: VolumeUnit::Ml });

        let pause: TrackerEvent = serde_json::from_str(r#"{"event":"pause"}"#).unwrap();
        assert_eq!(pause, TrackerEvent::Pause);
    }

    #[test]
    fn apply_drives_a_full_session() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut tracker = Tracker::with_clock(Settings::default(), ManualClock::new(t0));

        let outcome = tracker
            .apply(TrackerEvent::Start {
                mode: FeedingMode::breast(BreastSide::Left),
            })
            .unwrap();
        match outcome {
            EventOutcome::Snapshot(snapshot) => assert_eq!(snapshot.status, TrackerStatus::Active),
            other => panic!("unexpected outcome {other:?}"),
        }

        tracker.clock().advance(Duration::seconds(45));
        let recorded = tracker.apply(TrackerEvent::Stop).unwrap();
        let EventOutcome::Recorded { session } = recorded else {
            panic!("stop should record a session");
        };
        assert_eq!(session.duration_secs, 45);

        assert_eq!(
            tracker.apply(TrackerEvent::Resume).unwrap_err(),
            FeedingError::NotActive
        );

        let outcome = tracker
            .apply(TrackerEvent::SetTimezone {
                timezone: "+01:00".into(),
            })
            .unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Settings(Settings {
                timezone: "+01:00".into(),
                ..Settings::default()
            })
        );
    }
}
