use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use feedtrack_lib::{
    BreastSide, FeedingError, FeedingMode, ManualClock, SessionDraft, Settings, SortBy,
    SortOrder, Tracker, TrackerEvent, TrackerStatus, VolumeUnit,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

fn tracker_at(clock: &ManualClock) -> Tracker<&ManualClock> {
    Tracker::with_clock(Settings::default(), clock)
}

#[test]
fn paused_breast_feed() {
    let clock = ManualClock::new(t0());
    let mut tracker = tracker_at(&clock);

    tracker.start(FeedingMode::breast(BreastSide::Left)).unwrap();
    clock.set(t0() + Duration::seconds(300));
    tracker.pause().unwrap();
    clock.set(t0() + Duration::seconds(600));
    tracker.resume().unwrap();
    clock.set(t0() + Duration::seconds(900));
    let session = tracker.stop().unwrap();

    assert_eq!(session.paused_intervals.len(), 1);
    assert_eq!(session.paused_secs(), 300);
    assert_eq!(session.intervals[0].duration_secs, 300);
    assert_eq!(session.duration_secs, 300);
    assert!(session.duration_secs <= (session.end_time - session.start_time).num_seconds() as u64);
    assert_eq!(session.mode, FeedingMode::breast(BreastSide::Left));
}

#[test]
fn bottle_then_breast() {
    let clock = ManualClock::new(t0());
    let mut tracker = tracker_at(&clock);

    tracker.start(FeedingMode::bottle(4.0, VolumeUnit::Oz)).unwrap();
    clock.advance(Duration::seconds(120));
    tracker.change_mode(FeedingMode::breast(BreastSide::Left)).unwrap();
    clock.advance(Duration::seconds(300));
    let session = tracker.stop().unwrap();

    assert_eq!(session.intervals.len(), 2);
    assert_eq!(session.intervals[0].mode, FeedingMode::bottle(4.0, VolumeUnit::Oz));
    assert_eq!(session.intervals[0].duration_secs, 120);
    assert_eq!(session.intervals[1].mode, FeedingMode::breast(BreastSide::Left));
    assert_eq!(session.intervals[1].duration_secs, 300);
    assert_eq!(session.duration_secs, 420);
    assert_eq!(session.mode, FeedingMode::breast(BreastSide::Left));
}

#[test]
fn manual_entry_then_edit_then_unit_switch() {
    let clock = ManualClock::new(t0());
    let mut tracker = tracker_at(&clock);

    let mut draft = SessionDraft::blank(t0() - Duration::hours(3));
    draft.set_mode(0, FeedingMode::bottle(5.0, VolumeUnit::Oz)).unwrap();
    let added = tracker.edit_session(draft.finish().unwrap()).unwrap();
    assert!(added.id.starts_with("new-"));

    tracker.start(FeedingMode::breast(BreastSide::Right)).unwrap();
    clock.advance(Duration::minutes(10));
    let live = tracker.stop().unwrap();

    let mut edited = live.clone();
    edited.intervals[0].start_time = live.start_time - Duration::minutes(5);
    let edited = tracker.edit_session(edited).unwrap();
    assert_eq!(edited.duration_secs, 900);
    assert_eq!(edited.start_time, live.start_time - Duration::minutes(5));

    let newest_first: Vec<&str> = tracker
        .sorted_history(SortBy::Date, SortOrder::Desc)
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(newest_first, vec![live.id.as_str(), added.id.as_str()]);

    assert_eq!(tracker.convert_volume_unit(VolumeUnit::Ml), 2);
    let stats = tracker.stats();
    assert_eq!(stats.total_feeds, 2);
    assert_eq!(stats.unit, VolumeUnit::Ml);
    // 5 oz -> 148 ml over two feeds.
    assert_eq!(stats.avg_volume, 74.0);
    assert_eq!(stats.avg_duration_secs, 900);
}

#[test]
fn rejected_events_leave_tracker_unchanged() {
    let clock = ManualClock::new(t0());
    let mut tracker = tracker_at(&clock);

    assert_eq!(tracker.apply(TrackerEvent::Pause).unwrap_err(), FeedingError::NotActive);
    tracker
        .apply(TrackerEvent::Start {
            mode: FeedingMode::breast(BreastSide::Left),
        })
        .unwrap();
    assert_eq!(
        tracker.apply(TrackerEvent::Resume).unwrap_err(),
        FeedingError::NotPaused
    );
    assert_eq!(tracker.snapshot().status, TrackerStatus::Active);
    assert!(tracker.history().is_empty());
}
