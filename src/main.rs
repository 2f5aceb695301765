//! Replays a JSON-lines stream of tracker events and prints the resulting
//! history.
//!
//! Each line is a `TrackerEvent`, optionally with an `at` timestamp that sets
//! the replay clock before the event is applied:
//!
//! ```text
//! {"at":"2024-03-01T08:00:00Z","event":"start","mode":{"type":"breast","side":"left"}}
//! {"at":"2024-03-01T08:05:00Z","event":"pause"}
//! ```
//!
//! Reads from the file named on the command line, or stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use feedtrack_lib::format::{format_date, format_duration, format_time, parse_timestamp_or_now};
use feedtrack_lib::{
    init_logging, FeedingSession, HistoryStats, ManualClock, Settings, SortBy, SortOrder,
    Tracker, TrackerEvent, TrackerSnapshot,
};
use feedtrack_lib::{log_debug, log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Deserialize)]
struct ReplayLine {
    #[serde(default)]
    at: Option<String>,
    #[serde(flatten)]
    event: TrackerEvent,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayReport<'a> {
    settings: &'a Settings,
    in_progress: TrackerSnapshot,
    stats: HistoryStats,
    rejected_events: usize,
    summary: Vec<String>,
    history: Vec<&'a FeedingSession>,
}

fn summarize(session: &FeedingSession, timezone: &str) -> String {
    format!(
        "{} • {} - {} ({}) {}",
        format_date(session.start_time, timezone),
        format_time(session.start_time, timezone),
        format_time(session.end_time, timezone),
        format_duration(session.duration_secs),
        session.mode.label()
    )
}

fn open_input() -> Result<Box<dyn BufRead>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    init_logging();
    replay().inspect_err(|err| log_error!("replay aborted: {err:#}"))
}

fn replay() -> Result<()> {
    let settings = Settings::from_env();
    log_info!(
        "feedtrack replay starting (timezone {}, unit {})",
        settings.timezone,
        settings.volume_unit.as_str()
    );

    let clock = ManualClock::new(Utc::now());
    let mut tracker = Tracker::with_clock(settings, &clock);
    let mut rejected_events = 0;

    for (index, line) in open_input()?.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let entry: ReplayLine = serde_json::from_str(trimmed)
            .with_context(|| format!("line {line_no}: not a tracker event"))?;
        if let Some(at) = entry.at.as_deref() {
            clock.set(parse_timestamp_or_now(at, &clock));
        }

        match tracker.apply(entry.event) {
            Ok(outcome) => log_debug!("line {line_no}: {}", serde_json::to_string(&outcome)?),
            Err(err) => {
                log_warn!("line {line_no}: {err}");
                rejected_events += 1;
            }
        }
    }

    let timezone = tracker.settings().timezone.clone();
    let history = tracker.sorted_history(SortBy::Date, SortOrder::Desc);
    let report = ReplayReport {
        settings: tracker.settings(),
        in_progress: tracker.snapshot(),
        stats: tracker.stats(),
        rejected_events,
        summary: history.iter().map(|s| summarize(s, &timezone)).collect(),
        history,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
    writeln!(out)?;
    Ok(())
}
