mod utils;

pub mod clock;
pub mod error;
pub mod format;
pub mod history;
pub mod models;
pub mod settings;
pub mod timer;
pub mod units;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::FeedingError;
pub use history::{HistoryStats, SessionDraft, SessionHistory, SortBy, SortOrder};
pub use models::{
    BreastSide, FeedingInterval, FeedingMode, FeedingSession, PausedInterval, VolumeUnit,
};
pub use settings::Settings;
pub use timer::{EventOutcome, Tracker, TrackerEvent, TrackerSnapshot, TrackerStatus};

pub const DEBUG_ENV: &str = "FEEDTRACK_DEBUG";

/// Sets up `env_logger`. `RUST_LOG` wins when set; otherwise the level is
/// `info`, or `debug` with `FEEDTRACK_DEBUG=1`.
pub fn init_logging() {
    let debug_mode = std::env::var(DEBUG_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let level = if debug_mode {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
