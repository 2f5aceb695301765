use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::log_warn;
use crate::models::VolumeUnit;

const ENABLE_LOGS: bool = true;

pub const TIMEZONE_ENV: &str = "FEEDTRACK_DEFAULT_TIMEZONE";
pub const VOLUME_UNIT_ENV: &str = "FEEDTRACK_DEFAULT_VOLUME_UNIT";
pub const IDLE_TIMEOUT_ENV: &str = "FEEDTRACK_IDLE_TIMEOUT_MINUTES";

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: u64 = 30;

fn default_idle_timeout_minutes() -> u64 {
    DEFAULT_IDLE_TIMEOUT_MINUTES
}

/// Display preferences supplied by whoever drives the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub timezone: String,
    pub volume_unit: VolumeUnit,
    /// How long a session may sit paused before it is offered for stopping.
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.into(),
            volume_unit: VolumeUnit::default(),
            idle_timeout_minutes: DEFAULT_IDLE_TIMEOUT_MINUTES,
        }
    }
}

impl Settings {
    pub fn idle_timeout(&self) -> Duration {
        i64::try_from(self.idle_timeout_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or(Duration::MAX)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads defaults through `lookup`, falling back to `UTC` / `oz` when a
    /// value is missing or unusable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timezone = match lookup(TIMEZONE_ENV).filter(|v| !v.trim().is_empty()) {
            Some(value) => value.trim().to_string(),
            None => {
                log_warn!("{TIMEZONE_ENV} not set, using default: {DEFAULT_TIMEZONE}");
                DEFAULT_TIMEZONE.to_string()
            }
        };

        let volume_unit = match lookup(VOLUME_UNIT_ENV) {
            Some(raw) => VolumeUnit::parse(&raw).unwrap_or_else(|| {
                log_warn!(
                    "{VOLUME_UNIT_ENV}={raw:?} is not a volume unit, using default: {}",
                    VolumeUnit::default().as_str()
                );
                VolumeUnit::default()
            }),
            None => {
                log_warn!(
                    "{VOLUME_UNIT_ENV} not set, using default: {}",
                    VolumeUnit::default().as_str()
                );
                VolumeUnit::default()
            }
        };

        let idle_timeout_minutes = match lookup(IDLE_TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    log_warn!(
                        "{IDLE_TIMEOUT_ENV}={raw:?} is not a positive number of minutes, using default: {DEFAULT_IDLE_TIMEOUT_MINUTES}"
                    );
                    DEFAULT_IDLE_TIMEOUT_MINUTES
                }
            },
            None => DEFAULT_IDLE_TIMEOUT_MINUTES,
        };

        Self {
            timezone,
            volume_unit,
            idle_timeout_minutes,
        }
    }
}
