//! Logging macros gated on a per-module `ENABLE_LOGS` const.
//!
//! A module opts in by declaring the flag next to its imports:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_debug, log_error, log_info, log_warn};
//! ```
//! Flipping the flag to `false` silences that module without touching
//! `RUST_LOG` for the rest of the crate.

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            ::log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            ::log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            ::log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            ::log::error!($($arg)*);
        }
    };
}
