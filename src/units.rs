//! Volume conversion between fluid ounces and millilitres.
//!
//! Converted amounts are rounded for display (whole millilitres, tenths of an
//! ounce), so converting back and forth is lossy.

use crate::models::{FeedingMode, FeedingSession, VolumeUnit};

pub const ML_PER_OZ: f64 = 29.5735;

/// Unrounded conversion, used for aggregate statistics.
pub fn convert_exact(amount: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    match (from, to) {
        (VolumeUnit::Oz, VolumeUnit::Ml) => amount * ML_PER_OZ,
        (VolumeUnit::Ml, VolumeUnit::Oz) => amount / ML_PER_OZ,
        _ => amount,
    }
}

/// Converts and rounds to the precision recorded for `to`.
pub fn convert_amount(amount: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    if from == to {
        return amount;
    }
    round_for_unit(convert_exact(amount, from, to), to)
}

pub fn round_for_unit(amount: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Ml => amount.round(),
        VolumeUnit::Oz => (amount * 10.0).round() / 10.0,
    }
}

/// Rewrites a bottle mode into `to`. Returns `true` if anything changed.
pub fn convert_mode(mode: &mut FeedingMode, to: VolumeUnit) -> bool {
    match mode {
        FeedingMode::Bottle { amount, unit } if *unit != to => {
            *amount = convert_amount(*amount, *unit, to);
            *unit = to;
            true
        }
        _ => false,
    }
}

/// Rewrites the session mode and every interval mode. Returns the number of
/// bottle amounts converted.
pub fn convert_session(session: &mut FeedingSession, to: VolumeUnit) -> usize {
    let mut converted = usize::from(convert_mode(&mut session.mode, to));
    for interval in &mut session.intervals {
        converted += usize::from(convert_mode(&mut interval.mode, to));
    }
    converted
}
