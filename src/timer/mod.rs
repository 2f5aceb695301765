pub mod commands;
pub mod controller;
pub mod state;

pub use commands::{EventOutcome, TrackerEvent};
pub use controller::Tracker;
pub use state::{FeedingState, InProgressSession, TrackerSnapshot, TrackerStatus};
