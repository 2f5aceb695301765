pub mod interval;
pub mod mode;
pub mod pause;
pub mod session;

pub use interval::{seconds_between, FeedingInterval};
pub use mode::{BreastSide, FeedingMode, VolumeUnit};
pub use pause::PausedInterval;
pub use session::{active_secs, FeedingSession};
