// Domain models
pub mod pattern;
pub mod reading;

pub use pattern::{ConsecutiveRun, LearnedPattern, MINUTE_WINDOW, TOLERANCE, within_window};
pub use reading::Reading;
