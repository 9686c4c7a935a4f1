pub mod classifier;
pub mod consecutive;
pub mod engine;
pub mod outcome;
pub mod thresholds;

pub use classifier::Classifier;
pub use consecutive::{ConsecutiveTracker, PROMOTION_COUNT};
pub use engine::{AlertEngine, CRITICAL_ERROR_COUNT, EngineState};
pub use outcome::{AlertPriority, Outcome};
pub use thresholds::Thresholds;
