// alertsys library crate
// Exposes modules for the binary and integration testing

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod storage;

pub use alerts::{AlertEngine, Outcome, Thresholds};
pub use error::{EngineError, EngineResult};
pub use models::{LearnedPattern, Reading};
pub use storage::{FileBackend, MemoryBackend, PatternBackend, PatternStore};
