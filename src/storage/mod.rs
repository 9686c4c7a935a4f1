// Learned pattern persistence
pub mod backend;
pub mod record;
pub mod store;

// Re-export key types for easier access
pub use backend::{FileBackend, MemoryBackend, PatternBackend};
pub use record::{RecordError, format_record, parse_record};
pub use store::PatternStore;
