// Configuration file handling
pub mod settings;

pub use settings::{Config, OutputConfig, StorageConfig};
