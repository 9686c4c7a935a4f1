// Command handlers module
pub mod config;
pub mod input;
pub mod monitor;
pub mod patterns;
pub mod replay;

use crate::alerts::AlertEngine;
use crate::config::Config;
use crate::storage::FileBackend;

// Re-export command handlers for easy access
pub use config::handle_config_action;
pub use monitor::handle_monitor_command;
pub use patterns::handle_patterns_command;
pub use replay::handle_replay_command;

/// Engine over the configured record file.
pub fn open_engine(config: &Config) -> AlertEngine {
    let backend = FileBackend::new(config.patterns_path());
    AlertEngine::open(config.thresholds.clone(), Box::new(backend))
}

/// Report a command failure in the selected output format.
pub fn handle_error(error: &anyhow::Error, json_output: bool) {
    if json_output {
        println!(
            r#"{{"status": "error", "message": {}}}"#,
            serde_json::Value::String(format!("{error:#}"))
        );
    } else {
        eprintln!("Error: {error:#}");
    }
}
