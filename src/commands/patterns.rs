use crate::alerts::AlertEngine;
use crate::cli::PatternAction;
use crate::commands::open_engine;
use crate::config::Config;
use crate::output::{OutputFormat, format_temperature};
use anyhow::{Context, Result};

pub fn handle_patterns_command(
    action: PatternAction,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let mut engine = open_engine(config);
    let decimal_places = config.output.decimal_places;
    let message = run_pattern_action(&mut engine, action, decimal_places, json_output)?;
    println!("{message}");
    Ok(())
}

/// Execute one pattern action and return the text to print.
pub fn run_pattern_action(
    engine: &mut AlertEngine,
    action: PatternAction,
    decimal_places: u8,
    json_output: bool,
) -> Result<String> {
    match action {
        PatternAction::List => {
            let patterns = engine.list_learned_patterns().to_vec();
            if json_output {
                Ok(patterns.to_json()?)
            } else {
                Ok(patterns.to_table(decimal_places))
            }
        }
        PatternAction::Add { value, minute, hour } => {
            let pattern = engine
                .add_manual_pattern(value, minute, hour)
                .context("Failed to add pattern")?;
            if json_output {
                Ok(format!(
                    r#"{{"status": "success", "pattern": {}}}"#,
                    serde_json::to_string(&pattern)?
                ))
            } else {
                Ok(format!(
                    "Pattern added manually: {} at minute {} hour {}",
                    format_temperature(pattern.value, decimal_places),
                    pattern.minute,
                    pattern.hour
                ))
            }
        }
        PatternAction::Clear => {
            engine
                .clear_all_learned_patterns()
                .context("Failed to clear patterns")?;
            if json_output {
                Ok(r#"{"status": "success", "message": "All patterns cleared"}"#.to_string())
            } else {
                Ok("All patterns cleared".to_string())
            }
        }
    }
}
