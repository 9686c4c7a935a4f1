use crate::cli::ConfigAction;
use crate::config::Config;
use std::path::Path;

pub fn handle_config_action(action: ConfigAction, config_path: &Path, json_output: bool) {
    match action {
        ConfigAction::Init => match Config::default().save_to(config_path) {
            Ok(()) => {
                if json_output {
                    println!(
                        r#"{{"status": "success", "message": "Configuration initialized at {}"}}"#,
                        config_path.display()
                    );
                } else {
                    println!("Configuration initialized at: {}", config_path.display());
                }
            }
            Err(e) => fail("Failed to initialize config", &e, json_output),
        },
        ConfigAction::Show => match Config::load_from(config_path) {
            Ok(config) => {
                if json_output {
                    match serde_json::to_string_pretty(&config) {
                        Ok(json) => println!("{}", json),
                        Err(e) => fail("Failed to serialize config to JSON", &e.into(), false),
                    }
                } else {
                    match toml::to_string_pretty(&config) {
                        Ok(toml_str) => {
                            println!("Configuration ({})", config_path.display());
                            println!("{}", toml_str);
                        }
                        Err(e) => fail("Failed to serialize config", &e.into(), false),
                    }
                }
            }
            Err(e) => fail("Failed to load config", &e, json_output),
        },
        ConfigAction::Set { key, value } => match Config::load_from(config_path) {
            Ok(mut config) => match config.set_value(&key, &value) {
                Ok(()) => match config.save_to(config_path) {
                    Ok(()) => {
                        if json_output {
                            println!(
                                r#"{{"status": "success", "message": "Configuration updated: {} = {}"}}"#,
                                key, value
                            );
                        } else {
                            println!("Configuration updated: {} = {}", key, value);
                        }
                    }
                    Err(e) => fail("Failed to save config", &e, json_output),
                },
                Err(e) => fail("Invalid configuration", &e, json_output),
            },
            Err(e) => fail("Failed to load config", &e, json_output),
        },
    }
}

fn fail(context: &str, error: &anyhow::Error, json_output: bool) -> ! {
    if json_output {
        let message = format!("{context}: {error:#}");
        println!(
            r#"{{"status": "error", "message": {}}}"#,
            serde_json::Value::String(message)
        );
    } else {
        eprintln!("Error: {context}: {error:#}");
    }
    std::process::exit(1);
}
