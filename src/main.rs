// alertsys: adaptive temperature alerting
use alertsys::cli::{Cli, Commands};
use alertsys::commands::{
    handle_config_action, handle_error, handle_monitor_command, handle_patterns_command,
    handle_replay_command,
};
use alertsys::config::Config;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    // Config commands manage the file themselves
    if let Commands::Config { action } = cli.command {
        handle_config_action(action, &config_path, cli.json);
        return Ok(());
    }

    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    // CLI overrides take precedence
    if let Some(path) = &cli.patterns_file {
        config.storage.patterns_path = path.display().to_string();
    }
    let json_output = cli.json || config.output.format == "json";

    let result = match cli.command {
        Commands::Replay { file } => {
            handle_replay_command(&file, &config, json_output, cli.verbose)
        }
        Commands::Monitor => handle_monitor_command(&config, json_output),
        Commands::Patterns { action } => handle_patterns_command(action, &config, json_output),
        Commands::Config { .. } => Ok(()),
    };

    if let Err(e) = result {
        handle_error(&e, json_output);
        std::process::exit(1);
    }
    Ok(())
}
