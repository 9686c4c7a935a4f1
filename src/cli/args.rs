use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alertsys")]
#[command(about = "Adaptive temperature alerting that learns recurring patterns")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the learned pattern record file
    #[arg(long, global = true)]
    pub patterns_file: Option<PathBuf>,

    /// Verbose output (debug logging, quiet samples listed)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON output format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize fresh configuration
    Init,
    /// Set configuration value
    Set {
        /// Configuration key (e.g., thresholds.max_normal)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand)]
pub enum PatternAction {
    /// List learned patterns
    List,
    /// Add a pattern manually
    Add {
        /// Temperature in °C
        #[arg(allow_hyphen_values = true)]
        value: f32,
        /// Minute of the hour (0-60)
        #[arg(allow_hyphen_values = true)]
        minute: i32,
        /// Hour of the day (0-23)
        #[arg(allow_hyphen_values = true)]
        hour: i32,
    },
    /// Remove every learned pattern
    Clear,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a recorded sample file through the engine
    Replay {
        /// Lines of `value,minute,hour,day`, plus `cleaning on|off` and `override`
        file: PathBuf,
    },

    /// Read live values from stdin, stamped with the local clock
    Monitor,

    /// Learned pattern management
    Patterns {
        #[command(subcommand)]
        action: PatternAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["alertsys", "--json", "replay", "samples.txt"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Replay { ref file } if file == &PathBuf::from("samples.txt")
        ));
    }

    #[test]
    fn test_parse_negative_manual_pattern() {
        let cli = Cli::try_parse_from(["alertsys", "patterns", "add", "-2.5", "10", "3"]).unwrap();
        match cli.command {
            Commands::Patterns {
                action: PatternAction::Add { value, minute, hour },
            } => {
                assert_eq!(value, -2.5);
                assert_eq!(minute, 10);
                assert_eq!(hour, 3);
            }
            _ => panic!("expected patterns add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "alertsys",
            "patterns",
            "list",
            "--patterns-file",
            "/tmp/data.txt",
        ])
        .unwrap();
        assert_eq!(cli.patterns_file, Some(PathBuf::from("/tmp/data.txt")));
    }
}
