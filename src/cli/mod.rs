// CLI module for pubsub-destination
/// Command execution handlers
pub mod commands;
/// Output formatting utilities
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{LogFormat, LoggingConfig};

/// Command-line interface for pubsub-destination
#[derive(Parser)]
#[command(name = "pubsub-destination")]
#[command(author, version, about = "Publish pipeline events to Google Cloud Pub/Sub", long_about = None)]
pub struct Cli {
    /// Log level or filter directive
    #[arg(long, global = true, env = "PUBSUB_DEST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format
    #[arg(long, global = true, env = "PUBSUB_DEST_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Publish event envelopes, one JSON document per line
    Publish {
        /// Destination configuration file (JSON)
        #[arg(long, short, env = "PUBSUB_DEST_CONFIG")]
        config: PathBuf,

        /// Envelope file; reads stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Pub/Sub emulator host:port
        #[arg(long, env = "PUBSUB_EMULATOR_HOST")]
        emulator_host: Option<String>,
    },

    /// Validate a destination configuration and show its topic bindings
    CheckConfig {
        /// Destination configuration file (JSON)
        #[arg(long, short, env = "PUBSUB_DEST_CONFIG")]
        config: PathBuf,

        /// Output format (table | json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging configuration selected on the command line
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish_command() {
        let cli = Cli::try_parse_from([
            "pubsub-destination",
            "--log-format",
            "json",
            "publish",
            "--config",
            "dest.json",
            "--emulator-host",
            "localhost:8085",
        ])
        .unwrap();

        assert_eq!(cli.logging().format, LogFormat::Json);
        match cli.command {
            Commands::Publish { config, input, emulator_host } => {
                assert_eq!(config, PathBuf::from("dest.json"));
                assert!(input.is_none());
                assert_eq!(emulator_host.as_deref(), Some("localhost:8085"));
            }
            _ => panic!("expected publish command"),
        }
    }

    #[test]
    fn test_check_config_requires_config() {
        assert!(Cli::try_parse_from(["pubsub-destination", "check-config"]).is_err());
    }
}
