// Commands module
/// Check-config command implementation
pub mod check;
/// Publish command implementation
pub mod publish;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::cli::Commands;

/// Execute a CLI command
pub async fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Publish {
            config,
            input,
            emulator_host,
        } => publish::execute(&config, input.as_deref(), emulator_host).await,
        Commands::CheckConfig { config, format } => check::execute(&config, &format).await,
    }
}

/// Read a destination configuration file as a JSON value
pub(crate) async fn read_destination_config(path: &Path) -> anyhow::Result<Value> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read destination config {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Destination config {} is not valid JSON", path.display()))
}
