//! CLI mode
//!
//! Delegates to the CLI implementation.

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run one CLI command against the configured store
pub async fn run_cli(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    run_cli_command(command, config).await
}
