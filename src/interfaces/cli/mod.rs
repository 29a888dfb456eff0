//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::UtmError;
use crate::runtime::lifetime::startup::prepare_startup;
use commands::{
    add_value, config_generate, generate_url, list_values, remove_value, run_seed,
    set_default_campaign, show_history,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<UtmError> for CliError {
    fn from(err: UtmError) -> Self {
        if err.is_persistence() {
            CliError::StorageError(err.message().to_string())
        } else {
            CliError::CommandError(err.format_simple())
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<(), CliError> {
    // config generate 不需要数据库
    let cmd = match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => return config_generate(output_path, force),
        other => other,
    };

    let context = prepare_startup(config)
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    match cmd {
        Commands::Seed => run_seed(&context.storage, &config.seed).await,
        Commands::List => list_values(&context.dimensions).await,
        Commands::Add { kind, name } => add_value(&context.dimensions, kind, &name).await,
        Commands::Remove { kind, name } => remove_value(&context.dimensions, kind, &name).await,
        Commands::SetDefault { campaign } => {
            set_default_campaign(&context.dimensions, &campaign).await
        }
        Commands::Generate {
            url,
            source,
            medium,
            campaign,
            title,
        } => {
            let request = crate::services::GenerateRequest {
                url,
                source,
                medium,
                campaign,
                title,
            };
            generate_url(&context, request).await
        }
        Commands::History { limit } => show_history(&context.records, limit).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve runs in server mode, not as a CLI command".to_string(),
        )),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
