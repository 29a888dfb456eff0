//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::storage::DimensionKind;

/// utmkit - UTM campaign URL builder
#[derive(Parser)]
#[command(name = "utmkit")]
#[command(version)]
#[command(about = "Build UTM-tagged campaign URLs and keep a log of them", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: utmkit.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Insert the configured sources, mediums and default campaign (idempotent)
    Seed,

    /// List all sources, mediums and campaigns
    List,

    /// Add a source, medium or campaign
    Add {
        /// source | medium | campaign
        kind: DimensionKind,
        name: String,
    },

    /// Remove a source, medium or campaign
    Remove {
        /// source | medium | campaign
        kind: DimensionKind,
        name: String,
    },

    /// Make a campaign the default one
    SetDefault {
        campaign: String,
    },

    /// Generate a UTM URL and save it
    Generate {
        /// Destination URL; https:// is added when no scheme is given
        url: String,

        #[arg(long, short = 's')]
        source: String,

        #[arg(long, short = 'm')]
        medium: Option<String>,

        /// Defaults to the default campaign; pass an empty string for none
        #[arg(long)]
        campaign: Option<String>,

        /// Content title, stored as utm_content in slug form
        #[arg(long, short = 't')]
        title: Option<String>,
    },

    /// Show recently generated URLs
    History {
        #[arg(long, short = 'n', default_value_t = crate::services::DEFAULT_HISTORY_LIMIT)]
        limit: u64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate an example configuration file
    Generate {
        /// Output path (default: utmkit.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["utmkit", "add", "source", "podcast"]).unwrap();
        match cli.command {
            Some(Commands::Add { kind, name }) => {
                assert_eq!(kind, DimensionKind::Source);
                assert_eq!(name, "podcast");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["utmkit", "add", "channel", "x"]).is_err());
    }

    #[test]
    fn test_parse_generate_with_global_config() {
        let cli = Cli::try_parse_from([
            "utmkit",
            "generate",
            "example.com",
            "--source",
            "google",
            "--title",
            "Big Sale",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::Generate {
                url, source, title, campaign, ..
            }) => {
                assert_eq!(url, "example.com");
                assert_eq!(source, "google");
                assert_eq!(title.as_deref(), Some("Big Sale"));
                assert_eq!(campaign, None);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::try_parse_from(["utmkit"]).unwrap();
        assert!(cli.command.is_none());
    }
}
