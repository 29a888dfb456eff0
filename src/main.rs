use std::sync::Arc;

use clap::Parser;

use utmkit::cli::{Cli, Commands};
use utmkit::config::AppConfig;
use utmkit::runtime::modes::{run_cli, run_server};
use utmkit::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Serve);
    let server_mode = matches!(command, Commands::Serve);

    // CLI 模式只输出警告以上日志，避免和命令输出混在一起
    if !server_mode {
        config.logging.level = "warn".to_string();
    }

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    if server_mode {
        return run_server(Arc::new(config)).await;
    }

    if let Err(e) = run_cli(command, &config).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    Ok(())
}
