//! URL commands: generate, history

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::StartupContext;
use crate::services::{FormState, GenerateRequest, UrlRecordService};

pub async fn generate_url(
    context: &StartupContext,
    request: GenerateRequest,
) -> Result<(), CliError> {
    let snapshot = context.dimensions.snapshot().await?;
    let mut form = FormState::from_snapshot(&snapshot);
    form.apply_request(&request);

    let mut outcome = context.generator.generate(&form.to_request()).await?;
    // 进程随命令结束退出，先等 webhook 发完
    outcome
        .wait_for_notification(context.generator.notification_deadline())
        .await;

    println!("{}", outcome.generated_url.blue().underline());
    match (&outcome.record, &outcome.warning) {
        (Some(record), _) => println!(
            "{} UTM URL generated and saved (record #{})",
            "✓".bold().green(),
            record.id
        ),
        (None, Some(warning)) => println!("{} {}", "⚠".bold().yellow(), warning.yellow()),
        (None, None) => {}
    }
    Ok(())
}

pub async fn show_history(records: &Arc<UrlRecordService>, limit: u64) -> Result<(), CliError> {
    let items = records.history(limit).await?;

    if items.is_empty() {
        println!("{} No generated URLs yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Recently generated URLs:".bold().green());
    println!();
    for record in &items {
        println!(
            "  {} {} {}",
            format!("#{}", record.id).dimmed(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .yellow(),
            record.generated_url.blue().underline()
        );
    }
    println!();
    println!(
        "{} Showing {} records",
        "ℹ".bold().blue(),
        items.len().to_string().green()
    );
    Ok(())
}
