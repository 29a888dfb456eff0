//! Dimension commands: seed, list, add, remove, set-default

use colored::Colorize;
use std::sync::Arc;

use crate::config::SeedConfig;
use crate::interfaces::cli::CliError;
use crate::services::DimensionService;
use crate::storage::{DimensionKind, DimensionSnapshot, SeaOrmStorage};

pub async fn run_seed(storage: &Arc<SeaOrmStorage>, seed: &SeedConfig) -> Result<(), CliError> {
    let report = storage.seed(seed).await?;

    println!(
        "{} Seed complete: {} sources, {} mediums added{}",
        "✓".bold().green(),
        report.sources_added.to_string().cyan(),
        report.mediums_added.to_string().cyan(),
        if report.campaign_added {
            format!(", campaign {}", seed.default_campaign.trim().magenta())
        } else {
            String::new()
        }
    );
    Ok(())
}

fn print_dimension(snapshot: &DimensionSnapshot, kind: DimensionKind, title: &str) {
    let values = snapshot.values(kind);
    println!("{} ({})", title.bold().green(), values.len());
    if values.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for value in values {
        if value.is_default {
            println!("  {} {}", value.name.cyan(), "(default)".yellow());
        } else {
            println!("  {}", value.name.cyan());
        }
    }
}

pub async fn list_values(dimensions: &Arc<DimensionService>) -> Result<(), CliError> {
    let snapshot = dimensions.list_all().await?;

    print_dimension(&snapshot, DimensionKind::Source, "Sources");
    println!();
    print_dimension(&snapshot, DimensionKind::Medium, "Mediums");
    println!();
    print_dimension(&snapshot, DimensionKind::Campaign, "Campaigns");
    Ok(())
}

pub async fn add_value(
    dimensions: &Arc<DimensionService>,
    kind: DimensionKind,
    name: &str,
) -> Result<(), CliError> {
    let value = dimensions.add_dimension_value(kind, name).await?;
    println!(
        "{} {} added: {}",
        "✓".bold().green(),
        kind.label(),
        value.name.cyan()
    );
    Ok(())
}

pub async fn remove_value(
    dimensions: &Arc<DimensionService>,
    kind: DimensionKind,
    name: &str,
) -> Result<(), CliError> {
    let value = dimensions.remove_dimension_value(kind, name).await?;
    println!(
        "{} {} removed: {}",
        "✓".bold().green(),
        kind.label(),
        value.name.cyan()
    );
    Ok(())
}

pub async fn set_default_campaign(
    dimensions: &Arc<DimensionService>,
    name: &str,
) -> Result<(), CliError> {
    let value = dimensions.set_default_campaign(name).await?;
    println!(
        "{} Default campaign: {}",
        "✓".bold().green(),
        value.name.cyan()
    );
    Ok(())
}
