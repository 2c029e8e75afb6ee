//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `geo_points` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geo_points::config::{CatalogArgs, Cli, Command, ExportArgs};
use geo_points::export::export_table;
use geo_points::fetch::FetchOutcome;
use geo_points::initialization::init_logger_with;
use geo_points::{load_stage, read_projected, run_pipeline, Catalog, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // DATABASE_URL may come from .env next to the working directory or the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = dispatch(cli.command).await {
        eprintln!("geo_points error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => {
            let report = run_pipeline(Config::from(args)).await?;
            // Summary goes to stderr so stdout stays clean for the exported table
            eprintln!(
                "{} {} row{}, exported {} in {:.1}s",
                describe_fetch(&report.fetch),
                report.rows_loaded,
                if report.rows_loaded == 1 { "" } else { "s" },
                report.rows_exported,
                report.elapsed_seconds
            );
            if let Some(path) = report.catalog_path {
                eprintln!("Catalog written to {}", path.display());
            }
        }
        Command::Load(args) => {
            let config = Config::from(args);
            let report = load_stage(&config).await?;
            eprintln!(
                "{} {} row{} into {}",
                describe_fetch(&report.fetch),
                report.rows_loaded,
                if report.rows_loaded == 1 { "" } else { "s" },
                config.table
            );
        }
        Command::Export(ExportArgs {
            catalog,
            source_name,
            output,
            format,
        }) => {
            let descriptor = Catalog::load(&catalog)
                .await
                .context("Failed to load catalog descriptor")?;
            let projected = read_projected(&descriptor, &source_name).await?;
            let rows = export_table(&projected, format, output.as_deref())
                .context("Export failed")?;
            eprintln!("Exported {} row{}", rows, if rows == 1 { "" } else { "s" });
        }
        Command::Catalog(CatalogArgs {
            database,
            source_name,
            output,
        }) => {
            let descriptor =
                Catalog::for_table(&source_name, &database.database_url, &database.table)?;
            descriptor.write(&output).await?;
            eprintln!("Catalog written to {}", output.display());
        }
    }
    Ok(())
}

fn describe_fetch(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::AlreadyPresent => "Used local copy, loaded".to_string(),
        FetchOutcome::Downloaded { bytes } => format!("Downloaded {bytes} bytes, loaded"),
    }
}
