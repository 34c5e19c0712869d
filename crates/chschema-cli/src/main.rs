mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use chschema_catalog::{
    CatalogError, ContentHubClient, SnapshotSource, fetch_all_pages, fetch_definitions,
    map_pages, redact_settings, redact_url,
};
use chschema_core::{Error as CoreError, PipelineOutput, run_pipeline};
use clap::{Args, Parser, Subcommand};
use registry::{
    RunContext, init_console_logging, init_run_logging, start_run, write_bytes_atomic,
    write_definitions, write_metrics, write_report,
};
use settings::{SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

#[derive(Parser, Debug)]
#[command(name = "chschema", version, about = "Content Hub schema visualiser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch entity definitions from Content Hub and write the schema report.
    Export(ExportArgs),
    /// Render the schema report from a saved definitions dump.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Settings file with API credentials.
    #[arg(long, default_value = "appsettings.toml")]
    config: PathBuf,
    /// Output path for the schema report (overrides the settings file).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Do not echo the report or progress to the terminal.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON dump of entity-definition pages (e.g. a run's definitions.json).
    #[arg(long)]
    input: PathBuf,
    /// Output path for the schema report; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Export(args) => run_export(args).await,
        Command::Render(args) => run_render(args).await,
    }
}

async fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let ExportArgs {
        config,
        out,
        run_dir,
        quiet,
    } = args;

    let settings = load_settings(&config)?;
    let out = out.unwrap_or_else(|| settings.output.path.clone());

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir,
        out: out.clone(),
        settings: redact_settings(&settings.api),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path, !quiet)?;

    tracing::info!(event = "run_started", run_id = %run_id, run_dir = %run_paths.root.display());
    let timer = Instant::now();

    tracing::info!(event = "connecting", url = %redact_url(&settings.api.url));
    let client = ContentHubClient::connect(&settings.api).await?;

    tracing::info!(event = "catalog_fetch_started");
    let pages = fetch_all_pages(&client).await?;
    write_definitions(&run_paths, &pages)?;

    let definitions = map_pages(&pages)?;
    tracing::info!(
        event = "catalog_fetch_finished",
        pages = pages.len(),
        definitions = definitions.len()
    );

    let output = run_pipeline(&definitions);
    if !quiet {
        print_report(&output);
    }

    write_bytes_atomic(&out, output.report.as_bytes())?;
    tracing::info!(event = "report_written", path = %out.display());

    write_report(&run_paths, &output.report)?;
    write_metrics(&run_paths, &output.metrics)?;
    tracing::info!(event = "metrics_written", path = %run_paths.metrics_path.display());

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

async fn run_render(args: RenderArgs) -> Result<(), CliError> {
    init_console_logging()?;

    let source = SnapshotSource::from_path(&args.input)?;
    let definitions = fetch_definitions(&source).await?;
    let output = run_pipeline(&definitions);

    match args.out {
        Some(path) => {
            write_bytes_atomic(&path, output.report.as_bytes())?;
            tracing::info!(event = "report_written", path = %path.display());
        }
        None => print!("{}", output.report),
    }

    Ok(())
}

fn print_report(output: &PipelineOutput) {
    println!("----------Output----------");
    print!("{}", output.report);
    println!("--------------------------");
}
