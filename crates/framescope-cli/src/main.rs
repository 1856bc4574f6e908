use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framescope_pipeline::PipelineConfig;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "pipeline_run.log";

#[derive(Debug, Parser)]
#[command(name = "framescope")]
#[command(about = "Media-monitoring corpus builder")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Process the configured export into classified corpora.
    Run,
    /// Summarize recent runs as Markdown.
    Report {
        #[arg(long, default_value_t = 5)]
        runs: usize,
    },
}

/// Console output plus an append-only plain-text run log under `output_dir`.
fn init_tracing(output_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(output_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "framescope=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = PipelineConfig::from_env();
            let _log_guard = init_tracing(&config.output_dir())?;
            let summary = match framescope_pipeline::run_once_from_env().await {
                Ok(summary) => summary,
                Err(err) => {
                    error!(error = %format!("{err:#}"), "pipeline run failed");
                    return Err(err);
                }
            };
            println!(
                "run complete: run_id={} kept={} corpora={} dir={}",
                summary.run_id,
                summary.clean.kept_rows,
                summary
                    .corpora
                    .iter()
                    .map(|c| format!("{}:{}", c.name, c.rows))
                    .collect::<Vec<_>>()
                    .join(","),
                summary.run_dir
            );
        }
        Commands::Report { runs } => {
            println!("{}", framescope_pipeline::report_runs_markdown(runs, None)?);
        }
    }

    Ok(())
}
