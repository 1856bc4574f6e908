//! Batch pipeline orchestration: load, clean, classify, partition and export one run.

pub mod clean;
pub mod export;
pub mod partition;
pub mod summary;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use framescope_classify::Classifier;
use framescope_core::ClassifiedArticle;
use framescope_ingest::load_table;
use framescope_storage::{RunStore, StoredFile};
use serde::Serialize;
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

pub use clean::{filter_and_clean, CleanError, CleanReport};
pub use export::{corpus_csv_bytes, corpus_parquet_bytes, corpus_record_batch, export_column_names};
pub use partition::{partition, Corpus, CorpusKind};
pub use summary::{CorpusSize, CorpusSummary};

pub const DEFAULT_INPUT: &str = "data/raw/media_export.csv";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub workspace_root: PathBuf,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        Self {
            input_path: std::env::var("FRAMESCOPE_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT)),
            workspace_root: PathBuf::from("."),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.workspace_root.join("output")
    }

    pub fn runs_dir(&self) -> PathBuf {
        self.output_dir().join("runs")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_path: String,
    pub clean: CleanReport,
    pub corpora: Vec<CorpusSize>,
    pub run_dir: String,
    pub manifest: String,
}

pub struct Pipeline {
    config: PipelineConfig,
    classifier: Arc<Classifier>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let classifier = Classifier::builtin().context("compiling keyword dictionaries")?;
        Ok(Self {
            config,
            classifier: Arc::new(classifier),
        })
    }

    pub async fn run_once(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        self.run(run_id)
            .instrument(info_span!("pipeline_run", %run_id))
            .await
    }

    async fn run(&self, run_id: Uuid) -> Result<RunSummary> {
        let started_at = Utc::now();
        let input = &self.config.input_path;
        info!(input = %input.display(), "pipeline run started");

        // Every fatal check happens before the run directory exists.
        let classified_input = input.clone();
        let classifier = Arc::clone(&self.classifier);
        let span = Span::current();
        let (classified, report) = tokio::task::spawn_blocking(move || {
            span.in_scope(|| load_and_classify(&classified_input, &classifier))
        })
        .await
        .context("joining load and classify task")??;

        let corpora = partition(&classified);
        let summary = CorpusSummary::build(&report, &classified, &corpora);

        let store = RunStore::new(self.config.runs_dir().join(run_id.to_string()));
        let mut files = Vec::new();
        for corpus in &corpora {
            files.extend(self.export_corpus(&store, corpus).await?);
        }
        files.extend(self.write_summary(&store, &summary).await?);
        let manifest = store
            .write_manifest(run_id, files)
            .await
            .context("writing run manifest")?;

        let finished_at = Utc::now();
        info!(
            rows = classified.len(),
            run_dir = %store.root().display(),
            "pipeline run finished"
        );

        Ok(RunSummary {
            run_id,
            started_at,
            finished_at,
            input_path: input.display().to_string(),
            clean: report,
            corpora: summary.overview.corpora,
            run_dir: store.root().display().to_string(),
            manifest: manifest.absolute_path.display().to_string(),
        })
    }

    async fn export_corpus(&self, store: &RunStore, corpus: &Corpus<'_>) -> Result<Vec<StoredFile>> {
        let name = corpus.kind.name();
        let parquet = corpus_parquet_bytes(corpus)?;
        let csv = corpus_csv_bytes(corpus)?;

        let files = vec![
            store
                .store_bytes(
                    &format!("{name}.parquet"),
                    format!("corpora/{name}.parquet"),
                    &parquet,
                )
                .await?,
            store
                .store_bytes(&format!("{name}.csv"), format!("corpora/{name}.csv"), &csv)
                .await?,
        ];
        info!(corpus = name, rows = corpus.len(), "exported corpus");
        Ok(files)
    }

    async fn write_summary(&self, store: &RunStore, summary: &CorpusSummary) -> Result<Vec<StoredFile>> {
        let json = serde_json::to_vec_pretty(summary).context("serializing corpus summary")?;
        let markdown = summary.to_markdown();
        Ok(vec![
            store.store_bytes("summary", "summary.json", &json).await?,
            store
                .store_bytes("summary_markdown", "summary.md", markdown.as_bytes())
                .await?,
        ])
    }
}

/// Synchronous, CPU-bound stages: read, clean, then label the batch.
fn load_and_classify(
    input: &Path,
    classifier: &Classifier,
) -> Result<(Vec<ClassifiedArticle>, CleanReport)> {
    let table = load_table(input).with_context(|| format!("loading {}", input.display()))?;
    let (articles, report) =
        filter_and_clean(&table).with_context(|| format!("validating {}", input.display()))?;
    drop(table);
    Ok((classifier.classify_batch(articles), report))
}

pub async fn run_once_from_env() -> Result<RunSummary> {
    Pipeline::new(PipelineConfig::from_env())?.run_once().await
}

/// Lists the most recent runs under `output/runs`, newest first.
pub fn report_runs_markdown(runs: usize, workspace_root: Option<PathBuf>) -> Result<String> {
    let root = workspace_root.unwrap_or_else(|| PathBuf::from("."));
    let runs_root = root.join("output").join("runs");
    let mut dirs = std::fs::read_dir(&runs_root)
        .with_context(|| format!("reading {}", runs_root.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
        .collect::<Vec<_>>();
    dirs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    dirs.reverse();
    let dirs = dirs.into_iter().take(runs.max(1)).collect::<Vec<_>>();

    let mut lines = vec!["# Framescope Runs".to_string(), String::new()];
    for dir in dirs {
        let run_id = dir.file_name().to_string_lossy().to_string();
        let summary_path = dir.path().join("summary.json");
        let manifest_path = dir.path().join("manifest.json");

        let summary: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&summary_path)
                .with_context(|| format!("reading {}", summary_path.display()))?,
        )
        .with_context(|| format!("parsing {}", summary_path.display()))?;
        let overview = summary.get("overview");
        let raw_rows = overview
            .and_then(|o| o.get("raw_rows"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        lines.push(format!("## Run `{run_id}`"));
        lines.push(format!("- raw rows: {raw_rows}"));
        for corpus in overview
            .and_then(|o| o.get("corpora"))
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
        {
            let name = corpus.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
            let rows = corpus.get("rows").and_then(|v| v.as_u64()).unwrap_or(0);
            lines.push(format!("- {name}: {rows}"));
        }
        if manifest_path.exists() {
            lines.push(format!("- manifest: `{}`", manifest_path.display()));
        }
        lines.push(String::new());
    }

    Ok(lines.join("\n"))
}
