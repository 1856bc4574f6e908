//! Corpus serialization to Parquet and CSV.
//!
//! `search_text` and per-frame raw counts stay internal and never reach an export.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow_array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, RecordBatch, StringArray, UInt32Array,
    UInt64Array,
};
use arrow_schema::{DataType, Field as ArrowField, Schema};
use chrono::{Datelike, NaiveDate};
use framescope_core::{Actor, ClassifiedArticle, Frame, ENGAGEMENT_COUNTERS};
use parquet::arrow::ArrowWriter;

use crate::partition::Corpus;

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

enum Values {
    Text(Vec<Option<String>>),
    Bool(Vec<bool>),
    Float(Vec<f64>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Date(Vec<NaiveDate>),
}

struct ExportColumn {
    name: String,
    nullable: bool,
    values: Values,
}

impl ExportColumn {
    fn new(name: impl Into<String>, values: Values) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            values,
        }
    }

    fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn data_type(&self) -> DataType {
        match self.values {
            Values::Text(_) => DataType::Utf8,
            Values::Bool(_) => DataType::Boolean,
            Values::Float(_) => DataType::Float64,
            Values::UInt32(_) => DataType::UInt32,
            Values::UInt64(_) => DataType::UInt64,
            Values::Date(_) => DataType::Date32,
        }
    }

    fn to_array(&self) -> ArrayRef {
        match &self.values {
            Values::Text(v) => Arc::new(StringArray::from(
                v.iter().map(|s| s.as_deref()).collect::<Vec<_>>(),
            )),
            Values::Bool(v) => Arc::new(BooleanArray::from(v.clone())),
            Values::Float(v) => Arc::new(Float64Array::from(v.clone())),
            Values::UInt32(v) => Arc::new(UInt32Array::from(v.clone())),
            Values::UInt64(v) => Arc::new(UInt64Array::from(v.clone())),
            Values::Date(v) => Arc::new(Date32Array::from(
                v.iter()
                    .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
                    .collect::<Vec<_>>(),
            )),
        }
    }

    fn csv_cell(&self, row: usize) -> String {
        match &self.values {
            Values::Text(v) => v[row].clone().unwrap_or_default(),
            Values::Bool(v) => v[row].to_string(),
            Values::Float(v) => v[row].to_string(),
            Values::UInt32(v) => v[row].to_string(),
            Values::UInt64(v) => v[row].to_string(),
            Values::Date(v) => v[row].format("%Y-%m-%d").to_string(),
        }
    }
}

fn text<F>(rows: &[&ClassifiedArticle], f: F) -> Values
where
    F: Fn(&ClassifiedArticle) -> Option<String>,
{
    Values::Text(rows.iter().map(|a| f(*a)).collect())
}

fn columns(rows: &[&ClassifiedArticle]) -> Vec<ExportColumn> {
    let mut columns = vec![
        ExportColumn::new(
            "row_id",
            Values::UInt64(rows.iter().map(|a| a.article.row_id as u64).collect()),
        ),
        ExportColumn::new(
            "publish_date",
            Values::Date(rows.iter().map(|a| a.article.publish_date).collect()),
        ),
        ExportColumn::new("title", text(rows, |a| Some(a.article.title.clone()))),
        ExportColumn::new("body_text", text(rows, |a| Some(a.article.body_text.clone()))),
        ExportColumn::new(
            "publisher_id",
            text(rows, |a| Some(a.article.publisher_id.clone())),
        ),
        ExportColumn::new(
            "source_type",
            text(rows, |a| Some(a.article.source_type.clone())),
        ),
        ExportColumn::new("url", text(rows, |a| a.article.url.clone())).nullable(),
        ExportColumn::new(
            "word_count",
            Values::UInt64(rows.iter().map(|a| a.article.word_count as u64).collect()),
        ),
    ];

    for counter in ENGAGEMENT_COUNTERS {
        columns.push(ExportColumn::new(
            counter.to_ascii_lowercase(),
            Values::Float(rows.iter().map(|a| a.article.engagement.get(counter)).collect()),
        ));
    }

    columns.push(ExportColumn::new(
        "media_type",
        text(rows, |a| Some(a.media_type.label().to_string())),
    ));
    columns.push(
        ExportColumn::new(
            "catholic_subcategory",
            text(rows, |a| {
                a.media_type
                    .catholic_subcategory()
                    .map(|s| s.label().to_string())
            }),
        )
        .nullable(),
    );

    for frame in Frame::ALL {
        columns.push(ExportColumn::new(
            frame.column_name(),
            Values::Bool(rows.iter().map(|a| a.frames.is_present(frame)).collect()),
        ));
    }
    columns.push(ExportColumn::new(
        "frame_total",
        Values::UInt32(rows.iter().map(|a| a.frames.total()).collect()),
    ));
    columns.push(ExportColumn::new(
        "has_any_frame",
        Values::Bool(rows.iter().map(|a| a.frames.has_any()).collect()),
    ));
    columns.push(ExportColumn::new(
        "dominant_frame",
        text(rows, |a| Some(a.frames.dominant_label().to_string())),
    ));

    for actor in Actor::ALL {
        columns.push(ExportColumn::new(
            actor.column_name(),
            Values::Bool(rows.iter().map(|a| a.actors.is_present(actor)).collect()),
        ));
    }

    columns.push(ExportColumn::new(
        "npi_raw",
        Values::Float(rows.iter().map(|a| a.npi_raw).collect()),
    ));
    columns.push(ExportColumn::new(
        "npi_normalized",
        Values::Float(rows.iter().map(|a| a.npi_normalized).collect()),
    ));
    columns.push(ExportColumn::new(
        "narrative_phase",
        text(rows, |a| Some(a.phase.label().to_string())),
    ));
    columns
}

/// Exported column names, in order.
pub fn export_column_names() -> Vec<String> {
    columns(&[]).into_iter().map(|c| c.name).collect()
}

pub fn corpus_record_batch(corpus: &Corpus<'_>) -> Result<RecordBatch> {
    let columns = columns(&corpus.articles);
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|c| ArrowField::new(c.name.clone(), c.data_type(), c.nullable))
            .collect::<Vec<_>>(),
    ));
    RecordBatch::try_new(schema, columns.iter().map(ExportColumn::to_array).collect())
        .with_context(|| format!("building {} record batch", corpus.kind.name()))
}

pub fn corpus_parquet_bytes(corpus: &Corpus<'_>) -> Result<Vec<u8>> {
    let batch = corpus_record_batch(corpus)?;
    let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), None)
        .with_context(|| format!("opening parquet writer for {}", corpus.kind.name()))?;
    writer
        .write(&batch)
        .with_context(|| format!("writing {} record batch", corpus.kind.name()))?;
    writer
        .into_inner()
        .with_context(|| format!("closing parquet writer for {}", corpus.kind.name()))
}

pub fn corpus_csv_bytes(corpus: &Corpus<'_>) -> Result<Vec<u8>> {
    let columns = columns(&corpus.articles);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(columns.iter().map(|c| c.name.as_str()))
        .context("writing csv header")?;
    for row in 0..corpus.len() {
        writer
            .write_record(columns.iter().map(|c| c.csv_cell(row)))
            .with_context(|| format!("writing {} csv row {row}", corpus.kind.name()))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing {} csv: {}", corpus.kind.name(), e.error()))
}
