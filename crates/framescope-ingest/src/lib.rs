//! Raw table loading with extension-based format detection.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use arrow_array::cast::AsArray;
use arrow_array::types::{
    ArrowTemporalType, Date32Type, Date64Type, Float32Type, Float64Type, Int32Type, Int64Type,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use arrow_array::{Array, ArrayRef};
use arrow_schema::{DataType, TimeUnit};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Days, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    Parquet,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            "parquet" => Ok(SourceFormat::Parquet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported input format {extension:?} for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Arrow(#[from] arrow_schema::ArrowError),
    #[error("workbook {0} has no worksheet with a header row")]
    EmptySheet(PathBuf),
    #[error("column {column} has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },
}

/// Untyped tabular input: header names plus string cells, blank cells as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        let columns = columns
            .into_iter()
            .map(|c| c.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name.trim()))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable, IngestError> {
    let path = path.as_ref();
    let format = SourceFormat::detect(path)?;
    let table = match format {
        SourceFormat::Csv => load_csv(path)?,
        SourceFormat::Spreadsheet => load_spreadsheet(path)?,
        SourceFormat::Parquet => load_parquet(path)?,
    };
    info!(
        path = %path.display(),
        ?format,
        rows = table.len(),
        columns = table.columns().len(),
        "loaded raw table"
    );
    Ok(table)
}

fn text_or_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IngestError + '_ {
    move |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Semicolon-separated exports are common for comma-decimal locales.
fn sniff_delimiter(path: &Path) -> Result<u8, IngestError> {
    let file = File::open(path).map_err(io_error(path))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(io_error(path))?;
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    Ok(if semicolons > commas { b';' } else { b',' })
}

fn load_csv(path: &Path) -> Result<RawTable, IngestError> {
    let delimiter = sniff_delimiter(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(text_or_none).collect());
    }
    Ok(table)
}

fn load_spreadsheet(path: &Path) -> Result<RawTable, IngestError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptySheet(path.to_path_buf()))??;
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptySheet(path.to_path_buf()));
    };
    let mut table = RawTable::new(
        header
            .iter()
            .map(|c| spreadsheet_cell(c).unwrap_or_default())
            .collect(),
    );
    for row in rows {
        table.push_row(row.iter().map(spreadsheet_cell).collect());
    }
    Ok(table)
}

fn spreadsheet_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => text_or_none(s),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => {
            excel_serial_to_date(dt.as_f64()).map(|d| d.format(DATE_FORMAT).to_string())
        }
        _ => None,
    }
}

/// Excel serial day numbers count from 1899-12-30 (the 1900 leap-year bug included).
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

fn load_parquet(path: &Path) -> Result<RawTable, IngestError> {
    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut table = RawTable::new(schema.fields().iter().map(|f| f.name().clone()).collect());
    for batch in reader {
        let batch = batch?;
        let columns = batch
            .columns()
            .iter()
            .zip(schema.fields())
            .map(|(array, field)| column_strings(array, field.name()))
            .collect::<Result<Vec<_>, _>>()?;
        for row in 0..batch.num_rows() {
            table.push_row(columns.iter().map(|c| c[row].clone()).collect());
        }
    }
    Ok(table)
}

/// Timestamps keep their wall-clock time; the zone, if any, is not applied.
fn temporal_strings<T>(array: &ArrayRef, format: &str) -> Vec<Option<String>>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    let values = array.as_primitive::<T>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                None
            } else {
                values
                    .value_as_datetime(i)
                    .map(|ts| ts.format(format).to_string())
            }
        })
        .collect()
}

fn column_strings(array: &ArrayRef, name: &str) -> Result<Vec<Option<String>>, IngestError> {
    let values = match array.data_type() {
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(|v| v.and_then(text_or_none))
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(|v| v.and_then(text_or_none))
            .collect(),
        DataType::Int32 => array
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::Int64 => array
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::Float32 => array
            .as_primitive::<Float32Type>()
            .iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::Float64 => array
            .as_primitive::<Float64Type>()
            .iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        DataType::Date32 => temporal_strings::<Date32Type>(array, DATE_FORMAT),
        DataType::Date64 => temporal_strings::<Date64Type>(array, DATE_FORMAT),
        DataType::Timestamp(unit, _) => match unit {
            TimeUnit::Second => temporal_strings::<TimestampSecondType>(array, DATETIME_FORMAT),
            TimeUnit::Millisecond => {
                temporal_strings::<TimestampMillisecondType>(array, DATETIME_FORMAT)
            }
            TimeUnit::Microsecond => {
                temporal_strings::<TimestampMicrosecondType>(array, DATETIME_FORMAT)
            }
            TimeUnit::Nanosecond => {
                temporal_strings::<TimestampNanosecondType>(array, DATETIME_FORMAT)
            }
        },
        DataType::Dictionary(_, _) => {
            let dictionary = array.as_any_dictionary();
            let values = column_strings(dictionary.values(), name)?;
            let keys = dictionary.normalized_keys();
            (0..array.len())
                .map(|i| {
                    if array.is_null(i) {
                        None
                    } else {
                        values.get(keys[i]).cloned().flatten()
                    }
                })
                .collect()
        }
        DataType::Null => vec![None; array.len()],
        other => {
            return Err(IngestError::UnsupportedColumnType {
                column: name.to_string(),
                data_type: other.to_string(),
            })
        }
    };
    Ok(values)
}
