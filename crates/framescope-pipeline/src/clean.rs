//! Web-only filtering, row cleaning and de-duplication.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use framescope_core::{CleanArticle, Engagement, ENGAGEMENT_COUNTERS};
use framescope_ingest::RawTable;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub const REQUIRED_COLUMNS: [&str; 5] = ["DATE", "TITLE", "FULL_TEXT", "FROM", "SOURCE_TYPE"];
pub const URL_COLUMN: &str = "URL";
pub const WEB_SOURCE_TYPE: &str = "web";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y.", "%d.%m.%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d.%m.%Y. %H:%M:%S%.f",
    "%d.%m.%Y. %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
];

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Rows removed at each filter step, in pipeline order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub raw_rows: usize,
    pub dropped_non_web: usize,
    pub dropped_empty_text: usize,
    pub dropped_invalid_date: usize,
    pub dropped_duplicates: usize,
    pub coerced_numeric_cells: usize,
    pub kept_rows: usize,
}

impl CleanReport {
    pub fn after_source_filter(&self) -> usize {
        self.raw_rows - self.dropped_non_web
    }

    pub fn after_text_filter(&self) -> usize {
        self.after_source_filter() - self.dropped_empty_text
    }

    pub fn after_date_filter(&self) -> usize {
        self.after_text_filter() - self.dropped_invalid_date
    }
}

struct ColumnMap {
    date: usize,
    title: usize,
    full_text: usize,
    from: usize,
    source_type: usize,
    url: Option<usize>,
    counters: Vec<(&'static str, Option<usize>)>,
}

impl ColumnMap {
    fn resolve(table: &RawTable) -> Result<Self, CleanError> {
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|c| table.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(CleanError::MissingColumns(missing));
        }
        let required = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(Self {
            date: required("DATE"),
            title: required("TITLE"),
            full_text: required("FULL_TEXT"),
            from: required("FROM"),
            source_type: required("SOURCE_TYPE"),
            url: table.column_index(URL_COLUMN),
            counters: ENGAGEMENT_COUNTERS
                .iter()
                .map(|c| (*c, table.column_index(c)))
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupKey {
    Url(String),
    Triple(String, NaiveDate, String),
}

fn dedup_key(article: &CleanArticle) -> DedupKey {
    match article.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => DedupKey::Url(url.to_string()),
        None => DedupKey::Triple(
            article.title.clone(),
            article.publish_date,
            article.publisher_id.clone(),
        ),
    }
}

/// Keeps the first occurrence per URL, or per (title, date, publisher) when a row has no URL.
pub fn deduplicate(articles: Vec<CleanArticle>) -> (Vec<CleanArticle>, usize) {
    let mut seen = HashSet::new();
    let before = articles.len();
    let kept = articles
        .into_iter()
        .filter(|a| seen.insert(dedup_key(a)))
        .collect::<Vec<_>>();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Accepts ISO and Croatian day-first dates, with or without a time part.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|ts| ts.date())
        })
}

/// Normalizes comma decimals (`1.234,5` → `1234.5`) and coerces to a non-negative number.
/// A trailing `%` is dropped, so rates keep their percent value.
/// Returns `None` when the cell is present but unusable.
pub fn parse_counter(raw: &str) -> Option<f64> {
    let compact = raw.trim().replace([' ', '\u{a0}'], "");
    let compact = compact.strip_suffix('%').unwrap_or(&compact).to_string();
    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

pub fn filter_and_clean(table: &RawTable) -> Result<(Vec<CleanArticle>, CleanReport), CleanError> {
    let columns = ColumnMap::resolve(table)?;
    let mut report = CleanReport {
        raw_rows: table.len(),
        ..Default::default()
    };
    let mut articles = Vec::new();

    for row_id in 0..table.len() {
        let cell = |column: usize| table.cell(row_id, column);

        let source_type = cell(columns.source_type).unwrap_or_default().trim();
        if !source_type.eq_ignore_ascii_case(WEB_SOURCE_TYPE) {
            report.dropped_non_web += 1;
            continue;
        }

        let Some(body_text) = cell(columns.full_text).filter(|t| !t.trim().is_empty()) else {
            report.dropped_empty_text += 1;
            continue;
        };

        let Some(publish_date) = cell(columns.date).and_then(parse_publish_date) else {
            report.dropped_invalid_date += 1;
            continue;
        };

        let mut engagement = Engagement::default();
        for (counter, index) in &columns.counters {
            let raw = index.and_then(|i| cell(i));
            let value = match raw {
                None => 0.0,
                Some(raw) => parse_counter(raw).unwrap_or_else(|| {
                    report.coerced_numeric_cells += 1;
                    0.0
                }),
            };
            engagement.set(counter, value);
        }

        articles.push(CleanArticle::new(
            row_id,
            publish_date,
            cell(columns.title).unwrap_or_default().trim().to_string(),
            body_text.trim().to_string(),
            cell(columns.from).unwrap_or_default().trim().to_string(),
            source_type.to_ascii_lowercase(),
            columns.url.and_then(|i| cell(i)).map(|u| u.trim().to_string()),
            engagement,
        ));
    }

    let (articles, dropped_duplicates) = deduplicate(articles);
    report.dropped_duplicates = dropped_duplicates;
    report.kept_rows = articles.len();

    info!(
        raw_rows = report.raw_rows,
        after_source_filter = report.after_source_filter(),
        after_text_filter = report.after_text_filter(),
        after_date_filter = report.after_date_filter(),
        after_dedup = report.kept_rows,
        "filter and clean complete"
    );
    if report.coerced_numeric_cells > 0 {
        warn!(
            cells = report.coerced_numeric_cells,
            "non-numeric engagement values coerced to 0"
        );
    }
    if report.dropped_invalid_date > 0 {
        warn!(rows = report.dropped_invalid_date, "rows dropped for unparseable dates");
    }

    Ok((articles, report))
}
