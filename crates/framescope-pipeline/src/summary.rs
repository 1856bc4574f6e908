//! Run summary: one section per report sheet, rendered to JSON and Markdown.

use chrono::NaiveDate;
use framescope_core::{CatholicSubcategory, ClassifiedArticle, Frame, MediaType, NarrativePhase};
use serde::Serialize;

use crate::clean::CleanReport;
use crate::partition::Corpus;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

impl Share {
    fn new(label: impl Into<String>, count: usize, total: usize) -> Self {
        Self {
            label: label.into(),
            count,
            percent: percent(count, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSize {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub raw_rows: usize,
    pub after_source_filter: usize,
    pub after_text_filter: usize,
    pub after_date_filter: usize,
    pub after_dedup: usize,
    pub coerced_numeric_cells: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub corpora: Vec<CorpusSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub overview: Overview,
    pub media_types: Vec<Share>,
    pub catholic_subcategories: Vec<Share>,
    pub frames: Vec<Share>,
    pub phases: Vec<Share>,
}

/// Percent rounded to one decimal; an empty denominator yields 0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (1000.0 * count as f64 / total as f64).round() / 10.0
}

impl CorpusSummary {
    pub fn build(report: &CleanReport, articles: &[ClassifiedArticle], corpora: &[Corpus<'_>]) -> Self {
        let total = articles.len();
        let dates = articles.iter().map(|a| a.article.publish_date);

        let overview = Overview {
            raw_rows: report.raw_rows,
            after_source_filter: report.after_source_filter(),
            after_text_filter: report.after_text_filter(),
            after_date_filter: report.after_date_filter(),
            after_dedup: report.kept_rows,
            coerced_numeric_cells: report.coerced_numeric_cells,
            first_date: dates.clone().min(),
            last_date: dates.max(),
            corpora: corpora
                .iter()
                .map(|c| CorpusSize {
                    name: c.kind.name().to_string(),
                    rows: c.len(),
                })
                .collect(),
        };

        let media_types = MediaType::LABELS
            .iter()
            .map(|label| {
                let count = articles
                    .iter()
                    .filter(|a| a.media_type.label() == *label)
                    .count();
                Share::new(*label, count, total)
            })
            .collect();

        let catholic_total = articles.iter().filter(|a| a.media_type.is_catholic()).count();
        let catholic_subcategories = CatholicSubcategory::ALL
            .iter()
            .map(|sub| {
                let count = articles
                    .iter()
                    .filter(|a| a.media_type.catholic_subcategory() == Some(*sub))
                    .count();
                Share::new(sub.label(), count, catholic_total)
            })
            .collect();

        let frames = Frame::ALL
            .iter()
            .map(|frame| {
                let count = articles.iter().filter(|a| a.frames.is_present(*frame)).count();
                Share::new(frame.as_str(), count, total)
            })
            .collect();

        let phases = NarrativePhase::ALL
            .iter()
            .map(|phase| {
                let count = articles.iter().filter(|a| a.phase == *phase).count();
                Share::new(phase.label(), count, total)
            })
            .collect();

        Self {
            overview,
            media_types,
            catholic_subcategories,
            frames,
            phases,
        }
    }

    pub fn to_markdown(&self) -> String {
        let o = &self.overview;
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let mut lines = vec![
            "# Framescope Corpus Summary".to_string(),
            String::new(),
            "## Overview".to_string(),
            format!("- Raw rows: {}", o.raw_rows),
            format!("- After source filter: {}", o.after_source_filter),
            format!("- After text filter: {}", o.after_text_filter),
            format!("- After date filter: {}", o.after_date_filter),
            format!("- After deduplication: {}", o.after_dedup),
            format!("- Coerced numeric cells: {}", o.coerced_numeric_cells),
            format!("- Date range: {} .. {}", date(o.first_date), date(o.last_date)),
        ];
        for corpus in &o.corpora {
            lines.push(format!("- Corpus `{}`: {}", corpus.name, corpus.rows));
        }

        for (title, shares) in [
            ("Media Types", &self.media_types),
            ("Catholic Subcategories", &self.catholic_subcategories),
            ("Frames", &self.frames),
            ("Narrative Phases", &self.phases),
        ] {
            lines.push(String::new());
            lines.push(format!("## {title}"));
            lines.push("| label | count | percent |".to_string());
            lines.push("|---|---:|---:|".to_string());
            for share in shares {
                lines.push(format!("| {} | {} | {:.1} |", share.label, share.count, share.percent));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}
