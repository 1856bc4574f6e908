//! Narrative Proximity Index and narrative phases.
//!
//! `npi_normalized` is batch-relative: the same record scored within a
//! different subset of the corpus can receive a different value.

use chrono::NaiveDate;
use framescope_core::{Frame, FrameProfile, NarrativePhase};

/// Frame weights of the raw index. Changing them changes published corpus semantics.
pub const NPI_WEIGHTS: [(Frame, f64); 4] = [
    (Frame::Conspiracy, 2.0),
    (Frame::ForeignThreat, 1.5),
    (Frame::InstitutionalDistrust, 1.5),
    (Frame::MediaCritique, 1.0),
];

/// Half-open `[from, to)` date ranges as `(y, m, d)`, contiguous and chronological.
pub const PHASE_BOUNDARIES: [(NarrativePhase, (i32, u32, u32), (i32, u32, u32)); 6] = [
    (NarrativePhase::PrePandemic, (2019, 1, 1), (2020, 2, 25)),
    (NarrativePhase::PandemicOnset, (2020, 2, 25), (2020, 12, 27)),
    (NarrativePhase::VaccinationCampaign, (2020, 12, 27), (2021, 11, 16)),
    (NarrativePhase::CovidCertificateMandate, (2021, 11, 16), (2022, 2, 24)),
    (NarrativePhase::UkraineAndEnergyCrisis, (2022, 2, 24), (2022, 10, 1)),
    (NarrativePhase::EurozoneEntry, (2022, 10, 1), (2024, 1, 1)),
];

pub fn npi_raw(frames: &FrameProfile) -> f64 {
    NPI_WEIGHTS
        .iter()
        .filter(|(frame, _)| frames.is_present(*frame))
        .map(|(_, weight)| weight)
        .sum()
}

/// Batch min/max of raw scores, computed once after every raw score is final.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpiScale {
    pub min: f64,
    pub max: f64,
}

impl NpiScale {
    /// `None` for an empty batch.
    pub fn from_raws(raws: impl IntoIterator<Item = f64>) -> Option<Self> {
        raws.into_iter().fold(None, |acc, raw| match acc {
            None => Some(Self { min: raw, max: raw }),
            Some(scale) => Some(Self {
                min: scale.min.min(raw),
                max: scale.max.max(raw),
            }),
        })
    }

    /// `round(100 · (raw − min) / max(max − min, 1), 1)`.
    pub fn normalize(&self, raw: f64) -> f64 {
        let span = (self.max - self.min).max(1.0);
        (1000.0 * (raw - self.min) / span).round() / 10.0
    }
}

pub fn narrative_phase(date: NaiveDate) -> NarrativePhase {
    PHASE_BOUNDARIES
        .iter()
        .find(|(_, from, to)| match (ymd(*from), ymd(*to)) {
            (Some(from), Some(to)) => from <= date && date < to,
            _ => false,
        })
        .map(|(phase, _, _)| *phase)
        .unwrap_or(NarrativePhase::Other)
}

fn ymd((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}
