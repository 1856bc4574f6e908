//! Outlet, frame and actor classification plus the Narrative Proximity Index.
//!
//! Detection is row-independent and runs as a parallel map. Normalization is a
//! second pass over the whole batch once every raw index is known.

pub mod actors;
pub mod dictionaries;
pub mod frames;
pub mod index;
pub mod outlet;
pub mod patterns;

use framescope_core::{ActorProfile, ClassifiedArticle, CleanArticle, FrameProfile, MediaType};
use rayon::prelude::*;
use tracing::info;

pub use actors::ActorDetector;
pub use frames::FrameDetector;
pub use index::{narrative_phase, npi_raw, NpiScale, NPI_WEIGHTS, PHASE_BOUNDARIES};
pub use outlet::OutletClassifier;
pub use patterns::PatternError;

/// Compiled pattern sets shared read-only by every row.
pub struct Classifier {
    outlets: OutletClassifier,
    frames: FrameDetector,
    actors: ActorDetector,
}

struct Detection {
    media_type: MediaType,
    frames: FrameProfile,
    actors: ActorProfile,
    npi_raw: f64,
}

impl Classifier {
    pub fn new(outlets: OutletClassifier, frames: FrameDetector, actors: ActorDetector) -> Self {
        Self {
            outlets,
            frames,
            actors,
        }
    }

    pub fn builtin() -> Result<Self, PatternError> {
        Ok(Self::new(
            OutletClassifier::builtin()?,
            FrameDetector::builtin()?,
            ActorDetector::builtin()?,
        ))
    }

    fn detect(&self, article: &CleanArticle) -> Detection {
        let frames = self.frames.detect(article.search_text());
        Detection {
            media_type: self.outlets.classify(&article.publisher_id),
            actors: self.actors.detect(article.search_text()),
            npi_raw: npi_raw(&frames),
            frames,
        }
    }

    /// Labels the whole batch. Output order matches input order.
    pub fn classify_batch(&self, articles: Vec<CleanArticle>) -> Vec<ClassifiedArticle> {
        let detections = articles
            .par_iter()
            .map(|article| self.detect(article))
            .collect::<Vec<_>>();

        let Some(scale) = NpiScale::from_raws(detections.iter().map(|d| d.npi_raw)) else {
            return Vec::new();
        };
        info!(
            articles = detections.len(),
            npi_min = scale.min,
            npi_max = scale.max,
            "classified batch"
        );

        articles
            .into_iter()
            .zip(detections)
            .map(|(article, detection)| ClassifiedArticle {
                phase: narrative_phase(article.publish_date),
                npi_normalized: scale.normalize(detection.npi_raw),
                npi_raw: detection.npi_raw,
                media_type: detection.media_type,
                frames: detection.frames,
                actors: detection.actors,
                article,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use framescope_core::{Actor, CatholicSubcategory, Engagement, Frame, NarrativePhase};

    use super::*;

    fn article(row_id: usize, publisher: &str, text: &str, date: (i32, u32, u32)) -> CleanArticle {
        CleanArticle::new(
            row_id,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            String::new(),
            text.to_string(),
            publisher.to_string(),
            "web".to_string(),
            None,
            Engagement::default(),
        )
    }

    #[test]
    fn batch_labels_every_stage() {
        let classifier = Classifier::builtin().unwrap();
        let out = classifier.classify_batch(vec![
            article(0, "www.bitno.net/clanak", "zavjera i fake news, biskup", (2022, 5, 1)),
            article(1, "index.hr", "vrijeme je lijepo", (2020, 3, 1)),
        ]);

        assert_eq!(out.len(), 2);
        let first = &out[0];
        assert_eq!(first.media_type, MediaType::Catholic(CatholicSubcategory::CatholicPortals));
        assert_eq!(first.frames.total(), 2);
        assert_eq!(first.frames.dominant(), Some(Frame::Conspiracy));
        assert!(first.actors.is_present(Actor::Church));
        assert_eq!(first.npi_raw, 3.0);
        assert_eq!(first.npi_normalized, 100.0);
        assert_eq!(first.phase, NarrativePhase::UkraineAndEnergyCrisis);

        let second = &out[1];
        assert_eq!(second.media_type, MediaType::Liberal);
        assert!(!second.frames.has_any());
        assert_eq!(second.npi_normalized, 0.0);
        assert_eq!(second.phase, NarrativePhase::PandemicOnset);
    }

    #[test]
    fn normalized_index_stays_within_bounds() {
        let classifier = Classifier::builtin().unwrap();
        let texts = [
            "zavjera, soros, korupcija, fake news",
            "korupcija",
            "fake news",
            "ništa posebno",
            "strani utjecaj i zavjera",
        ];
        let batch = texts
            .iter()
            .enumerate()
            .map(|(i, t)| article(i, "example.com", t, (2021, 1, 1)))
            .collect();
        let out = classifier.classify_batch(batch);

        let max_raw = out.iter().map(|a| a.npi_raw).fold(f64::MIN, f64::max);
        let min_raw = out.iter().map(|a| a.npi_raw).fold(f64::MAX, f64::min);
        for a in &out {
            assert!((0.0..=100.0).contains(&a.npi_normalized));
            if a.npi_raw == max_raw {
                assert_eq!(a.npi_normalized, 100.0);
            }
            if a.npi_raw == min_raw {
                assert_eq!(a.npi_normalized, 0.0);
            }
        }
        assert_eq!(out[0].npi_raw, 6.0);
    }

    #[test]
    fn normalization_depends_on_the_batch() {
        let classifier = Classifier::builtin().unwrap();
        let alone = classifier.classify_batch(vec![article(0, "x", "korupcija", (2021, 1, 1))]);
        let mixed = classifier.classify_batch(vec![
            article(0, "x", "korupcija", (2021, 1, 1)),
            article(1, "x", "vrijeme je lijepo", (2021, 1, 1)),
            article(2, "x", "zavjera, soros, korupcija, fake news", (2021, 1, 1)),
        ]);
        assert_eq!(alone[0].npi_normalized, 0.0);
        assert_eq!(mixed[0].npi_normalized, 25.0);
    }

    #[test]
    fn empty_batch_yields_nothing() {
        let classifier = Classifier::builtin().unwrap();
        assert!(classifier.classify_batch(Vec::new()).is_empty());
    }
}
