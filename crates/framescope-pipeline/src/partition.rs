use framescope_core::ClassifiedArticle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    Full,
    Framed,
    Catholic,
    CatholicFramed,
}

impl CorpusKind {
    pub const ALL: [CorpusKind; 4] = [
        CorpusKind::Full,
        CorpusKind::Framed,
        CorpusKind::Catholic,
        CorpusKind::CatholicFramed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CorpusKind::Full => "full",
            CorpusKind::Framed => "framed",
            CorpusKind::Catholic => "catholic",
            CorpusKind::CatholicFramed => "catholic_framed",
        }
    }

    pub fn includes(self, article: &ClassifiedArticle) -> bool {
        match self {
            CorpusKind::Full => true,
            CorpusKind::Framed => article.frames.has_any(),
            CorpusKind::Catholic => article.media_type.is_catholic(),
            CorpusKind::CatholicFramed => {
                article.media_type.is_catholic() && article.frames.has_any()
            }
        }
    }
}

/// A named row subset borrowing from the classified batch.
#[derive(Debug, Clone)]
pub struct Corpus<'a> {
    pub kind: CorpusKind,
    pub articles: Vec<&'a ClassifiedArticle>,
}

impl Corpus<'_> {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

pub fn partition(articles: &[ClassifiedArticle]) -> Vec<Corpus<'_>> {
    CorpusKind::ALL
        .into_iter()
        .map(|kind| Corpus {
            kind,
            articles: articles.iter().filter(|a| kind.includes(a)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use framescope_core::{
        ActorProfile, CatholicSubcategory, CleanArticle, Engagement, Frame, FrameProfile,
        MediaType, NarrativePhase,
    };

    use super::*;

    fn classified(row_id: usize, media_type: MediaType, framed: bool) -> ClassifiedArticle {
        let mut counts = [0; Frame::COUNT];
        if framed {
            counts[Frame::IdentityThreat.index()] = 1;
        }
        ClassifiedArticle {
            article: CleanArticle::new(
                row_id,
                NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
                "t".into(),
                "b".into(),
                "p".into(),
                "web".into(),
                None,
                Engagement::default(),
            ),
            media_type,
            frames: FrameProfile::from_counts(counts),
            actors: ActorProfile::default(),
            npi_raw: 0.0,
            npi_normalized: 0.0,
            phase: NarrativePhase::UkraineAndEnergyCrisis,
        }
    }

    #[test]
    fn corpora_nest_as_expected() {
        let catholic = MediaType::Catholic(CatholicSubcategory::OfficialChurch);
        let batch = vec![
            classified(0, catholic, true),
            classified(1, catholic, false),
            classified(2, MediaType::Liberal, true),
            classified(3, MediaType::Other, false),
        ];
        let corpora = partition(&batch);
        let rows = |kind: CorpusKind| {
            corpora
                .iter()
                .find(|c| c.kind == kind)
                .unwrap()
                .articles
                .iter()
                .map(|a| a.article.row_id)
                .collect::<Vec<_>>()
        };
        assert_eq!(rows(CorpusKind::Full), [0, 1, 2, 3]);
        assert_eq!(rows(CorpusKind::Framed), [0, 2]);
        assert_eq!(rows(CorpusKind::Catholic), [0, 1]);
        assert_eq!(rows(CorpusKind::CatholicFramed), [0]);
    }

    #[test]
    fn empty_batch_yields_four_empty_corpora() {
        let corpora = partition(&[]);
        assert_eq!(corpora.len(), 4);
        assert!(corpora.iter().all(Corpus::is_empty));
    }
}
