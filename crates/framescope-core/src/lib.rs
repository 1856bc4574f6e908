//! Core article model and classification labels for framescope.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel label used wherever a record has no dominant frame.
pub const NO_FRAME: &str = "NONE";

/// Engagement counters carried from the raw export, in export column order.
pub const ENGAGEMENT_COUNTERS: [&str; 8] = [
    "REACH",
    "VIRALITY",
    "ENGAGEMENT_RATE",
    "INTERACTIONS",
    "FACEBOOK_SHARES",
    "FACEBOOK_COMMENTS",
    "FACEBOOK_REACTIONS",
    "TWITTER_SHARES",
];

/// Non-negative engagement counters keyed by raw column name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Engagement(BTreeMap<String, f64>);

impl Engagement {
    /// Stores a counter, clamping anything that is not a finite non-negative number to zero.
    pub fn set(&mut self, counter: &str, value: f64) {
        let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };
        self.0.insert(counter.to_string(), value);
    }

    /// Missing counters read as zero.
    pub fn get(&self, counter: &str) -> f64 {
        self.0.get(counter).copied().unwrap_or(0.0)
    }
}

/// Narrative frames in declaration order. The order is the dominant-frame tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frame {
    Conspiracy,
    ForeignThreat,
    InstitutionalDistrust,
    MediaCritique,
    MoralDecline,
    IdentityThreat,
    HealthSkepticism,
    AntiElite,
}

impl Frame {
    pub const COUNT: usize = 8;

    pub const ALL: [Frame; Frame::COUNT] = [
        Frame::Conspiracy,
        Frame::ForeignThreat,
        Frame::InstitutionalDistrust,
        Frame::MediaCritique,
        Frame::MoralDecline,
        Frame::IdentityThreat,
        Frame::HealthSkepticism,
        Frame::AntiElite,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frame::Conspiracy => "CONSPIRACY",
            Frame::ForeignThreat => "FOREIGN_THREAT",
            Frame::InstitutionalDistrust => "INSTITUTIONAL_DISTRUST",
            Frame::MediaCritique => "MEDIA_CRITIQUE",
            Frame::MoralDecline => "MORAL_DECLINE",
            Frame::IdentityThreat => "IDENTITY_THREAT",
            Frame::HealthSkepticism => "HEALTH_SKEPTICISM",
            Frame::AntiElite => "ANTI_ELITE",
        }
    }

    /// Boolean presence column name in exported corpora.
    pub fn column_name(self) -> String {
        format!("frame_{}", self.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    Church,
    Government,
    EuropeanUnion,
    HealthAuthorities,
    CivilSociety,
    Media,
    Veterans,
}

impl Actor {
    pub const COUNT: usize = 7;

    pub const ALL: [Actor; Actor::COUNT] = [
        Actor::Church,
        Actor::Government,
        Actor::EuropeanUnion,
        Actor::HealthAuthorities,
        Actor::CivilSociety,
        Actor::Media,
        Actor::Veterans,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Church => "CHURCH",
            Actor::Government => "GOVERNMENT",
            Actor::EuropeanUnion => "EUROPEAN_UNION",
            Actor::HealthAuthorities => "HEALTH_AUTHORITIES",
            Actor::CivilSociety => "CIVIL_SOCIETY",
            Actor::Media => "MEDIA",
            Actor::Veterans => "VETERANS",
        }
    }

    pub fn column_name(self) -> String {
        format!("actor_{}", self.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catholic outlet tiers, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CatholicSubcategory {
    OfficialChurch,
    CatholicRadio,
    CatholicPortals,
    CatholicAligned,
}

impl CatholicSubcategory {
    pub const ALL: [CatholicSubcategory; 4] = [
        CatholicSubcategory::OfficialChurch,
        CatholicSubcategory::CatholicRadio,
        CatholicSubcategory::CatholicPortals,
        CatholicSubcategory::CatholicAligned,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CatholicSubcategory::OfficialChurch => "Official Church",
            CatholicSubcategory::CatholicRadio => "Catholic Radio",
            CatholicSubcategory::CatholicPortals => "Catholic Portals",
            CatholicSubcategory::CatholicAligned => "Catholic Aligned",
        }
    }
}

/// Outlet media type. A Catholic subcategory exists only inside the `Catholic` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Catholic(CatholicSubcategory),
    Conservative,
    Liberal,
    Tabloid,
    Regional,
    Business,
    Other,
}

impl MediaType {
    /// All media-type labels in report order.
    pub const LABELS: [&'static str; 7] = [
        "Catholic",
        "Conservative",
        "Liberal",
        "Tabloid",
        "Regional",
        "Business",
        "Other",
    ];

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Catholic(_) => "Catholic",
            MediaType::Conservative => "Conservative",
            MediaType::Liberal => "Liberal",
            MediaType::Tabloid => "Tabloid",
            MediaType::Regional => "Regional",
            MediaType::Business => "Business",
            MediaType::Other => "Other",
        }
    }

    pub fn catholic_subcategory(self) -> Option<CatholicSubcategory> {
        match self {
            MediaType::Catholic(sub) => Some(sub),
            _ => None,
        }
    }

    pub fn is_catholic(self) -> bool {
        matches!(self, MediaType::Catholic(_))
    }
}

/// Per-frame match counts. Presence, totals and the dominant frame are derived from counts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameProfile {
    counts: [u32; Frame::COUNT],
}

impl FrameProfile {
    pub fn from_counts(counts: [u32; Frame::COUNT]) -> Self {
        Self { counts }
    }

    pub fn count(&self, frame: Frame) -> u32 {
        self.counts[frame.index()]
    }

    pub fn is_present(&self, frame: Frame) -> bool {
        self.count(frame) > 0
    }

    /// Number of frames present, not the sum of match counts.
    pub fn total(&self) -> u32 {
        self.counts.iter().filter(|c| **c > 0).count() as u32
    }

    pub fn has_any(&self) -> bool {
        self.counts.iter().any(|c| *c > 0)
    }

    /// Frame with the strictly greatest count; the first declared frame wins ties.
    pub fn dominant(&self) -> Option<Frame> {
        let mut best: Option<(Frame, u32)> = None;
        for frame in Frame::ALL {
            let count = self.count(frame);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((frame, count)),
            }
        }
        best.map(|(frame, _)| frame)
    }

    pub fn dominant_label(&self) -> &'static str {
        self.dominant().map(Frame::as_str).unwrap_or(NO_FRAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorProfile {
    present: [bool; Actor::COUNT],
}

impl ActorProfile {
    pub fn from_flags(present: [bool; Actor::COUNT]) -> Self {
        Self { present }
    }

    pub fn is_present(&self, actor: Actor) -> bool {
        self.present[actor.index()]
    }
}

/// Macro-event period of a publish date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NarrativePhase {
    PrePandemic,
    PandemicOnset,
    VaccinationCampaign,
    CovidCertificateMandate,
    UkraineAndEnergyCrisis,
    EurozoneEntry,
    Other,
}

impl NarrativePhase {
    /// The six dated periods in chronological order followed by the catch-all.
    pub const ALL: [NarrativePhase; 7] = [
        NarrativePhase::PrePandemic,
        NarrativePhase::PandemicOnset,
        NarrativePhase::VaccinationCampaign,
        NarrativePhase::CovidCertificateMandate,
        NarrativePhase::UkraineAndEnergyCrisis,
        NarrativePhase::EurozoneEntry,
        NarrativePhase::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NarrativePhase::PrePandemic => "Pre-Pandemic",
            NarrativePhase::PandemicOnset => "Pandemic Onset",
            NarrativePhase::VaccinationCampaign => "Vaccination Campaign",
            NarrativePhase::CovidCertificateMandate => "COVID Certificate Mandate",
            NarrativePhase::UkraineAndEnergyCrisis => "Ukraine and Energy Crisis",
            NarrativePhase::EurozoneEntry => "Eurozone Entry",
            NarrativePhase::Other => "Other",
        }
    }
}

/// Cleaned web article, the handoff contract from filtering into classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanArticle {
    pub row_id: usize,
    pub publish_date: NaiveDate,
    pub title: String,
    pub body_text: String,
    pub publisher_id: String,
    pub source_type: String,
    pub url: Option<String>,
    pub engagement: Engagement,
    search_text: String,
    pub word_count: usize,
}

impl CleanArticle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        row_id: usize,
        publish_date: NaiveDate,
        title: String,
        body_text: String,
        publisher_id: String,
        source_type: String,
        url: Option<String>,
        engagement: Engagement,
    ) -> Self {
        let search_text = format!("{title} {body_text}").to_lowercase();
        let word_count = body_text.split_whitespace().count();
        Self {
            row_id,
            publish_date,
            title,
            body_text,
            publisher_id,
            source_type,
            url,
            engagement,
            search_text,
            word_count,
        }
    }

    /// Lowercased `title + " " + body_text`, fixed at construction; the only input to pattern matching.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }
}

/// Fully labeled article, read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedArticle {
    pub article: CleanArticle,
    pub media_type: MediaType,
    pub frames: FrameProfile,
    pub actors: ActorProfile,
    pub npi_raw: f64,
    pub npi_normalized: f64,
    pub phase: NarrativePhase,
}
