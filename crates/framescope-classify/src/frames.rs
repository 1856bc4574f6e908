use framescope_core::{Frame, FrameProfile};

use crate::dictionaries::FRAME_DICTIONARIES;
use crate::patterns::{KeywordPattern, PatternError};

/// Counts frame keyword matches; one compiled alternation per frame.
pub struct FrameDetector {
    patterns: Vec<KeywordPattern<Frame>>,
}

impl FrameDetector {
    /// Frames without a dictionary always count zero.
    pub fn new(dictionaries: &[(Frame, &[&str])]) -> Result<Self, PatternError> {
        let mut seen = [false; Frame::COUNT];
        let mut patterns = Vec::with_capacity(dictionaries.len());
        for (frame, entries) in dictionaries {
            if std::mem::replace(&mut seen[frame.index()], true) {
                return Err(PatternError::DuplicateDictionary(frame.to_string()));
            }
            patterns.push(KeywordPattern::compile(*frame, frame.as_str(), entries)?);
        }
        Ok(Self { patterns })
    }

    pub fn builtin() -> Result<Self, PatternError> {
        Self::new(&FRAME_DICTIONARIES)
    }

    pub fn detect(&self, search_text: &str) -> FrameProfile {
        let mut counts = [0u32; Frame::COUNT];
        for pattern in &self.patterns {
            counts[pattern.label.index()] = pattern.count(search_text);
        }
        FrameProfile::from_counts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> FrameDetector {
        FrameDetector::builtin().expect("builtin frame dictionaries compile")
    }

    #[test]
    fn conspiracy_and_media_critique_tie_resolves_to_conspiracy() {
        let profile = detector().detect("ovo je zavjera, a sve su to fake news");
        assert!(profile.is_present(Frame::Conspiracy));
        assert!(profile.is_present(Frame::MediaCritique));
        for frame in Frame::ALL {
            if !matches!(frame, Frame::Conspiracy | Frame::MediaCritique) {
                assert!(!profile.is_present(frame), "{frame} should be absent");
            }
        }
        assert_eq!(profile.total(), 2);
        assert_eq!(profile.dominant(), Some(Frame::Conspiracy));
    }

    #[test]
    fn higher_count_wins_over_declaration_order() {
        let profile = detector().detect("zavjera. fake news, fake news i opet fake news");
        assert_eq!(profile.count(Frame::Conspiracy), 1);
        assert_eq!(profile.count(Frame::MediaCritique), 3);
        assert_eq!(profile.dominant(), Some(Frame::MediaCritique));
    }

    #[test]
    fn text_without_keywords_has_no_frames() {
        let profile = detector().detect("danas je sunčano i toplo u zagrebu");
        assert!(!profile.has_any());
        assert_eq!(profile.total(), 0);
        assert_eq!(profile.dominant_label(), "NONE");
        assert!(Frame::ALL.iter().all(|f| profile.count(*f) == 0));
    }

    #[test]
    fn presence_always_follows_count() {
        let texts = [
            "korupcija i nepovjerenje u institucije, soros i strani utjecaj",
            "rodna ideologija i kultura smrti, hrvatski identitet",
            "nuspojave cjepiva, globalisti i politička elita",
            "",
        ];
        let d = detector();
        for text in texts {
            let profile = d.detect(text);
            for frame in Frame::ALL {
                assert_eq!(profile.is_present(frame), profile.count(frame) > 0);
            }
        }
    }

    #[test]
    fn keywords_inside_longer_words_still_count() {
        let profile = detector().detect("nezavjerenički ton");
        assert_eq!(profile.count(Frame::Conspiracy), 1);
    }

    #[test]
    fn duplicate_dictionary_is_rejected() {
        let entries: &[&str] = &["zavjer"];
        let err = FrameDetector::new(&[(Frame::Conspiracy, entries), (Frame::Conspiracy, entries)])
            .err()
            .expect("duplicate frame must fail");
        assert!(matches!(err, PatternError::DuplicateDictionary(_)));
    }
}
