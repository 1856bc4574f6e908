use framescope_core::{Actor, ActorProfile};

use crate::dictionaries::ACTOR_DICTIONARIES;
use crate::patterns::{KeywordPattern, PatternError};

/// Presence-only counterpart of the frame detector.
pub struct ActorDetector {
    patterns: Vec<KeywordPattern<Actor>>,
}

impl ActorDetector {
    pub fn new(dictionaries: &[(Actor, &[&str])]) -> Result<Self, PatternError> {
        let mut seen = [false; Actor::COUNT];
        let mut patterns = Vec::with_capacity(dictionaries.len());
        for (actor, entries) in dictionaries {
            if std::mem::replace(&mut seen[actor.index()], true) {
                return Err(PatternError::DuplicateDictionary(actor.to_string()));
            }
            patterns.push(KeywordPattern::compile(*actor, actor.as_str(), entries)?);
        }
        Ok(Self { patterns })
    }

    pub fn builtin() -> Result<Self, PatternError> {
        Self::new(&ACTOR_DICTIONARIES)
    }

    pub fn detect(&self, search_text: &str) -> ActorProfile {
        let mut present = [false; Actor::COUNT];
        for pattern in &self.patterns {
            present[pattern.label.index()] = pattern.is_match(search_text);
        }
        ActorProfile::from_flags(present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ActorDetector {
        ActorDetector::builtin().expect("builtin actor dictionaries compile")
    }

    #[test]
    fn detects_each_actor_category() {
        let d = detector();
        let cases = [
            ("biskupi su poručili", Actor::Church),
            ("premijer plenković je rekao", Actor::Government),
            ("odluka europske komisije", Actor::EuropeanUnion),
            ("epidemiolog je upozorio", Actor::HealthAuthorities),
            ("udruga je organizirala skup", Actor::CivilSociety),
            ("novinarka je pitala", Actor::Media),
            ("hrvatski branitelji", Actor::Veterans),
        ];
        for (text, actor) in cases {
            let profile = d.detect(text);
            assert!(profile.is_present(actor), "{actor} not detected in {text:?}");
        }
    }

    #[test]
    fn short_acronyms_require_word_boundaries() {
        let d = detector();
        assert!(d.detect("stav hbk o tome").is_present(Actor::Church));
        assert!(!d.detect("neuspjeh").is_present(Actor::EuropeanUnion));
        assert!(d.detect("zakoni eu i hrvatske").is_present(Actor::EuropeanUnion));
    }

    #[test]
    fn neutral_text_has_no_actors() {
        let profile = detector().detect("kiša pada cijeli dan");
        assert!(Actor::ALL.iter().all(|a| !profile.is_present(*a)));
    }
}
