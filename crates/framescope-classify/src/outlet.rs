//! Publisher identifier → media type.

use framescope_core::{CatholicSubcategory, MediaType};

use crate::dictionaries::{CATHOLIC_OUTLETS, SECULAR_OUTLETS};
use crate::patterns::{KeywordPattern, PatternError};

pub struct OutletClassifier {
    catholic: Vec<KeywordPattern<CatholicSubcategory>>,
    secular: Vec<KeywordPattern<MediaType>>,
}

impl OutletClassifier {
    /// Groups are tried in the order given; the first match wins.
    pub fn new(
        catholic: &[(CatholicSubcategory, &[&str])],
        secular: &[(MediaType, &[&str])],
    ) -> Result<Self, PatternError> {
        let catholic = catholic
            .iter()
            .map(|(sub, entries)| KeywordPattern::compile(*sub, sub.label(), entries))
            .collect::<Result<Vec<_>, _>>()?;
        let secular = secular
            .iter()
            .map(|(media, entries)| KeywordPattern::compile(*media, media.label(), entries))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { catholic, secular })
    }

    pub fn builtin() -> Result<Self, PatternError> {
        Self::new(&CATHOLIC_OUTLETS, &SECULAR_OUTLETS)
    }

    pub fn catholic_subcategory(&self, publisher_id: &str) -> Option<CatholicSubcategory> {
        let publisher_id = publisher_id.to_lowercase();
        self.catholic
            .iter()
            .find(|p| p.is_match(&publisher_id))
            .map(|p| p.label)
    }

    /// Catholic tiers always take precedence over secular groups.
    pub fn classify(&self, publisher_id: &str) -> MediaType {
        if let Some(sub) = self.catholic_subcategory(publisher_id) {
            return MediaType::Catholic(sub);
        }
        let publisher_id = publisher_id.to_lowercase();
        self.secular
            .iter()
            .find(|p| p.is_match(&publisher_id))
            .map(|p| p.label)
            .unwrap_or(MediaType::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> OutletClassifier {
        OutletClassifier::builtin().expect("builtin outlet patterns compile")
    }

    #[test]
    fn portal_url_is_catholic_portals() {
        let media = classifier().classify("www.bitno.net/clanak");
        assert_eq!(media, MediaType::Catholic(CatholicSubcategory::CatholicPortals));
        assert_eq!(media.label(), "Catholic");
    }

    #[test]
    fn index_is_liberal_without_subcategory() {
        let media = classifier().classify("index.hr");
        assert_eq!(media, MediaType::Liberal);
        assert_eq!(media.catholic_subcategory(), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classifier().classify("WWW.INDEX.HR"), MediaType::Liberal);
    }

    #[test]
    fn official_church_outranks_other_catholic_tiers() {
        assert_eq!(
            classifier().classify("ika.hkm.hr/radio-marija"),
            MediaType::Catholic(CatholicSubcategory::OfficialChurch)
        );
    }

    #[test]
    fn catholic_pattern_outranks_secular_pattern() {
        // Matches both a Catholic Aligned fragment and a Conservative fragment.
        assert_eq!(
            classifier().classify("narod.hr/direktno.hr"),
            MediaType::Catholic(CatholicSubcategory::CatholicAligned)
        );
    }

    #[test]
    fn secular_groups_follow_priority_order() {
        let c = classifier();
        assert_eq!(c.classify("direktno.hr"), MediaType::Conservative);
        assert_eq!(c.classify("24sata.hr/index.hr"), MediaType::Liberal);
        assert_eq!(c.classify("www.24sata.hr"), MediaType::Tabloid);
        assert_eq!(c.classify("slobodnadalmacija.hr"), MediaType::Regional);
        assert_eq!(c.classify("poslovni.hr"), MediaType::Business);
    }

    #[test]
    fn unknown_identifiers_fall_through_to_other() {
        let c = classifier();
        for id in ["", "   ", "example.com", "???", "ćevapi.ba"] {
            let media = c.classify(id);
            assert_eq!(media, MediaType::Other);
            assert!(media.catholic_subcategory().is_none());
        }
    }
}
