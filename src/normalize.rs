//! Noun-phrase canonicalization backed by morphological tagging
//!
//! Both sides of a ratio clause are free-form phrases; before they can serve
//! as aggregation keys they are collapsed to a canonical noun form. Two
//! distinct collapses exist and must not be conflated:
//!
//! - [`EntityNormalizer::trailing_noun_phrase`] validates and extracts the
//!   subject of a clause: long-unit tagging, the phrase must END in a noun,
//!   and the whole contiguous noun tail is kept (部下の育成 -> 育成,
//!   不動産投資 -> 不動産投資, 太らない -> rejected).
//! - [`EntityNormalizer::last_noun`] canonicalizes a phrase for cross-title
//!   aggregation: short-unit tagging, the last noun anywhere in the phrase
//!   wins (住宅営業 -> 営業), and a phrase without any noun passes through
//!   unchanged.

use std::sync::Arc;

use crate::morphology::{Granularity, MorphologicalTagger};

/// Canonicalizes noun phrases via a shared morphological tagger
#[derive(Clone)]
pub struct EntityNormalizer {
    tagger: Arc<dyn MorphologicalTagger>,
}

impl EntityNormalizer {
    /// Create a normalizer over a shared tagger
    pub fn new(tagger: Arc<dyn MorphologicalTagger>) -> Self {
        Self { tagger }
    }

    /// Extract the trailing run of noun morphemes as one compound phrase
    ///
    /// Tags at long-unit granularity. The final morpheme must be a noun;
    /// the run then extends backward while morphemes stay noun-tagged, and
    /// the concatenated surfaces are returned in original order.
    ///
    /// Returns `None` when the text is empty, produces no morphemes, or does
    /// not end in a noun. That rejection is a distinct signal from
    /// [`last_noun`](Self::last_noun)'s unconditional passthrough.
    pub fn trailing_noun_phrase(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let morphemes = self.tagger.tag(text, Granularity::Long);
        let last = morphemes.last()?;
        if !last.is_noun() {
            return None;
        }

        let run_start = morphemes
            .iter()
            .rposition(|m| !m.is_noun())
            .map_or(0, |i| i + 1);

        Some(
            morphemes[run_start..]
                .iter()
                .map(|m| m.surface.as_str())
                .collect(),
        )
    }

    /// Return the last noun morpheme anywhere in the phrase
    ///
    /// Tags at short-unit granularity and scans backward for the first
    /// noun-tagged morpheme, regardless of contiguity with the tail. A phrase
    /// with no noun at all (or empty input) is returned unchanged.
    pub fn last_noun(&self, text: &str) -> String {
        if text.is_empty() {
            return text.to_string();
        }

        self.tagger
            .tag(text, Granularity::Short)
            .iter()
            .rev()
            .find(|m| m.is_noun())
            .map_or_else(|| text.to_string(), |m| m.surface.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{LexiconTagger, NOUN_POS};

    fn normalizer() -> EntityNormalizer {
        let tagger = LexiconTagger::with_entries(
            &[
                ("住宅", NOUN_POS),
                ("営業", NOUN_POS),
                ("高校", NOUN_POS),
                ("サッカー", NOUN_POS),
            ],
            &[
                ("日本", NOUN_POS),
                ("の", "助詞"),
                ("古典", NOUN_POS),
                ("不動産投資", NOUN_POS),
                ("ひとり", NOUN_POS),
                ("終活", NOUN_POS),
                ("太ら", "動詞"),
                ("ない", "助動詞"),
            ],
        );
        EntityNormalizer::new(Arc::new(tagger))
    }

    #[test]
    fn test_trailing_noun_after_particle() {
        assert_eq!(
            normalizer().trailing_noun_phrase("日本の古典"),
            Some("古典".to_string())
        );
    }

    #[test]
    fn test_trailing_noun_keeps_compound() {
        assert_eq!(
            normalizer().trailing_noun_phrase("不動産投資"),
            Some("不動産投資".to_string())
        );
    }

    #[test]
    fn test_trailing_noun_concatenates_run() {
        assert_eq!(
            normalizer().trailing_noun_phrase("ひとり終活"),
            Some("ひとり終活".to_string())
        );
    }

    #[test]
    fn test_trailing_noun_rejects_non_noun_tail() {
        assert_eq!(normalizer().trailing_noun_phrase("太らない"), None);
    }

    #[test]
    fn test_trailing_noun_rejects_empty() {
        assert_eq!(normalizer().trailing_noun_phrase(""), None);
    }

    #[test]
    fn test_last_noun_splits_compound() {
        assert_eq!(normalizer().last_noun("住宅営業"), "営業");
        assert_eq!(normalizer().last_noun("高校サッカー"), "サッカー");
    }

    #[test]
    fn test_last_noun_passthrough_without_noun() {
        assert_eq!(normalizer().last_noun("ふわふわ"), "ふわふわ");
        assert_eq!(normalizer().last_noun(""), "");
    }

    #[test]
    fn test_last_noun_skips_non_noun_tail() {
        // unknown tail span, the scan still finds the noun before it
        assert_eq!(normalizer().last_noun("営業する"), "営業");
    }
}
