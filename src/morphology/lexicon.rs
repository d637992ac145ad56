//! Deterministic lexicon-backed tagger
//!
//! Longest-match segmentation over an explicit surface/part-of-speech table,
//! with a separate table per granularity. Spans not covered by the lexicon
//! collapse into a single unknown morpheme, which never carries the noun
//! label. Used by the test suite and by environments without a Sudachi
//! dictionary installed.

use std::collections::HashMap;

use super::{Granularity, Morpheme, MorphologicalTagger};

/// Part-of-speech label assigned to spans absent from the lexicon
pub const UNKNOWN_POS: &str = "未知語";

/// Longest-match segmenter over user-supplied dictionary entries
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    short_units: HashMap<String, String>,
    long_units: HashMap<String, String>,

    /// Longest entry length per table, in chars; bounds the match window
    max_short_chars: usize,
    max_long_chars: usize,
}

impl LexiconTagger {
    /// Create an empty tagger; every input becomes one unknown morpheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tagger from `(surface, pos)` entries per granularity
    pub fn with_entries(short: &[(&str, &str)], long: &[(&str, &str)]) -> Self {
        let mut tagger = Self::new();
        for (surface, pos) in short {
            tagger.add_short(surface, pos);
        }
        for (surface, pos) in long {
            tagger.add_long(surface, pos);
        }
        tagger
    }

    /// Register a surface form for short-unit segmentation
    pub fn add_short(&mut self, surface: &str, pos: &str) {
        self.max_short_chars = self.max_short_chars.max(surface.chars().count());
        self.short_units.insert(surface.to_string(), pos.to_string());
    }

    /// Register a surface form for long-unit segmentation
    pub fn add_long(&mut self, surface: &str, pos: &str) {
        self.max_long_chars = self.max_long_chars.max(surface.chars().count());
        self.long_units.insert(surface.to_string(), pos.to_string());
    }

    /// Register the same entry at both granularities
    pub fn add(&mut self, surface: &str, pos: &str) {
        self.add_short(surface, pos);
        self.add_long(surface, pos);
    }

    fn segment(
        &self,
        text: &str,
        table: &HashMap<String, String>,
        max_chars: usize,
    ) -> Vec<Morpheme> {
        let chars: Vec<char> = text.chars().collect();
        let mut morphemes = Vec::new();
        let mut unknown = String::new();
        let mut i = 0;

        while i < chars.len() {
            let mut matched = None;
            let window = max_chars.min(chars.len() - i);
            for len in (1..=window).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                if let Some(pos) = table.get(&candidate) {
                    matched = Some((candidate, pos.clone(), len));
                    break;
                }
            }

            match matched {
                Some((surface, pos, len)) => {
                    if !unknown.is_empty() {
                        morphemes.push(Morpheme::new(std::mem::take(&mut unknown), UNKNOWN_POS));
                    }
                    morphemes.push(Morpheme::new(surface, pos));
                    i += len;
                }
                None => {
                    unknown.push(chars[i]);
                    i += 1;
                }
            }
        }

        if !unknown.is_empty() {
            morphemes.push(Morpheme::new(unknown, UNKNOWN_POS));
        }

        morphemes
    }
}

impl MorphologicalTagger for LexiconTagger {
    fn tag(&self, text: &str, granularity: Granularity) -> Vec<Morpheme> {
        match granularity {
            Granularity::Short => self.segment(text, &self.short_units, self.max_short_chars),
            Granularity::Long => self.segment(text, &self.long_units, self.max_long_chars),
        }
    }
}
