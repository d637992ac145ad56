//! 「AはBがC割」 clause extraction from raw book titles
//!
//! The parser turns a raw bibliographic title into a validated
//! subject/predicate/ratio triple, or nothing. It is a total function over
//! arbitrary strings: malformed, empty and missing titles all degrade to the
//! same no-match outcome, never an error.
//!
//! ## Matching strategy
//!
//! - The title is split on half- and full-width colons; segments are tried
//!   rightmost-first, because colon-delimited titles put the canonical clause
//!   before a subtitle and the subtitle must not pollute the match span.
//! - Within a segment only the last clause match is considered; earlier
//!   は…が…割 fragments embedded in longer sentences are usually noise.
//! - A match whose subject fails noun validation, or whose ratio token fails
//!   numeral normalization, rejects only that segment; parsing falls through
//!   to the next segment to the left.

pub mod cleanup;
pub mod numeral;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::morphology::SharedTagger;
use crate::normalize::EntityNormalizer;

/// The ratio clause: subject, は, predicate, が, ratio token
///
/// The ratio token accepts half-width 1-10, full-width １-１０ and single
/// kanji numerals 一-九, with whitespace tolerated around the digit forms.
/// Kanji 十 is not part of the clause grammar.
static RATIO_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<a>.+?)は(?P<b>.+?)が\s*(?P<c>(?:10|１０|[1-9１-９])\s*割|[一二三四五六七八九]割)",
    )
    .unwrap()
});

/// A validated ratio clause extracted from one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioTriple {
    /// Subject (the A side), collapsed to its trailing noun phrase
    pub a: String,

    /// Predicate (the B side), stripped of brackets and leading punctuation
    pub b: String,

    /// Ratio in tenths, 1-10
    pub c: u8,
}

/// Extracts ratio clauses from titles
///
/// Holds a shared morphological tagger (via an [`EntityNormalizer`]) for
/// subject validation; construct once and reuse across all titles.
pub struct RatioTitleParser {
    normalizer: EntityNormalizer,
}

impl RatioTitleParser {
    /// Create a parser over a shared tagger
    pub fn new(tagger: SharedTagger) -> Self {
        Self {
            normalizer: EntityNormalizer::new(tagger),
        }
    }

    /// Create a parser from an existing normalizer
    pub fn with_normalizer(normalizer: EntityNormalizer) -> Self {
        Self { normalizer }
    }

    /// Parse a title into a ratio triple
    ///
    /// Total over arbitrary input: returns `None` when no segment of the
    /// title yields a valid clause. Never panics.
    pub fn parse(&self, title: &str) -> Option<RatioTriple> {
        if title.is_empty() {
            return None;
        }

        let segments: Vec<&str> = title.split(['：', ':']).collect();

        for segment in segments.iter().rev() {
            let segment = segment.trim();

            // Last match wins within a segment
            let Some(captures) = RATIO_CLAUSE_REGEX.captures_iter(segment).last() else {
                continue;
            };

            let Some(a) = self.clean_subject(captures["a"].trim()) else {
                continue;
            };

            let Some(c) = numeral::to_ratio(&captures["c"]) else {
                continue;
            };

            let b = clean_predicate(captures["b"].trim());

            return Some(RatioTriple { a, b, c });
        }

        None
    }

    /// Parse a possibly missing title
    ///
    /// Convenience wrapper for sources whose title field is optional.
    pub fn parse_opt(&self, title: Option<&str>) -> Option<RatioTriple> {
        title.and_then(|t| self.parse(t))
    }

    /// Clean and validate a subject candidate
    ///
    /// Cleanup order matters: brackets first, then lead-in phrases (which
    /// assume bracket noise is gone), then trailing-noun extraction over the
    /// cleaned string. A candidate whose tail is not nominal is rejected.
    fn clean_subject(&self, raw: &str) -> Option<String> {
        let text = cleanup::strip_brackets(raw);
        let text = cleanup::strip_lead_in_phrases(&text);
        self.normalizer.trailing_noun_phrase(&text)
    }
}

/// Clean a predicate candidate
fn clean_predicate(raw: &str) -> String {
    let text = cleanup::strip_brackets(raw);
    cleanup::strip_leading_punctuation(&text)
}
