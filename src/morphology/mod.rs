//! Morphological tagging capability for Japanese text
//!
//! The extraction pipeline never talks to a concrete tokenizer directly; it
//! consumes the [`MorphologicalTagger`] trait, which yields surface forms and
//! coarse part-of-speech labels at two segmentation granularities:
//!
//! - [`Granularity::Short`] - short-unit segmentation, splitting compounds
//!   into their smallest dictionary words (住宅営業 -> 住宅 / 営業)
//! - [`Granularity::Long`] - long-unit segmentation, keeping compound nouns
//!   whole (不動産投資 -> 不動産投資)
//!
//! Two bindings are provided: [`SudachiTagger`] over the Sudachi dictionary
//! (behind the `with-sudachi` feature) and [`LexiconTagger`], a deterministic
//! longest-match segmenter for tests and offline runs.
//!
//! Taggers are expensive to construct and immutable afterwards; build one per
//! process and share it via [`SharedTagger`].

use std::sync::Arc;

pub mod lexicon;
#[cfg(feature = "with-sudachi")]
pub mod sudachi;

pub use lexicon::LexiconTagger;
#[cfg(feature = "with-sudachi")]
pub use sudachi::SudachiTagger;

/// Part-of-speech label the pipeline keys on (名詞 = noun)
pub const NOUN_POS: &str = "名詞";

/// Segmentation granularity requested from a tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Short-unit mode: smallest dictionary words
    Short,

    /// Long-unit mode: compound-word aware
    Long,
}

/// A single tagger-produced token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    /// Surface form exactly as it appears in the input
    pub surface: String,

    /// Coarse part-of-speech category (名詞, 動詞, 助詞, ...)
    pub pos_major: String,
}

impl Morpheme {
    /// Create a morpheme from surface and part-of-speech strings
    pub fn new(surface: impl Into<String>, pos_major: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            pos_major: pos_major.into(),
        }
    }

    /// Whether this morpheme carries the noun part-of-speech label
    pub fn is_noun(&self) -> bool {
        self.pos_major == NOUN_POS
    }
}

/// Tagging capability consumed by the parser and the entity normalizer
///
/// Implementations must be pure queries: the same input always yields the
/// same morpheme sequence, and concurrent calls are safe.
pub trait MorphologicalTagger: Send + Sync {
    /// Tokenize `text` at the requested granularity
    ///
    /// Returns an ordered morpheme sequence; an empty vector for empty input
    /// or when the underlying tokenizer cannot process the text.
    fn tag(&self, text: &str, granularity: Granularity) -> Vec<Morpheme>;
}

/// Shared, process-lifetime tagger handle
pub type SharedTagger = Arc<dyn MorphologicalTagger>;
