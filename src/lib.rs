//! wariai - Japanese book-title ratio-clause miner
//!
//! Mines bibliographic sources for titles of the form 「AはBがC割」 ("A is
//! mostly B, at ratio C"), extracts validated (A, B, C) triples, and folds
//! them into a weighted entity graph with rankings and cycle/path analysis.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`harvest`] - Title harvesting from the NDL SRU and Google Books APIs
//! - [`parser`] - Ratio-clause extraction from raw titles
//! - [`morphology`] - Morphological tagging capability and bindings
//! - [`normalize`] - Noun-phrase canonicalization
//! - [`analytics`] - Rankings and distribution summaries
//! - [`graph`] - Entity graph aggregation, cycles and paths
//! - [`storage`] - CSV/JSON sinks
//! - [`report`] - Handlebars run summaries
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wariai::morphology::{LexiconTagger, NOUN_POS};
//! use wariai::parser::RatioTitleParser;
//!
//! let mut lexicon = LexiconTagger::new();
//! lexicon.add_long("人", NOUN_POS);
//!
//! let parser = RatioTitleParser::new(Arc::new(lexicon));
//! let triple = parser.parse("人は見た目が9割").unwrap();
//! assert_eq!((triple.a.as_str(), triple.b.as_str(), triple.c), ("人", "見た目", 9));
//! ```

pub mod analytics;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod harvest;
pub mod models;
pub mod morphology;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{FetchError, HarvestError, StorageError};
    pub use crate::graph::{aggregate_edges, RatioGraph, RatioObservation};
    pub use crate::models::{ExtractedRecord, TitleRecord};
    pub use crate::morphology::{Granularity, Morpheme, MorphologicalTagger, SharedTagger};
    pub use crate::normalize::EntityNormalizer;
    pub use crate::parser::{RatioTitleParser, RatioTriple};
}

// Direct re-exports for convenience
pub use models::{ExtractedRecord, TitleRecord};
pub use parser::{RatioTitleParser, RatioTriple};
