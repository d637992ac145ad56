//! Sudachi-backed morphological tagger
//!
//! Binds the [`MorphologicalTagger`] capability to the Sudachi dictionary.
//! Short-unit tagging maps to Sudachi's A mode, long-unit tagging to C mode.
//! The dictionary configuration is resolved from `SUDACHI_CONFIG_PATH` when
//! set, otherwise from the crate default lookup.

use anyhow::{Context, Result};
use sudachi::analysis::stateless_tokenizer::Tokenizer;
use sudachi::config::{Config, ConfigBuilder};
use sudachi::prelude::Mode;

use super::{Granularity, Morpheme, MorphologicalTagger};

/// Tagger backed by a Sudachi dictionary
pub struct SudachiTagger {
    tokenizer: Tokenizer,
}

impl SudachiTagger {
    /// Build a tagger from the environment
    ///
    /// # Errors
    ///
    /// Fails when no Sudachi configuration can be resolved or the dictionary
    /// cannot be loaded.
    pub fn from_env() -> Result<Self> {
        let config = if let Ok(path) = std::env::var("SUDACHI_CONFIG_PATH") {
            Config::from_file(&path)
                .with_context(|| format!("Failed to load Sudachi config from {path}"))?
        } else {
            ConfigBuilder::new()
                .build()
                .context("Failed to build default Sudachi config")?
        };

        let tokenizer =
            Tokenizer::new(config).context("Failed to load Sudachi dictionary")?;

        Ok(Self { tokenizer })
    }
}

impl MorphologicalTagger for SudachiTagger {
    fn tag(&self, text: &str, granularity: Granularity) -> Vec<Morpheme> {
        let mode = match granularity {
            Granularity::Short => Mode::A,
            Granularity::Long => Mode::C,
        };

        match self.tokenizer.tokenize(mode, text) {
            Ok(morphemes) => morphemes
                .into_iter()
                .map(|m| Morpheme {
                    surface: m.surface().to_string(),
                    pos_major: m.part_of_speech().first().cloned().unwrap_or_default(),
                })
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "Sudachi tokenization failed");
                Vec::new()
            }
        }
    }
}
