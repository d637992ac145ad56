//! Tagger construction for CLI runs
//!
//! The CLI needs a real dictionary-backed tagger; the in-crate lexicon
//! tagger exists for tests and embedding scenarios where the caller supplies
//! its own entries.

use anyhow::Result;

use crate::morphology::SharedTagger;

/// Build the process-wide morphological tagger
///
/// # Errors
///
/// Fails when no Sudachi dictionary is available.
#[cfg(feature = "with-sudachi")]
pub fn build_tagger() -> Result<SharedTagger> {
    use crate::morphology::SudachiTagger;
    use std::sync::Arc;

    Ok(Arc::new(SudachiTagger::from_env()?))
}

/// Build the process-wide morphological tagger
///
/// # Errors
///
/// Always fails in this build; extraction needs a dictionary.
#[cfg(not(feature = "with-sudachi"))]
pub fn build_tagger() -> Result<SharedTagger> {
    anyhow::bail!(
        "morphological tagging requires a Sudachi dictionary; \
         rebuild with `--features with-sudachi`"
    )
}
