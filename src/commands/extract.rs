use anyhow::Result;
use std::path::PathBuf;

use crate::analytics;
use crate::config::Config;
use crate::parser::RatioTitleParser;
use crate::storage;

/// Parse harvested titles into the extraction table
pub fn extract(config: Config, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    println!("Extracting ratio clauses");
    println!("========================");

    let input = input.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_RAW_FILE));
    let output =
        output.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_EXTRACTED_FILE));

    let titles = storage::read_titles_csv(&input)?;
    println!("Loaded {} titles from {}", titles.len(), input.display());

    let tagger = super::build_tagger()?;
    let parser = RatioTitleParser::new(tagger);

    let (records, stats) = analytics::extract_titles(&parser, &titles);

    storage::write_extracted_csv(&output, &records)?;

    println!(
        "Matched {} / {} titles ({:.1}%) -> {}",
        stats.matched,
        stats.total,
        stats.match_rate_percent(),
        output.display()
    );
    Ok(())
}
