use anyhow::Result;
use std::path::PathBuf;

use crate::analytics::{build_detailed_ranking, build_ranking, RankBy};
use crate::config::Config;
use crate::normalize::EntityNormalizer;
use crate::storage;

/// Rows printed in the terminal preview
const PREVIEW_ROWS: usize = 20;

/// Build subject and predicate rankings from the extraction table
pub fn rank(config: Config, input: Option<PathBuf>) -> Result<()> {
    println!("Building rankings");
    println!("=================");

    let input =
        input.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_EXTRACTED_FILE));
    let records = storage::read_extracted_csv(&input)?;
    println!("Loaded {} extracted rows from {}", records.len(), input.display());

    let outdir = &config.storage.output_dir;

    let subject_ranking = build_ranking(&records, RankBy::Subject);
    let a_path = outdir.join(storage::A_RANKING_FILE);
    storage::write_ranking_csv(&a_path, &subject_ranking, "a_raw")?;
    println!("Saved {} subject groups -> {}", subject_ranking.len(), a_path.display());

    let predicate_ranking = build_ranking(&records, RankBy::Predicate);
    let b_path = outdir.join(storage::B_RANKING_FILE);
    storage::write_ranking_csv(&b_path, &predicate_ranking, "b_raw")?;
    println!(
        "Saved {} predicate groups -> {}",
        predicate_ranking.len(),
        b_path.display()
    );

    let tagger = super::build_tagger()?;
    let normalizer = EntityNormalizer::new(tagger);
    let detailed = build_detailed_ranking(&normalizer, &records);
    let json_path = outdir.join(storage::B_RANKING_JSON_FILE);
    storage::write_json_pretty(&json_path, &detailed)?;
    println!("Saved detailed ranking -> {}", json_path.display());

    if subject_ranking.is_empty() {
        println!("\nNo ranking data");
        return Ok(());
    }

    println!("\nTop {} subjects (of {}):", PREVIEW_ROWS.min(subject_ranking.len()), subject_ranking.len());
    for entry in subject_ranking.iter().take(PREVIEW_ROWS) {
        println!("  {:<12} c_sum={:<6} n={}", entry.key, entry.c_sum, entry.n);
    }

    Ok(())
}
