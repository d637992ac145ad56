use anyhow::Result;
use std::path::PathBuf;

use crate::analytics::{
    build_ranking, ratio_histogram, MatchStats, RankBy,
};
use crate::config::Config;
use crate::graph::cycles::{report_cycles, simple_cycles};
use crate::graph::paths::longest_path;
use crate::graph::{aggregate_edges, RatioGraph, RatioObservation};
use crate::normalize::EntityNormalizer;
use crate::report::{ReportData, ReportWriter};
use crate::storage;

/// Render the Markdown run summary
pub fn report(
    config: Config,
    input: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("Rendering run report");
    println!("====================");

    let input =
        input.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_EXTRACTED_FILE));
    let records = storage::read_extracted_csv(&input)?;

    // Total harvested count comes from the raw table when it is around;
    // otherwise the extraction table is all we can report on.
    let titles_path = config.storage.output_dir.join(storage::TITLES_RAW_FILE);
    let total = storage::read_titles_csv(&titles_path)
        .map(|titles| titles.len())
        .unwrap_or(records.len());

    let stats = MatchStats {
        total,
        matched: records.len(),
    };

    let subject_ranking = build_ranking(&records, RankBy::Subject);
    let predicate_ranking = build_ranking(&records, RankBy::Predicate);
    let histogram = ratio_histogram(&records);

    let tagger = super::build_tagger()?;
    let normalizer = EntityNormalizer::new(tagger);
    let observations: Vec<RatioObservation> = records.iter().map(RatioObservation::from).collect();
    let graph = RatioGraph::from_edges(aggregate_edges(&normalizer, &observations));

    let cycles = simple_cycles(&graph);
    let cycle_reports = report_cycles(&graph, &cycles);
    let longest = longest_path(&graph);

    let data = ReportData::new(
        stats,
        &subject_ranking,
        &predicate_ranking,
        &histogram,
        graph.node_count(),
        graph.edge_count(),
        &cycle_reports,
        &longest,
    );

    let writer = match template {
        Some(path) => ReportWriter::with_template(&path)?,
        None => ReportWriter::new()?,
    };

    let output = output.unwrap_or_else(|| config.storage.output_dir.join(storage::REPORT_FILE));
    let saved = writer.save(&output, &data)?;
    println!("Saved report -> {}", saved.display());

    Ok(())
}
