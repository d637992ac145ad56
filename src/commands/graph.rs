use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::graph::cycles::{report_cycles, simple_cycles};
use crate::graph::paths::{all_simple_paths, longest_path};
use crate::graph::{aggregate_edges, RatioGraph, RatioObservation};
use crate::normalize::EntityNormalizer;
use crate::storage;

/// Build the entity graph and run cycle and path analysis
pub fn graph(
    config: Config,
    input: Option<PathBuf>,
    min_weight: Option<f64>,
    prune_components: Option<usize>,
    min_path_nodes: usize,
) -> Result<()> {
    println!("Building entity graph");
    println!("=====================");

    let input =
        input.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_EXTRACTED_FILE));
    let records = storage::read_extracted_csv(&input)?;
    println!("Loaded {} extracted rows from {}", records.len(), input.display());

    let tagger = super::build_tagger()?;
    let normalizer = EntityNormalizer::new(tagger);

    let observations: Vec<RatioObservation> = records.iter().map(RatioObservation::from).collect();
    let aggregated = aggregate_edges(&normalizer, &observations);
    println!("Aggregated {} unique edges", aggregated.len());

    let mut graph = RatioGraph::from_edges(aggregated);

    if let Some(min_weight) = min_weight {
        graph = graph.filter_by_weight(min_weight);
        println!("Kept edges with weight >= {min_weight}");
    }
    if let Some(max_nodes) = prune_components {
        graph = graph.prune_small_components(max_nodes);
        println!("Dropped components of <= {max_nodes} nodes");
    }

    println!(
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let outdir = &config.storage.output_dir;

    let dot_path = outdir.join(storage::GRAPH_DOT_FILE);
    storage::write_text(&dot_path, &graph.to_dot())?;
    println!("Saved DOT export -> {}", dot_path.display());

    // Cycles
    let cycles = simple_cycles(&graph);
    let reports = report_cycles(&graph, &cycles);
    let cycles_path = outdir.join(storage::CYCLES_JSON_FILE);
    storage::write_json_pretty(&cycles_path, &reports)?;

    if reports.is_empty() {
        println!("\nNo cycles detected");
    } else {
        println!("\nDetected {} cycles:", reports.len());
        for report in &reports {
            println!("  ({} nodes) {}", report.nodes.len(), report.path_string());
            for edge in &report.edges {
                println!("    {} -> {}: {:.1}", edge.from, edge.to, edge.weight);
            }
        }
    }

    // Dependency chains
    let longest = longest_path(&graph);
    if longest.len() > 1 {
        println!("\nLongest chain ({} nodes): {}", longest.len(), longest.join(" -> "));
    } else if !cycles.is_empty() {
        println!("\nLongest chain undefined: graph is cyclic");
    }

    let long_paths = all_simple_paths(&graph, min_path_nodes);
    let paths_path = outdir.join(storage::PATHS_JSON_FILE);
    storage::write_json_pretty(&paths_path, &long_paths)?;
    println!(
        "Saved {} paths of >= {} nodes -> {}",
        long_paths.len(),
        min_path_nodes,
        paths_path.display()
    );

    Ok(())
}
