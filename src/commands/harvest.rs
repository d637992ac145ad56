use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::harvest::google_books::{GoogleBooksClient, RATIO_QUERY};
use crate::harvest::{dedup_by_title, stock_queries, HarvestOptions, Harvester, SruClient};
use crate::storage;

/// Harvest ratio-pattern titles from the NDL Search SRU API
pub async fn harvest(config: Config, smoke: bool, output: Option<PathBuf>) -> Result<()> {
    println!("Starting NDL title harvest");
    println!("==========================");

    let client = SruClient::with_base_url(
        &config.harvest.sru_endpoint,
        config.harvest.rate_limit,
        config.request_timeout(),
        &config.harvest.user_agent,
    )
    .context("Failed to create SRU client")?;

    let harvester = Harvester::new(client);

    let all_queries = stock_queries();
    let (queries, options) = if smoke {
        println!("Smoke mode: first 2 queries, 1 page each");
        (all_queries[..2].to_vec(), HarvestOptions::smoke())
    } else {
        (
            all_queries,
            HarvestOptions {
                per_page: config.harvest.per_page,
                max_pages: config.harvest.max_pages,
            },
        )
    };

    println!(
        "Queries: {}, pages/query: {}, records/page: {}",
        queries.len(),
        options.max_pages,
        options.per_page
    );

    let titles = harvester.run(&queries, options).await?;

    let path = output.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_RAW_FILE));
    storage::write_titles_csv(&path, &titles)?;

    println!("Saved {} titles -> {}", titles.len(), path.display());
    Ok(())
}

/// Harvest ratio-pattern titles from the Google Books volumes API
pub async fn harvest_books(
    config: Config,
    query: Option<String>,
    max_results: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("Starting Google Books title harvest");
    println!("===================================");

    let client = GoogleBooksClient::with_base_url(
        &config.harvest.google_books_endpoint,
        config.request_timeout(),
        &config.harvest.user_agent,
        config.harvest.google_api_key.clone(),
    )
    .context("Failed to create Google Books client")?;

    let query = query.unwrap_or_else(|| RATIO_QUERY.to_string());
    let max_results = max_results.unwrap_or(config.harvest.max_google_results);

    println!("Query: {query}");
    println!("Max results: {max_results}");

    let books = client.fetch_all(&query, max_results).await?;
    let titles = dedup_by_title(books.iter().map(|b| b.to_title_record()).collect());

    let path = output.unwrap_or_else(|| config.storage.output_dir.join(storage::TITLES_RAW_FILE));
    storage::write_titles_csv(&path, &titles)?;

    println!(
        "Saved {} titles ({} volumes fetched) -> {}",
        titles.len(),
        books.len(),
        path.display()
    );
    Ok(())
}
