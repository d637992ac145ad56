//! Bibliographic title harvesting
//!
//! Two sources feed the pipeline: the NDL Search SRU API (primary, holdings
//! of the National Diet Library) and the Google Books volumes API. Both
//! produce [`TitleRecord`]s; everything downstream is source-agnostic.

pub mod google_books;
pub mod ndl;

pub use google_books::{BookInfo, GoogleBooksClient};
pub use ndl::{parse_sru, SruClient, SruPage};

use std::collections::HashSet;

use crate::error::HarvestError;
use crate::models::TitleRecord;

/// Stock SRU queries: particle-anchored ratio phrases, NDL holdings only
///
/// Requiring the particle が in the query keeps precision high, and
/// `dpid=iss-ndl-opac` restricts results to library holdings (mostly books).
/// NDL normalizes half- and full-width digits on its side; kanji numerals
/// need their own queries.
pub fn stock_queries() -> Vec<String> {
    const DIGITS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];
    const KANJI: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

    DIGITS
        .iter()
        .chain(KANJI.iter())
        .map(|n| format!(r#"title="が{n}割" AND dpid=iss-ndl-opac"#))
        .collect()
}

/// Page-walk bounds for a harvest run
#[derive(Debug, Clone, Copy)]
pub struct HarvestOptions {
    /// Records per SRU page (maximumRecords)
    pub per_page: u32,

    /// Page ceiling per query
    pub max_pages: u32,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            per_page: 50,
            max_pages: 20,
        }
    }
}

impl HarvestOptions {
    /// Minimal bounds for smoke runs
    pub fn smoke() -> Self {
        Self {
            per_page: 10,
            max_pages: 1,
        }
    }
}

/// Walks the stock queries against an SRU endpoint
pub struct Harvester {
    client: SruClient,
}

impl Harvester {
    /// Create a harvester over an SRU client
    pub fn new(client: SruClient) -> Self {
        Self { client }
    }

    /// Run the given queries and collect deduplicated title records
    ///
    /// The first page of each query reports the total hit count, which
    /// bounds the page walk together with `max_pages`.
    ///
    /// # Errors
    ///
    /// Returns `HarvestError` when a request fails; records already
    /// collected are lost with it, a rerun is cheap at these volumes.
    pub async fn run(
        &self,
        queries: &[String],
        options: HarvestOptions,
    ) -> Result<Vec<TitleRecord>, HarvestError> {
        let mut rows = Vec::new();

        for (i, query) in queries.iter().enumerate() {
            let first = self.client.search(query, 1, options.per_page).await?;
            let page = parse_sru(&first);

            tracing::info!(
                query = %query,
                index = i + 1,
                of = queries.len(),
                total_hits = page.total,
                "SRU query"
            );

            let total = page.total;
            rows.extend(page.records);

            let pages = options.max_pages.min(total.div_ceil(options.per_page));
            for p in 2..=pages {
                let start_record = (p - 1) * options.per_page + 1;
                let xml = self
                    .client
                    .search(query, start_record, options.per_page)
                    .await?;
                rows.extend(parse_sru(&xml).records);
            }
        }

        let deduped = dedup_by_title(rows);
        tracing::info!(titles = deduped.len(), "Harvest complete");
        Ok(deduped)
    }
}

/// Drop duplicate raw titles, keeping the first occurrence
///
/// Titles show up under several queries (a book matching が9割 also matches
/// が九割 when both spellings appear in subtitle fields), so cross-query
/// dedup by raw title string is required before parsing.
pub fn dedup_by_title(rows: Vec<TitleRecord>) -> Vec<TitleRecord> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| !row.title_raw.is_empty() && seen.insert(row.title_raw.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SOURCE_NDL_SRU;

    #[test]
    fn test_stock_queries_cover_both_numeral_systems() {
        let queries = stock_queries();
        assert_eq!(queries.len(), 18);
        assert!(queries[0].contains(r#"title="が1割""#));
        assert!(queries[9].contains(r#"title="が一割""#));
        assert!(queries.iter().all(|q| q.contains("dpid=iss-ndl-opac")));
    }

    #[test]
    fn test_dedup_by_title_keeps_first() {
        let rows = vec![
            TitleRecord::new(SOURCE_NDL_SRU, "人は見た目が9割", Some("id-1".to_string())),
            TitleRecord::new(SOURCE_NDL_SRU, "人は見た目が9割", Some("id-2".to_string())),
            TitleRecord::new(SOURCE_NDL_SRU, "", None),
            TitleRecord::new(SOURCE_NDL_SRU, "リーダーは話し方が9割", None),
        ];

        let deduped = dedup_by_title(rows);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id_or_url.as_deref(), Some("id-1"));
        assert_eq!(deduped[1].title_raw, "リーダーは話し方が9割");
    }
}
