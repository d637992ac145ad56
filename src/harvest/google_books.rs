//! Google Books volumes client
//!
//! Searches the public volumes API and pages through results. An API key is
//! optional for search; when configured it is attached to every request.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{TitleRecord, SOURCE_GOOGLE_BOOKS};

/// Production volumes endpoint
pub const VOLUMES_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Stock query for ratio-pattern titles
pub const RATIO_QUERY: &str = r#"intitle:"が9割""#;

/// Page size; the API caps maxResults at 40
const PAGE_SIZE: u32 = 40;

/// Default fetch ceiling; one query rarely yields more than ~200 usable items
pub const DEFAULT_MAX_RESULTS: u32 = 300;

/// Hard ceiling; startIndex + maxResults beyond 1000 is rejected by the API
const API_MAX_RESULTS: u32 = 1000;

/// Book metadata extracted from a volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub title: String,
    pub authors: Vec<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
}

impl BookInfo {
    /// View this book as a harvested title record
    pub fn to_title_record(&self) -> TitleRecord {
        TitleRecord::new(SOURCE_GOOGLE_BOOKS, self.title.clone(), self.isbn.clone())
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    total_items: u32,

    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: String,

    #[serde(default)]
    authors: Vec<String>,

    #[serde(rename = "publishedDate")]
    published_date: Option<String>,

    description: Option<String>,

    #[serde(rename = "industryIdentifiers", default)]
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    id_type: String,

    identifier: String,
}

impl From<Volume> for BookInfo {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;

        // ISBN-13 preferred, ISBN-10 as fallback
        let isbn = info
            .industry_identifiers
            .iter()
            .find(|id| id.id_type == "ISBN_13")
            .or_else(|| {
                info.industry_identifiers
                    .iter()
                    .find(|id| id.id_type == "ISBN_10")
            })
            .map(|id| id.identifier.clone());

        Self {
            title: info.title,
            authors: info.authors,
            published_date: info.published_date,
            description: info.description,
            isbn,
        }
    }
}

/// Volumes API client
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    /// Create a client against the production endpoint
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        api_key: Option<String>,
    ) -> Result<Self, FetchError> {
        Self::with_base_url(VOLUMES_ENDPOINT, timeout, user_agent, api_key)
    }

    /// Create a client against a custom endpoint, for tests
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
        api_key: Option<String>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        })
    }

    async fn request_page(
        &self,
        query: &str,
        start_index: u32,
        max_results: u32,
    ) -> Result<VolumesResponse, FetchError> {
        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("maxResults".to_string(), max_results.to_string()),
            ("startIndex".to_string(), start_index.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key".to_string(), key.clone()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Search volumes, returning at most one page of results
    ///
    /// # Errors
    ///
    /// Returns `FetchError` variants on transport or server failures.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<BookInfo>, FetchError> {
        let page = self.request_page(query, 0, max_results.min(PAGE_SIZE)).await?;
        Ok(page.items.into_iter().map(BookInfo::from).collect())
    }

    /// Fetch up to `max_results` volumes, paging through the result set
    ///
    /// Stops early when the API returns an empty page or the reported total
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` variants on transport or server failures.
    pub async fn fetch_all(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookInfo>, FetchError> {
        let max_results = max_results.min(API_MAX_RESULTS);
        let mut results: Vec<BookInfo> = Vec::new();
        let mut start_index = 0;

        loop {
            let remaining = max_results.saturating_sub(start_index);
            if remaining == 0 {
                break;
            }

            let page = self
                .request_page(query, start_index, PAGE_SIZE.min(remaining))
                .await?;

            if page.items.is_empty() {
                break;
            }

            start_index += page.items.len() as u32;
            results.extend(page.items.into_iter().map(BookInfo::from));

            tracing::debug!(
                fetched = results.len(),
                total = page.total_items,
                "Google Books page fetched"
            );

            if start_index >= page.total_items.min(max_results) {
                break;
            }
        }

        results.truncate(max_results as usize);
        Ok(results)
    }

    /// Fetch the stock ratio-title query
    ///
    /// # Errors
    ///
    /// Returns `FetchError` variants on transport or server failures.
    pub async fn fetch_ratio_books(&self) -> Result<Vec<BookInfo>, FetchError> {
        self.fetch_all(RATIO_QUERY, DEFAULT_MAX_RESULTS).await
    }
}
