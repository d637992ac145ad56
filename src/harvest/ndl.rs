//! NDL Search SRU client
//!
//! Talks to the National Diet Library search API (SRU protocol) with rate
//! limiting and a base-URL override for mock-server tests. SRU wraps each
//! record's DC-NDL payload as escaped XML inside `<srw:recordData>`; the
//! payload is unescaped and the title/identifier fields are pulled out with
//! pre-compiled patterns, which holds up better against provider-dependent
//! field variation than a strict schema parse.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use regex::Regex;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{TitleRecord, SOURCE_NDL_SRU};

/// Production SRU endpoint
pub const SRU_ENDPOINT: &str = "https://ndlsearch.ndl.go.jp/api/sru";

static NUMBER_OF_RECORDS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<srw:numberOfRecords>(\d+)</srw:numberOfRecords>").unwrap());

static RECORD_DATA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<srw:recordData>(.*?)</srw:recordData>").unwrap());

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<dc:title>(.*?)</dc:title>").unwrap());

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<dc:identifier[^>]*>(.*?)</dc:identifier>").unwrap());

/// One page of an SRU response
#[derive(Debug, Clone)]
pub struct SruPage {
    /// Total records the query matched, across all pages
    pub total: u32,

    /// Records on this page that carried a title
    pub records: Vec<TitleRecord>,
}

/// SRU searchRetrieve client with rate limiting
pub struct SruClient {
    client: Client,

    /// Rate limiter to stay polite against the public endpoint
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    base_url: String,
}

impl SruClient {
    /// Create a client against the production endpoint
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(
        requests_per_second: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        Self::with_base_url(SRU_ENDPOINT, requests_per_second, timeout, user_agent)
    }

    /// Create a client against a custom endpoint, for tests
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(
        base_url: &str,
        requests_per_second: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
            base_url: base_url.to_string(),
        })
    }

    /// Execute one searchRetrieve request and return the raw XML body
    ///
    /// `start_record` is 1-based, per the SRU protocol.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ServerError` on non-success status codes and
    /// `FetchError::Http` on transport failures.
    pub async fn search(
        &self,
        query: &str,
        start_record: u32,
        maximum_records: u32,
    ) -> Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        tracing::debug!(query = %query, start_record, maximum_records, "SRU searchRetrieve");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("operation", "searchRetrieve".to_string()),
                ("query", query.to_string()),
                ("startRecord", start_record.to_string()),
                ("maximumRecords", maximum_records.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Extract titles and identifiers from an SRU response body
///
/// Records without a title are skipped. HTML entities are decoded twice:
/// once to unwrap the escaped `recordData` payload, once for entities inside
/// the title text itself.
pub fn parse_sru(xml: &str) -> SruPage {
    let total = NUMBER_OF_RECORDS_REGEX
        .captures(xml)
        .and_then(|cap| cap[1].parse().ok())
        .unwrap_or(0);

    let mut records = Vec::new();

    for record_data in RECORD_DATA_REGEX.captures_iter(xml) {
        let payload = html_escape::decode_html_entities(&record_data[1]).into_owned();

        let Some(title) = TITLE_REGEX.captures(&payload) else {
            continue;
        };
        let title = html_escape::decode_html_entities(title[1].trim()).into_owned();
        if title.is_empty() {
            continue;
        }

        let identifier = IDENTIFIER_REGEX
            .captures(&payload)
            .map(|cap| cap[1].trim().to_string());

        records.push(TitleRecord::new(SOURCE_NDL_SRU, title, identifier));
    }

    SruPage { total, records }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sru_body(total: u32, records: &[(&str, Option<&str>)]) -> String {
        let mut body = format!(
            "<srw:searchRetrieveResponse xmlns:srw=\"http://www.loc.gov/zing/srw/\">\
             <srw:numberOfRecords>{total}</srw:numberOfRecords><srw:records>"
        );
        for (title, identifier) in records {
            let mut inner = format!("<dc:title>{title}</dc:title>");
            if let Some(id) = identifier {
                inner.push_str(&format!("<dc:identifier>{id}</dc:identifier>"));
            }
            let escaped = inner.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
            body.push_str(&format!(
                "<srw:record><srw:recordData>{escaped}</srw:recordData></srw:record>"
            ));
        }
        body.push_str("</srw:records></srw:searchRetrieveResponse>");
        body
    }

    #[test]
    fn test_parse_sru_extracts_titles_and_identifiers() {
        let body = sru_body(
            42,
            &[
                ("人は見た目が9割", Some("https://ndlsearch.ndl.go.jp/books/R100000002-I000001")),
                ("リーダーは話し方が9割", None),
            ],
        );

        let page = parse_sru(&body);

        assert_eq!(page.total, 42);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].title_raw, "人は見た目が9割");
        assert_eq!(
            page.records[0].id_or_url.as_deref(),
            Some("https://ndlsearch.ndl.go.jp/books/R100000002-I000001")
        );
        assert_eq!(page.records[1].id_or_url, None);
        assert!(page.records.iter().all(|r| r.source == SOURCE_NDL_SRU));
    }

    #[test]
    fn test_parse_sru_decodes_entities_in_title() {
        let body = sru_body(1, &[("儲かる会社 &amp; 商店", None)]);
        let page = parse_sru(&body);
        assert_eq!(page.records[0].title_raw, "儲かる会社 & 商店");
    }

    #[test]
    fn test_parse_sru_skips_records_without_title() {
        let body = "<srw:numberOfRecords>1</srw:numberOfRecords>\
                    <srw:recordData>&lt;dc:creator&gt;誰か&lt;/dc:creator&gt;</srw:recordData>";
        let page = parse_sru(body);
        assert_eq!(page.total, 1);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_parse_sru_tolerates_garbage() {
        let page = parse_sru("not xml at all");
        assert_eq!(page.total, 0);
        assert!(page.records.is_empty());
    }
}
