//! Harvest client integration tests using wiremock
//!
//! These tests validate the SRU and Google Books clients against mock
//! servers: query-parameter shape, pagination, dedup and error mapping.

use std::time::Duration;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wariai::error::FetchError;
use wariai::harvest::{GoogleBooksClient, HarvestOptions, Harvester, SruClient};
use wariai::models::SOURCE_NDL_SRU;

const USER_AGENT: &str = "wariai-test";

fn sru_client(base_url: &str) -> SruClient {
    SruClient::with_base_url(base_url, 100, Duration::from_secs(5), USER_AGENT).unwrap()
}

fn books_client(base_url: &str, api_key: Option<&str>) -> GoogleBooksClient {
    GoogleBooksClient::with_base_url(
        base_url,
        Duration::from_secs(5),
        USER_AGENT,
        api_key.map(str::to_string),
    )
    .unwrap()
}

fn sru_response(total: u32, titles: &[&str]) -> String {
    let mut body = format!(
        "<srw:searchRetrieveResponse xmlns:srw=\"http://www.loc.gov/zing/srw/\">\
         <srw:numberOfRecords>{total}</srw:numberOfRecords><srw:records>"
    );
    for title in titles {
        let record = format!("<dc:title>{title}</dc:title>");
        let escaped = record.replace('<', "&lt;").replace('>', "&gt;");
        body.push_str(&format!(
            "<srw:record><srw:recordData>{escaped}</srw:recordData></srw:record>"
        ));
    }
    body.push_str("</srw:records></srw:searchRetrieveResponse>");
    body
}

// ============================================================================
// SRU client
// ============================================================================

#[tokio::test]
async fn test_sru_search_sends_protocol_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("operation", "searchRetrieve"))
        .and(query_param("query", r#"title="が9割" AND dpid=iss-ndl-opac"#))
        .and(query_param("startRecord", "1"))
        .and(query_param("maximumRecords", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sru_response(1, &["人は見た目が9割"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = sru_client(&mock_server.uri());
    let body = client
        .search(r#"title="が9割" AND dpid=iss-ndl-opac"#, 1, 50)
        .await
        .unwrap();

    assert!(body.contains("numberOfRecords"));
}

#[tokio::test]
async fn test_sru_search_maps_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = sru_client(&mock_server.uri());
    let err = client.search("title=\"が9割\"", 1, 50).await.unwrap_err();

    assert!(matches!(err, FetchError::ServerError(503)));
}

#[tokio::test]
async fn test_harvester_collects_and_dedups() {
    let mock_server = MockServer::start().await;

    // both queries return an overlapping title
    Mock::given(method("GET"))
        .and(query_param("query", "q1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sru_response(
            2,
            &["人は見た目が9割", "リーダーは話し方が9割"],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("query", "q2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sru_response(1, &["人は見た目が9割"])),
        )
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(sru_client(&mock_server.uri()));
    let titles = harvester
        .run(
            &["q1".to_string(), "q2".to_string()],
            HarvestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(titles.len(), 2);
    assert!(titles.iter().all(|t| t.source == SOURCE_NDL_SRU));
}

#[tokio::test]
async fn test_harvester_pages_through_results() {
    let mock_server = MockServer::start().await;

    // 3 total hits at 2 per page: page 1 then page 2 from startRecord 3
    Mock::given(method("GET"))
        .and(query_param("startRecord", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sru_response(3, &["タイトル一", "タイトル二"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("startRecord", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sru_response(3, &["タイトル三"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(sru_client(&mock_server.uri()));
    let titles = harvester
        .run(
            &["q".to_string()],
            HarvestOptions {
                per_page: 2,
                max_pages: 10,
            },
        )
        .await
        .unwrap();

    assert_eq!(titles.len(), 3);
}

#[tokio::test]
async fn test_harvester_respects_page_ceiling() {
    let mock_server = MockServer::start().await;

    // huge total, but max_pages must cap the walk at one request
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(sru_response(10_000, &["タイトル"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(sru_client(&mock_server.uri()));
    let titles = harvester
        .run(&["q".to_string()], HarvestOptions::smoke())
        .await
        .unwrap();

    assert_eq!(titles.len(), 1);
}

// ============================================================================
// Google Books client
// ============================================================================

fn volumes_page(total: u32, titles: &[&str]) -> String {
    let items: Vec<String> = titles
        .iter()
        .map(|t| format!(r#"{{"volumeInfo": {{"title": "{t}"}}}}"#))
        .collect();
    format!(
        r#"{{"totalItems": {total}, "items": [{}]}}"#,
        items.join(",")
    )
}

#[tokio::test]
async fn test_google_books_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", r#"intitle:"が9割""#))
        .and(query_param("startIndex", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(volumes_page(1, &["人は見た目が9割"])),
        )
        .mount(&mock_server)
        .await;

    let client = books_client(&mock_server.uri(), None);
    let books = client.search(r#"intitle:"が9割""#, 10).await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "人は見た目が9割");
}

#[tokio::test]
async fn test_google_books_pagination_stops_at_total() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("startIndex", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(volumes_page(3, &["一冊目", "二冊目"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("startIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(volumes_page(3, &["三冊目"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = books_client(&mock_server.uri(), None);
    let books = client.fetch_all("q", 100).await.unwrap();

    assert_eq!(books.len(), 3);
}

#[tokio::test]
async fn test_google_books_attaches_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(volumes_page(0, &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = books_client(&mock_server.uri(), Some("secret-key"));
    let books = client.fetch_all("q", 10).await.unwrap();

    assert!(books.is_empty());
}

#[tokio::test]
async fn test_google_books_maps_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = books_client(&mock_server.uri(), None);
    let err = client.fetch_all("q", 10).await.unwrap_err();

    assert!(matches!(err, FetchError::ServerError(429)));
}
