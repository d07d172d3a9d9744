//! Integration tests for `YelpClient` and `fetch_page`.
//!
//! Every test stands up a local `wiremock` server; no real network traffic
//! is made. `fetch` must fold every failure into `ApiLookup::Unavailable`,
//! while `get_business` surfaces the typed error.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bizscout_scraper::{build_page_client, fetch_page, ScraperError, YelpClient};

const BUSINESS_ID: &str = "golden-gate-bakery-san-francisco";

fn client_for(server: &MockServer, api_key: Option<&str>) -> YelpClient {
    YelpClient::with_base_url(
        api_key,
        5,
        "bizscout-test/0.1",
        &format!("{}/v3", server.uri()),
    )
    .expect("failed to build test YelpClient")
}

fn business_json() -> serde_json::Value {
    json!({
        "id": BUSINESS_ID,
        "name": "Golden Gate Bakery",
        "url": "https://www.yelp.com/biz/golden-gate-bakery-san-francisco",
        "image_url": "https://s3-media.example.com/bphoto/hero.jpg",
        "display_phone": "(415) 781-2555",
        "location": {
            "address1": "1029 Grant Ave",
            "address2": "",
            "address3": null,
            "city": "San Francisco",
            "state": "CA",
            "zip_code": "94133"
        },
        "rating": 4.5,
        "review_count": 2345,
        "categories": [{"alias": "bakeries", "title": "Bakeries"}],
        "hours": [{
            "open": [
                {"day": 0, "start": "0800", "end": "2000", "is_overnight": false},
                {"day": 5, "start": "0900", "end": "1800", "is_overnight": false}
            ],
            "hours_type": "REGULAR",
            "is_open_now": true
        }]
    })
}

// ---------------------------------------------------------------------------
// fetch – success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_sends_bearer_credential_and_decodes_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/businesses/{BUSINESS_ID}")))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(business_json()))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = client_for(&server, Some("test-key")).fetch(BUSINESS_ID).await;

    let info = lookup.info().expect("expected Available lookup");
    assert_eq!(info.title().value().as_deref(), Some("Golden Gate Bakery"));
    assert_eq!(info.phone().value().as_deref(), Some("(415) 781-2555"));
    assert_eq!(info.review_count_text().value().as_deref(), Some("2345"));
    assert_eq!(info.category_titles().value(), Some(vec!["Bakeries".to_owned()]));

    let location = info.address().value().expect("location present");
    assert_eq!(location.keys(), vec!["address1", "city", "state", "zip_code"]);

    let schedule = info.schedule().value().expect("hours present");
    assert_eq!(schedule["Mon"], "8:00 AM - 8:00 PM");
    assert_eq!(schedule["Sat"], "9:00 AM - 6:00 PM");
    assert_eq!(schedule["Sun"], "Closed");
}

// ---------------------------------------------------------------------------
// fetch – degraded to Unavailable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_without_credential_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(business_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    assert!(!client.has_credential());
    assert!(!client.fetch(BUSINESS_ID).await.is_available());
}

#[tokio::test]
async fn fetch_unauthorized_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/businesses/{BUSINESS_ID}")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "TOKEN_INVALID", "description": "Invalid access token"}
        })))
        .mount(&server)
        .await;

    let lookup = client_for(&server, Some("bad-key")).fetch(BUSINESS_ID).await;
    assert!(!lookup.is_available());
    assert!(lookup.info().is_none());
}

#[tokio::test]
async fn fetch_malformed_body_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/businesses/{BUSINESS_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let lookup = client_for(&server, Some("test-key")).fetch(BUSINESS_ID).await;
    assert!(!lookup.is_available());
}

// ---------------------------------------------------------------------------
// get_business – typed errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_business_surfaces_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/businesses/{BUSINESS_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .get_business("test-key", BUSINESS_ID)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
}

#[tokio::test]
async fn get_business_surfaces_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/businesses/{BUSINESS_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rating": "five"})))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .get_business("test-key", BUSINESS_ID)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// fetch_page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_returns_body_and_final_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/biz/golden-gate-bakery-san-francisco"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><h1>Hi</h1></html>"))
        .mount(&server)
        .await;

    let client = build_page_client(5, "bizscout-test/0.1").unwrap();
    let url = format!("{}/biz/golden-gate-bakery-san-francisco", server.uri());
    let page = fetch_page(&client, &url).await.unwrap();

    assert_eq!(page.url, url);
    assert_eq!(page.html, "<html><h1>Hi</h1></html>");
}

#[tokio::test]
async fn fetch_page_rejects_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = build_page_client(5, "bizscout-test/0.1").unwrap();
    let err = fetch_page(&client, &format!("{}/biz/x", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_rejects_unparseable_url() {
    let client = build_page_client(5, "bizscout-test/0.1").unwrap();
    let err = fetch_page(&client, "not a url").await.unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUrl { .. }));
}
