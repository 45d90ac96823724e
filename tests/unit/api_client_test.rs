//! Tests for the REST gateway: URL building, status classification and
//! decoding, exercised against a one-shot HTTP responder on localhost.

use raindrop_search::services::api_client::{build_url, ApiClient, RaindropApi};
use raindrop_search::services::query_composer::RaindropQuery;
use raindrop_search::types::errors::ApiError;
use raindrop_search::types::filter::SearchFilters;
use raindrop_search::types::raindrop::RaindropType;
use raindrop_search::types::settings::ApiSettings;
use rstest::rstest;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const BASE: &str = "https://api.raindrop.io/rest/v1";

/// Serves exactly one request with `status` and `body`, handing back the raw request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&head).to_string());
    });

    (format!("http://{}/rest/v1", addr), rx)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiSettings {
        base_url: base_url.to_string(),
        token: "test-token".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

// === URL building ===

#[test]
fn build_url_omits_absent_and_empty_params_in_order() {
    let params = vec![
        ("page", Some("0".to_string())),
        ("search", Some(String::new())),
        ("missing", None),
        ("sort", Some("-created".to_string())),
    ];
    let url = build_url(BASE, "/raindrops/0", &params).unwrap();
    assert_eq!(url.as_str(), "https://api.raindrop.io/rest/v1/raindrops/0?page=0&sort=-created");
}

#[test]
fn build_url_without_params_has_no_query() {
    let url = build_url(BASE, "/collections", &[("search", None)]).unwrap();
    assert_eq!(url.as_str(), "https://api.raindrop.io/rest/v1/collections");
    assert!(url.query().is_none());
}

#[test]
fn build_url_encodes_search_operators() {
    let filters = SearchFilters::new(42, "#rust").with_type(Some(RaindropType::Article));
    let query = RaindropQuery::compose(&filters, 1, 25);
    let url = build_url(BASE, "/raindrops/42", &query.to_params()).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.raindrop.io/rest/v1/raindrops/42?page=1&perpage=25&search=%23rust+type%3Aarticle&sort=score&nested=true"
    );
}

#[test]
fn build_url_rejects_invalid_base() {
    assert!(matches!(
        build_url("::not a url::", "/collections", &[]),
        Err(ApiError::InvalidUrl(_))
    ));
}

// === Live requests against a local responder ===

#[tokio::test]
async fn request_sends_bearer_token_and_decodes_collections() {
    let body = r#"{"result":true,"items":[{"_id":7,"title":"Reading","sort":2,"parent":{"$id":3}}]}"#;
    let (base, head) = serve_once("200 OK", body).await;

    let collections = client(&base).get_child_collections().await.unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].id, 7);
    assert_eq!(collections[0].parent_id(), Some(3));

    let head = head.await.unwrap();
    assert!(head.starts_with("GET /rest/v1/collections/childrens HTTP/1.1"), "{head}");
    assert!(head.to_lowercase().contains("authorization: bearer test-token"), "{head}");
}

#[tokio::test]
async fn request_sends_composed_query_for_raindrops() {
    let body = r#"{"result":true,"items":[{"_id":1,"title":"A","link":"https://a.dev","collection":{"$id":-1}}],"count":1}"#;
    let (base, head) = serve_once("200 OK", body).await;

    let query = RaindropQuery::compose(&SearchFilters::new(-1, ""), 0, 25);
    let response = client(&base).get_raindrops(&query).await.unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.items[0].collection_id(), -1);

    let head = head.await.unwrap();
    assert!(
        head.starts_with("GET /rest/v1/raindrops/-1?page=0&perpage=25&sort=-created&nested=false HTTP/1.1"),
        "{head}"
    );
}

#[rstest]
#[case("401 Unauthorized", ApiError::Unauthorized)]
#[case("429 Too Many Requests", ApiError::RateLimited)]
#[case("503 Service Unavailable", ApiError::ServerUnavailable(503))]
#[case("404 Not Found", ApiError::RequestFailed(404))]
#[tokio::test]
async fn request_classifies_error_statuses(#[case] status: &'static str, #[case] expected: ApiError) {
    let (base, _head) = serve_once(status, "{}").await;
    let err = client(&base).get_root_collections().await.unwrap_err();
    assert_eq!(err, expected);
}

#[tokio::test]
async fn request_reports_undecodable_body() {
    let (base, _head) = serve_once("200 OK", "<html>maintenance</html>").await;
    let err = client(&base).get_root_collections().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn request_reports_refused_connection_as_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr)).get_root_collections().await.unwrap_err();
    assert!(matches!(err, ApiError::NetworkUnreachable(_)), "{err:?}");
}
