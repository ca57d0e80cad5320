use botpulse_shared_models::StatisticsSnapshot;
use botpulse_stats_api::stats::Stats;
use botpulse_stats_api::{FetchError, StatsApiClient};
use serde_json::json;
use tokio::test;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
pub async fn fetch_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post_count": 5,
            "reply_count": 3,
            "mention_count": 1,
            "image_response_count": 2,
            "text_response_count": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StatsApiClient::new(&server.uri()).expect("Failed to build client");

    let response = client
        .call0::<Stats>()
        .await
        .expect("Failed to fetch stats");

    assert_eq!(
        response,
        StatisticsSnapshot {
            post_count: 5,
            reply_count: 3,
            mention_count: 1,
            text_response_count: 7,
            image_response_count: 2,
        }
    );
}

#[test]
pub async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = StatsApiClient::new(&server.uri()).expect("Failed to build client");

    match client.fetch_stats().await {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
pub async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = StatsApiClient::new(&server.uri()).expect("Failed to build client");

    let err = client.fetch_stats().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[test]
pub async fn payload_missing_a_counter_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post_count": 5,
            "reply_count": 3,
            "mention_count": 1
        })))
        .mount(&server)
        .await;

    let client = StatsApiClient::new(&server.uri()).expect("Failed to build client");

    let err = client.fetch_stats().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[test]
pub async fn unreachable_endpoint_is_a_request_error() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        format!("http://{}", listener.local_addr().expect("No local addr"))
    };

    let client = StatsApiClient::new(&uri).expect("Failed to build client");

    let err = client.fetch_stats().await.unwrap_err();
    assert!(matches!(err, FetchError::Request(_)), "{err:?}");
}
