use std::sync::Arc;

use chrono::{Local, TimeZone};
use serde_json::json;
use waview::core::action::{Action, Effect, perform_fetch, update};
use waview::core::message::{FALLBACK_TEXT, MAX_MESSAGES};
use waview::core::state::{App, Theme, ViewState};
use waview::remote::{FetchError, HttpMessageSource, MessageSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const FEED_PATH: &str = "/users/wp-messages";

fn source_for(server: &MockServer) -> HttpMessageSource {
    HttpMessageSource::new(format!("{}{}", server.uri(), FEED_PATH), None)
}

/// Drives one full lookup: phone change → fetch → completion.
async fn lookup(source: Arc<dyn MessageSource>, phone: &str) -> App {
    let mut app = App::new(source.clone(), Theme::Dark);
    let effect = update(&mut app, Action::PhoneChanged(phone.to_string()));
    let Effect::SpawnFetch { seq, phone } = effect else {
        panic!("expected a fetch, got {effect:?}");
    };
    let completion = perform_fetch(source.as_ref(), seq, &phone).await;
    update(&mut app, completion);
    app
}

// ============================================================================
// Successful lookups
// ============================================================================

#[tokio::test]
async fn test_lookup_loads_messages() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("phone", "15550001234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "message": "hi", "timestamp": 1700000000000i64}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = lookup(Arc::new(source_for(&mock_server)), "15550001234").await;

    let ViewState::Loaded(messages) = &app.view else {
        panic!("expected Loaded, got {:?}", app.view);
    };
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "hi");
    let expected = Local
        .timestamp_millis_opt(1_700_000_000_000)
        .unwrap()
        .format("%H:%M")
        .to_string();
    assert_eq!(messages[0].timestamp, expected);
    assert_eq!(app.status_message, "Connected: 15550001234");
}

#[tokio::test]
async fn test_request_encodes_phone_and_sends_json_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("phone", "+1 555 0100"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server);
    assert!(
        source
            .request_url("  +1 555 0100 ")
            .ends_with("?phone=%2B1%20555%200100")
    );

    let records = source.fetch_records("  +1 555 0100 ").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_lookup_caps_at_six_messages() {
    let mock_server = MockServer::start().await;
    let data: Vec<_> = (1..=8)
        .map(|i| json!({"id": i, "message": format!("message {i}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(&mock_server)
        .await;

    let app = lookup(Arc::new(source_for(&mock_server)), "5551234").await;

    let messages = app.view.messages();
    assert_eq!(messages.len(), MAX_MESSAGES);
    assert_eq!(messages[0].text, "message 1");
    assert_eq!(messages[5].text, "message 6");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server);
    let err = source.fetch_records("5551234").await.unwrap_err();
    assert_eq!(err, FetchError::Status { status: 500 });
    assert!(err.to_string().contains("500"));

    let app = lookup(Arc::new(source), "5551234").await;
    assert_eq!(app.view.error_detail(), Some("HTTP error! status: 500"));
    assert_eq!(app.status_message, "Offline");
}

#[tokio::test]
async fn test_missing_data_field_is_a_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": []})))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server)
        .fetch_records("5551234")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server)
        .fetch_records("5551234")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_endpoint_shows_fallback() {
    // Bind then drop a listener so nothing answers on the port
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let source = Arc::new(HttpMessageSource::new(
        format!("http://{addr}{FEED_PATH}"),
        None,
    ));

    let app = lookup(source, "5551234").await;

    assert!(matches!(app.view, ViewState::Error { .. }));
    let messages = app.view.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, FALLBACK_TEXT);
    assert!(
        app.view
            .error_detail()
            .is_some_and(|detail| detail.starts_with("network error"))
    );
}

#[tokio::test]
async fn test_empty_phone_never_hits_the_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server)
        .fetch_records("   ")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Validation(_)));
}
