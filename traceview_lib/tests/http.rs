//! End-to-end tests against a mock TraceView API.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::time::Duration;
use traceview_lib::{AnnotationOptions, AssignOptions, Config, Error, Query, TraceView};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn setup() -> (MockServer, TraceView) {
    init_tracing();
    let server = MockServer::start().await;
    let config = Config::default().with_authority(server.uri());
    let tv = TraceView::with_config("ABC123", &config).expect("client");
    (server, tv)
}

fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": data, "response": "ok"}))
}

/// Every read operation, with representative arguments.
async fn read_all(tv: &TraceView) -> Vec<Result<Value, Error>> {
    let q = Query::new;
    vec![
        tv.actions.get(q()).await,
        tv.apps.get(q()).await,
        tv.browsers.get(q()).await,
        tv.controllers.get(q()).await,
        tv.domains.get(q()).await,
        tv.metrics.get(q()).await,
        tv.regions.get(q()).await,
        tv.organization.get(q()).await,
        tv.organization.users.get(q()).await,
        tv.organization.licenses.get(q()).await,
        tv.layers.get("Default", q()).await,
        tv.hosts.get(None, q()).await,
        tv.hosts.get(Some("Default"), q()).await,
        tv.hosts.versions("1", q()).await,
        tv.errors.rate("Default", q()).await,
        tv.total_requests.series("Default", q()).await,
        tv.total_requests.summary("Default", q()).await,
        tv.annotations.get(None, q()).await,
        tv.annotations.get(Some("Default"), q()).await,
        tv.latency.server.series("Default", q()).await,
        tv.latency.server.summary("Default", q()).await,
        tv.latency.server.by_layer("Default", q()).await,
        tv.latency.client.series("Default", q()).await,
        tv.latency.client.summary("Default", q()).await,
    ]
}

// ============================================================================
// Payloads
// ============================================================================

#[tokio::test]
async fn listings_return_data_unchanged() {
    let (server, tv) = setup().await;
    let data = json!([{"name": "Default"}, {"name": "shop", "hosts": 3}]);
    Mock::given(method("GET"))
        .and(query_param("key", "ABC123"))
        .respond_with(envelope(data.clone()))
        .mount(&server)
        .await;

    let results = read_all(&tv).await;
    assert_eq!(results.len(), 24);
    for result in results {
        assert_eq!(result.expect("payload"), data);
    }
}

#[tokio::test]
async fn forbidden_is_an_http_error_everywhere() {
    let (server, tv) = setup().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"data": {"foo": "bar"}, "response": "ok"})),
        )
        .mount(&server)
        .await;

    for result in read_all(&tv).await {
        match result {
            Err(Error::Http(e)) => {
                assert_eq!(e.status, 403);
                assert!(e.is_auth_failure());
                assert!(e.body.contains("foo"));
                assert!(!e.url.contains("ABC123"), "key leaked into {}", e.url);
            }
            other => panic!("expected HttpError, got {:?}", other),
        }
    }
    let writes = [
        tv.delete_host("1").await,
        tv.delete_app("shop").await,
        tv.annotate("hi", &AnnotationOptions::default()).await,
        tv.assign_app("h", "a", &AssignOptions::default()).await,
    ];
    for result in writes {
        assert_eq!(result.unwrap_err().status(), Some(403));
    }
}

#[tokio::test]
async fn not_found_and_server_errors_are_distinguishable() {
    let (server, tv) = setup().await;
    Mock::given(path("/api-v2/layers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such app"))
        .mount(&server)
        .await;
    Mock::given(path("/api-v2/errors/Default/rate"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    match tv.layers.get("missing", Query::new()).await {
        Err(Error::Http(e)) => {
            assert!(e.is_not_found());
            assert_eq!(e.body, "no such app");
            assert!(e.url.ends_with("/api-v2/layers/missing"));
        }
        other => panic!("expected 404, got {:?}", other),
    }
    match tv.errors.rate("Default", Query::new()).await {
        Err(Error::Http(e)) => assert!(e.is_server_error()),
        other => panic!("expected 502, got {:?}", other),
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[tokio::test]
async fn layers_path_and_since_time() {
    let (server, tv) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api-v2/layers/Default"))
        .and(query_param("key", "ABC123"))
        .and(query_param("since_time", "1393675200000"))
        .respond_with(envelope(json!(["Django", "MySQL"])))
        .expect(1)
        .mount(&server)
        .await;

    let since = Utc.with_ymd_and_hms(2014, 3, 1, 12, 0, 0).unwrap();
    let layers = tv.layers_since("Default", Some(since)).await.unwrap();
    assert_eq!(layers, json!(["Django", "MySQL"]));
}

#[tokio::test]
async fn caller_key_never_overrides_credential() {
    let (server, tv) = setup().await;
    Mock::given(path("/api-v2/apps"))
        .and(query_param("key", "ABC123"))
        .respond_with(envelope(json!(["Default"])))
        .expect(1)
        .mount(&server)
        .await;

    let apps = tv.apps.get(Query::new().with("key", "OTHER")).await.unwrap();
    assert_eq!(apps, json!(["Default"]));
}

#[tokio::test]
async fn annotation_is_posted_with_message() {
    let (server, tv) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api-v2/log_message"))
        .and(query_param("message", "test annotation"))
        .and(query_param("username", "dan"))
        .respond_with(envelope(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let options = AnnotationOptions {
        username: Some("dan".to_string()),
        ..AnnotationOptions::default()
    };
    assert_eq!(tv.annotate("test annotation", &options).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn app_assign_and_delete() {
    let (server, tv) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api-v2/assign_app"))
        .and(query_param("hostname", "test.example.com"))
        .and(query_param("appname", "TEST_APP_ABC123"))
        .and(query_param("create", "true"))
        .and(query_param("layer", "test"))
        .respond_with(envelope(Value::Null))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api-v2/app/TEST_APP_ABC123"))
        .respond_with(envelope(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let options = AssignOptions {
        layer: Some("test".to_string()),
        create: Some(true),
    };
    tv.assign_app("test.example.com", "TEST_APP_ABC123", &options)
        .await
        .unwrap();
    assert_eq!(tv.delete_app("TEST_APP_ABC123").await.unwrap(), json!(true));
}

#[tokio::test]
async fn host_delete_uses_delete_verb() {
    let (server, tv) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api-v2/hosts/42"))
        .respond_with(envelope(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    tv.delete_host("42").await.unwrap();
}

// ============================================================================
// Transport behavior
// ============================================================================

#[tokio::test]
async fn redirects_are_not_followed() {
    let (server, tv) = setup().await;
    Mock::given(path("/api-v2/apps"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/elsewhere", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/elsewhere"))
        .respond_with(envelope(json!(["should not be reached"])))
        .expect(0)
        .mount(&server)
        .await;

    let err = tv.apps.get(Query::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(302));
}

#[tokio::test]
async fn no_content_is_a_null_payload() {
    let (server, tv) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api-v2/hosts/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api-v2/app/shop"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(tv.delete_host("42").await.unwrap(), Value::Null);
    assert_eq!(tv.delete_app("shop").await.unwrap(), Value::Null);
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let (server, tv) = setup().await;
    Mock::given(path("/api-v2/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    match tv.regions.get(Query::new()).await {
        Err(Error::Decode { body, .. }) => assert!(body.contains("maintenance")),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn timeout_is_reported_not_swallowed() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(path("/api-v2/organization"))
        .respond_with(envelope(json!({"name": "acme"})).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = Config {
        timeout_secs: 1,
        ..Config::default().with_authority(server.uri())
    };
    let tv = TraceView::with_config("ABC123", &config).unwrap();

    let err = tv.organization.get(Query::new()).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}
