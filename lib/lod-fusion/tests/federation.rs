//! End-to-end tests against mocked SPARQL endpoints.
//!
//! The probe and the main query are told apart by body content: the main
//! query always carries the namespace prologue (`PREFIX`), the canary never
//! does.

use lod_fusion::sparql::EndpointOutcome;
use lod_fusion::LodClient;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBE_JSON: &str = r#"{
  "head": { "vars": ["x"] },
  "results": {
    "bindings": [
      { "x": { "type": "uri", "value": "http://example.com/anything" } }
    ]
  }
}"#;

const EMPTY_JSON: &str = r#"{
  "head": { "vars": ["x"] },
  "results": { "bindings": [] }
}"#;

const URIS_JSON: &str = r#"{
  "head": { "vars": ["uri"] },
  "results": {
    "bindings": [
      { "uri": { "type": "uri", "value": "http://example.com/a" } },
      { "uri": { "type": "uri", "value": "http://example.com/b" } }
    ]
  }
}"#;

fn sparql_json(body: &'static str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/sparql-results+json")
}

/// A server that passes the probe and answers the main query with
/// `URIS_JSON`.
async fn healthy_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("PREFIX"))
        .respond_with(sparql_json(URIS_JSON))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(sparql_json(PROBE_JSON))
        .with_priority(2)
        .mount(&server)
        .await;
    server
}

async fn client_for(endpoints: &[(&str, &MockServer)]) -> LodClient {
    LodClient::builder()
        .endpoints(
            endpoints
                .iter()
                .map(|(name, server)| ((*name).to_owned(), server.uri())),
        )
        .build()
        .expect("client construction must succeed")
}

#[tokio::test]
async fn one_unreachable_endpoint_does_not_affect_the_other() {
    let up = healthy_server().await;

    let down = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;

    let client = client_for(&[("Up", &up), ("Down", &down)]).await;
    let results = client.sub_classes("dbo:Artist", Some(10)).await.unwrap();

    assert_eq!(results.iter().count(), 2);
    match results.get("Up") {
        Some(EndpointOutcome::Success(rows)) => assert_eq!(rows.len(), 2),
        other => panic!("expected success for Up, got {other:?}"),
    }
    assert!(matches!(
        results.get("Down"),
        Some(EndpointOutcome::Unreachable)
    ));
}

#[tokio::test]
async fn a_failed_probe_short_circuits_the_main_query() {
    let server = MockServer::start().await;
    // The probe answers but with zero rows; the prologue-carrying main
    // query must never arrive.
    Mock::given(method("POST"))
        .and(body_string_contains("PREFIX"))
        .respond_with(sparql_json(URIS_JSON))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(sparql_json(EMPTY_JSON))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[("Empty", &server)]).await;
    let results = client.classes(None).await;

    assert!(matches!(
        results.get("Empty"),
        Some(EndpointOutcome::Unreachable)
    ));
}

#[tokio::test]
async fn a_query_failure_after_a_live_probe_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("PREFIX"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(sparql_json(PROBE_JSON))
        .with_priority(2)
        .mount(&server)
        .await;

    let client = client_for(&[("Flaky", &server)]).await;
    let results = client.classes(None).await;

    assert!(matches!(
        results.get("Flaky"),
        Some(EndpointOutcome::ExecutionFailed)
    ));
}

#[tokio::test]
async fn invalid_arguments_fail_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sparql_json(PROBE_JSON))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&[("Quiet", &server)]).await;
    let error = client.sub_classes("   ", None).await.unwrap_err();

    assert_eq!(error.parameter(), "super_class");
}

#[tokio::test]
async fn the_main_query_carries_prologue_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("PREFIX"))
        .and(body_string_contains("rdfs%3AsubClassOf"))
        .and(body_string_contains("LIMIT+7"))
        .respond_with(sparql_json(URIS_JSON))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(sparql_json(PROBE_JSON))
        .with_priority(2)
        .mount(&server)
        .await;

    let client = client_for(&[("Checked", &server)]).await;
    let results = client.sub_classes("dbo:Artist", Some(7)).await.unwrap();

    assert!(results.get("Checked").is_some_and(EndpointOutcome::is_success));
}

#[tokio::test]
async fn raw_queries_fan_out_to_every_endpoint() {
    let first = healthy_server().await;
    let second = healthy_server().await;

    let client = client_for(&[("First", &first), ("Second", &second)]).await;
    let results = client
        .select_with("SELECT DISTINCT ?s WHERE { ?s ?p ?o }", Some(5))
        .await
        .unwrap();

    assert_eq!(results.successes().count(), 2);

    let blank = client.select_with("   ", None).await.unwrap_err();
    assert_eq!(blank.parameter(), "query");
}

#[tokio::test]
async fn identical_dispatches_yield_identical_outcomes() {
    let up = healthy_server().await;
    let client = client_for(&[("Up", &up)]).await;

    let first = client.sub_classes("dbo:Artist", Some(10)).await.unwrap();
    let second = client.sub_classes("dbo:Artist", Some(10)).await.unwrap();

    assert_eq!(first.len(), second.len());
    for ((name_a, a), (name_b, b)) in first.iter().zip(second.iter()) {
        assert_eq!(name_a, name_b);
        assert_eq!(a.is_success(), b.is_success());
        assert_eq!(
            a.solutions().map(<[_]>::len),
            b.solutions().map(<[_]>::len)
        );
    }
}

#[tokio::test]
async fn single_endpoint_selects_surface_execution_errors() {
    let up = healthy_server().await;
    let client = client_for(&[("Up", &up)]).await;

    let rows = client
        .select_at(&up.uri(), "SELECT DISTINCT ?uri WHERE { ?uri ?p ?o }", Some(2))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let down = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;
    let error = client
        .select_at(&down.uri(), "SELECT DISTINCT ?uri WHERE { ?uri ?p ?o }", None)
        .await
        .unwrap_err();
    assert!(matches!(error, lod_fusion::QueryError::Execution(_)));
}

#[tokio::test]
async fn endpoint_liveness_can_be_checked_directly() {
    let up = healthy_server().await;
    let client = client_for(&[("Up", &up)]).await;

    assert!(client.is_endpoint_live(&up.uri()).await);

    let down = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;
    assert!(!client.is_endpoint_live(&down.uri()).await);
}
