//! Integration tests for the incremental lookup stream against a mock
//! lookup service.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use pretty_assertions::assert_eq;
use wikilinks_core::LookupStream;
use wikilinks_core::LookupUpdate;
use wikilinks_core::PathClient;
use wikilinks_core::ServiceConfig;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_string;
use wiremock::matchers::method;
use wiremock::matchers::path;

type Captured = Arc<Mutex<Vec<LookupUpdate>>>;

fn stream_for(server: &MockServer) -> (LookupStream, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let captured_clone = Arc::clone(&captured);
    let client = Arc::new(PathClient::new(ServiceConfig::single_host(server.uri())));
    let stream = LookupStream::new(
        client,
        Arc::new(move |update| {
            #[expect(clippy::unwrap_used)]
            captured_clone.lock().unwrap().push(update);
        }),
    );
    (stream, captured)
}

#[expect(clippy::unwrap_used)]
fn drain(captured: &Captured) -> Vec<LookupUpdate> {
    captured.lock().unwrap().drain(..).collect()
}

/// Poll until `predicate` holds or the deadline passes.
async fn wait_until(predicate: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn stale_response_is_suppressed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%sta%"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Stale Article")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%star%"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Starfish\nStar Wars"))
        .mount(&server)
        .await;

    let (mut stream, captured) = stream_for(&server);

    // Two rapid edits: the first lookup is superseded before its delayed
    // response can arrive.
    stream.set_text("sta");
    stream.set_text("star");

    assert!(wait_until(|| !captured.lock().map(|c| c.is_empty()).unwrap_or(true)).await);
    for update in drain(&captured) {
        stream.apply(update);
    }
    assert_eq!(stream.suggestions(), ["Starfish", "Star Wars"]);

    // Give the superseded request time to have settled; the list must be
    // unchanged and no further update may have been delivered.
    tokio::time::sleep(Duration::from_millis(400)).await;
    for update in drain(&captured) {
        assert!(!stream.apply(update));
    }
    assert_eq!(stream.suggestions(), ["Starfish", "Star Wars"]);
    assert!(!stream.is_loading());
}

#[tokio::test]
async fn pending_counter_settles_to_zero_under_churn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Article")
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let (mut stream, _captured) = stream_for(&server);

    for text in ["a", "ab", "abc", "abcd", "abcde"] {
        stream.set_text(text);
    }
    assert!(stream.is_loading());

    assert!(wait_until(|| !stream.is_loading()).await);
}

#[tokio::test]
async fn reselecting_identical_text_dispatches_again() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%Alpha%"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Alpha"))
        .expect(2)
        .mount(&server)
        .await;

    let (mut stream, captured) = stream_for(&server);

    // Typed edit, then selecting a suggestion with the very same text:
    // both must hit the service.
    stream.set_text("Alpha");
    assert!(wait_until(|| !stream.is_loading()).await);
    stream.set_text("Alpha");
    assert!(wait_until(|| !stream.is_loading()).await);

    assert!(wait_until(|| captured.lock().map(|c| c.len() == 2).unwrap_or(false)).await);
    server.verify().await;
}

#[tokio::test]
async fn empty_text_still_triggers_a_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%%"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Aardvark\nZebra"))
        .mount(&server)
        .await;

    let (mut stream, captured) = stream_for(&server);
    stream.set_text("");

    assert!(wait_until(|| !captured.lock().map(|c| c.is_empty()).unwrap_or(true)).await);
    for update in drain(&captured) {
        assert!(stream.apply(update));
    }
    assert_eq!(stream.suggestions(), ["Aardvark", "Zebra"]);
}

#[tokio::test]
async fn empty_response_body_clears_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let (mut stream, captured) = stream_for(&server);
    stream.set_text("no such article");

    assert!(wait_until(|| !captured.lock().map(|c| c.is_empty()).unwrap_or(true)).await);
    for update in drain(&captured) {
        stream.apply(update);
    }
    assert_eq!(stream.suggestions(), Vec::<String>::new());
}

#[tokio::test]
async fn failed_lookup_keeps_previous_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%ok%"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Okapi"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("%boom%"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut stream, captured) = stream_for(&server);

    stream.set_text("ok");
    assert!(wait_until(|| !captured.lock().map(|c| c.is_empty()).unwrap_or(true)).await);
    for update in drain(&captured) {
        stream.apply(update);
    }
    assert_eq!(stream.suggestions(), ["Okapi"]);

    // A failing lookup settles silently: loading clears, no update is
    // delivered, the previous list stays.
    stream.set_text("boom");
    assert!(wait_until(|| !stream.is_loading()).await);
    assert!(drain(&captured).is_empty());
    assert_eq!(stream.suggestions(), ["Okapi"]);
}

#[tokio::test]
async fn transport_failure_settles_without_update() {
    // Nothing is listening on this address.
    let client = Arc::new(PathClient::new(ServiceConfig::single_host(
        "http://127.0.0.1:9",
    )));
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let captured_clone = Arc::clone(&captured);
    let mut stream = LookupStream::new(
        client,
        Arc::new(move |update| {
            #[expect(clippy::unwrap_used)]
            captured_clone.lock().unwrap().push(update);
        }),
    );

    stream.set_text("anything");
    assert!(wait_until(|| !stream.is_loading()).await);
    assert!(drain(&captured).is_empty());
    assert!(stream.suggestions().is_empty());
}
