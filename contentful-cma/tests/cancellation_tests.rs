mod common;

use common::*;
use contentful_cma::model::ContentType;
use contentful_cma::{CancellationToken, Client, CmaError};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pending_client() -> Client {
    Client::with_transport(test_config("http://unused"), PendingTransport).unwrap()
}

#[tokio::test(start_paused = true)]
async fn cancelling_in_flight_upsert_leaves_copy_untouched() {
    let client = pending_client();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let mut ct = content_type_fixture("content_type.json");
    ct.name = "local edit".into();
    let before = ct.clone();

    let err = client
        .content_types()
        .upsert(SPACE, &mut ct, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, CmaError::Cancelled));
    assert_eq!(ct, before);
}

#[tokio::test(start_paused = true)]
async fn cancelling_in_flight_page_keeps_cursor_position() {
    let client = pending_client();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let mut cursor = client.content_types().list(SPACE);
    let err = cursor.next(&cancel).await.unwrap_err();

    assert!(matches!(err, CmaError::Cancelled));
    assert_eq!(cursor.next_skip(), 0);
    assert!(!cursor.is_exhausted());
}

#[tokio::test]
async fn already_cancelled_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut ct = ContentType::new("never sent");
    let err = client
        .content_types()
        .upsert(SPACE, &mut ct, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, CmaError::Cancelled));
    assert!(ct.sys.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn slow_response_is_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture("content_type.json"))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client
        .content_types()
        .get(SPACE, CONTENT_TYPE_ID, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, CmaError::Cancelled));
}
